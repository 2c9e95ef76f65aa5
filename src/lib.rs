//! A directive-driven renaming and annotation engine for generated API
//! surfaces.
//!
//! Given an in-memory entity graph ([`CodeModel`]: command operations with
//! virtual parameters, schemas with virtual properties and enum definitions)
//! and a list of user-authored directives (selector + mutation pairs as JSON
//! records), the engine:
//!
//! 1. classifies each record into one of three shapes (command, model, enum),
//!    rejecting records that mix vocabularies;
//! 2. compiles each selector string into a literal (anchored, whole-string)
//!    or pattern (verbatim regex) predicate, both case-insensitive;
//! 3. narrows the entity collections through a cascade of per-field predicate
//!    stages and applies renames / redescriptions / hiding, with `$n`
//!    back-references when the selector was a pattern;
//! 4. runs one final pass that makes every operation's derived identity
//!    unique, numbering collisions deterministically.
//!
//! ```
//! use restyle::{CodeModel, Operation, apply_directives};
//! use serde_json::json;
//!
//! let mut model = CodeModel {
//!     operations: vec![Operation { verb: "Get".into(), subject: "Widget".into(), ..Default::default() }],
//!     schemas: Vec::new(),
//! };
//! let directives = [json!({"select": "command", "where": {"verb": "Get"}, "set": {"verb": "Fetch"}})];
//!
//! apply_directives(&mut model, &directives).unwrap();
//! assert_eq!(model.operations[0].verb, "Fetch");
//! ```

#[macro_use]
mod macros;

mod api;
mod directive;
mod engine;
mod error;
mod model;
mod report;
mod selector;

pub use api::{Engine, apply_directives};
pub use directive::{
    Classified, CommandDirective, CommandSet, CommandTarget, CommandWhere, EnumDirective, EnumSet,
    EnumWhere, ModelDirective, ModelSet, ModelTarget, ModelWhere, classify,
};
pub use error::DirectiveError;
pub use model::{
    CodeModel, EnumDef, EnumValue, Operation, Schema, VirtualParameter, VirtualProperty,
};
pub use report::Changelog;
