//! Directive execution engine.
//!
//! This module holds the three entity filter cascades and the final collision
//! pass. Each cascade follows the same shape: start from the full entity
//! collection, intersect with every compiled selector in turn, then either
//! drop down one granularity level (parameters, properties, enum values) or
//! mutate the matched parents directly.
//!
//! ```text
//! directives (classified)        model (mutable)
//!        │                            │
//!        v                            v
//!   commands.rs ── operations ── parameters
//!   models.rs   ── schemas ───── properties
//!   enums.rs    ── enum schemas ─ values
//!        │
//!        v   (once, after every directive has run)
//!   collisions.rs ── unique derived identities
//! ```
//!
//! All name mutation goes through the shared replacement rule in
//! `crate::selector::substitute`, so back-reference behavior is identical
//! across entity kinds. The cascades report each change on the run's
//! [`crate::Changelog`].

#[path = "engine/collisions.rs"]
mod collisions;
#[path = "engine/commands.rs"]
mod commands;
#[path = "engine/enums.rs"]
mod enums;
#[path = "engine/models.rs"]
mod models;


pub(crate) use collisions::resolve_collisions;
pub(crate) use commands::apply_command;
pub(crate) use enums::apply_enum;
pub(crate) use models::apply_model;
