//! Public entry points.
//!
//! An [`Engine`] is a classified, validated directive list, built once from
//! raw JSON records and applicable to any number of models. Holding the
//! directives on a value (rather than in module state) keeps runs independent
//! and repeatable.

use crate::directive::{Classified, classify};
use crate::engine;
use crate::error::DirectiveError;
use crate::model::CodeModel;
use crate::report::Changelog;
use serde_json::Value;

/// A ready-to-run directive list.
#[derive(Debug, Default)]
pub struct Engine {
    directives: Vec<Classified>,
}

impl Engine {
    /// Classify raw directive records, in order. Records matching none of the
    /// three directive shapes are dropped; a record whose keys straddle two
    /// shapes fails the whole construction.
    pub fn from_values(raw: &[Value]) -> Result<Engine, DirectiveError> {
        let mut directives = Vec::with_capacity(raw.len());
        for value in raw {
            match classify(value)? {
                Classified::Unrecognized => {}
                directive => directives.push(directive),
            }
        }
        Ok(Engine { directives })
    }

    /// Number of accepted directives.
    pub fn directive_count(&self) -> usize {
        self.directives.len()
    }

    /// Apply every directive in list order (later directives see the effects
    /// of earlier ones), then repair identity collisions exactly once.
    ///
    /// The model is mutated in place. On error the run stops where it is:
    /// mutations from earlier directives remain (no rollback).
    pub fn apply(&self, model: &mut CodeModel) -> Result<Changelog, DirectiveError> {
        let mut log = Changelog::default();

        for directive in &self.directives {
            match directive {
                Classified::Command(d) => engine::apply_command(d, model, &mut log)?,
                Classified::Model(d) => engine::apply_model(d, model, &mut log)?,
                Classified::Enum(d) => engine::apply_enum(d, model, &mut log)?,
                Classified::Unrecognized => {}
            }
        }

        engine::resolve_collisions(&mut model.operations);
        Ok(log)
    }
}

/// One-shot convenience: classify `directives` and apply them to `model`.
pub fn apply_directives(
    model: &mut CodeModel,
    directives: &[Value],
) -> Result<Changelog, DirectiveError> {
    Engine::from_values(directives)?.apply(model)
}
