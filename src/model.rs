//! The entity graph the engine rewrites.
//!
//! These types mirror the generated surface of an API: commands
//! ([`Operation`]s) with their virtual parameters, and schemas with their
//! virtual properties and optional enum definitions. The engine only ever
//! rewrites string and boolean fields in place; it never creates or destroys
//! entities. Everything is serde-(de)serializable because the surrounding
//! pipeline exchanges the model as JSON.

use serde::{Deserialize, Serialize};

/// The full entity graph for one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodeModel {
    /// All command operations, in generation order.
    #[serde(default)]
    pub operations: Vec<Operation>,
    /// All schemas (models), in generation order. A schema carrying an
    /// [`EnumDef`] doubles as an enum definition whose name is the schema name.
    #[serde(default)]
    pub schemas: Vec<Schema>,
}

/// A generated command operation.
///
/// `verb`, `subject_prefix`, `subject` and `variant` jointly form the derived
/// command name (see [`Operation::command_name`]), which must be unique across
/// the whole model once all directives have run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub verb: String,
    #[serde(default)]
    pub subject_prefix: String,
    pub subject: String,
    #[serde(default)]
    pub variant: String,
    /// Hidden operations are generated but not surfaced to users.
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub parameters: Vec<VirtualParameter>,
}

impl Operation {
    /// Derived command name: `verb-subjectPrefix+subject[_variant]`.
    pub fn command_name(&self) -> String {
        if self.variant.is_empty() {
            format!("{}-{}{}", self.verb, self.subject_prefix, self.subject)
        } else {
            format!("{}-{}{}_{}", self.verb, self.subject_prefix, self.subject, self.variant)
        }
    }

    /// Identity string used for collision detection. The prefix is cosmetic
    /// and deliberately excluded.
    pub(crate) fn identity(&self) -> String {
        if self.variant.is_empty() {
            format!("{}-{}", self.verb, self.subject)
        } else {
            format!("{}-{}_{}", self.verb, self.subject, self.variant)
        }
    }
}

/// A parameter as exposed in the generated surface, distinct from its
/// underlying API-level definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VirtualParameter {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// A schema (model) in the generated surface.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub name: String,
    #[serde(default)]
    pub properties: Vec<VirtualProperty>,
    /// Present when this schema is an enum; the enum's name is `name`.
    #[serde(default, rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_def: Option<EnumDef>,
}

/// A property as exposed in the generated surface.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VirtualProperty {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// The value list of an enum schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnumDef {
    #[serde(default)]
    pub values: Vec<EnumValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnumValue {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_name_with_and_without_variant() {
        let mut op = Operation {
            verb: "Get".into(),
            subject_prefix: "Az".into(),
            subject: "Widget".into(),
            ..Default::default()
        };
        assert_eq!(op.command_name(), "Get-AzWidget");

        op.variant = "ViaIdentity".into();
        assert_eq!(op.command_name(), "Get-AzWidget_ViaIdentity");
    }

    #[test]
    fn identity_ignores_subject_prefix() {
        let op = Operation {
            verb: "Get".into(),
            subject_prefix: "Az".into(),
            subject: "Widget".into(),
            variant: "1".into(),
            ..Default::default()
        };
        assert_eq!(op.identity(), "Get-Widget_1");
    }

    #[test]
    fn model_round_trips_through_json() {
        let model = CodeModel {
            operations: vec![Operation {
                verb: "Get".into(),
                subject: "Widget".into(),
                parameters: vec![VirtualParameter { name: "Id".into(), description: String::new() }],
                ..Default::default()
            }],
            schemas: vec![Schema {
                name: "Color".into(),
                properties: Vec::new(),
                enum_def: Some(EnumDef { values: vec![EnumValue { name: "Red".into() }] }),
            }],
        };

        let json = serde_json::to_string(&model).unwrap();
        let back: CodeModel = serde_json::from_str(&json).unwrap();
        assert_eq!(back, model);
    }
}
