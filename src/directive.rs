//! Directive records and their classification.
//!
//! A directive is an arbitrary JSON record pairing a `where` selector block
//! with a `set` mutation block, plus an optional `select` hint. [`classify`]
//! decides which of three mutually exclusive shapes the record is — command,
//! model or enum — and returns a typed directive, or [`Classified::Unrecognized`]
//! when the record matches none of them (unrecognized records are dropped,
//! never an error). The only fatal case is a record whose keys straddle two
//! families: that raises a [`DirectiveError::ShapeConflict`] naming every
//! offending combination.
//!
//! Field presence is explicit: a selector or replacement is "present" when its
//! key maps to a non-empty string. The single exception is `subject-prefix`
//! inside `set`, where the empty string is a legal replacement (it erases the
//! prefix). `hidden` is tracked as `Option<bool>` so an explicit `false` is
//! distinguishable from "not set".

use crate::error::DirectiveError;
use serde_json::{Map, Value};

/// Granularity a command directive operates at when it carries a
/// `parameter-name` selector. Explicit `select: "command"` keeps the operation
/// as the target (the parameter acts as a filter on its parent); unset or
/// `select: "parameter"` targets the parameters themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandTarget {
    Command,
    Parameter,
}

/// Granularity a model directive operates at when it carries a
/// `property-name` selector. Only an explicit `select: "model"` keeps the
/// schema as the target; unset falls through to the properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelTarget {
    Model,
    Property,
}

#[derive(Debug, Clone, Default)]
pub struct CommandWhere {
    pub subject: Option<String>,
    pub subject_prefix: Option<String>,
    pub verb: Option<String>,
    pub variant: Option<String>,
    pub parameter_name: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CommandSet {
    pub subject: Option<String>,
    /// May be `Some("")`: the prefix is the one field a directive can erase.
    pub subject_prefix: Option<String>,
    pub verb: Option<String>,
    pub variant: Option<String>,
    pub hidden: Option<bool>,
    pub parameter_name: Option<String>,
    pub parameter_description: Option<String>,
}

/// A directive aimed at operations and their virtual parameters.
#[derive(Debug, Clone)]
pub struct CommandDirective {
    pub target: CommandTarget,
    pub where_: CommandWhere,
    pub set: CommandSet,
}

#[derive(Debug, Clone, Default)]
pub struct ModelWhere {
    pub model_name: Option<String>,
    pub property_name: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ModelSet {
    pub model_name: Option<String>,
    pub property_name: Option<String>,
    pub property_description: Option<String>,
}

/// A directive aimed at schemas and their virtual properties.
#[derive(Debug, Clone)]
pub struct ModelDirective {
    pub target: ModelTarget,
    pub where_: ModelWhere,
    pub set: ModelSet,
}

#[derive(Debug, Clone, Default)]
pub struct EnumWhere {
    pub enum_name: Option<String>,
    pub enum_value_name: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct EnumSet {
    pub enum_name: Option<String>,
    pub enum_value_name: Option<String>,
}

/// A directive aimed at enum schemas and their values.
#[derive(Debug, Clone)]
pub struct EnumDirective {
    pub where_: EnumWhere,
    pub set: EnumSet,
}

/// Outcome of classifying one raw directive record.
#[derive(Debug, Clone)]
pub enum Classified {
    Command(CommandDirective),
    Model(ModelDirective),
    Enum(EnumDirective),
    /// The record matches none of the three shapes. Dropped, not an error.
    Unrecognized,
}

/// Classify a raw directive record into one of the three directive shapes.
///
/// Shapes are tried in order command, model, enum; the first one whose
/// selector and mutation vocabulary both appear wins. A record missing `where`
/// or `set` (or matching no shape) is [`Classified::Unrecognized`].
pub fn classify(raw: &Value) -> Result<Classified, DirectiveError> {
    let (Some(where_), Some(set)) = (object(raw, "where"), object(raw, "set")) else {
        return Ok(Classified::Unrecognized);
    };
    let select = raw.get("select").and_then(Value::as_str);

    if let Some(directive) = as_command(raw, select, where_, set)? {
        return Ok(Classified::Command(directive));
    }
    if let Some(directive) = as_model(raw, select, where_, set)? {
        return Ok(Classified::Model(directive));
    }
    if let Some(directive) = as_enum(raw, select, where_, set)? {
        return Ok(Classified::Enum(directive));
    }

    Ok(Classified::Unrecognized)
}

fn as_command(
    raw: &Value,
    select: Option<&str>,
    where_: &Map<String, Value>,
    set: &Map<String, Value>,
) -> Result<Option<CommandDirective>, DirectiveError> {
    if !matches!(select, None | Some("command") | Some("parameter")) {
        return Ok(None);
    }

    let w = CommandWhere {
        subject: string_key(where_, "subject"),
        subject_prefix: string_key(where_, "subject-prefix"),
        verb: string_key(where_, "verb"),
        variant: string_key(where_, "variant"),
        parameter_name: string_key(where_, "parameter-name"),
    };
    let s = CommandSet {
        subject: string_key(set, "subject"),
        subject_prefix: string_key_allow_empty(set, "subject-prefix"),
        verb: string_key(set, "verb"),
        variant: string_key(set, "variant"),
        hidden: set.get("hidden").and_then(Value::as_bool),
        parameter_name: string_key(set, "parameter-name"),
        parameter_description: string_key(set, "parameter-description"),
    };

    let mutates = s.parameter_name.is_some()
        || s.hidden.is_some()
        || s.subject.is_some()
        || s.parameter_description.is_some()
        || s.verb.is_some()
        || s.variant.is_some()
        || s.subject_prefix.is_some();
    let selects = w.verb.is_some()
        || w.variant.is_some()
        || w.parameter_name.is_some()
        || w.subject.is_some()
        || w.subject_prefix.is_some();
    if !(mutates && selects) {
        return Ok(None);
    }

    let mut reason = String::new();
    if where_.contains_key("model-name") {
        reason.push_str("Can't select model and command at the same time. ");
    }
    if where_.contains_key("property-name") {
        reason.push_str("Can't select property and command at the same time. ");
    }
    if set.contains_key("property-name") {
        reason.push_str("Can't set a property-name when a command is selected. ");
    }
    if set.contains_key("property-description") {
        reason.push_str("Can't set a property-description when a command is selected. ");
    }
    if set.contains_key("model-name") {
        reason.push_str("Can't set a model-name when a command is selected. ");
    }
    if !reason.is_empty() {
        return Err(shape_conflict(raw, &reason));
    }

    let target =
        if select == Some("command") { CommandTarget::Command } else { CommandTarget::Parameter };
    Ok(Some(CommandDirective { target, where_: w, set: s }))
}

fn as_model(
    raw: &Value,
    select: Option<&str>,
    where_: &Map<String, Value>,
    set: &Map<String, Value>,
) -> Result<Option<ModelDirective>, DirectiveError> {
    if !matches!(select, None | Some("model") | Some("property")) {
        return Ok(None);
    }

    let w = ModelWhere {
        model_name: string_key(where_, "model-name"),
        property_name: string_key(where_, "property-name"),
    };
    let s = ModelSet {
        model_name: string_key(set, "model-name"),
        property_name: string_key(set, "property-name"),
        property_description: string_key(set, "property-description"),
    };

    let mutates = s.model_name.is_some() || s.property_description.is_some() || s.property_name.is_some();
    let selects = w.model_name.is_some() || w.property_name.is_some();
    if !(mutates && selects) {
        return Ok(None);
    }

    let mut reason = String::new();
    if ["subject", "subject-prefix", "verb", "variant"].iter().any(|k| where_.contains_key(*k)) {
        reason.push_str("Can't select model and command at the same time. ");
    }
    if where_.contains_key("parameter-name") {
        reason.push_str("Can't select a parameter and command at the same time. ");
    }
    if set.contains_key("subject") {
        reason.push_str("Can't set command subject when a model is selected. ");
    }
    if set.contains_key("subject-prefix") {
        reason.push_str("Can't set command subject-prefix when a model is selected. ");
    }
    if set.contains_key("verb") {
        reason.push_str("Can't set command verb when a model is selected. ");
    }
    if set.contains_key("variant") {
        reason.push_str("Can't set command variant when a model is selected. ");
    }
    if set.contains_key("hidden") {
        reason.push_str("Can't hide a command when a model is selected. ");
    }
    if !reason.is_empty() {
        return Err(shape_conflict(raw, &reason));
    }

    let target = if select == Some("model") { ModelTarget::Model } else { ModelTarget::Property };
    Ok(Some(ModelDirective { target, where_: w, set: s }))
}

fn as_enum(
    raw: &Value,
    select: Option<&str>,
    where_: &Map<String, Value>,
    set: &Map<String, Value>,
) -> Result<Option<EnumDirective>, DirectiveError> {
    if !matches!(select, None | Some("enum")) {
        return Ok(None);
    }

    let w = EnumWhere {
        enum_name: string_key(where_, "enum-name"),
        enum_value_name: string_key(where_, "enum-value-name"),
    };
    let s = EnumSet {
        enum_name: string_key(set, "enum-name"),
        enum_value_name: string_key(set, "enum-value-name"),
    };

    let mutates = s.enum_name.is_some() || s.enum_value_name.is_some();
    let selects = w.enum_name.is_some() || w.enum_value_name.is_some();
    if !(mutates && selects) {
        return Ok(None);
    }

    // Coarser than the other two shapes: any key outside the enum vocabulary
    // rejects the whole record with one generic message.
    let foreign = where_
        .keys()
        .chain(set.keys())
        .any(|key| key != "enum-name" && key != "enum-value-name");
    if foreign {
        return Err(shape_conflict(
            raw,
            "Incompatible selectors and modifiers. Make sure you are not using model, enum and command modifiers at the same time. ",
        ));
    }

    Ok(Some(EnumDirective { where_: w, set: s }))
}

fn shape_conflict(raw: &Value, reason: &str) -> DirectiveError {
    DirectiveError::ShapeConflict {
        directive: serde_json::to_string_pretty(raw).unwrap_or_else(|_| raw.to_string()),
        reason: reason.trim_end().to_string(),
    }
}

fn object<'a>(raw: &'a Value, key: &str) -> Option<&'a Map<String, Value>> {
    raw.get(key).and_then(Value::as_object)
}

/// A present string field: the key maps to a non-empty string.
fn string_key(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).filter(|s| !s.is_empty()).map(str::to_string)
}

/// Like [`string_key`], but the empty string counts as present.
fn string_key_allow_empty(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_where_or_set_is_unrecognized() {
        for raw in [
            json!({}),
            json!({"where": {"verb": "Get"}}),
            json!({"set": {"verb": "Fetch"}}),
            json!({"select": "command"}),
        ] {
            assert!(matches!(classify(&raw).unwrap(), Classified::Unrecognized));
        }
    }

    #[test]
    fn command_shape_is_recognized() {
        let raw = json!({
            "select": "command",
            "where": {"verb": "Get"},
            "set": {"verb": "Fetch"}
        });
        let Classified::Command(d) = classify(&raw).unwrap() else {
            panic!("expected command directive");
        };
        assert_eq!(d.target, CommandTarget::Command);
        assert_eq!(d.where_.verb.as_deref(), Some("Get"));
        assert_eq!(d.set.verb.as_deref(), Some("Fetch"));
    }

    #[test]
    fn unset_select_targets_parameters() {
        let raw = json!({
            "where": {"parameter-name": "^Id$"},
            "set": {"parameter-name": "Identifier"}
        });
        let Classified::Command(d) = classify(&raw).unwrap() else {
            panic!("expected command directive");
        };
        assert_eq!(d.target, CommandTarget::Parameter);
    }

    #[test]
    fn command_with_model_selector_is_a_shape_conflict() {
        let raw = json!({
            "where": {"verb": "Get", "model-name": "Widget"},
            "set": {"verb": "Fetch"}
        });
        let err = classify(&raw).unwrap_err();
        assert!(err.to_string().contains("model and command"));
    }

    #[test]
    fn command_conflicts_report_every_violation() {
        let raw = json!({
            "where": {"verb": "Get", "model-name": "Widget", "property-name": "Id"},
            "set": {"verb": "Fetch", "model-name": "Gadget"}
        });
        let err = classify(&raw).unwrap_err().to_string();
        assert!(err.contains("Can't select model and command at the same time."));
        assert!(err.contains("Can't select property and command at the same time."));
        assert!(err.contains("Can't set a model-name when a command is selected."));
    }

    #[test]
    fn model_shape_is_recognized_with_property_granularity_by_default() {
        let raw = json!({
            "where": {"model-name": "Widget", "property-name": "Id"},
            "set": {"property-name": "Identifier"}
        });
        let Classified::Model(d) = classify(&raw).unwrap() else {
            panic!("expected model directive");
        };
        assert_eq!(d.target, ModelTarget::Property);
        assert_eq!(d.where_.model_name.as_deref(), Some("Widget"));
    }

    #[test]
    fn model_with_command_mutation_is_a_shape_conflict() {
        let raw = json!({
            "where": {"model-name": "Widget"},
            "set": {"model-name": "Gadget", "hidden": true}
        });
        let err = classify(&raw).unwrap_err().to_string();
        assert!(err.contains("Can't hide a command when a model is selected."));
    }

    #[test]
    fn enum_shape_is_recognized() {
        let raw = json!({
            "where": {"enum-name": "Color"},
            "set": {"enum-name": "Colour"}
        });
        assert!(matches!(classify(&raw).unwrap(), Classified::Enum(_)));
    }

    #[test]
    fn enum_with_foreign_key_is_rejected_with_generic_message() {
        let raw = json!({
            "where": {"enum-name": "Color", "verb": "Get"},
            "set": {"enum-name": "Colour"}
        });
        let err = classify(&raw).unwrap_err().to_string();
        assert!(err.contains("Incompatible selectors and modifiers"));
    }

    #[test]
    fn empty_strings_do_not_count_as_present() {
        // An all-empty selector block never selects, so the shape is not met.
        let raw = json!({
            "where": {"verb": ""},
            "set": {"verb": "Fetch"}
        });
        assert!(matches!(classify(&raw).unwrap(), Classified::Unrecognized));
    }

    #[test]
    fn empty_subject_prefix_replacement_is_present() {
        let raw = json!({
            "where": {"subject": "Widget"},
            "set": {"subject-prefix": ""}
        });
        let Classified::Command(d) = classify(&raw).unwrap() else {
            panic!("expected command directive");
        };
        assert_eq!(d.set.subject_prefix.as_deref(), Some(""));
    }

    #[test]
    fn explicit_hidden_false_is_tracked() {
        let raw = json!({
            "where": {"verb": "Get"},
            "set": {"hidden": false}
        });
        let Classified::Command(d) = classify(&raw).unwrap() else {
            panic!("expected command directive");
        };
        assert_eq!(d.set.hidden, Some(false));
    }

    #[test]
    fn unknown_select_hint_is_unrecognized() {
        let raw = json!({
            "select": "bogus",
            "where": {"verb": "Get"},
            "set": {"verb": "Fetch"}
        });
        assert!(matches!(classify(&raw).unwrap(), Classified::Unrecognized));
    }
}
