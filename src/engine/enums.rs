//! Enum-directive cascade: enum schemas and their values.
//!
//! Only schemas carrying an enum definition are candidates. Value renaming
//! has one quirk inherited from the directive format: substitution is
//! pattern-capable only when an `enum-name` selector narrowed the scope;
//! without one the value replacement is a plain overwrite.

use crate::directive::EnumDirective;
use crate::error::DirectiveError;
use crate::model::CodeModel;
use crate::report::Changelog;
use crate::selector::{Selector, substitute};

pub(crate) fn apply_enum(
    directive: &EnumDirective,
    model: &mut CodeModel,
    log: &mut Changelog,
) -> Result<(), DirectiveError> {
    let name_sel = Selector::compile_opt(directive.where_.enum_name.as_deref())?;
    let value_sel = Selector::compile_opt(directive.where_.enum_value_name.as_deref())?;

    let mut selected: Vec<usize> = model
        .schemas
        .iter()
        .enumerate()
        .filter(|(_, schema)| schema.enum_def.is_some())
        .map(|(i, _)| i)
        .collect();
    if let Some(sel) = &name_sel {
        selected.retain(|&i| sel.is_match(&model.schemas[i].name));
    }

    let Some(sel) = &value_sel else {
        if directive.set.enum_name.is_some() {
            for &i in &selected {
                let schema = &mut model.schemas[i];
                let prev = schema.name.clone();
                schema.name =
                    substitute(&schema.name, name_sel.as_ref(), directive.set.enum_name.as_deref());
                log.record(format!("Changed enum-name from {prev} to {}.", schema.name));
            }
        }
        return Ok(());
    };

    // Value-rename log lines carry the enums currently in scope.
    let in_scope: Vec<&str> = selected.iter().map(|&i| model.schemas[i].name.as_str()).collect();
    let scope = serde_json::to_string(&in_scope).unwrap_or_default();

    for &i in &selected {
        let Some(def) = model.schemas[i].enum_def.as_mut() else { continue };
        for value in &mut def.values {
            if !sel.is_match(&value.name) {
                continue;
            }
            let Some(replacement) = directive.set.enum_value_name.as_deref() else { continue };

            let prev = value.name.clone();
            value.name = if name_sel.is_some() {
                substitute(&value.name, Some(sel), Some(replacement))
            } else {
                replacement.to_string()
            };
            log.record(format!(
                "Changed enum-value-name from {prev} to {}. Enum: {scope}.",
                value.name
            ));
        }
    }

    Ok(())
}
