//! Model-directive cascade: schema filtering and mutation.
//!
//! Mirrors the command cascade at model/property granularity, with one
//! deliberate asymmetry: a `property-name` selector drops to the properties
//! whenever `select` is not explicitly `"model"`, so an unset `select` always
//! renames properties, never schemas.

use crate::directive::{ModelDirective, ModelTarget};
use crate::error::DirectiveError;
use crate::model::CodeModel;
use crate::report::Changelog;
use crate::selector::{Selector, substitute};

pub(crate) fn apply_model(
    directive: &ModelDirective,
    model: &mut CodeModel,
    log: &mut Changelog,
) -> Result<(), DirectiveError> {
    let model_sel = Selector::compile_opt(directive.where_.model_name.as_deref())?;
    let property_sel = Selector::compile_opt(directive.where_.property_name.as_deref())?;

    let mut selected: Vec<usize> = (0..model.schemas.len()).collect();
    if let Some(sel) = &model_sel {
        selected.retain(|&i| sel.is_match(&model.schemas[i].name));
    }

    if let Some(sel) = &property_sel {
        if directive.target == ModelTarget::Model {
            // A matching property narrows the schema; the schema is renamed.
            selected
                .retain(|&i| model.schemas[i].properties.iter().any(|p| sel.is_match(&p.name)));
        } else {
            rename_properties(directive, sel, &selected, model, log);
            return Ok(());
        }
    }

    if directive.set.model_name.is_some() {
        for &i in &selected {
            let schema = &mut model.schemas[i];
            let prev = schema.name.clone();
            schema.name =
                substitute(&schema.name, model_sel.as_ref(), directive.set.model_name.as_deref());
            log.record(format!("Changed model-name from {prev} to {}.", schema.name));
        }
    }

    Ok(())
}

fn rename_properties(
    directive: &ModelDirective,
    sel: &Selector,
    selected: &[usize],
    model: &mut CodeModel,
    log: &mut Changelog,
) {
    let set = &directive.set;
    for &i in selected {
        for property in &mut model.schemas[i].properties {
            if !sel.is_match(&property.name) {
                continue;
            }

            let prev = property.name.clone();
            property.name = substitute(&property.name, Some(sel), set.property_name.as_deref());
            if let Some(description) = &set.property_description {
                property.description = description.clone();
            }

            if set.property_name.is_some() {
                log.record(format!("Changed property-name from {prev} to {}.", property.name));
            }
            if set.property_description.is_some() {
                log.record(format!("Set property-description from property {}.", property.name));
            }
        }
    }
}
