//! Command-directive cascade: operation filtering and mutation.
//!
//! Operations are narrowed through one optional predicate stage per selector
//! field (`subject`, `subject-prefix`, `verb`, `variant`). A `parameter-name`
//! selector then either narrows the parent operations further (explicit
//! `select: "command"`) or switches the whole directive to parameter
//! granularity (unset or `select: "parameter"`), in which case the operation
//! itself is never renamed.

use crate::directive::{CommandDirective, CommandTarget};
use crate::error::DirectiveError;
use crate::model::CodeModel;
use crate::report::Changelog;
use crate::selector::{Selector, substitute};

pub(crate) fn apply_command(
    directive: &CommandDirective,
    model: &mut CodeModel,
    log: &mut Changelog,
) -> Result<(), DirectiveError> {
    let subject_sel = Selector::compile_opt(directive.where_.subject.as_deref())?;
    let prefix_sel = Selector::compile_opt(directive.where_.subject_prefix.as_deref())?;
    let verb_sel = Selector::compile_opt(directive.where_.verb.as_deref())?;
    let variant_sel = Selector::compile_opt(directive.where_.variant.as_deref())?;
    let parameter_sel = Selector::compile_opt(directive.where_.parameter_name.as_deref())?;

    let mut selected: Vec<usize> = (0..model.operations.len()).collect();
    if let Some(sel) = &subject_sel {
        selected.retain(|&i| sel.is_match(&model.operations[i].subject));
    }
    if let Some(sel) = &prefix_sel {
        selected.retain(|&i| sel.is_match(&model.operations[i].subject_prefix));
    }
    if let Some(sel) = &verb_sel {
        selected.retain(|&i| sel.is_match(&model.operations[i].verb));
    }
    if let Some(sel) = &variant_sel {
        selected.retain(|&i| sel.is_match(&model.operations[i].variant));
    }

    if let Some(sel) = &parameter_sel {
        if directive.target == CommandTarget::Command {
            // The parameter name narrows the parent operation; it does not
            // select the parameter itself.
            selected
                .retain(|&i| model.operations[i].parameters.iter().any(|p| sel.is_match(&p.name)));
        } else {
            rename_parameters(directive, sel, &selected, model, log);
            return Ok(());
        }
    }

    let set = &directive.set;
    for &i in &selected {
        let op = &mut model.operations[i];
        let old_name = op.command_name();

        op.subject = substitute(&op.subject, subject_sel.as_ref(), set.subject.as_deref());
        op.subject_prefix =
            substitute(&op.subject_prefix, prefix_sel.as_ref(), set.subject_prefix.as_deref());
        op.verb = substitute(&op.verb, verb_sel.as_ref(), set.verb.as_deref());
        op.variant = substitute(&op.variant, variant_sel.as_ref(), set.variant.as_deref());
        if let Some(hidden) = set.hidden {
            op.hidden = hidden;
        }

        // A hidden-only directive changes no name, so it reports nothing.
        if set.subject.is_some()
            || set.subject_prefix.is_some()
            || set.verb.is_some()
            || set.variant.is_some()
        {
            log.record(format!("Changed command from {old_name} to {}.", op.command_name()));
        }
    }

    Ok(())
}

/// Parameter-granularity path: flatten the parameters of every matched
/// operation, keep those whose name matches, and rename/redescribe each.
fn rename_parameters(
    directive: &CommandDirective,
    sel: &Selector,
    selected: &[usize],
    model: &mut CodeModel,
    log: &mut Changelog,
) {
    let set = &directive.set;
    for &i in selected {
        for parameter in &mut model.operations[i].parameters {
            if !sel.is_match(&parameter.name) {
                continue;
            }

            let prev = parameter.name.clone();
            parameter.name = substitute(&parameter.name, Some(sel), set.parameter_name.as_deref());
            if let Some(description) = &set.parameter_description {
                parameter.description = description.clone();
            }

            if set.parameter_name.is_some() {
                log.record(format!("Changed parameter-name from {prev} to {}.", parameter.name));
            }
            if set.parameter_description.is_some() {
                log.record(format!("Set parameter-description from parameter {}.", parameter.name));
            }
        }
    }
}
