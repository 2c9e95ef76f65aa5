//! Selector compilation and the shared replacement rule.
//!
//! A selector string from a directive compiles to one of two predicate kinds:
//!
//! - **Literal**: the string contains only letters and digits. It is anchored
//!   (`^…$`) and matches the whole value, case-insensitively. `"Foo"` matches
//!   `"foo"` but not `"FooBar"`.
//! - **Pattern**: anything else. The string is used verbatim as a
//!   case-insensitive, unanchored regex, so partial matches work and capture
//!   groups feed `$n` back-references during substitution.
//!
//! The distinction matters for replacement (see [`substitute`]): only pattern
//! selectors substitute; literal (or absent) selectors overwrite.

use crate::error::DirectiveError;
use regex::{Regex, RegexBuilder};

/// A compiled, case-insensitive matching predicate over entity names.
#[derive(Debug, Clone)]
pub(crate) enum Selector {
    Literal(Regex),
    Pattern(Regex),
}

impl Selector {
    /// Compile a selector string. Letters/digits-only strings become anchored
    /// literals; everything else compiles verbatim as a pattern.
    pub fn compile(raw: &str) -> Result<Selector, DirectiveError> {
        let literal = regex!(r"^[a-zA-Z0-9]+$").is_match(raw);
        // Literal sources are alphanumeric, so no escaping is needed.
        let source = if literal { format!("^{raw}$") } else { raw.to_string() };

        let re = RegexBuilder::new(&source).case_insensitive(true).build().map_err(|source| {
            DirectiveError::BadSelector { selector: raw.to_string(), source }
        })?;

        Ok(if literal { Selector::Literal(re) } else { Selector::Pattern(re) })
    }

    /// Compile an optional selector; `None` means "no constraint".
    pub fn compile_opt(raw: Option<&str>) -> Result<Option<Selector>, DirectiveError> {
        raw.map(Selector::compile).transpose()
    }

    pub fn is_match(&self, value: &str) -> bool {
        match self {
            Selector::Literal(re) | Selector::Pattern(re) => re.is_match(value),
        }
    }
}

/// The shared replacement rule applied to every mutated name field.
///
/// - replacement present + pattern selector: global regex substitution with
///   `$n` back-references;
/// - replacement present + literal or absent selector: full overwrite;
/// - replacement absent: the value is left unchanged.
///
/// Description fields never go through this; they are always full overwrites.
pub(crate) fn substitute(current: &str, selector: Option<&Selector>, replacement: Option<&str>) -> String {
    match (selector, replacement) {
        (Some(Selector::Pattern(re)), Some(replacement)) => replace_global(re, current, replacement),
        (_, Some(replacement)) => replacement.to_string(),
        (_, None) => current.to_string(),
    }
}

/// Global substitution over non-overlapping matches. Zero-length matches after
/// the first replacement are skipped so a whole-string capture like `(.*)`
/// rewrites the value exactly once instead of also firing on the trailing
/// empty match.
fn replace_global(re: &Regex, current: &str, replacement: &str) -> String {
    let mut out = String::with_capacity(current.len());
    let mut last = 0;
    let mut replaced = false;

    for caps in re.captures_iter(current) {
        let m = caps.get(0).unwrap();
        if m.start() == m.end() && replaced {
            continue;
        }
        replaced = true;
        out.push_str(&current[last..m.start()]);
        caps.expand(replacement, &mut out);
        last = m.end();
    }

    out.push_str(&current[last..]);
    out
}
