//! Error surface of the engine.
//!
//! Only two things can fail: a directive whose selector/mutation keys straddle
//! two directive families, and a selector string that is not a valid regular
//! expression. Both are fatal to the run; a directive that matches nothing is
//! a silent no-op, never an error.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DirectiveError {
    /// A directive mixes vocabulary from two directive families (command vs.
    /// model vs. enum). `directive` is the pretty-printed offending record;
    /// `reason` concatenates one clause per violation found.
    #[error("Incorrect directive: {directive}. Reason: {reason}")]
    ShapeConflict { directive: String, reason: String },

    /// A selector string failed to compile as a case-insensitive regex.
    #[error("Invalid selector `{selector}` in directive")]
    BadSelector {
        selector: String,
        #[source]
        source: regex::Error,
    },
}
