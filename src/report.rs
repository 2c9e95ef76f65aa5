//! Change reporting.
//!
//! Every successful mutation produces one human-readable line. Lines are
//! collected in order on a [`Changelog`] (returned to the caller) and mirrored
//! to `tracing` at debug level as they are recorded, which stands in for the
//! verbose channel of the surrounding pipeline.

/// Ordered record of the mutations performed by one run.
#[derive(Debug, Clone, Default)]
pub struct Changelog {
    entries: Vec<String>,
}

impl Changelog {
    pub(crate) fn record(&mut self, line: String) {
        tracing::debug!(target: "restyle::directive", "{line}");
        self.entries.push(line);
    }

    /// The recorded lines, in mutation order.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
