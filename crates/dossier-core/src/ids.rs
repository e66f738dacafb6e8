//! ID prefixes and formatting for graph-scoped identifiers.
//!
//! IDs are `<prefix><n>` with `n` starting at 1 per graph, assigned in creation
//! order and never reused.

/// Evidence node prefix (`E1`, `E2`, ...).
pub const PREFIX_NODE: &str = "E";
/// Claim prefix (`C1`, `C2`, ...).
pub const PREFIX_CLAIM: &str = "C";
/// Retrieval ledger row prefix (`Q1`, `Q2`, ...).
pub const PREFIX_QUERY: &str = "Q";

/// Format a graph-scoped ID.
#[must_use]
pub fn format_id(prefix: &str, n: u64) -> String {
    format!("{prefix}{n}")
}

/// Monotonic per-graph sequence. Starts at 1; never rewinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Sequence {
    prefix: &'static str,
    next: u64,
}

impl Sequence {
    pub(crate) const fn new(prefix: &'static str) -> Self {
        Self { prefix, next: 1 }
    }

    /// Issue the next ID and advance.
    pub(crate) fn issue(&mut self) -> String {
        let id = format_id(self.prefix, self.next);
        self.next += 1;
        id
    }
}
