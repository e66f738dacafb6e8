//! Cross-cutting error types for the dossier crates.
//!
//! Gate evaluation never returns these: decisions are data (`GateResult`,
//! `FailClosedReport`). These errors cover parsing at the edges, where a
//! caller hands in a tag, type, or mode as text.

use thiserror::Error;

/// Errors that can be raised by any dossier crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A claim or prose tag outside the closed tag vocabulary.
    #[error("Unknown evidence tag: {0}")]
    UnknownTag(String),

    /// An evidence node type outside the provenance vocabulary.
    #[error("Unknown evidence type: {0}")]
    UnknownEvidenceType(String),

    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}
