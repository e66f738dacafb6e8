use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::EvidenceType;

/// Sentinel for evidence whose date is not known.
pub const UNKNOWN_DATE: &str = "UNKNOWN";

/// One atomic fact with provenance. Immutable once added to a graph.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct EvidenceNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: EvidenceType,
    /// URL, meeting title, or `linkedin_pdf:<name>`.
    pub source: String,
    /// At most 200 characters; truncated when the node is created.
    pub snippet: String,
    /// Pointer into the source (timestamp, section key); empty if none.
    #[serde(rename = "ref", default)]
    pub reference: String,
    pub date: String,
}
