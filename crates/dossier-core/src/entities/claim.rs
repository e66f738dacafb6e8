use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{ClaimConfidence, EvidenceTag};

/// An assertion derived from zero or more evidence nodes.
///
/// `evidence_ids` are weak references: the graph owns the nodes, claims only
/// cite them, and a dangling ID is never dereferenced.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Claim {
    pub claim_id: String,
    pub text: String,
    pub tag: EvidenceTag,
    #[serde(default)]
    pub evidence_ids: Vec<String>,
    #[serde(default)]
    pub confidence: ClaimConfidence,
}

impl Claim {
    /// Whether this claim counts toward evidence coverage.
    ///
    /// Any cited evidence ID covers the claim, whatever its label (an
    /// `UNKNOWN` claim with evidence counts). Without evidence, the label
    /// decides: every tag but `UNKNOWN` covers.
    #[must_use]
    pub fn is_covered(&self) -> bool {
        !self.evidence_ids.is_empty() || self.tag.counts_as_evidence()
    }
}
