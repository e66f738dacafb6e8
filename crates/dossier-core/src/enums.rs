//! Closed vocabularies for evidence provenance, claim tags, and dossier modes.
//!
//! Wire values are fixed: evidence types serialize as `MEETING`, `PUBLIC`, ...;
//! claim tags as `VERIFIED-MEETING`, `INFERRED-H`, `UNKNOWN`, .... Underscore
//! spellings (`VERIFIED_PDF`, `INFERRED_HIGH`) are accepted on input and
//! normalized to the hyphen form on output.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// EvidenceType
// ---------------------------------------------------------------------------

/// Provenance class of an evidence node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvidenceType {
    /// Internal meeting notes, transcripts, or email threads.
    Meeting,
    /// Public web retrieval.
    Public,
    /// User-supplied document text (LinkedIn PDF export).
    Pdf,
    /// Reserved for web-augmented artifact retrieval; no ingest path produces it yet.
    PublicWeb,
}

impl EvidenceType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Meeting => "MEETING",
            Self::Public => "PUBLIC",
            Self::Pdf => "PDF",
            Self::PublicWeb => "PUBLIC_WEB",
        }
    }
}

impl fmt::Display for EvidenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EvidenceType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MEETING" => Ok(Self::Meeting),
            "PUBLIC" => Ok(Self::Public),
            "PDF" => Ok(Self::Pdf),
            "PUBLIC_WEB" | "PUBLIC-WEB" => Ok(Self::PublicWeb),
            other => Err(CoreError::UnknownEvidenceType(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// ClaimConfidence
// ---------------------------------------------------------------------------

/// Single-letter confidence attached to a claim.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum ClaimConfidence {
    #[serde(rename = "H")]
    High,
    #[serde(rename = "M")]
    Medium,
    #[default]
    #[serde(rename = "L")]
    Low,
}

impl ClaimConfidence {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "H",
            Self::Medium => "M",
            Self::Low => "L",
        }
    }
}

impl fmt::Display for ClaimConfidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EvidenceTag
// ---------------------------------------------------------------------------

/// Confidence/provenance label carried by a claim or a line of dossier prose.
///
/// ```text
/// VERIFIED-{MEETING,PUBLIC,PDF}   directly backed by a stored source
/// INFERRED-{H,M,L}                reasoning over cited upstream evidence
/// UNKNOWN                         no evidence
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum EvidenceTag {
    #[serde(rename = "VERIFIED-MEETING", alias = "VERIFIED_MEETING")]
    VerifiedMeeting,
    #[serde(rename = "VERIFIED-PUBLIC", alias = "VERIFIED_PUBLIC")]
    VerifiedPublic,
    #[serde(rename = "VERIFIED-PDF", alias = "VERIFIED_PDF")]
    VerifiedPdf,
    #[serde(
        rename = "INFERRED-H",
        alias = "INFERRED_H",
        alias = "INFERRED_HIGH",
        alias = "INFERRED-HIGH"
    )]
    InferredHigh,
    #[serde(
        rename = "INFERRED-M",
        alias = "INFERRED_M",
        alias = "INFERRED_MEDIUM",
        alias = "INFERRED-MEDIUM"
    )]
    InferredMedium,
    #[serde(
        rename = "INFERRED-L",
        alias = "INFERRED_L",
        alias = "INFERRED_LOW",
        alias = "INFERRED-LOW"
    )]
    InferredLow,
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

impl EvidenceTag {
    /// Every tag, in canonical order.
    pub const ALL: [Self; 7] = [
        Self::VerifiedMeeting,
        Self::VerifiedPublic,
        Self::VerifiedPdf,
        Self::InferredHigh,
        Self::InferredMedium,
        Self::InferredLow,
        Self::Unknown,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::VerifiedMeeting => "VERIFIED-MEETING",
            Self::VerifiedPublic => "VERIFIED-PUBLIC",
            Self::VerifiedPdf => "VERIFIED-PDF",
            Self::InferredHigh => "INFERRED-H",
            Self::InferredMedium => "INFERRED-M",
            Self::InferredLow => "INFERRED-L",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Whether the label alone counts a claim as evidenced.
    ///
    /// True for every verified and inferred tag; false only for `UNKNOWN`.
    #[must_use]
    pub const fn counts_as_evidence(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for EvidenceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EvidenceTag {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('_', "-");
        match normalized.as_str() {
            "VERIFIED-MEETING" => Ok(Self::VerifiedMeeting),
            "VERIFIED-PUBLIC" => Ok(Self::VerifiedPublic),
            "VERIFIED-PDF" => Ok(Self::VerifiedPdf),
            "INFERRED-H" | "INFERRED-HIGH" => Ok(Self::InferredHigh),
            "INFERRED-M" | "INFERRED-MEDIUM" => Ok(Self::InferredMedium),
            "INFERRED-L" | "INFERRED-LOW" => Ok(Self::InferredLow),
            "UNKNOWN" => Ok(Self::Unknown),
            _ => Err(CoreError::UnknownTag(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// DossierMode
// ---------------------------------------------------------------------------

/// Output contract handed to the narrative generator.
///
/// ```text
/// halted       generator must not run
/// constrained  generator runs; prose is filtered by lock band
/// full         generator output passes unchanged
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DossierMode {
    Full,
    Constrained,
    Halted,
}

impl DossierMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Constrained => "constrained",
            Self::Halted => "halted",
        }
    }

    /// Whether the narrative generator may be invoked at all.
    #[must_use]
    pub const fn permits_generation(self) -> bool {
        !matches!(self, Self::Halted)
    }
}

impl fmt::Display for DossierMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DossierMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "constrained" => Ok(Self::Constrained),
            "halted" => Ok(Self::Halted),
            other => Err(CoreError::Validation(format!("unknown dossier mode: {other}"))),
        }
    }
}

// ---------------------------------------------------------------------------
// GateName
// ---------------------------------------------------------------------------

/// The three fail-closed gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GateName {
    VisibilitySweep,
    EvidenceCoverage,
    EntityLock,
}

impl GateName {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::VisibilitySweep => "VISIBILITY_SWEEP",
            Self::EvidenceCoverage => "EVIDENCE_COVERAGE",
            Self::EntityLock => "ENTITY_LOCK",
        }
    }

    /// Hard gates halt generation on failure; the entity-lock gate only constrains.
    #[must_use]
    pub const fn is_hard(self) -> bool {
        matches!(self, Self::VisibilitySweep | Self::EvidenceCoverage)
    }
}

impl fmt::Display for GateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
