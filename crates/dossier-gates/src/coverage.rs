//! Evidence coverage: the share of claims, or of substantive prose lines,
//! that carry citable evidence.
//!
//! Two algorithms, picked by what is available:
//!
//! - **claim-level** when the graph holds structured claims
//! - **text-level** over raw dossier prose when it does not
//!
//! With neither, coverage is 0%.

use std::sync::LazyLock;

use dossier_core::EvidenceGraph;
use dossier_core::entities::Claim;
use dossier_core::enums::EvidenceType;
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::thresholds::{ARTIFACT_COVERAGE_THRESHOLD, ARTIFACT_NODE_TARGET, SUBSTANTIVE_LINE_MIN_CHARS};

/// Any bracketed evidence tag, hyphen or en-dash, any case.
static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\[(?:VERIFIED[–-](?:MEETING|PUBLIC|PDF)|INFERRED[–-][HML]|UNKNOWN)\]")
        .expect("evidence tag pattern compiles")
});

/// Which algorithm produced a coverage figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CoverageSource {
    Claims,
    Text,
    /// Neither claims nor text were supplied.
    Absent,
}

/// Coverage percentage plus the counts behind it.
///
/// For `Claims`, `total` is the claim count; for `Text`, the substantive
/// line count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CoverageSummary {
    pub pct: f64,
    pub source: CoverageSource,
    pub covered: usize,
    pub total: usize,
}

impl CoverageSummary {
    #[must_use]
    pub const fn uncovered(&self) -> usize {
        self.total.saturating_sub(self.covered)
    }
}

#[allow(clippy::cast_precision_loss)]
fn percent(part: usize, whole: usize) -> f64 {
    (part as f64 / whole as f64) * 100.0
}

// ---------------------------------------------------------------------------
// Claim-level
// ---------------------------------------------------------------------------

/// Percentage of claims that are covered. No claims yields 0.0.
#[must_use]
pub fn compute_evidence_coverage(claims: &[Claim]) -> f64 {
    if claims.is_empty() {
        return 0.0;
    }
    let covered = claims.iter().filter(|claim| claim.is_covered()).count();
    percent(covered, claims.len())
}

// ---------------------------------------------------------------------------
// Text-level
// ---------------------------------------------------------------------------

/// Whether an already-trimmed line counts toward the text-coverage denominator.
fn is_substantive(trimmed: &str) -> bool {
    trimmed.chars().count() > SUBSTANTIVE_LINE_MIN_CHARS
        && !trimmed.starts_with('#')
        && !trimmed.starts_with("---")
        && !trimmed.starts_with('|')
}

/// Whether `line` contains a bracketed evidence tag.
#[must_use]
pub fn contains_evidence_tag(line: &str) -> bool {
    TAG_PATTERN.is_match(line)
}

/// `(tagged, substantive)` line counts for dossier prose.
#[must_use]
pub fn count_tagged_lines(text: &str) -> (usize, usize) {
    text.lines()
        .map(str::trim)
        .filter(|line| is_substantive(line))
        .fold((0, 0), |(tagged, total), line| {
            (tagged + usize::from(contains_evidence_tag(line)), total + 1)
        })
}

/// Percentage of substantive lines carrying an evidence tag.
///
/// Headers, separators, table rows, and lines of 20 characters or fewer are
/// left out entirely. Zero substantive lines is a vacuous 100.0.
#[must_use]
pub fn compute_evidence_coverage_from_text(text: &str) -> f64 {
    match count_tagged_lines(text) {
        (_, 0) => 100.0,
        (tagged, total) => percent(tagged, total),
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Pick the coverage algorithm and compute it.
///
/// Claims win when any exist; otherwise non-empty dossier text is scanned;
/// otherwise coverage is 0%.
#[must_use]
pub fn evaluate_coverage(claims: &[Claim], dossier_text: Option<&str>) -> CoverageSummary {
    if !claims.is_empty() {
        let covered = claims.iter().filter(|claim| claim.is_covered()).count();
        return CoverageSummary {
            pct: percent(covered, claims.len()),
            source: CoverageSource::Claims,
            covered,
            total: claims.len(),
        };
    }

    match dossier_text.filter(|text| !text.is_empty()) {
        Some(text) => {
            let (covered, total) = count_tagged_lines(text);
            CoverageSummary {
                pct: compute_evidence_coverage_from_text(text),
                source: CoverageSource::Text,
                covered,
                total,
            }
        }
        None => CoverageSummary {
            pct: 0.0,
            source: CoverageSource::Absent,
            covered: 0,
            total: 0,
        },
    }
}

/// Coverage check for an artifact-only dossier (PDF and meetings, no web).
///
/// With claims, claim-level coverage against 60%. Without claims, PDF node
/// count stands in: three or more nodes is full coverage, fewer is
/// proportional and passes with at least one.
#[must_use]
pub fn check_artifact_coverage(graph: &EvidenceGraph) -> (bool, f64) {
    let claims = graph.claims();
    if claims.is_empty() {
        let pdf_nodes = graph.nodes_of_type(EvidenceType::Pdf).count();
        if pdf_nodes >= ARTIFACT_NODE_TARGET {
            return (true, 100.0);
        }
        return (pdf_nodes > 0, percent(pdf_nodes, ARTIFACT_NODE_TARGET));
    }

    let pct = compute_evidence_coverage(claims);
    (pct >= ARTIFACT_COVERAGE_THRESHOLD, pct)
}
