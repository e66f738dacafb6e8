//! Last-line enforcement on an already-synthesized dossier.
//!
//! Re-checks the hard conditions from summary numbers alone, so a caller that
//! skipped [`run_fail_closed_gates`](crate::gate::run_fail_closed_gates)
//! still cannot ship an ungated dossier.

use dossier_core::EvidenceGraph;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::lock::LockBand;
use crate::thresholds::EVIDENCE_COVERAGE_THRESHOLD;
use crate::visibility::{NAME_PLACEHOLDER, battery_bullets};

/// Summary figures for one synthesized dossier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EnforcementInput {
    pub entity_lock_score: u8,
    pub visibility_ledger_count: usize,
    pub evidence_coverage_pct: f64,
    #[serde(default)]
    pub person_name: String,
    /// Non-visibility retrieval results; `None` skips the public-results check.
    #[serde(default)]
    pub public_result_count: Option<usize>,
}

impl EnforcementInput {
    /// Read the ledger figures off `graph`.
    #[must_use]
    pub fn from_graph(
        graph: &EvidenceGraph,
        entity_lock_score: u8,
        evidence_coverage_pct: f64,
        person_name: &str,
    ) -> Self {
        let public_result_count = graph
            .ledger()
            .iter()
            .filter(|row| !row.is_visibility())
            .map(|row| row.result_count)
            .sum();
        Self {
            entity_lock_score,
            visibility_ledger_count: graph.visibility_rows().len(),
            evidence_coverage_pct,
            person_name: person_name.to_string(),
            public_result_count: Some(public_result_count),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EnforcementOutcome {
    pub should_output: bool,
    /// Empty when output may proceed.
    pub message: String,
}

/// Block output when a hard condition fails; collect every failing reason.
///
/// Entity lock alone never blocks; its status is appended to a blocking
/// message for context.
#[must_use]
pub fn enforce_fail_closed_gates(input: &EnforcementInput) -> EnforcementOutcome {
    let mut failures = Vec::new();

    if input.public_result_count == Some(0) {
        failures.push(
            "FAIL: NO PUBLIC RETRIEVAL RESULTS\n\
             Entity Lock cannot be computed without at least one public retrieval result."
                .to_string(),
        );
    }

    if input.visibility_ledger_count == 0 {
        let name = match input.person_name.trim() {
            "" => NAME_PLACEHOLDER,
            name => name,
        };
        failures.push(format!(
            "FAIL: VISIBILITY SWEEP NOT EXECUTED\n\
             The retrieval ledger contains 0 visibility-intent rows.\n\
             Run these queries:\n{}",
            battery_bullets(name, "  ")
        ));
    }

    let pct = input.evidence_coverage_pct;
    if pct < EVIDENCE_COVERAGE_THRESHOLD {
        failures.push(format!(
            "FAIL: EVIDENCE COVERAGE {pct:.1}% < {EVIDENCE_COVERAGE_THRESHOLD:.1}%\n\
             Uncited claims must be tagged with evidence IDs or removed."
        ));
    }

    if failures.is_empty() {
        return EnforcementOutcome {
            should_output: true,
            message: String::new(),
        };
    }

    let score = input.entity_lock_score;
    let band = LockBand::from_score(score);
    tracing::warn!(failures = failures.len(), entity_lock_score = score, "dossier output blocked");
    failures.push(format!("Entity Lock: {score}/100 ({band})"));

    EnforcementOutcome {
        should_output: false,
        message: failures.join("\n\n"),
    }
}
