//! The fail-closed gate engine.
//!
//! Three checks always run and are always reported:
//!
//! ```text
//! VISIBILITY_SWEEP   hard   >= 1 visibility-intent ledger row
//! EVIDENCE_COVERAGE  hard   coverage >= 85.0%
//! ENTITY_LOCK        soft   score >= 70; failing only constrains output
//! ```
//!
//! Any hard failure halts. A lone entity-lock failure constrains. Otherwise
//! output is fully open.

use dossier_core::EvidenceGraph;
use dossier_core::entities::Claim;
use dossier_core::enums::GateName;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::coverage::{CoverageSource, CoverageSummary, evaluate_coverage};
use crate::lock::LockBand;
use crate::thresholds::EVIDENCE_COVERAGE_THRESHOLD;
use crate::visibility::{FULL_NAME_PLACEHOLDER, battery_bullets};

const HALT_BANNER: &str = "DOSSIER GENERATION HALTED — FAIL-CLOSED GATES FAILED\n";

/// Outcome of one gate. `remediation` is empty when the gate passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GateResult {
    pub gate_name: GateName,
    pub passed: bool,
    pub details: String,
    #[serde(default)]
    pub remediation: String,
}

impl GateResult {
    fn pass(gate_name: GateName, details: String) -> Self {
        Self {
            gate_name,
            passed: true,
            details,
            remediation: String::new(),
        }
    }

    fn fail(gate_name: GateName, details: String, remediation: String) -> Self {
        Self {
            gate_name,
            passed: false,
            details,
            remediation,
        }
    }

    /// Failed, and failing blocks output.
    #[must_use]
    pub const fn is_hard_failure(&self) -> bool {
        !self.passed && self.gate_name.is_hard()
    }
}

// ---------------------------------------------------------------------------
// Individual gates
// ---------------------------------------------------------------------------

/// Passes iff the ledger holds at least one visibility-intent row.
///
/// On failure the remediation lists the whole battery rendered for
/// `person_name`, or for `<full name>` when it is blank.
#[must_use]
pub fn check_visibility_sweep_gate(graph: &EvidenceGraph, person_name: &str) -> GateResult {
    let executed = graph.visibility_rows().len();
    if executed > 0 {
        return GateResult::pass(
            GateName::VisibilitySweep,
            format!("{executed} visibility queries executed."),
        );
    }

    let name = if person_name.trim().is_empty() {
        FULL_NAME_PLACEHOLDER
    } else {
        person_name.trim()
    };
    GateResult::fail(
        GateName::VisibilitySweep,
        "No visibility-intent rows found in retrieval ledger.".to_string(),
        format!(
            "FAIL: VISIBILITY SWEEP NOT EXECUTED\n\
             Run the following queries and log results to the retrieval ledger:\n{}",
            battery_bullets(name, "  ")
        ),
    )
}

/// Passes iff `coverage.pct >= 85.0`.
#[must_use]
pub fn check_coverage(coverage: &CoverageSummary) -> GateResult {
    let pct = coverage.pct;
    if pct >= EVIDENCE_COVERAGE_THRESHOLD {
        return GateResult::pass(
            GateName::EvidenceCoverage,
            format!("Coverage {pct:.1}% >= {EVIDENCE_COVERAGE_THRESHOLD:.1}%."),
        );
    }

    let gap = match coverage.source {
        CoverageSource::Claims => format!(
            "{} of {} claims have no evidence IDs and no evidence tag.\n",
            coverage.uncovered(),
            coverage.total
        ),
        CoverageSource::Text => format!(
            "{} of {} substantive lines carry no evidence tag.\n",
            coverage.uncovered(),
            coverage.total
        ),
        CoverageSource::Absent => "No claims or dossier text were supplied.\n".to_string(),
    };
    GateResult::fail(
        GateName::EvidenceCoverage,
        format!("Coverage {pct:.1}% < {EVIDENCE_COVERAGE_THRESHOLD:.1}% threshold."),
        format!(
            "FAIL: EVIDENCE COVERAGE {pct:.1}%\n\
             Coverage must rise by {:.1} points to reach {EVIDENCE_COVERAGE_THRESHOLD:.1}%.\n\
             {gap}\
             Uncited claims must be tagged with evidence IDs or removed.\n\
             Run additional retrieval queries to gather missing evidence.",
            EVIDENCE_COVERAGE_THRESHOLD - pct
        ),
    )
}

/// Coverage gate over claims, falling back to dossier text, then to 0%.
#[must_use]
pub fn check_evidence_coverage_gate(
    claims: &[Claim],
    dossier_text: Option<&str>,
) -> GateResult {
    check_coverage(&evaluate_coverage(claims, dossier_text))
}

/// Passes iff the score is LOCKED. Failing never halts on its own.
#[must_use]
pub fn check_entity_lock_gate(entity_lock_score: u8) -> GateResult {
    let band = LockBand::from_score(entity_lock_score);
    if band.is_locked() {
        return GateResult::pass(
            GateName::EntityLock,
            format!("Score {entity_lock_score}/100 — LOCKED."),
        );
    }

    GateResult::fail(
        GateName::EntityLock,
        format!(
            "Score {entity_lock_score}/100 — IDENTITY {band}.\n\
             Dossier will NOT include strong person-level claims.\n\
             Only VERIFIED facts, UNKNOWNs, and safe INFERRED-L permitted."
        ),
        format!(
            "IDENTITY {band}: score {entity_lock_score}/100.\n\
             Fetch additional identity signals:\n  \
             - Confirm LinkedIn URL\n  \
             - Cross-reference employer in public sources\n  \
             - Verify title on company website"
        ),
    )
}

// ---------------------------------------------------------------------------
// Verdict
// ---------------------------------------------------------------------------

/// Combined outcome of the three gates. `Halt` dominates `Constrained`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Halt,
    Constrained,
    Full,
}

impl Verdict {
    #[must_use]
    pub const fn from_gates(visibility: &GateResult, coverage: &GateResult, lock: &GateResult) -> Self {
        if !visibility.passed || !coverage.passed {
            Self::Halt
        } else if !lock.passed {
            Self::Constrained
        } else {
            Self::Full
        }
    }
}

/// Aggregate of all three gates.
///
/// `all_passed` and `is_constrained` are never both true; `failure_output` is
/// set only on a halt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FailClosedReport {
    pub gates: Vec<GateResult>,
    pub all_passed: bool,
    pub is_constrained: bool,
    pub verdict: Verdict,
    /// Coverage figure the coverage gate judged.
    pub coverage: CoverageSummary,
    #[serde(default)]
    pub failure_output: String,
}

impl FailClosedReport {
    /// Assemble the report from already-evaluated gates.
    #[must_use]
    pub fn from_gates(
        visibility: GateResult,
        coverage_gate: GateResult,
        lock: GateResult,
        coverage: CoverageSummary,
    ) -> Self {
        let verdict = Verdict::from_gates(&visibility, &coverage_gate, &lock);
        let failure_output = if verdict == Verdict::Halt {
            halt_output(&[&visibility, &coverage_gate], &lock)
        } else {
            String::new()
        };

        Self {
            gates: vec![visibility, coverage_gate, lock],
            all_passed: verdict == Verdict::Full,
            is_constrained: verdict == Verdict::Constrained,
            verdict,
            coverage,
            failure_output,
        }
    }

    /// A hard gate failed; the narrative generator must not run.
    #[must_use]
    pub const fn should_halt(&self) -> bool {
        !self.all_passed && !self.is_constrained
    }

    #[must_use]
    pub fn gate(&self, name: GateName) -> Option<&GateResult> {
        self.gates.iter().find(|gate| gate.gate_name == name)
    }

    pub fn hard_failures(&self) -> impl Iterator<Item = &GateResult> {
        self.gates.iter().filter(|gate| gate.is_hard_failure())
    }
}

fn halt_output(hard_gates: &[&GateResult], lock: &GateResult) -> String {
    let mut parts = vec![HALT_BANNER.to_string()];
    for gate in hard_gates.iter().filter(|gate| gate.is_hard_failure()) {
        parts.push(format!("--- {} ---", gate.gate_name));
        parts.push(gate.remediation.clone());
        parts.push(String::new());
    }
    parts.push(format!("--- {} ---", GateName::EntityLock));
    parts.push(lock.details.clone());
    parts.join("\n")
}

/// Run all three gates over `graph`.
///
/// Coverage is claim-level when the graph has claims, else text-level over
/// `dossier_text`, else 0%.
#[must_use]
pub fn run_fail_closed_gates(
    graph: &EvidenceGraph,
    entity_lock_score: u8,
    dossier_text: Option<&str>,
    person_name: &str,
) -> FailClosedReport {
    let visibility = check_visibility_sweep_gate(graph, person_name);
    let coverage = evaluate_coverage(graph.claims(), dossier_text);
    let coverage_gate = check_coverage(&coverage);
    let lock = check_entity_lock_gate(entity_lock_score);

    for gate in [&visibility, &coverage_gate, &lock] {
        tracing::debug!(gate = %gate.gate_name, passed = gate.passed, details = %gate.details, "gate evaluated");
    }

    let report = FailClosedReport::from_gates(visibility, coverage_gate, lock, coverage);
    match report.verdict {
        Verdict::Halt => tracing::warn!(
            hard_failures = report.hard_failures().count(),
            "fail-closed gates halted dossier generation"
        ),
        verdict => tracing::info!(?verdict, coverage = report.coverage.pct, "fail-closed gates passed"),
    }
    report
}
