//! Output mode policy: what the narrative generator may do, and how its prose
//! is filtered when identity is not locked.

use std::sync::LazyLock;

use dossier_core::EvidenceGraph;
use dossier_core::enums::DossierMode;
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::lock::LockBand;
use crate::thresholds::{ENTITY_LOCK_PARTIAL_THRESHOLD, ENTITY_LOCK_THRESHOLD, SUBSTANTIVE_LINE_MIN_CHARS};
use crate::visibility::{NAME_PLACEHOLDER, battery_bullets};

static STRONG_INFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[INFERRED[–-][HM]\]").expect("inference pattern compiles"));

static ANY_INFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[INFERRED[–-][HML]\]").expect("inference pattern compiles"));

const REPORT_RULE_WIDTH: usize = 60;

/// Mode plus the human-actionable reason for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ModeDecision {
    pub mode: DossierMode,
    pub reason: String,
}

fn name_or_placeholder(person_name: &str) -> &str {
    let trimmed = person_name.trim();
    if trimmed.is_empty() { NAME_PLACEHOLDER } else { trimmed }
}

/// Decide the output mode before any narrative generation.
///
/// A missing visibility sweep halts first; then missing public results;
/// then the lock score picks FULL or CONSTRAINED.
#[must_use]
pub fn determine_dossier_mode(
    entity_lock_score: u8,
    visibility_executed: bool,
    has_public_results: bool,
    person_name: &str,
) -> ModeDecision {
    let (mode, reason) = if !visibility_executed {
        (
            DossierMode::Halted,
            format!(
                "FAIL: VISIBILITY SWEEP NOT EXECUTED\n\
                 The retrieval ledger contains 0 visibility-intent rows.\n\
                 Cannot generate dossier without executing the visibility sweep.\n\n\
                 Run these queries:\n{}",
                battery_bullets(name_or_placeholder(person_name), "  ")
            ),
        )
    } else if !has_public_results {
        (
            DossierMode::Halted,
            format!(
                "FAIL: NO PUBLIC RETRIEVAL RESULTS\n\
                 Entity Lock cannot be computed without at least one public retrieval result.\n\
                 Public retrieval returned 0 results for \"{}\".\n\
                 Verify the person name and run retrieval again.",
                person_name.trim()
            ),
        )
    } else if entity_lock_score >= ENTITY_LOCK_THRESHOLD {
        (
            DossierMode::Full,
            format!("Entity LOCKED ({entity_lock_score}/100) — full dossier"),
        )
    } else if entity_lock_score >= ENTITY_LOCK_PARTIAL_THRESHOLD {
        (
            DossierMode::Constrained,
            format!(
                "PARTIAL DOSSIER — IDENTITY NOT LOCKED ({entity_lock_score}/100)\n\
                 Restricting output to VERIFIED + UNKNOWN + INFERRED-L claims.\n\
                 Strong person-level inferences suppressed."
            ),
        )
    } else {
        (
            DossierMode::Constrained,
            format!(
                "PARTIAL DOSSIER — IDENTITY NOT LOCKED ({entity_lock_score}/100)\n\
                 Restricting output to VERIFIED-MEETING facts and safe inferences only.\n\
                 Prioritize disambiguation retrieval before generating a full dossier."
            ),
        )
    };

    tracing::debug!(mode = %mode, entity_lock_score, visibility_executed, has_public_results, "dossier mode decided");
    ModeDecision { mode, reason }
}

/// [`determine_dossier_mode`] with the two flags read off `graph`.
#[must_use]
pub fn determine_mode_for_graph(graph: &EvidenceGraph, entity_lock_score: u8, person_name: &str) -> ModeDecision {
    determine_dossier_mode(
        entity_lock_score,
        graph.visibility_executed(),
        graph.has_public_results(),
        person_name,
    )
}

// ---------------------------------------------------------------------------
// Prose filter
// ---------------------------------------------------------------------------

/// Structural or short lines that pass the filter untouched.
fn is_structural(trimmed: &str) -> bool {
    trimmed.is_empty()
        || trimmed.chars().count() <= SUBSTANTIVE_LINE_MIN_CHARS
        || ["#", "|", "---", "*", ">"]
            .iter()
            .any(|marker| trimmed.starts_with(marker))
}

/// Filter generated prose for `mode`.
///
/// FULL and HALTED return the text unchanged. CONSTRAINED drops substantive
/// lines carrying `INFERRED-H`/`INFERRED-M` (score 50-69) or any `INFERRED-*`
/// tag (below 50), keeps every other line in place, and prepends a banner.
#[must_use]
pub fn filter_prose_by_mode(dossier_text: &str, mode: DossierMode, entity_lock_score: u8) -> String {
    match mode {
        DossierMode::Full => return dossier_text.to_string(),
        DossierMode::Halted => {
            tracing::warn!("prose filter called for a halted dossier; returning input unchanged");
            return dossier_text.to_string();
        }
        DossierMode::Constrained => {}
    }

    let partial = entity_lock_score >= ENTITY_LOCK_PARTIAL_THRESHOLD;
    let banned = if partial { &*STRONG_INFERENCE } else { &*ANY_INFERENCE };

    let mut dropped = 0usize;
    let kept: Vec<&str> = dossier_text
        .split('\n')
        .filter(|line| {
            let trimmed = line.trim();
            if is_structural(trimmed) || !banned.is_match(trimmed) {
                return true;
            }
            dropped += 1;
            false
        })
        .collect();
    tracing::debug!(dropped, entity_lock_score, "constrained prose filtered");

    let lock_label = if partial { "PARTIAL LOCK" } else { "NOT LOCKED" };
    format!(
        "> **PARTIAL DOSSIER — IDENTITY {lock_label} ({entity_lock_score}/100)**\n\
         > Strong person-level inferences have been suppressed.\n\
         > Only VERIFIED facts and low-confidence inferences are shown.\n\
         ---\n{}",
        kept.join("\n")
    )
}

// ---------------------------------------------------------------------------
// Failure report
// ---------------------------------------------------------------------------

/// Score-raising actions offered when entity lock is the blocker.
const LOCK_SIGNALS: [(&str, &str); 7] = [
    ("LinkedIn URL present", "+10pts (weak)"),
    ("LinkedIn verified via retrieval", "+30pts (strong)"),
    ("Meeting confirms identity", "+20pts"),
    ("Employer in public source", "+20pts"),
    ("Multiple independent domains agree", "+20pts"),
    ("Title in public source", "+10pts"),
    ("Location in public source", "+10pts"),
];

/// Deterministic report returned instead of a dossier on a halt.
#[must_use]
pub fn build_failure_report(
    mode_reason: &str,
    entity_lock_score: u8,
    visibility_confidence: u8,
    graph: &EvidenceGraph,
    person_name: &str,
) -> String {
    let rule = "=".repeat(REPORT_RULE_WIDTH);
    let band = LockBand::from_score(entity_lock_score);
    let mut parts = vec![
        rule.clone(),
        "DOSSIER GENERATION HALTED — FAIL-CLOSED GATES".to_string(),
        rule,
        String::new(),
        mode_reason.to_string(),
        String::new(),
        "--- CURRENT STATE ---".to_string(),
        format!("Entity Lock:           {entity_lock_score}/100 ({band})"),
        format!("Visibility Confidence: {visibility_confidence}/100"),
        format!("Evidence Nodes:        {}", graph.nodes().len()),
        format!("Retrieval Ledger Rows: {}", graph.ledger().len()),
        String::new(),
    ];

    if !graph.ledger().is_empty() {
        parts.push("--- RETRIEVAL LEDGER ---".to_string());
        parts.extend(graph.ledger().iter().map(|row| {
            format!(
                "  {}: [{}] {} → {} result(s)",
                row.query_id, row.intent, row.query, row.result_count
            )
        }));
        parts.push(String::new());
    }

    parts.push("--- WHAT TO DO NEXT ---".to_string());
    if graph.visibility_executed() {
        parts.push("1. Visibility sweep is logged (OK)".to_string());
    } else {
        parts.push("1. Execute the full visibility sweep query battery:".to_string());
        parts.push(battery_bullets(name_or_placeholder(person_name), "   "));
    }

    if graph.rows_with_results() == 0 {
        parts.push("2. Get at least 1 public retrieval result to compute Entity Lock".to_string());
    } else if !band.is_locked() {
        parts.push("2. Increase Entity Lock by confirming:".to_string());
        parts.extend(
            LOCK_SIGNALS
                .iter()
                .map(|(signal, points)| format!("   - {signal} → {points}")),
        );
    }

    parts.extend(
        [
            "",
            "--- WHAT WILL CHANGE AFTER FIX ---",
            "Once the above is resolved, the system will:",
            "  - Re-run Evidence Graph assembly",
            "  - Re-score Entity Lock with new evidence",
            "  - Proceed to dossier synthesis (if gates pass)",
        ]
        .map(String::from),
    );

    parts.join("\n")
}
