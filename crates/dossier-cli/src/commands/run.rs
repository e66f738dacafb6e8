use chrono::{DateTime, Utc};
use dossier_config::DossierConfig;
use dossier_core::enums::DossierMode;
use dossier_gates::coverage::check_artifact_coverage;
use dossier_gates::enforce::enforce_fail_closed_gates;
use dossier_gates::gate::run_fail_closed_gates;
use dossier_gates::mode::{build_failure_report, determine_mode_for_graph, filter_prose_by_mode};
use dossier_gates::visibility::{
    CategoryAudit, audit_sweep, compute_visibility_coverage_confidence, extract_highest_signal_artifacts,
};
use dossier_gates::{
    CoverageSummary, EnforcementInput, EnforcementOutcome, FailClosedReport, LockBand, SignalArtifact, Verdict,
};
use dossier_ingest::SessionInput;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SessionArgs;
use crate::commands::shared::input::load_session;
use crate::commands::shared::subject_name;
use crate::output::output;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ArtifactCoverage {
    pub passes: bool,
    pub pct: f64,
}

/// Everything `dsr run` decides about one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RunResponse {
    pub person_name: String,
    pub generated_at: DateTime<Utc>,
    /// Pre-synthesis mode.
    pub mode: DossierMode,
    pub reason: String,
    /// Post-synthesis verdict from the gate report.
    pub verdict: Verdict,
    pub entity_lock_score: u8,
    pub entity_lock_band: LockBand,
    pub visibility_confidence: u8,
    pub sweep_audit: Vec<CategoryAudit>,
    pub coverage: CoverageSummary,
    pub artifact_coverage: ArtifactCoverage,
    pub report: FailClosedReport,
    pub artifacts: Vec<SignalArtifact>,
    /// Present when the session carries dossier prose.
    pub enforcement: Option<EnforcementOutcome>,
    /// Prose cleared for output under `mode`; absent when halted.
    pub filtered_text: Option<String>,
    /// Present when the mode or the verdict halts.
    pub failure_report: Option<String>,
}

/// Handle `dsr run`. A halted run still exits 0.
pub fn handle(args: &SessionArgs, config: &DossierConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let session = load_session(&args.session)?;
    let response = build_run_response(&session, config, Utc::now());
    output(&response, flags.format)
}

#[must_use]
pub fn build_run_response(session: &SessionInput, config: &DossierConfig, generated_at: DateTime<Utc>) -> RunResponse {
    let graph = session.assemble(&config.ingest);
    let score = session.entity_lock_score;
    let name = subject_name(session, config);
    let text = session.dossier_text.as_deref();

    let decision = determine_mode_for_graph(&graph, score, name);
    let visibility_confidence = compute_visibility_coverage_confidence(&graph);
    let report = run_fail_closed_gates(&graph, score, text, name);
    let (artifact_passes, artifact_pct) = check_artifact_coverage(&graph);

    let enforcement = text.map(|_| {
        enforce_fail_closed_gates(&EnforcementInput::from_graph(&graph, score, report.coverage.pct, name))
    });
    let filtered_text = text
        .filter(|_| decision.mode.permits_generation())
        .map(|t| filter_prose_by_mode(t, decision.mode, score));

    let failure_report = if decision.mode == DossierMode::Halted {
        Some(build_failure_report(&decision.reason, score, visibility_confidence, &graph, name))
    } else if report.should_halt() {
        Some(build_failure_report(&report.failure_output, score, visibility_confidence, &graph, name))
    } else {
        None
    };

    if failure_report.is_some() {
        tracing::warn!(person = name, mode = %decision.mode, "dossier halted");
    } else {
        tracing::info!(person = name, mode = %decision.mode, verdict = ?report.verdict, "dossier gated");
    }

    RunResponse {
        person_name: session.person_name.clone(),
        generated_at,
        mode: decision.mode,
        reason: decision.reason,
        verdict: report.verdict,
        entity_lock_score: score,
        entity_lock_band: LockBand::from_score(score),
        visibility_confidence,
        sweep_audit: audit_sweep(&graph),
        coverage: report.coverage,
        artifact_coverage: ArtifactCoverage {
            passes: artifact_passes,
            pct: artifact_pct,
        },
        artifacts: extract_highest_signal_artifacts(&graph, config.sweep.max_artifacts),
        report,
        enforcement,
        filtered_text,
        failure_report,
    }
}

#[cfg(test)]
mod tests {
    use dossier_gates::visibility::build_visibility_queries;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn session(value: &serde_json::Value) -> SessionInput {
        SessionInput::from_json_str(&value.to_string()).expect("valid session")
    }

    fn swept(score: u8, claims: &serde_json::Value) -> serde_json::Value {
        let retrievals: Vec<_> = build_visibility_queries("Ben Titmus", "Acme")
            .into_iter()
            .enumerate()
            .map(|(i, q)| {
                json!({
                    "query": q.query,
                    "intent": q.intent,
                    "results": [{ "title": format!("Ben Titmus keynote {i}"), "link": format!("https://v.example/{i}") }]
                })
            })
            .chain([json!({
                "query": "Ben Titmus Acme",
                "intent": "bio",
                "results": [{ "title": "Acme team", "link": "https://acme.example/team" }]
            })])
            .collect();
        json!({
            "person_name": "Ben Titmus",
            "company": "Acme",
            "entity_lock_score": score,
            "retrievals": retrievals,
            "claims": claims
        })
    }

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-01-05T09:00:00Z")
            .expect("timestamp")
            .with_timezone(&Utc)
    }

    #[test]
    fn locked_session_runs_full() {
        let claims = json!([{ "text": "Keynotes often", "tag": "VERIFIED-PUBLIC", "evidence_ids": ["E1"] }]);
        let response = build_run_response(&session(&swept(82, &claims)), &DossierConfig::default(), now());

        assert_eq!(response.mode, DossierMode::Full);
        assert_eq!(response.verdict, Verdict::Full);
        assert_eq!(response.entity_lock_band, LockBand::Locked);
        assert_eq!(response.visibility_confidence, 100);
        assert_eq!(response.artifacts.len(), 3);
        assert!(response.failure_report.is_none());
        assert!(response.enforcement.is_none());
    }

    #[test]
    fn empty_session_halts_with_report() {
        let response = build_run_response(
            &session(&json!({ "person_name": "Ben Titmus", "entity_lock_score": 90 })),
            &DossierConfig::default(),
            now(),
        );

        assert_eq!(response.mode, DossierMode::Halted);
        assert_eq!(response.verdict, Verdict::Halt);
        let report = response.failure_report.expect("failure report");
        assert!(report.contains("VISIBILITY SWEEP NOT EXECUTED"));
        assert!(response.artifacts.is_empty());
    }

    #[test]
    fn constrained_session_filters_prose() {
        let mut value = swept(55, &json!([]));
        value["dossier_text"] = json!(
            "Ben leads platform engineering at Acme today. [VERIFIED-PUBLIC]\n\
             He probably owns the observability budget. [INFERRED-H]"
        );
        let response = build_run_response(&session(&value), &DossierConfig::default(), now());

        assert_eq!(response.mode, DossierMode::Constrained);
        let filtered = response.filtered_text.expect("filtered prose");
        assert!(filtered.contains("leads platform engineering"));
        assert!(!filtered.contains("observability budget"));

        let enforcement = response.enforcement.expect("enforcement");
        assert!(enforcement.should_output);
    }

    #[test]
    fn full_session_passes_prose_through() {
        let mut value = swept(82, &json!([]));
        value["dossier_text"] = json!("Ben leads platform engineering at Acme today. [INFERRED-H]");
        let response = build_run_response(&session(&value), &DossierConfig::default(), now());

        assert_eq!(response.mode, DossierMode::Full);
        assert_eq!(
            response.filtered_text.as_deref(),
            Some("Ben leads platform engineering at Acme today. [INFERRED-H]")
        );
    }

    #[test]
    fn whitespace_prose_matches_gates_verdict() {
        let mut value = swept(90, &json!([]));
        value["dossier_text"] = json!("   \n  ");
        let session = session(&value);
        let config = DossierConfig::default();

        let graph = session.assemble(&config.ingest);
        let gates = run_fail_closed_gates(&graph, 90, session.dossier_text.as_deref(), &session.person_name);
        let response = build_run_response(&session, &config, now());

        assert_eq!(response.verdict, gates.verdict);
        assert_eq!(response.coverage, gates.coverage);
        assert_eq!(response.verdict, Verdict::Full);
    }

    #[test]
    fn blank_name_uses_configured_placeholder() {
        let mut config = DossierConfig::default();
        config.general.person_placeholder = "<executive>".into();
        let response = build_run_response(
            &session(&json!({ "person_name": " ", "entity_lock_score": 90 })),
            &config,
            now(),
        );

        let report = response.failure_report.expect("failure report");
        assert!(report.contains("\"<executive>\" TED"));
        assert!(!report.contains("<name>"));
        assert!(response.reason.contains("<executive>"));
    }

    #[test]
    fn artifact_cap_follows_config() {
        let mut config = DossierConfig::default();
        config.sweep.max_artifacts = 1;
        let response = build_run_response(&session(&swept(82, &json!([]))), &config, now());
        assert_eq!(response.artifacts.len(), 1);
    }

    #[test]
    fn response_serializes_timestamp() {
        let response = build_run_response(
            &session(&json!({ "person_name": "Ben" })),
            &DossierConfig::default(),
            now(),
        );
        let value = serde_json::to_value(&response).expect("serialize");
        assert_eq!(value["generated_at"], "2026-01-05T09:00:00Z");
        assert_eq!(value["mode"], "halted");
    }
}
