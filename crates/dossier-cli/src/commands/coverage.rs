use dossier_gates::coverage::{compute_evidence_coverage_from_text, count_tagged_lines};
use dossier_gates::thresholds::EVIDENCE_COVERAGE_THRESHOLD;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::TextArgs;
use crate::commands::shared::input::read_text;
use crate::output::output;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageResponse {
    pub pct: f64,
    pub tagged_lines: usize,
    pub substantive_lines: usize,
    pub threshold: f64,
    pub passes: bool,
}

impl CoverageResponse {
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let (tagged_lines, substantive_lines) = count_tagged_lines(text);
        let pct = compute_evidence_coverage_from_text(text);
        Self {
            pct,
            tagged_lines,
            substantive_lines,
            threshold: EVIDENCE_COVERAGE_THRESHOLD,
            passes: pct >= EVIDENCE_COVERAGE_THRESHOLD,
        }
    }
}

/// Handle `dsr coverage`.
pub fn handle(args: &TextArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let text = read_text(&args.input)?;
    output(&CoverageResponse::from_text(&text), flags.format)
}
