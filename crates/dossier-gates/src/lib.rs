//! # dossier-gates
//!
//! Decision logic over an [`EvidenceGraph`](dossier_core::EvidenceGraph).
//!
//! Everything here is a pure function of its inputs: coverage scoring,
//! visibility sweep scoring, the three fail-closed gates and their verdict,
//! the output mode decision, and the prose filter for constrained output.
//! No function in this crate returns `Result`; failure is reported as data.

pub mod coverage;
pub mod enforce;
pub mod gate;
pub mod lock;
pub mod mode;
pub mod thresholds;
pub mod visibility;

pub use coverage::{CoverageSource, CoverageSummary};
pub use enforce::{EnforcementInput, EnforcementOutcome};
pub use gate::{FailClosedReport, GateResult, Verdict};
pub use lock::LockBand;
pub use mode::ModeDecision;
pub use visibility::{QueryFamily, SignalArtifact, SweepQuery};
