//! Fixed decision thresholds. None of these are configurable.

/// Minimum evidence coverage, in percent, for the coverage gate to pass.
pub const EVIDENCE_COVERAGE_THRESHOLD: f64 = 85.0;

/// Minimum coverage for an artifact-only (no web) dossier.
pub const ARTIFACT_COVERAGE_THRESHOLD: f64 = 60.0;

/// PDF nodes needed for an artifact-only graph without claims to count as fully covered.
pub const ARTIFACT_NODE_TARGET: usize = 3;

/// Entity-lock score at or above which identity is LOCKED.
pub const ENTITY_LOCK_THRESHOLD: u8 = 70;

/// Entity-lock score at or above which an unlocked identity is PARTIAL.
pub const ENTITY_LOCK_PARTIAL_THRESHOLD: u8 = 50;

/// Upper bound on highest-signal visibility artifacts surfaced.
pub const MAX_SIGNAL_ARTIFACTS: usize = 3;

/// A line must be longer than this many characters to be substantive.
pub const SUBSTANTIVE_LINE_MIN_CHARS: usize = 20;
