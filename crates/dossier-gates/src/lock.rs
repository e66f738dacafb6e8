use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::thresholds::{ENTITY_LOCK_PARTIAL_THRESHOLD, ENTITY_LOCK_THRESHOLD};

/// Identity confidence band for an externally computed entity-lock score.
///
/// ```text
/// >= 70    LOCKED
/// 50..70   PARTIAL
/// < 50     NOT LOCKED
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LockBand {
    Locked,
    Partial,
    NotLocked,
}

impl LockBand {
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        if score >= ENTITY_LOCK_THRESHOLD {
            Self::Locked
        } else if score >= ENTITY_LOCK_PARTIAL_THRESHOLD {
            Self::Partial
        } else {
            Self::NotLocked
        }
    }

    /// Human label used in gate details and reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Locked => "LOCKED",
            Self::Partial => "PARTIAL",
            Self::NotLocked => "NOT LOCKED",
        }
    }

    #[must_use]
    pub const fn is_locked(self) -> bool {
        matches!(self, Self::Locked)
    }
}

impl fmt::Display for LockBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
