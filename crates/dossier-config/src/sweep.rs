//! Visibility sweep planning configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Hard ceiling on highest-signal artifacts; config may only lower it.
pub const MAX_ARTIFACTS_CEILING: usize = 3;

const fn default_company_variant() -> bool {
    true
}

const fn default_max_artifacts() -> usize {
    MAX_ARTIFACTS_CEILING
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SweepConfig {
    /// Append the company-qualified query to the battery when a company is known.
    #[serde(default = "default_company_variant")]
    pub company_variant: bool,

    /// Highest-signal artifacts surfaced per run, `1..=3`.
    #[serde(default = "default_max_artifacts")]
    pub max_artifacts: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            company_variant: default_company_variant(),
            max_artifacts: default_max_artifacts(),
        }
    }
}

impl SweepConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_ARTIFACTS_CEILING).contains(&self.max_artifacts) {
            return Err(ConfigError::invalid(
                "sweep.max_artifacts",
                format!("must be between 1 and {MAX_ARTIFACTS_CEILING}, got {}", self.max_artifacts),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = SweepConfig::default();
        assert!(config.company_variant);
        assert_eq!(config.max_artifacts, 3);
    }

    #[test]
    fn max_artifacts_bounds() {
        for (value, ok) in [(0, false), (1, true), (3, true), (4, false)] {
            let config = SweepConfig {
                max_artifacts: value,
                ..SweepConfig::default()
            };
            assert_eq!(config.validate().is_ok(), ok, "max_artifacts = {value}");
        }
    }
}
