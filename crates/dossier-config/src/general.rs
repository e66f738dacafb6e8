//! General application configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Output formats the CLI can render.
pub const OUTPUT_FORMATS: [&str; 3] = ["json", "table", "raw"];

fn default_person_placeholder() -> String {
    "<name>".to_string()
}

fn default_format() -> String {
    "json".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Stands in for a blank session person name in every rendered query.
    #[serde(default = "default_person_placeholder")]
    pub person_placeholder: String,

    /// Output format used when `--format` is not given.
    #[serde(default = "default_format")]
    pub default_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            person_placeholder: default_person_placeholder(),
            default_format: default_format(),
        }
    }
}

impl GeneralConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !OUTPUT_FORMATS.contains(&self.default_format.as_str()) {
            return Err(ConfigError::invalid(
                "general.default_format",
                format!("expected one of {}, got '{}'", OUTPUT_FORMATS.join(", "), self.default_format),
            ));
        }
        if self.person_placeholder.trim().is_empty() {
            return Err(ConfigError::invalid("general.person_placeholder", "must not be empty"));
        }
        Ok(())
    }
}
