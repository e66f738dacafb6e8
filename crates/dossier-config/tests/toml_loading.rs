//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for sandboxed files and env vars.

use dossier_config::{ConfigError, DossierConfig};
use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};

fn from_file(path: &str) -> Result<DossierConfig, ConfigError> {
    DossierConfig::from_figment(
        &Figment::from(Serialized::defaults(DossierConfig::default())).merge(Toml::file(path)),
    )
}

#[test]
fn loads_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[general]
person_placeholder = "<full name>"
default_format = "table"

[sweep]
company_variant = false
max_artifacts = 2

[ingest]
max_interactions = 5
promote_top_hits = 3
"#,
        )?;

        let config = from_file("config.toml").map_err(|e| e.to_string())?;
        assert_eq!(config.general.person_placeholder, "<full name>");
        assert_eq!(config.general.default_format, "table");
        assert!(!config.sweep.company_variant);
        assert_eq!(config.sweep.max_artifacts, 2);
        assert_eq!(config.ingest.max_interactions, 5);
        assert_eq!(config.ingest.promote_top_hits, 3);
        // untouched fields keep defaults
        assert_eq!(config.ingest.max_skills, 20);
        Ok(())
    });
}

#[test]
fn project_local_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".dossier")?;
        jail.create_file(".dossier/config.toml", "[ingest]\nmax_education = 2\n")?;

        let config = DossierConfig::load().map_err(|e| e.to_string())?;
        assert_eq!(config.ingest.max_education, 2);
        Ok(())
    });
}

#[test]
fn max_artifacts_above_ceiling_is_rejected() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[sweep]\nmax_artifacts = 5\n")?;

        let err = from_file("config.toml").expect_err("ceiling is 3");
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "sweep.max_artifacts"));
        assert!(err.to_string().contains("between 1 and 3"));
        Ok(())
    });
}

#[test]
fn wrong_type_is_a_figment_error() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[ingest]\nmax_skills = \"many\"\n")?;

        let err = from_file("config.toml").expect_err("string is not a usize");
        assert!(matches!(err, ConfigError::Figment(_)));
        Ok(())
    });
}
