use dossier_config::DossierConfig;
use dossier_gates::SweepQuery;
use dossier_gates::visibility::build_visibility_queries;
use serde::Serialize;

use crate::cli::root_commands::SweepArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::output::output;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SweepResponse {
    pub person_name: String,
    pub queries: Vec<SweepQuery>,
}

#[must_use]
pub fn plan_sweep(args: &SweepArgs, config: &DossierConfig) -> SweepResponse {
    let person_name = args
        .name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(&config.general.person_placeholder)
        .to_string();
    let company = if config.sweep.company_variant {
        args.company.as_deref().unwrap_or_default()
    } else {
        ""
    };

    SweepResponse {
        queries: build_visibility_queries(&person_name, company),
        person_name,
    }
}

/// Handle `dsr sweep`. Raw output is one query per line.
pub fn handle(args: &SweepArgs, config: &DossierConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let plan = plan_sweep(args, config);
    if flags.format == OutputFormat::Raw {
        for planned in &plan.queries {
            println!("{}", planned.query);
        }
        return Ok(());
    }
    output(&plan, flags.format)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn args(name: Option<&str>, company: Option<&str>) -> SweepArgs {
        SweepArgs {
            name: name.map(Into::into),
            company: company.map(Into::into),
        }
    }

    #[test]
    fn company_adds_sixteenth_query() {
        let plan = plan_sweep(&args(Some("Ben Titmus"), Some("Acme")), &DossierConfig::default());
        assert_eq!(plan.queries.len(), 16);
        assert_eq!(plan.queries[0].query, "\"Ben Titmus\" TED");
        assert!(plan.queries.iter().all(|q| q.intent == "visibility"));
    }

    #[test]
    fn company_variant_can_be_disabled() {
        let mut config = DossierConfig::default();
        config.sweep.company_variant = false;
        let plan = plan_sweep(&args(Some("Ben Titmus"), Some("Acme")), &config);
        assert_eq!(plan.queries.len(), 15);
    }

    #[test]
    fn blank_name_uses_placeholder() {
        let plan = plan_sweep(&args(Some("  "), None), &DossierConfig::default());
        assert_eq!(plan.person_name, "<name>");
        assert_eq!(plan.queries[4].query, "\"<name>\" keynote");
    }
}
