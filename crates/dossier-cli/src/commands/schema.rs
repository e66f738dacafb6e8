use dossier_core::GraphSnapshot;
use dossier_gates::FailClosedReport;
use dossier_ingest::SessionInput;
use schemars::schema_for;

use crate::cli::root_commands::{SchemaArgs, SchemaKind};
use crate::commands::run::RunResponse;

#[must_use]
pub fn schema_value(kind: SchemaKind) -> serde_json::Value {
    let schema = match kind {
        SchemaKind::Session => schema_for!(SessionInput),
        SchemaKind::Snapshot => schema_for!(GraphSnapshot),
        SchemaKind::Report => schema_for!(FailClosedReport),
        SchemaKind::Run => schema_for!(RunResponse),
    };
    schema.to_value()
}

/// Handle `dsr schema`. Always pretty JSON.
pub fn handle(args: &SchemaArgs) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&schema_value(args.kind))?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_is_an_object_schema() {
        for kind in [SchemaKind::Session, SchemaKind::Snapshot, SchemaKind::Report, SchemaKind::Run] {
            let schema = schema_value(kind);
            assert_eq!(schema["type"], "object", "{kind:?}");
            assert!(schema["properties"].is_object(), "{kind:?}");
        }
    }

    #[test]
    fn session_schema_requires_person_name() {
        let schema = schema_value(SchemaKind::Session);
        let required = schema["required"].as_array().expect("required list");
        assert!(required.iter().any(|v| v == "person_name"));
    }
}
