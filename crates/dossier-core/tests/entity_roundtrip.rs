//! Serde roundtrip and JsonSchema validation tests for the graph entity types.

use dossier_core::entities::*;
use dossier_core::enums::*;
use dossier_core::{EvidenceGraph, GraphSnapshot};
use schemars::schema_for;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            // Serde roundtrip
            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            // Schema validation
            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

roundtrip_and_validate!(
    evidence_node_roundtrip,
    EvidenceNode,
    EvidenceNode {
        id: "E1".into(),
        kind: EvidenceType::Meeting,
        source: "Intro call with Ben".into(),
        snippet: "I run platform engineering at Acme.".into(),
        reference: "00:04:12".into(),
        date: "2025-01-15".into(),
    }
);

roundtrip_and_validate!(
    claim_roundtrip,
    Claim,
    Claim {
        claim_id: "C1".into(),
        text: "Leads platform engineering at Acme".into(),
        tag: EvidenceTag::VerifiedMeeting,
        evidence_ids: vec!["E1".into()],
        confidence: ClaimConfidence::High,
    }
);

roundtrip_and_validate!(
    ledger_row_roundtrip,
    RetrievalLedgerRow,
    RetrievalLedgerRow {
        query_id: "Q1".into(),
        query: "\"Ben Ortiz\" keynote".into(),
        intent: INTENT_VISIBILITY.into(),
        top_results: vec![TopResult {
            rank: 1,
            title: "Platform keynote".into(),
            url: "https://conf.example/ben".into(),
            date: "UNKNOWN".into(),
            snippet: "Ben Ortiz on platform teams".into(),
        }],
        selected_evidence_ids: Vec::new(),
        result_count: 7,
    }
);

roundtrip_and_validate!(
    search_hit_roundtrip,
    SearchHit,
    SearchHit {
        title: Some("Podcast ep. 12".into()),
        link: None,
        url: Some("https://pod.example/12".into()),
        snippet: Some("Guest Ben Ortiz".into()),
        date: Some("2024-11-02".into()),
    }
);

roundtrip_and_validate!(
    graph_snapshot_roundtrip,
    GraphSnapshot,
    {
        let mut g = EvidenceGraph::new();
        g.add_pdf_node("linkedin_pdf:Ben Ortiz", "Headline: VP Platform", "headline", None);
        g.add_claim(
            "VP Platform",
            EvidenceTag::VerifiedPdf,
            vec!["E1".into()],
            ClaimConfidence::High,
        );
        g.log_retrieval("\"Ben Ortiz\" TED talk", INTENT_VISIBILITY, None, Vec::new());
        g.snapshot()
    }
);

#[test]
fn tag_wire_forms_use_hyphens() {
    let json = serde_json::to_string(&EvidenceTag::InferredHigh).unwrap();
    assert_eq!(json, "\"INFERRED-H\"");
    let parsed: EvidenceTag = serde_json::from_str("\"VERIFIED_MEETING\"").unwrap();
    assert_eq!(parsed, EvidenceTag::VerifiedMeeting);
}

#[test]
fn unrecognized_tag_is_rejected() {
    let parsed: Result<EvidenceTag, _> = serde_json::from_str("\"VERIFIED-RUMOR\"");
    assert!(parsed.is_err());
}

#[test]
fn claim_without_optional_fields_uses_defaults() {
    let claim: Claim =
        serde_json::from_str(r#"{"claim_id":"C9","text":"x","tag":"UNKNOWN"}"#).unwrap();
    assert!(claim.evidence_ids.is_empty());
    assert_eq!(claim.confidence, ClaimConfidence::Low);
    assert!(!claim.is_covered());
}
