//! Whole-session assembly from a JSON session document.

use std::io::Read;
use std::path::Path;

use dossier_config::IngestConfig;
use dossier_core::EvidenceGraph;
use dossier_core::entities::SearchHit;
use dossier_core::enums::{ClaimConfidence, EvidenceTag};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::artifact::{ProfileArtifact, build_evidence_nodes_from_artifact};
use crate::error::IngestError;
use crate::search::record_search;

/// Path that reads the session document from stdin.
pub const STDIN_PATH: &str = "-";

/// One meeting, call, or email thread with the person.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Interaction {
    pub title: String,
    pub summary: String,
    pub date: Option<String>,
    #[serde(rename = "type", alias = "kind")]
    pub kind: String,
}

/// One search the orchestrator already executed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RetrievalInput {
    pub query: String,
    pub intent: String,
    /// `null` and missing both mean zero results.
    #[serde(default)]
    pub results: Option<Vec<SearchHit>>,
    /// Overrides `ingest.promote_top_hits` for this search.
    #[serde(default)]
    pub promote: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ClaimInput {
    pub text: String,
    pub tag: EvidenceTag,
    #[serde(default)]
    pub evidence_ids: Vec<String>,
    #[serde(default)]
    pub confidence: ClaimConfidence,
}

/// Everything the orchestrator collected for one dossier.
///
/// Evidence IDs are assigned during [`assemble`](Self::assemble) in a fixed
/// order, so claims may cite `E<n>` IDs computed from the document layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SessionInput {
    pub person_name: String,
    #[serde(default)]
    pub company: String,
    /// Externally computed 0..=100.
    #[serde(default)]
    pub entity_lock_score: u8,
    #[serde(default)]
    pub artifact: Option<ProfileArtifact>,
    #[serde(default)]
    pub interactions: Vec<Interaction>,
    #[serde(default)]
    pub retrievals: Vec<RetrievalInput>,
    #[serde(default)]
    pub claims: Vec<ClaimInput>,
    /// Synthesized dossier prose, used for text-level coverage when no claims exist.
    #[serde(default)]
    pub dossier_text: Option<String>,
}

impl SessionInput {
    /// Parse and validate a session document.
    pub fn from_json_str(json: &str) -> Result<Self, IngestError> {
        let session: Self = serde_json::from_str(json)?;
        session.validate()?;
        Ok(session)
    }

    /// Read a session document from `path`, or stdin when `path` is `-`.
    pub fn from_path(path: &Path) -> Result<Self, IngestError> {
        let io_err = |source| IngestError::Io {
            path: path.to_path_buf(),
            source,
        };
        let json = if path.as_os_str() == STDIN_PATH {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).map_err(io_err)?;
            buf
        } else {
            std::fs::read_to_string(path).map_err(io_err)?
        };
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), IngestError> {
        if self.entity_lock_score > 100 {
            return Err(IngestError::InvalidField {
                field: "entity_lock_score".into(),
                reason: format!("{} is outside 0..=100", self.entity_lock_score),
            });
        }
        if let Some(i) = self.retrievals.iter().position(|r| r.query.trim().is_empty()) {
            return Err(IngestError::InvalidField {
                field: format!("retrievals[{i}].query"),
                reason: "query must not be empty".into(),
            });
        }
        Ok(())
    }

    /// Build a fresh graph: artifact nodes, meeting nodes, retrievals in
    /// document order, then claims.
    #[must_use]
    pub fn assemble(&self, limits: &IngestConfig) -> EvidenceGraph {
        let mut graph = build_artifact_evidence_graph(
            self.artifact.as_ref(),
            &self.interactions,
            &self.person_name,
            limits,
        );

        for retrieval in &self.retrievals {
            record_search(
                &mut graph,
                &retrieval.query,
                &retrieval.intent,
                retrieval.results.as_deref(),
                retrieval.promote.unwrap_or(limits.promote_top_hits),
            );
        }

        for claim in &self.claims {
            graph.add_claim(&claim.text, claim.tag, claim.evidence_ids.clone(), claim.confidence);
        }

        tracing::debug!(
            person = %self.person_name,
            nodes = graph.nodes().len(),
            claims = graph.claims().len(),
            ledger = graph.ledger().len(),
            "session assembled"
        );
        graph
    }
}

/// Graph from the profile artifact and meetings alone, with no web retrieval.
#[must_use]
pub fn build_artifact_evidence_graph(
    artifact: Option<&ProfileArtifact>,
    interactions: &[Interaction],
    person_name: &str,
    limits: &IngestConfig,
) -> EvidenceGraph {
    let mut graph = EvidenceGraph::new();

    if let Some(artifact) = artifact {
        for draft in build_evidence_nodes_from_artifact(artifact, person_name, limits) {
            draft.add_to(&mut graph);
        }
    }

    if interactions.len() > limits.max_interactions {
        tracing::warn!(
            supplied = interactions.len(),
            kept = limits.max_interactions,
            "interactions beyond the limit were dropped"
        );
    }
    for interaction in interactions.iter().take(limits.max_interactions) {
        let source = if interaction.title.is_empty() { "meeting" } else { interaction.title.as_str() };
        let snippet = if interaction.summary.is_empty() {
            &interaction.title
        } else {
            &interaction.summary
        };
        let reference = if interaction.kind.is_empty() { "meeting" } else { interaction.kind.as_str() };
        graph.add_meeting_node(source, snippet, reference, interaction.date.as_deref());
    }

    graph
}

#[cfg(test)]
mod tests {
    use dossier_core::enums::EvidenceType;
    use pretty_assertions::assert_eq;

    use super::*;

    const SESSION: &str = r#"{
        "person_name": "Ben Titmus",
        "company": "Acme",
        "entity_lock_score": 82,
        "artifact": { "headline": "VP Platform at Acme", "skills": ["Go"] },
        "interactions": [
            { "title": "Intro call", "summary": "Discussed platform roadmap", "date": "2025-01-10", "type": "call" },
            { "title": "", "summary": "" }
        ],
        "retrievals": [
            { "query": "\"Ben Titmus\" TED", "intent": "visibility", "results": null },
            { "query": "Ben Titmus Acme", "intent": "bio",
              "results": [{ "title": "Team", "link": "https://acme.example/team", "snippet": "Ben leads platform" }] }
        ],
        "claims": [
            { "text": "Leads platform at Acme", "tag": "VERIFIED_PUBLIC", "evidence_ids": ["E5"] },
            { "text": "Owns the roadmap", "tag": "INFERRED-M", "evidence_ids": ["E3"], "confidence": "M" }
        ]
    }"#;

    #[test]
    fn assembles_in_fixed_order() {
        let session = SessionInput::from_json_str(SESSION).unwrap();
        let g = session.assemble(&IngestConfig::default());

        let kinds: Vec<_> = g.nodes().iter().map(|n| n.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EvidenceType::Pdf,
                EvidenceType::Pdf,
                EvidenceType::Meeting,
                EvidenceType::Meeting,
                EvidenceType::Public
            ]
        );
        assert_eq!(g.ledger().len(), 2);
        assert_eq!(g.ledger()[1].selected_evidence_ids, vec!["E5".to_string()]);
        assert_eq!(g.claims().len(), 2);
        assert_eq!(g.claims()[0].tag, EvidenceTag::VerifiedPublic);
        assert_eq!(g.claims()[0].confidence, ClaimConfidence::Low);
    }

    #[test]
    fn meeting_nodes_fall_back_to_defaults() {
        let session = SessionInput::from_json_str(SESSION).unwrap();
        let g = session.assemble(&IngestConfig::default());

        let first = g.node("E3").unwrap();
        assert_eq!(first.source, "Intro call");
        assert_eq!(first.reference, "call");
        assert_eq!(first.date, "2025-01-10");

        let blank = g.node("E4").unwrap();
        assert_eq!(blank.source, "meeting");
        assert_eq!(blank.reference, "meeting");
        assert_eq!(blank.date, "UNKNOWN");
    }

    #[test]
    fn interactions_are_capped() {
        let interactions = vec![
            Interaction {
                title: "Sync".into(),
                ..Interaction::default()
            };
            20
        ];
        let limits = IngestConfig::default();
        let g = build_artifact_evidence_graph(None, &interactions, "Ben", &limits);
        assert_eq!(g.nodes().len(), 15);
        assert!(g.ledger().is_empty());
    }

    #[test]
    fn per_search_promote_override() {
        let json = r#"{
            "person_name": "Ben",
            "retrievals": [{ "query": "q", "intent": "bio", "promote": 0,
                             "results": [{ "title": "t", "url": "https://a" }] }]
        }"#;
        let g = SessionInput::from_json_str(json).unwrap().assemble(&IngestConfig::default());
        assert!(g.nodes().is_empty());
        assert_eq!(g.ledger()[0].result_count, 1);
    }

    #[test]
    fn rejects_out_of_range_lock_score() {
        let err = SessionInput::from_json_str(r#"{ "person_name": "Ben", "entity_lock_score": 140 }"#).unwrap_err();
        assert!(matches!(err, IngestError::InvalidField { ref field, .. } if field == "entity_lock_score"));
    }

    #[test]
    fn rejects_empty_query() {
        let err = SessionInput::from_json_str(r#"{ "person_name": "Ben", "retrievals": [{ "query": " ", "intent": "bio" }] }"#)
            .unwrap_err();
        assert!(err.to_string().contains("retrievals[0].query"));
    }

    #[test]
    fn unknown_tag_is_a_json_error() {
        let json = r#"{ "person_name": "Ben", "claims": [{ "text": "x", "tag": "VERIFIED-RUMOUR" }] }"#;
        assert!(matches!(SessionInput::from_json_str(json), Err(IngestError::Json(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = SessionInput::from_path(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, IngestError::Io { .. }));
    }
}
