//! The append-only evidence store.
//!
//! One `EvidenceGraph` exists per dossier session. It owns every node, claim,
//! and retrieval ledger row, assigns their IDs from per-graph sequences, and
//! never mutates or removes anything once appended.

use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{
    Claim, EvidenceNode, RetrievalLedgerRow, SearchHit, TopResult, UNKNOWN_DATE,
};
use crate::enums::{ClaimConfidence, EvidenceTag, EvidenceType};
use crate::ids::{PREFIX_CLAIM, PREFIX_NODE, PREFIX_QUERY, Sequence};
use crate::text::{TOP_RESULTS_MAX, cap_snippet};

/// Plain projection of a graph for transport or persistence.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct GraphSnapshot {
    pub nodes: Vec<EvidenceNode>,
    pub claims: Vec<Claim>,
    pub ledger: Vec<RetrievalLedgerRow>,
}

/// Container for evidence nodes, claims, and the retrieval ledger.
///
/// Appends take `&mut self`; share a graph across tasks through
/// [`crate::SharedEvidenceGraph`] so ID assignment stays serialized.
#[derive(Debug, Clone)]
pub struct EvidenceGraph {
    nodes: Vec<EvidenceNode>,
    claims: Vec<Claim>,
    ledger: Vec<RetrievalLedgerRow>,
    node_index: HashMap<String, usize>,
    claim_index: HashMap<String, usize>,
    node_seq: Sequence,
    claim_seq: Sequence,
    query_seq: Sequence,
}

impl Default for EvidenceGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl EvidenceGraph {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            claims: Vec::new(),
            ledger: Vec::new(),
            node_index: HashMap::new(),
            claim_index: HashMap::new(),
            node_seq: Sequence::new(PREFIX_NODE),
            claim_seq: Sequence::new(PREFIX_CLAIM),
            query_seq: Sequence::new(PREFIX_QUERY),
        }
    }

    // --- Nodes ---

    /// Append an evidence node. The snippet is cut to 200 characters here and
    /// nowhere else; a missing or empty date becomes `"UNKNOWN"`.
    pub fn add_node(
        &mut self,
        kind: EvidenceType,
        source: &str,
        snippet: &str,
        reference: &str,
        date: Option<&str>,
    ) -> &EvidenceNode {
        let id = self.node_seq.issue();
        let node = EvidenceNode {
            id: id.clone(),
            kind,
            source: source.to_string(),
            snippet: cap_snippet(snippet),
            reference: reference.to_string(),
            date: date
                .filter(|d| !d.trim().is_empty())
                .unwrap_or(UNKNOWN_DATE)
                .to_string(),
        };
        tracing::debug!(node_id = %id, kind = %kind, source = %node.source, "evidence node added");

        let idx = self.nodes.len();
        self.nodes.push(node);
        self.node_index.insert(id, idx);
        &self.nodes[idx]
    }

    pub fn add_meeting_node(
        &mut self,
        source: &str,
        snippet: &str,
        reference: &str,
        date: Option<&str>,
    ) -> &EvidenceNode {
        self.add_node(EvidenceType::Meeting, source, snippet, reference, date)
    }

    pub fn add_public_node(
        &mut self,
        source: &str,
        snippet: &str,
        reference: &str,
        date: Option<&str>,
    ) -> &EvidenceNode {
        self.add_node(EvidenceType::Public, source, snippet, reference, date)
    }

    pub fn add_pdf_node(
        &mut self,
        source: &str,
        snippet: &str,
        reference: &str,
        date: Option<&str>,
    ) -> &EvidenceNode {
        self.add_node(EvidenceType::Pdf, source, snippet, reference, date)
    }

    // --- Claims ---

    /// Register a claim. Cited IDs are stored as given, dangling or not.
    pub fn add_claim(
        &mut self,
        text: &str,
        tag: EvidenceTag,
        evidence_ids: Vec<String>,
        confidence: ClaimConfidence,
    ) -> &Claim {
        let claim_id = self.claim_seq.issue();
        tracing::debug!(claim_id = %claim_id, tag = %tag, cited = evidence_ids.len(), "claim added");

        let idx = self.claims.len();
        self.claims.push(Claim {
            claim_id: claim_id.clone(),
            text: text.to_string(),
            tag,
            evidence_ids,
            confidence,
        });
        self.claim_index.insert(claim_id, idx);
        &self.claims[idx]
    }

    // --- Retrieval ledger ---

    /// Record one executed retrieval query.
    ///
    /// Always appends exactly one row, including for `None` or empty results.
    /// `result_count` is the size of the raw set; only the first five results
    /// are summarized, each snippet cut to 200 characters.
    pub fn log_retrieval(
        &mut self,
        query: &str,
        intent: &str,
        results: Option<&[SearchHit]>,
        selected_evidence_ids: Vec<String>,
    ) -> &RetrievalLedgerRow {
        let results = results.unwrap_or_default();
        let query_id = self.query_seq.issue();

        let top_results = results
            .iter()
            .take(TOP_RESULTS_MAX)
            .zip(1u32..)
            .map(|(hit, rank)| TopResult {
                rank,
                title: hit.title().to_string(),
                url: hit.resolved_url().to_string(),
                date: hit
                    .date
                    .clone()
                    .unwrap_or_else(|| UNKNOWN_DATE.to_string()),
                snippet: cap_snippet(hit.snippet()),
            })
            .collect();

        tracing::debug!(
            query_id = %query_id,
            intent,
            result_count = results.len(),
            "retrieval logged"
        );

        self.ledger.push(RetrievalLedgerRow {
            query_id,
            query: query.to_string(),
            intent: intent.to_string(),
            top_results,
            selected_evidence_ids,
            result_count: results.len(),
        });
        let idx = self.ledger.len() - 1;
        &self.ledger[idx]
    }

    // --- Lookups ---

    #[must_use]
    pub fn node(&self, id: &str) -> Option<&EvidenceNode> {
        self.node_index.get(id).map(|&idx| &self.nodes[idx])
    }

    #[must_use]
    pub fn claim(&self, id: &str) -> Option<&Claim> {
        self.claim_index.get(id).map(|&idx| &self.claims[idx])
    }

    #[must_use]
    pub fn nodes(&self) -> &[EvidenceNode] {
        &self.nodes
    }

    pub fn nodes_of_type(&self, kind: EvidenceType) -> impl Iterator<Item = &EvidenceNode> {
        self.nodes.iter().filter(move |node| node.kind == kind)
    }

    #[must_use]
    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }

    #[must_use]
    pub fn ledger(&self) -> &[RetrievalLedgerRow] {
        &self.ledger
    }

    /// Ledger rows with `intent == "visibility"`, in execution order.
    #[must_use]
    pub fn visibility_rows(&self) -> Vec<&RetrievalLedgerRow> {
        self.ledger.iter().filter(|row| row.is_visibility()).collect()
    }

    #[must_use]
    pub fn visibility_executed(&self) -> bool {
        self.ledger.iter().any(RetrievalLedgerRow::is_visibility)
    }

    /// Whether any non-visibility retrieval returned at least one result.
    #[must_use]
    pub fn has_public_results(&self) -> bool {
        self.ledger
            .iter()
            .any(|row| !row.is_visibility() && row.has_results())
    }

    /// Number of ledger rows, of any intent, that returned results.
    #[must_use]
    pub fn rows_with_results(&self) -> usize {
        self.ledger.iter().filter(|row| row.has_results()).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.claims.is_empty() && self.ledger.is_empty()
    }

    // --- Serialization ---

    /// Project all three collections, in creation order.
    #[must_use]
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            nodes: self.nodes.clone(),
            claims: self.claims.clone(),
            ledger: self.ledger.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn hit(title: &str, link: &str, snippet: &str) -> SearchHit {
        SearchHit {
            title: Some(title.into()),
            link: Some(link.into()),
            snippet: Some(snippet.into()),
            ..SearchHit::default()
        }
    }

    // --- Nodes ---

    #[test]
    fn node_ids_increment_from_one() {
        let mut g = EvidenceGraph::new();
        let a = g.add_meeting_node("call", "one", "", None).id.clone();
        let b = g.add_public_node("https://x", "two", "", None).id.clone();
        let c = g.add_pdf_node("linkedin_pdf:Ben", "three", "", None).id.clone();
        assert_eq!((a.as_str(), b.as_str(), c.as_str()), ("E1", "E2", "E3"));
    }

    #[test]
    fn node_snippet_truncated_at_write() {
        let mut g = EvidenceGraph::new();
        let node = g.add_public_node("src", &"x".repeat(300), "", None);
        assert_eq!(node.snippet.chars().count(), 200);
    }

    #[test]
    fn node_date_defaults_to_unknown() {
        let mut g = EvidenceGraph::new();
        assert_eq!(g.add_meeting_node("s", "t", "", None).date, "UNKNOWN");
        assert_eq!(g.add_meeting_node("s", "t", "", Some("  ")).date, "UNKNOWN");
        assert_eq!(
            g.add_meeting_node("s", "t", "00:10", Some("2025-01-15")).date,
            "2025-01-15"
        );
    }

    #[test]
    fn node_lookup_returns_none_for_missing_id() {
        let mut g = EvidenceGraph::new();
        g.add_meeting_node("s", "t", "", None);
        assert!(g.node("E1").is_some());
        assert!(g.node("E99").is_none());
    }

    #[test]
    fn nodes_of_type_filters() {
        let mut g = EvidenceGraph::new();
        g.add_meeting_node("s", "t", "", None);
        g.add_pdf_node("s", "t", "", None);
        g.add_pdf_node("s", "t", "", None);
        assert_eq!(g.nodes_of_type(EvidenceType::Pdf).count(), 2);
    }

    // --- Claims ---

    #[test]
    fn claim_ids_increment_independently_of_nodes() {
        let mut g = EvidenceGraph::new();
        g.add_meeting_node("s", "t", "", None);
        let c1 = g
            .add_claim("a", EvidenceTag::VerifiedMeeting, vec!["E1".into()], ClaimConfidence::High)
            .claim_id
            .clone();
        let c2 = g
            .add_claim("b", EvidenceTag::Unknown, Vec::new(), ClaimConfidence::Low)
            .claim_id
            .clone();
        assert_eq!(c1, "C1");
        assert_eq!(c2, "C2");
        assert_eq!(g.claim("C2").map(|c| c.tag), Some(EvidenceTag::Unknown));
        assert!(g.claim("C3").is_none());
    }

    #[test]
    fn dangling_evidence_ids_are_tolerated() {
        let mut g = EvidenceGraph::new();
        let claim = g.add_claim("a", EvidenceTag::InferredMedium, vec!["E404".into()], ClaimConfidence::Medium);
        assert_eq!(claim.evidence_ids, vec!["E404".to_string()]);
    }

    // --- Ledger ---

    #[test]
    fn log_retrieval_none_results_still_appends_row() {
        let mut g = EvidenceGraph::new();
        let row = g.log_retrieval("\"Ben\" TED", "visibility", None, Vec::new());
        assert_eq!(row.query_id, "Q1");
        assert_eq!(row.result_count, 0);
        assert!(row.top_results.is_empty());
        assert_eq!(g.ledger().len(), 1);
    }

    #[test]
    fn log_retrieval_empty_results_still_appends_row() {
        let mut g = EvidenceGraph::new();
        g.log_retrieval("q", "bio", Some(&[]), Vec::new());
        assert_eq!(g.ledger().len(), 1);
        assert_eq!(g.ledger()[0].result_count, 0);
    }

    #[test]
    fn top_results_capped_at_five_but_count_is_raw() {
        let mut g = EvidenceGraph::new();
        let hits: Vec<_> = (0..10)
            .map(|i| hit(&format!("R{i}"), &format!("https://x/{i}"), "s"))
            .collect();
        let row = g.log_retrieval("q", "bio", Some(&hits), Vec::new());
        assert_eq!(row.top_results.len(), 5);
        assert_eq!(row.result_count, 10);
        assert_eq!(row.top_results[0].rank, 1);
        assert_eq!(row.top_results[4].rank, 5);
        assert_eq!(row.top_results[4].url, "https://x/4");
    }

    #[test]
    fn top_result_snippets_truncated_and_dates_defaulted() {
        let mut g = EvidenceGraph::new();
        let hits = [hit("T", "https://x", &"y".repeat(400))];
        let row = g.log_retrieval("q", "press", Some(&hits), Vec::new());
        assert_eq!(row.top_results[0].snippet.chars().count(), 200);
        assert_eq!(row.top_results[0].date, "UNKNOWN");
    }

    #[test]
    fn selected_evidence_ids_are_recorded() {
        let mut g = EvidenceGraph::new();
        let row = g.log_retrieval("q", "bio", None, vec!["E1".into(), "E2".into()]);
        assert_eq!(row.selected_evidence_ids, vec!["E1", "E2"]);
    }

    #[test]
    fn visibility_rows_filter_by_intent() {
        let mut g = EvidenceGraph::new();
        g.log_retrieval("a", "visibility", None, Vec::new());
        g.log_retrieval("b", "bio", None, Vec::new());
        g.log_retrieval("c", "visibility", None, Vec::new());
        let rows: Vec<_> = g.visibility_rows().iter().map(|r| r.query.clone()).collect();
        assert_eq!(rows, vec!["a", "c"]);
        assert!(g.visibility_executed());
    }

    #[test]
    fn public_results_ignore_visibility_rows() {
        let mut g = EvidenceGraph::new();
        let hits = [hit("T", "https://x", "s")];
        g.log_retrieval("a", "visibility", Some(&hits), Vec::new());
        assert!(!g.has_public_results());
        assert_eq!(g.rows_with_results(), 1);

        g.log_retrieval("b", "bio", Some(&hits), Vec::new());
        assert!(g.has_public_results());
    }

    // --- Snapshot ---

    #[test]
    fn snapshot_of_empty_graph_is_empty() {
        let g = EvidenceGraph::new();
        assert!(g.is_empty());
        assert_eq!(g.snapshot(), GraphSnapshot::default());
    }

    #[test]
    fn snapshot_preserves_creation_order_past_nine() {
        let mut g = EvidenceGraph::new();
        for i in 0..12 {
            g.add_public_node("s", &format!("fact {i}"), "", None);
        }
        let ids: Vec<_> = g.snapshot().nodes.into_iter().map(|n| n.id).collect();
        assert_eq!(ids.first().map(String::as_str), Some("E1"));
        assert_eq!(ids.get(9).map(String::as_str), Some("E10"));
        assert_eq!(ids.last().map(String::as_str), Some("E12"));
    }

    #[test]
    fn snapshot_serializes_wire_field_names() {
        let mut g = EvidenceGraph::new();
        g.add_pdf_node("linkedin_pdf:Ben", "Headline", "headline", None);
        let json = serde_json::to_value(g.snapshot()).unwrap();
        assert_eq!(json["nodes"][0]["type"], "PDF");
        assert_eq!(json["nodes"][0]["ref"], "headline");
    }
}
