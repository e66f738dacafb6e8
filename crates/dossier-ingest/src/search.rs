//! Search results → `PUBLIC` nodes plus one ledger row.

use dossier_core::EvidenceGraph;
use dossier_core::entities::SearchHit;

/// Log one executed search, promoting its first `promote` hits to evidence.
///
/// Each promoted hit becomes a `PUBLIC` node (source = URL, else title;
/// snippet = hit snippet, else title; ref = `rank:<n>`). Exactly one ledger
/// row is appended whatever `hits` holds, citing the promoted node IDs.
/// Returns the row's query ID.
pub fn record_search(
    graph: &mut EvidenceGraph,
    query: &str,
    intent: &str,
    hits: Option<&[SearchHit]>,
    promote: usize,
) -> String {
    let mut selected = Vec::new();

    for (hit, rank) in hits.unwrap_or_default().iter().take(promote).zip(1usize..) {
        let source = match hit.resolved_url() {
            "" => hit.title(),
            url => url,
        };
        let snippet = match hit.snippet() {
            "" => hit.title(),
            snippet => snippet,
        };
        if source.is_empty() && snippet.is_empty() {
            tracing::warn!(query, rank, "search hit has no url, title, or snippet; not promoted");
            continue;
        }
        let node = graph.add_public_node(source, snippet, &format!("rank:{rank}"), hit.date.as_deref());
        selected.push(node.id.clone());
    }

    graph.log_retrieval(query, intent, hits, selected).query_id.clone()
}
