use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The only retrieval intent with gating significance.
pub const INTENT_VISIBILITY: &str = "visibility";

/// A raw search result as handed over by the web search provider.
///
/// Providers disagree on the URL key (`link` vs `url`); both are accepted and
/// `link` wins when both are present.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SearchHit {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

impl SearchHit {
    #[must_use]
    pub fn resolved_url(&self) -> &str {
        self.link
            .as_deref()
            .or(self.url.as_deref())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn snippet(&self) -> &str {
        self.snippet.as_deref().unwrap_or_default()
    }
}

/// Ranked summary of one raw result kept on a ledger row.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TopResult {
    pub rank: u32,
    pub title: String,
    pub url: String,
    pub date: String,
    /// At most 200 characters.
    pub snippet: String,
}

/// Immutable audit record of one executed retrieval query.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RetrievalLedgerRow {
    pub query_id: String,
    pub query: String,
    /// Free-text category; only `"visibility"` affects gating.
    pub intent: String,
    /// At most 5 entries.
    #[serde(default)]
    pub top_results: Vec<TopResult>,
    #[serde(default)]
    pub selected_evidence_ids: Vec<String>,
    /// Size of the raw result set, independent of `top_results`.
    #[serde(default)]
    pub result_count: usize,
}

impl RetrievalLedgerRow {
    #[must_use]
    pub fn is_visibility(&self) -> bool {
        self.intent == INTENT_VISIBILITY
    }

    #[must_use]
    pub const fn has_results(&self) -> bool {
        self.result_count > 0
    }
}
