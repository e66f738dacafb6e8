//! Visibility sweep: the fixed query battery, scoring of what was run, and
//! extraction of the strongest public-visibility artifacts.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use dossier_core::EvidenceGraph;
use dossier_core::entities::{INTENT_VISIBILITY, RetrievalLedgerRow};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::thresholds::MAX_SIGNAL_ARTIFACTS;

/// Placeholder substituted into the battery wherever a person's name goes.
pub const NAME_SLOT: &str = "{name}";

/// Name used in mode reasons and failure reports when none is supplied.
pub const NAME_PLACEHOLDER: &str = "<name>";

/// Name used in the visibility gate's remediation when none is supplied.
pub const FULL_NAME_PLACEHOLDER: &str = "<full name>";

/// The 15 visibility queries, in canonical execution order.
pub const VISIBILITY_QUERY_TEMPLATES: [&str; 15] = [
    // TED / TEDx
    "\"{name}\" TED",
    "\"{name}\" TEDx",
    "site:ted.com \"{name}\"",
    "site:youtube.com \"{name}\" TEDx",
    // Keynotes / conferences
    "\"{name}\" keynote",
    "\"{name}\" conference talk",
    "\"{name}\" summit speaker",
    "\"{name}\" panel discussion",
    // Podcasts / webinars / interviews
    "\"{name}\" podcast",
    "\"{name}\" webinar",
    "\"{name}\" interview video",
    "\"{name}\" fireside chat",
    // Video / slide decks
    "\"{name}\" YouTube talk",
    "\"{name}\" Vimeo talk",
    "\"{name}\" SlideShare",
];

// ---------------------------------------------------------------------------
// Families
// ---------------------------------------------------------------------------

/// Scoring family of a battery template. Each family with results is worth 10 points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QueryFamily {
    Ted,
    Tedx,
    Keynote,
    Conference,
    Summit,
    Panel,
    Podcast,
    Webinar,
    InterviewVideo,
    YoutubeTalk,
}

/// Family of each template, by battery index.
const FAMILY_BY_TEMPLATE: [QueryFamily; 15] = [
    QueryFamily::Ted,
    QueryFamily::Tedx,
    QueryFamily::Ted,
    QueryFamily::Tedx,
    QueryFamily::Keynote,
    QueryFamily::Conference,
    QueryFamily::Summit,
    QueryFamily::Panel,
    QueryFamily::Podcast,
    QueryFamily::Webinar,
    QueryFamily::InterviewVideo,
    QueryFamily::InterviewVideo,
    QueryFamily::YoutubeTalk,
    QueryFamily::YoutubeTalk,
    QueryFamily::YoutubeTalk,
];

impl QueryFamily {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ted => "ted",
            Self::Tedx => "tedx",
            Self::Keynote => "keynote",
            Self::Conference => "conference",
            Self::Summit => "summit",
            Self::Panel => "panel",
            Self::Podcast => "podcast",
            Self::Webinar => "webinar",
            Self::InterviewVideo => "interview_video",
            Self::YoutubeTalk => "youtube_talk",
        }
    }

    /// Family of the template at `index`; `None` past the battery.
    #[must_use]
    pub const fn for_template(index: usize) -> Option<Self> {
        if index < FAMILY_BY_TEMPLATE.len() {
            Some(FAMILY_BY_TEMPLATE[index])
        } else {
            None
        }
    }

    #[must_use]
    pub const fn is_ted(self) -> bool {
        matches!(self, Self::Ted | Self::Tedx)
    }
}

impl fmt::Display for QueryFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Audit grouping of the battery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CategoryGroup {
    TedTedx,
    KeynoteConference,
    PodcastWebinar,
    YoutubeVideo,
}

impl CategoryGroup {
    pub const ALL: [Self; 4] = [
        Self::TedTedx,
        Self::KeynoteConference,
        Self::PodcastWebinar,
        Self::YoutubeVideo,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TedTedx => "ted_tedx",
            Self::KeynoteConference => "keynote_conference",
            Self::PodcastWebinar => "podcast_webinar",
            Self::YoutubeVideo => "youtube_video",
        }
    }

    #[must_use]
    pub const fn template_indices(self) -> &'static [usize] {
        match self {
            Self::TedTedx => &[0, 1, 2, 3],
            Self::KeynoteConference => &[4, 5, 6, 7],
            Self::PodcastWebinar => &[8, 9, 10, 11],
            Self::YoutubeVideo => &[12, 13, 14],
        }
    }
}

// ---------------------------------------------------------------------------
// Battery rendering
// ---------------------------------------------------------------------------

/// One planned retrieval of the sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SweepQuery {
    pub query: String,
    pub intent: String,
}

#[must_use]
pub fn render_template(template: &str, name: &str) -> String {
    template.replace(NAME_SLOT, name)
}

/// The 15 battery queries with `name` substituted, in canonical order.
#[must_use]
pub fn required_visibility_queries(name: &str) -> Vec<String> {
    VISIBILITY_QUERY_TEMPLATES
        .iter()
        .map(|template| render_template(template, name))
        .collect()
}

/// The sweep to execute, as `visibility`-intent queries.
///
/// A non-empty `company` appends one company-qualified query after the
/// battery.
#[must_use]
pub fn build_visibility_queries(name: &str, company: &str) -> Vec<SweepQuery> {
    let mut queries: Vec<SweepQuery> = required_visibility_queries(name)
        .into_iter()
        .map(|query| SweepQuery {
            query,
            intent: INTENT_VISIBILITY.to_string(),
        })
        .collect();

    if !company.trim().is_empty() {
        queries.push(SweepQuery {
            query: format!("\"{name}\" \"{company}\" keynote OR conference OR podcast"),
            intent: INTENT_VISIBILITY.to_string(),
        });
    }
    queries
}

/// Bullet list of the rendered battery, one `  - query` per line.
#[must_use]
pub fn battery_bullets(name: &str, indent: &str) -> String {
    required_visibility_queries(name)
        .iter()
        .map(|query| format!("{indent}- {query}"))
        .collect::<Vec<_>>()
        .join("\n")
}

// ---------------------------------------------------------------------------
// Row matching
// ---------------------------------------------------------------------------

/// Battery index whose template `query` is a rendering of, for any quoted name.
///
/// Comparison ignores case and surrounding whitespace.
#[must_use]
pub fn match_template(query: &str) -> Option<usize> {
    let query = query.trim().to_lowercase();
    VISIBILITY_QUERY_TEMPLATES.iter().position(|template| {
        let Some((prefix, suffix)) = template.split_once(NAME_SLOT) else {
            return false;
        };
        let (prefix, suffix) = (prefix.to_lowercase(), suffix.to_lowercase());
        query.len() > prefix.len() + suffix.len()
            && query.starts_with(&prefix)
            && query.ends_with(&suffix)
            && !query[prefix.len()..query.len() - suffix.len()].contains('"')
    })
}

/// Battery index a visibility row is scored against.
///
/// Rows are matched by query text; a row whose text matches no template falls
/// back to its position among visibility rows.
#[must_use]
pub fn template_index_for_row(position: usize, query: &str) -> Option<usize> {
    match_template(query).or_else(|| (position < VISIBILITY_QUERY_TEMPLATES.len()).then_some(position))
}

fn row_families<'a>(
    rows: &'a [&'a RetrievalLedgerRow],
) -> impl Iterator<Item = (&'a RetrievalLedgerRow, Option<QueryFamily>)> + 'a {
    rows.iter().enumerate().map(|(position, row)| {
        let family = template_index_for_row(position, &row.query).and_then(QueryFamily::for_template);
        (*row, family)
    })
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// 0-100 confidence that the visibility sweep covered the person's public presence.
///
/// +10 per family with at least one row returning results, +10 once if any
/// TED/TEDx row was executed at all, capped at 100. No visibility rows is 0.
#[must_use]
pub fn compute_visibility_coverage_confidence(graph: &EvidenceGraph) -> u8 {
    let rows = graph.visibility_rows();
    if rows.is_empty() {
        return 0;
    }

    let mut families_with_results = BTreeSet::new();
    let mut ted_executed = false;
    for (row, family) in row_families(&rows) {
        let Some(family) = family else { continue };
        ted_executed |= family.is_ted();
        if row.has_results() {
            families_with_results.insert(family);
        }
    }

    let score = families_with_results.len() * 10 + if ted_executed { 10 } else { 0 };
    tracing::debug!(
        rows = rows.len(),
        families = families_with_results.len(),
        ted_executed,
        score,
        "visibility confidence scored"
    );
    u8::try_from(score.min(100)).unwrap_or(100)
}

/// Execution state of one audit group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CategoryAudit {
    pub group: CategoryGroup,
    /// Templates in the group.
    pub expected: usize,
    /// Distinct templates of the group that were executed.
    pub executed: usize,
    /// Distinct templates of the group that returned results.
    pub with_results: usize,
}

/// Per-group account of which battery templates were run.
#[must_use]
pub fn audit_sweep(graph: &EvidenceGraph) -> Vec<CategoryAudit> {
    let rows = graph.visibility_rows();
    let mut executed = HashSet::new();
    let mut with_results = HashSet::new();
    for (position, row) in rows.iter().enumerate() {
        if let Some(index) = template_index_for_row(position, &row.query) {
            executed.insert(index);
            if row.has_results() {
                with_results.insert(index);
            }
        }
    }

    CategoryGroup::ALL
        .iter()
        .map(|&group| {
            let indices = group.template_indices();
            CategoryAudit {
                group,
                expected: indices.len(),
                executed: indices.iter().filter(|i| executed.contains(*i)).count(),
                with_results: indices.iter().filter(|i| with_results.contains(*i)).count(),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Highest-signal artifacts
// ---------------------------------------------------------------------------

/// Keywords by ascending priority; the index is the priority.
const PRIORITY_KEYWORDS: [&str; 12] = [
    "slideshare",
    "vimeo",
    "webinar",
    "fireside",
    "interview",
    "panel",
    "podcast",
    "conference",
    "summit",
    "keynote",
    "tedx",
    "ted",
];

/// A public-visibility result worth surfacing in the dossier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SignalArtifact {
    pub title: String,
    pub venue: String,
    pub date: String,
    pub url: String,
    pub why_it_matters: String,
}

fn keyword_priority(title: &str, query: &str) -> usize {
    let (title, query) = (title.to_lowercase(), query.to_lowercase());
    PRIORITY_KEYWORDS
        .iter()
        .enumerate()
        .filter(|(_, kw)| title.contains(*kw) || query.contains(*kw))
        .map(|(i, _)| i)
        .max()
        .unwrap_or(0)
}

fn infer_venue(title: &str, url: &str) -> &'static str {
    if url.contains("ted.com") {
        "TED"
    } else if title.to_lowercase().contains("tedx") {
        "TEDx"
    } else if url.contains("youtube.com") {
        "YouTube"
    } else if url.contains("vimeo.com") {
        "Vimeo"
    } else if url.to_lowercase().contains("slideshare") {
        "SlideShare"
    } else {
        "Unknown Venue"
    }
}

const fn signal_value(priority: usize) -> &'static str {
    match priority {
        10.. => "TED/TEDx — top-tier thought leadership visibility",
        8..=9 => "Keynote/conference — industry authority signal",
        6..=7 => "Podcast/panel — public positioning and messaging patterns",
        4..=5 => "Interview/webinar — topical engagement signal",
        _ => "Presentation material — expertise claim",
    }
}

/// Up to `max` (at most 3) strongest visibility results, strongest first.
///
/// Results without a URL are dropped and duplicate URLs keep their first
/// occurrence. Equal priorities keep ledger order.
#[must_use]
pub fn extract_highest_signal_artifacts(graph: &EvidenceGraph, max: usize) -> Vec<SignalArtifact> {
    let mut seen = HashSet::new();
    let mut ranked: Vec<(usize, SignalArtifact)> = graph
        .visibility_rows()
        .into_iter()
        .flat_map(|row| row.top_results.iter().map(move |result| (row, result)))
        .filter(|(_, result)| !result.url.is_empty())
        .filter(|(_, result)| seen.insert(result.url.clone()))
        .map(|(row, result)| {
            let priority = keyword_priority(&result.title, &row.query);
            let artifact = SignalArtifact {
                title: result.title.clone(),
                venue: infer_venue(&result.title, &result.url).to_string(),
                date: result.date.clone(),
                url: result.url.clone(),
                why_it_matters: signal_value(priority).to_string(),
            };
            (priority, artifact)
        })
        .collect();

    ranked.sort_by(|a, b| b.0.cmp(&a.0));
    ranked
        .into_iter()
        .take(max.min(MAX_SIGNAL_ARTIFACTS))
        .map(|(_, artifact)| artifact)
        .collect()
}
