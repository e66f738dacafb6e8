//! Profile artifact → `PDF` evidence nodes.

use std::collections::BTreeMap;
use std::mem;
use std::sync::LazyLock;

use dossier_config::IngestConfig;
use dossier_core::EvidenceGraph;
use dossier_core::entities::UNKNOWN_DATE;
use dossier_core::enums::EvidenceType;
use dossier_core::text::{SNIPPET_MAX_CHARS, cap_snippet, truncate_chars};
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

static YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{4}").expect("year pattern compiles"));

/// Source prefix for nodes built from a profile artifact.
pub const ARTIFACT_SOURCE_PREFIX: &str = "linkedin_pdf:";

/// Sections already covered by dedicated fields.
const DEDICATED_SECTIONS: [&str; 5] = ["header", "about", "experience", "education", "skills"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct EducationEntry {
    pub school: String,
    pub details: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub dates: String,
    pub description: String,
}

/// Structured text handed over by the document ingester.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ProfileArtifact {
    pub raw_text: String,
    pub name: String,
    pub headline: String,
    pub location: String,
    pub about: String,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<String>,
    /// Named free-text sections, keyed by section name.
    pub sections: BTreeMap<String, String>,
    pub page_count: u32,
}

/// An evidence node not yet added to a graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NodeDraft {
    #[serde(rename = "type")]
    pub kind: EvidenceType,
    pub source: String,
    pub snippet: String,
    #[serde(rename = "ref")]
    pub reference: String,
    pub date: String,
}

impl NodeDraft {
    fn pdf(source: &str, snippet: &str, reference: String, date: Option<String>) -> Self {
        Self {
            kind: EvidenceType::Pdf,
            source: source.to_string(),
            snippet: cap_snippet(snippet),
            reference,
            date: date.unwrap_or_else(|| UNKNOWN_DATE.to_string()),
        }
    }

    /// Append to `graph`, returning the assigned node ID.
    pub fn add_to(&self, graph: &mut EvidenceGraph) -> String {
        graph
            .add_node(self.kind, &self.source, &self.snippet, &self.reference, Some(&self.date))
            .id
            .clone()
    }
}

/// First four-digit run in `text`, e.g. `"2019"` from `"Mar 2019 - Present"`.
#[must_use]
pub fn extract_year(text: &str) -> Option<String> {
    YEAR.find(text).map(|m| m.as_str().to_string())
}

/// Split after `.`, `!`, or `?` wherever whitespace follows.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        let end = i + c.len_utf8();
        let mut next = end;
        while let Some(&(j, w)) = chars.peek() {
            if !w.is_whitespace() {
                break;
            }
            next = j + w.len_utf8();
            chars.next();
        }
        if next > end {
            sentences.push(&text[start..end]);
            start = next;
        }
    }
    sentences.push(&text[start..]);
    sentences
}

/// Greedily pack sentences into chunks of at most `max_chars` characters.
///
/// A sentence longer than `max_chars` becomes its own truncated chunk.
#[must_use]
pub fn split_into_chunks(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for sentence in split_sentences(text) {
        if current.chars().count() + sentence.chars().count() < max_chars {
            current = if current.is_empty() {
                sentence.to_string()
            } else {
                format!("{current} {sentence}").trim().to_string()
            };
        } else {
            if !current.is_empty() {
                chunks.push(mem::take(&mut current));
            }
            current = truncate_chars(sentence, max_chars);
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Emit `PDF` node drafts for a profile artifact.
///
/// Order: about chunks, headline, experience, education, skills, then the
/// remaining named sections. Every draft's source is `linkedin_pdf:<name>`.
#[must_use]
pub fn build_evidence_nodes_from_artifact(
    artifact: &ProfileArtifact,
    contact_name: &str,
    limits: &IngestConfig,
) -> Vec<NodeDraft> {
    let source = format!("{ARTIFACT_SOURCE_PREFIX}{contact_name}");
    let mut drafts = Vec::new();

    if !artifact.about.trim().is_empty() {
        drafts.extend(
            split_into_chunks(&artifact.about, SNIPPET_MAX_CHARS)
                .iter()
                .enumerate()
                .map(|(i, chunk)| NodeDraft::pdf(&source, chunk, format!("about:{}", i + 1), None)),
        );
    }

    if !artifact.headline.is_empty() {
        drafts.push(NodeDraft::pdf(&source, &artifact.headline, "headline".to_string(), None));
    }

    for (i, exp) in artifact.experience.iter().take(limits.max_experience).enumerate() {
        let summary = if !exp.title.is_empty() && !exp.company.is_empty() {
            format!("{} at {}", exp.title, exp.company)
        } else if !exp.title.is_empty() {
            exp.title.clone()
        } else {
            exp.description.clone()
        };
        if !summary.is_empty() {
            drafts.push(NodeDraft::pdf(
                &source,
                &summary,
                format!("experience:{}", i + 1),
                extract_year(&exp.dates),
            ));
        }
    }

    for (i, edu) in artifact.education.iter().take(limits.max_education).enumerate() {
        let summary = if edu.details.is_empty() {
            edu.school.clone()
        } else {
            format!("{}: {}", edu.school, edu.details)
        };
        if !summary.is_empty() {
            drafts.push(NodeDraft::pdf(&source, &summary, format!("education:{}", i + 1), None));
        }
    }

    if !artifact.skills.is_empty() {
        let skills = artifact
            .skills
            .iter()
            .take(limits.max_skills)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        drafts.push(NodeDraft::pdf(&source, &format!("Skills: {skills}"), "skills".to_string(), None));
    }

    for (name, content) in &artifact.sections {
        if DEDICATED_SECTIONS.contains(&name.as_str()) || content.trim().is_empty() {
            continue;
        }
        drafts.extend(
            split_into_chunks(content, SNIPPET_MAX_CHARS)
                .iter()
                .take(limits.max_section_chunks)
                .enumerate()
                .map(|(i, chunk)| NodeDraft::pdf(&source, chunk, format!("{name}:{}", i + 1), None)),
        );
    }

    tracing::debug!(drafts = drafts.len(), source = %source, "artifact nodes drafted");
    drafts
}
