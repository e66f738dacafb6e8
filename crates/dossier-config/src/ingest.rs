//! Limits applied when turning collaborator records into evidence.

use serde::{Deserialize, Serialize};

const fn default_max_interactions() -> usize {
    15
}

const fn default_max_experience() -> usize {
    10
}

const fn default_max_education() -> usize {
    5
}

const fn default_max_skills() -> usize {
    20
}

const fn default_max_section_chunks() -> usize {
    3
}

const fn default_promote_top_hits() -> usize {
    1
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IngestConfig {
    /// Meeting interactions turned into MEETING nodes.
    #[serde(default = "default_max_interactions")]
    pub max_interactions: usize,

    #[serde(default = "default_max_experience")]
    pub max_experience: usize,

    #[serde(default = "default_max_education")]
    pub max_education: usize,

    /// Skills listed in the single skills node.
    #[serde(default = "default_max_skills")]
    pub max_skills: usize,

    /// Chunks kept per extra profile section.
    #[serde(default = "default_max_section_chunks")]
    pub max_section_chunks: usize,

    /// Hits of each logged search promoted into PUBLIC nodes.
    #[serde(default = "default_promote_top_hits")]
    pub promote_top_hits: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_interactions: default_max_interactions(),
            max_experience: default_max_experience(),
            max_education: default_max_education(),
            max_skills: default_max_skills(),
            max_section_chunks: default_max_section_chunks(),
            promote_top_hits: default_promote_top_hits(),
        }
    }
}
