//! # dossier-ingest
//!
//! Collaborator adapters for the evidence graph:
//! - profile artifacts (structured PDF text) become `PDF` nodes
//! - meeting interactions become `MEETING` nodes
//! - search results become `PUBLIC` nodes plus exactly one ledger row per query
//! - a JSON session document assembles all of the above into a fresh graph

pub mod artifact;
pub mod error;
pub mod search;
pub mod session;

pub use artifact::{NodeDraft, ProfileArtifact, build_evidence_nodes_from_artifact};
pub use error::IngestError;
pub use search::record_search;
pub use session::{SessionInput, build_artifact_evidence_graph};
