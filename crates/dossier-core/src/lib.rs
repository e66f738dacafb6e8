//! # dossier-core
//!
//! Core types and the evidence store for fail-closed dossier generation.
//!
//! This crate provides the foundational types shared across all dossier crates:
//! - Entity structs for evidence nodes, claims, and retrieval ledger rows
//! - Closed enumerations for evidence types, claim tags, confidence, and modes
//! - ID prefix constants and formatting helpers
//! - The append-only [`EvidenceGraph`] and its mutex-guarded shared handle
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod graph;
pub mod ids;
pub mod shared;
pub mod text;

pub use graph::{EvidenceGraph, GraphSnapshot};
pub use shared::SharedEvidenceGraph;
