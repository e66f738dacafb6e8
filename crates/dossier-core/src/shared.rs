use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::graph::{EvidenceGraph, GraphSnapshot};

/// Cloneable handle to one session's graph.
///
/// Every append runs under the lock, so concurrent producers still receive
/// unique, gap-free IDs. A poisoned lock is recovered: the graph is
/// append-only, so a panicking writer can leave at most one fully pushed
/// entry behind.
#[derive(Debug, Clone, Default)]
pub struct SharedEvidenceGraph {
    inner: Arc<Mutex<EvidenceGraph>>,
}

impl SharedEvidenceGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_graph(graph: EvidenceGraph) -> Self {
        Self {
            inner: Arc::new(Mutex::new(graph)),
        }
    }

    /// Lock for direct access.
    pub fn lock(&self) -> MutexGuard<'_, EvidenceGraph> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` with exclusive access and return its result.
    pub fn with<R>(&self, f: impl FnOnce(&mut EvidenceGraph) -> R) -> R {
        f(&mut self.lock())
    }

    #[must_use]
    pub fn snapshot(&self) -> GraphSnapshot {
        self.lock().snapshot()
    }
}

impl From<EvidenceGraph> for SharedEvidenceGraph {
    fn from(graph: EvidenceGraph) -> Self {
        Self::from_graph(graph)
    }
}
