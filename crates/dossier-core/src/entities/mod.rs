//! Entity structs for the evidence graph.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for JSON
//! transport and schema export.

mod claim;
mod ledger;
mod node;

pub use claim::Claim;
pub use ledger::{RetrievalLedgerRow, SearchHit, TopResult, INTENT_VISIBILITY};
pub use node::{EvidenceNode, UNKNOWN_DATE};
