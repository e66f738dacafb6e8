pub mod coverage;
pub mod dispatch;
pub mod filter;
pub mod gates;
pub mod graph;
pub mod run;
pub mod schema;
pub mod shared;
pub mod sweep;
