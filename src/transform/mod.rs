//! Pool screening and enrichment.
//!
//! - stablecoin lending filter (`filter`)
//! - derived metrics + canonical records (`enrich`)
//! - ordered classification tables (`classify`)

pub mod classify;
pub mod enrich;
pub mod filter;

pub use classify::*;
pub use enrich::*;
pub use filter::*;
