//! Domain types used throughout the collector and panel builder.
//!
//! This module defines:
//!
//! - the API payload shape (`RawPool`) and the enriched row (`PoolRecord`)
//! - classification enums (`ProtocolTier`, `ChainType`, `StableType`, `TvlCategory`)
//! - static screening tables (`catalog`)

pub mod catalog;
pub mod types;

pub use types::*;
