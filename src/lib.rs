//! `stable-yields` library crate.
//!
//! Two batch jobs share this library and talk to each other only through
//! files on disk:
//!
//! - `collect-yields` fetches DeFiLlama pools, keeps stablecoin lending
//!   markets, enriches them and writes a timestamped snapshot CSV
//! - `build-panel` concatenates every snapshot into a `(pool, date)` panel

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod report;
pub mod transform;
