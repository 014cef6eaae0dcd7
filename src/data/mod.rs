//! Upstream data sources.

pub mod llama;

pub use llama::{DEFAULT_POOLS_URL, DEFAULT_TIMEOUT_SECS, LlamaClient};
