//! DeFiLlama yields API integration.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{error, info};

use crate::domain::RawPool;
use crate::error::AppError;

pub const DEFAULT_POOLS_URL: &str = "https://yields.llama.fi/pools";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub struct LlamaClient {
    client: Client,
    url: String,
}

impl LlamaClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::io(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Fetch every pool the endpoint lists.
    ///
    /// Single attempt. Transport errors, non-2xx statuses and undecodable
    /// bodies are logged and reported as `None`.
    pub fn fetch_pools(&self) -> Option<Vec<RawPool>> {
        info!(url = %self.url, "fetching yield pools");
        match self.try_fetch_pools() {
            Ok(pools) => {
                info!(count = pools.len(), "retrieved pools");
                Some(pools)
            }
            Err(err) => {
                error!(url = %self.url, "pool fetch failed: {err}");
                None
            }
        }
    }

    fn try_fetch_pools(&self) -> Result<Vec<RawPool>, AppError> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .map_err(|e| AppError::data(format!("Yields request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::data(format!(
                "Yields request failed with status {}.",
                resp.status()
            )));
        }

        let body = resp
            .text()
            .map_err(|e| AppError::data(format!("Failed to read yields response: {e}")))?;
        parse_pools_response(&body)
    }
}

#[derive(Debug, Deserialize)]
struct PoolsResponse {
    #[serde(default)]
    data: Vec<RawPool>,
}

/// Decode a `{"data": [...]}` body. A missing `data` key yields no pools.
pub fn parse_pools_response(body: &str) -> Result<Vec<RawPool>, AppError> {
    let resp: PoolsResponse = serde_json::from_str(body)
        .map_err(|e| AppError::data(format!("Failed to parse yields response: {e}")))?;
    Ok(resp.data)
}
