//! Shared "collect" pipeline: fetch -> filter -> enrich.
//!
//! Persistence and printing stay in `app` so this part can be driven from
//! tests with a canned pool list.

use tracing::{info, warn};

use crate::data::LlamaClient;
use crate::domain::{CollectionTime, PoolRecord, RawPool};
use crate::transform::{FilterSummary, enrich, filter_stablecoin_lending};

/// All computed outputs of a single collection run.
#[derive(Debug, Clone)]
pub struct CollectOutput {
    pub at: CollectionTime,
    pub filter: FilterSummary,
    pub records: Vec<PoolRecord>,
}

/// Why a collection run stopped before producing records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectAbort {
    FetchFailed,
    NoMatchingPools,
}

impl CollectAbort {
    pub fn message(self) -> &'static str {
        match self {
            CollectAbort::FetchFailed => "Data fetch failed; nothing written.",
            CollectAbort::NoMatchingPools => "No stablecoin lending pools found; nothing written.",
        }
    }
}

pub fn run_collect(
    client: &LlamaClient,
    at: CollectionTime,
) -> Result<CollectOutput, CollectAbort> {
    let pools = client.fetch_pools().ok_or(CollectAbort::FetchFailed)?;
    run_collect_with_pools(pools, at)
}

/// Run filter + enrichment over an already fetched pool list.
pub fn run_collect_with_pools(
    pools: Vec<RawPool>,
    at: CollectionTime,
) -> Result<CollectOutput, CollectAbort> {
    if pools.is_empty() {
        warn!("pool list is empty");
        return Err(CollectAbort::FetchFailed);
    }

    let (kept, filter) = filter_stablecoin_lending(pools);
    if kept.is_empty() {
        warn!(seen = filter.pools_seen, "no matching stablecoin lending pools");
        return Err(CollectAbort::NoMatchingPools);
    }
    info!(
        kept = filter.pools_kept,
        chains = filter.chains,
        protocols = filter.protocols,
        "filtered stablecoin lending pools"
    );

    let records = enrich(&kept, &at);
    Ok(CollectOutput { at, filter, records })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at() -> CollectionTime {
        CollectionTime::at(
            NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(6, 0, 0)
                .unwrap(),
        )
    }

    #[test]
    fn empty_fetch_aborts() {
        assert_eq!(
            run_collect_with_pools(Vec::new(), at()).unwrap_err(),
            CollectAbort::FetchFailed
        );
    }

    #[test]
    fn nothing_matching_aborts() {
        let pools = vec![RawPool {
            pool: "x".to_string(),
            project: "uniswap-v3".to_string(),
            symbol: "USDC-WETH".to_string(),
            chain: "Ethereum".to_string(),
            apy: Some(12.0),
            ..RawPool::default()
        }];
        assert_eq!(
            run_collect_with_pools(pools, at()).unwrap_err(),
            CollectAbort::NoMatchingPools
        );
    }

    #[test]
    fn matching_pools_are_enriched() {
        let body = r#"{"data": [
            {"pool": "a1", "project": "aave-v3", "symbol": "USDC", "chain": "Ethereum", "apy": 5.0, "apyMean30d": 4.0, "tvlUsd": 120000000},
            {"pool": "a2", "project": "aave-v3", "symbol": "WETH", "chain": "Ethereum", "apy": 2.0},
            {"pool": "a3", "project": "morpho-blue", "symbol": "USDT", "chain": "Base", "apy": 0}
        ]}"#;
        let pools = crate::data::llama::parse_pools_response(body).unwrap();
        let out = run_collect_with_pools(pools, at()).unwrap();

        assert_eq!(out.filter.pools_seen, 3);
        assert_eq!(out.records.len(), 1);
        let rec = &out.records[0];
        assert_eq!(rec.pool, "a1");
        assert_eq!(rec.date, "2024-05-01");
        assert_eq!(rec.collection_hour, 6);
        assert!((rec.sharpe_proxy.unwrap() - 5.0 / 1.5).abs() < 1e-12);
    }
}
