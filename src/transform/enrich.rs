//! Enrichment: canonical names, snapshot metadata and derived metrics.
//!
//! Derived metrics are independently optional. A metric whose inputs are
//! missing upstream is left empty rather than treated as an error.

use crate::domain::{CollectionTime, PoolRecord, RawPool, TvlCategory};
use crate::transform::classify::{classify_chain_type, classify_protocol_tier, classify_stable_type};

/// Offset added to volatility in the Sharpe-proxy denominator.
pub const SHARPE_VOL_FLOOR: f64 = 0.5;

/// Enrich every pool that carries an APY.
pub fn enrich(pools: &[RawPool], at: &CollectionTime) -> Vec<PoolRecord> {
    pools.iter().filter_map(|p| enrich_pool(p, at)).collect()
}

/// Build the canonical record for one pool, or `None` if it has no APY.
pub fn enrich_pool(pool: &RawPool, at: &CollectionTime) -> Option<PoolRecord> {
    let apy_total = pool.apy?;
    let apy_volatility = apy_volatility(apy_total, pool.apy_mean_30d);

    Some(PoolRecord {
        pool: pool.pool.clone(),
        chain: pool.chain.clone(),
        protocol: pool.project.clone(),
        asset: pool.symbol.clone(),
        tvl_usd: pool.tvl_usd,
        apy_total,
        apy_base: pool.apy_base,
        apy_reward: pool.apy_reward,
        apy_30d_avg: pool.apy_mean_30d,
        apy_change_1d: pool.apy_pct_1d,
        apy_change_7d: pool.apy_pct_7d,
        apy_change_30d: pool.apy_pct_30d,
        is_stablecoin_flag: pool.stablecoin,
        il_risk: pool.il_risk.clone(),
        token_exposure: pool.exposure.clone(),
        pool_meta: pool.pool_meta.clone(),

        timestamp: at.timestamp(),
        date: at.date(),
        collection_hour: at.hour(),

        apy_volatility,
        tvl_millions: pool.tvl_usd.map(|tvl| tvl / 1_000_000.0),
        tvl_log: tvl_log(pool.tvl_usd),
        tvl_category: pool.tvl_usd.and_then(TvlCategory::from_tvl),
        sharpe_proxy: sharpe_proxy(apy_total, apy_volatility),
        protocol_tier: classify_protocol_tier(&pool.project),
        chain_type: classify_chain_type(&pool.chain),
        stable_type: classify_stable_type(&pool.symbol),
    })
}

/// Absolute deviation of the current APY from its 30-day mean.
pub fn apy_volatility(apy_total: f64, apy_30d_avg: Option<f64>) -> Option<f64> {
    apy_30d_avg.map(|avg| (avg - apy_total).abs())
}

pub fn sharpe_proxy(apy_total: f64, apy_volatility: Option<f64>) -> Option<f64> {
    apy_volatility.map(|vol| apy_total / (vol + SHARPE_VOL_FLOOR))
}

/// `ln(1 + tvl)`, missing TVL counted as zero.
pub fn tvl_log(tvl_usd: Option<f64>) -> f64 {
    tvl_usd.unwrap_or(0.0).ln_1p()
}
