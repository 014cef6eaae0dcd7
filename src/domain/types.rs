//! Shared domain types.
//!
//! Two shapes of pool data flow through the collector:
//!
//! - `RawPool`: one element of the yields API `data` array, decoded leniently
//! - `PoolRecord`: the enriched, canonical row persisted to snapshot CSVs

use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize};

/// A pool object as returned by the yields API.
///
/// Every field is optional upstream. Missing strings decode as empty, and
/// numeric fields that are absent, `null` or not JSON numbers decode as `None`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPool {
    #[serde(default, deserialize_with = "lenient_string")]
    pub pool: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub project: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub symbol: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub chain: String,

    #[serde(default, rename = "tvlUsd", deserialize_with = "lenient_f64")]
    pub tvl_usd: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub apy: Option<f64>,
    #[serde(default, rename = "apyBase", deserialize_with = "lenient_f64")]
    pub apy_base: Option<f64>,
    #[serde(default, rename = "apyReward", deserialize_with = "lenient_f64")]
    pub apy_reward: Option<f64>,
    #[serde(default, rename = "apyMean30d", deserialize_with = "lenient_f64")]
    pub apy_mean_30d: Option<f64>,
    #[serde(default, rename = "apyPct1D", deserialize_with = "lenient_f64")]
    pub apy_pct_1d: Option<f64>,
    #[serde(default, rename = "apyPct7D", deserialize_with = "lenient_f64")]
    pub apy_pct_7d: Option<f64>,
    #[serde(default, rename = "apyPct30D", deserialize_with = "lenient_f64")]
    pub apy_pct_30d: Option<f64>,

    #[serde(default, deserialize_with = "lenient_bool")]
    pub stablecoin: Option<bool>,
    #[serde(default, rename = "ilRisk", deserialize_with = "lenient_opt_string")]
    pub il_risk: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub exposure: Option<String>,
    #[serde(default, rename = "poolMeta", deserialize_with = "lenient_opt_string")]
    pub pool_meta: Option<String>,
}

fn lenient_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(d)?;
    Ok(value.and_then(|v| v.as_f64()).filter(|v| v.is_finite()))
}

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(lenient_opt_string(d)?.unwrap_or_default())
}

fn lenient_opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(d)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        _ => None,
    })
}

fn lenient_bool<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(d)?;
    Ok(value.and_then(|v| v.as_bool()))
}

/// The single instant a collection run is stamped with.
///
/// Captured once per run so every row, and the snapshot filename, agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionTime {
    at: NaiveDateTime,
}

impl CollectionTime {
    pub fn now() -> Self {
        Self {
            at: Local::now().naive_local(),
        }
    }

    pub fn at(at: NaiveDateTime) -> Self {
        Self { at }
    }

    /// ISO-8601 local instant, microsecond precision.
    pub fn timestamp(&self) -> String {
        self.at.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }

    pub fn date(&self) -> String {
        self.at.format("%Y-%m-%d").to_string()
    }

    pub fn hour(&self) -> u32 {
        self.at.hour()
    }

    /// Minute-granularity stamp used in snapshot file names (`YYYYMMDD_HHMM`).
    pub fn file_stamp(&self) -> String {
        self.at.format("%Y%m%d_%H%M").to_string()
    }

    pub fn display(&self) -> String {
        self.at.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// Pool size bucket by TVL (USD).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TvlCategory {
    #[serde(rename = "<$1M")]
    Under1M,
    #[serde(rename = "$1-10M")]
    From1To10M,
    #[serde(rename = "$10-100M")]
    From10To100M,
    #[serde(rename = ">$100M")]
    Over100M,
}

impl TvlCategory {
    /// Left-closed buckets: `[0,1M)`, `[1M,10M)`, `[10M,100M)`, `[100M,∞)`.
    ///
    /// Negative (or non-finite) TVL has no bucket.
    pub fn from_tvl(tvl_usd: f64) -> Option<Self> {
        if !tvl_usd.is_finite() || tvl_usd < 0.0 {
            return None;
        }
        Some(if tvl_usd < 1e6 {
            TvlCategory::Under1M
        } else if tvl_usd < 10e6 {
            TvlCategory::From1To10M
        } else if tvl_usd < 100e6 {
            TvlCategory::From10To100M
        } else {
            TvlCategory::Over100M
        })
    }
}

/// Protocol maturity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ProtocolTier {
    #[serde(rename = "Tier 1 - Blue Chip")]
    BlueChip,
    #[serde(rename = "Tier 2 - Established")]
    Established,
    #[serde(rename = "Tier 3 - Emerging")]
    Emerging,
    #[serde(rename = "Tier 4 - New/Niche")]
    Niche,
}

impl ProtocolTier {
    pub fn label(self) -> &'static str {
        match self {
            ProtocolTier::BlueChip => "Tier 1 - Blue Chip",
            ProtocolTier::Established => "Tier 2 - Established",
            ProtocolTier::Emerging => "Tier 3 - Emerging",
            ProtocolTier::Niche => "Tier 4 - New/Niche",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ChainType {
    #[serde(rename = "L1 - Ethereum")]
    Ethereum,
    #[serde(rename = "L2 - Rollup")]
    Rollup,
    #[serde(rename = "Sidechain")]
    Sidechain,
    #[serde(rename = "Alt L1")]
    AltL1,
    #[serde(rename = "Other")]
    Other,
}

impl ChainType {
    pub fn label(self) -> &'static str {
        match self {
            ChainType::Ethereum => "L1 - Ethereum",
            ChainType::Rollup => "L2 - Rollup",
            ChainType::Sidechain => "Sidechain",
            ChainType::AltL1 => "Alt L1",
            ChainType::Other => "Other",
        }
    }
}

/// Stablecoin backing model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StableType {
    #[serde(rename = "Fiat-backed")]
    FiatBacked,
    #[serde(rename = "Decentralized")]
    Decentralized,
    #[serde(rename = "Algorithmic")]
    Algorithmic,
    #[serde(rename = "Other")]
    Other,
}

impl StableType {
    pub fn label(self) -> &'static str {
        match self {
            StableType::FiatBacked => "Fiat-backed",
            StableType::Decentralized => "Decentralized",
            StableType::Algorithmic => "Algorithmic",
            StableType::Other => "Other",
        }
    }
}

/// One enriched row of a snapshot.
///
/// Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoolRecord {
    pub pool: String,
    pub chain: String,
    pub protocol: String,
    pub asset: String,
    pub tvl_usd: Option<f64>,
    pub apy_total: f64,
    pub apy_base: Option<f64>,
    pub apy_reward: Option<f64>,
    pub apy_30d_avg: Option<f64>,
    pub apy_change_1d: Option<f64>,
    pub apy_change_7d: Option<f64>,
    pub apy_change_30d: Option<f64>,
    pub is_stablecoin_flag: Option<bool>,
    pub il_risk: Option<String>,
    pub token_exposure: Option<String>,
    pub pool_meta: Option<String>,

    pub timestamp: String,
    pub date: String,
    pub collection_hour: u32,

    pub apy_volatility: Option<f64>,
    pub tvl_millions: Option<f64>,
    pub tvl_log: f64,
    pub tvl_category: Option<TvlCategory>,
    pub sharpe_proxy: Option<f64>,
    pub protocol_tier: ProtocolTier,
    pub chain_type: ChainType,
    pub stable_type: StableType,
}
