//! Descriptive statistics over enriched snapshots.
//!
//! Conventions follow the usual dataframe defaults: sample standard deviation
//! (n-1 denominator) and linearly interpolated quantiles.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::domain::PoolRecord;

/// Summary of a numeric sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Describe {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// `None` for fewer than two observations.
    pub std: Option<f64>,
    pub min: f64,
    pub max: f64,
    pub q25: f64,
    pub q75: f64,
}

pub fn describe(values: &[f64]) -> Option<Describe> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    Some(Describe {
        count: sorted.len(),
        mean: mean(&sorted)?,
        median: quantile_sorted(&sorted, 0.5),
        std: std_dev(&sorted),
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        q25: quantile_sorted(&sorted, 0.25),
        q75: quantile_sorted(&sorted, 0.75),
    })
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

pub fn std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() as f64 - 1.0);
    Some(var.sqrt())
}

/// Linear-interpolation quantile of an ascending, non-empty slice.
fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// APY / TVL aggregates for one group of pools.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupStats {
    pub key: String,
    pub apy: Describe,
    /// Sum of known TVL values.
    pub total_tvl: f64,
    pub chain_count: usize,
}

/// Group records by `key` and aggregate, ordered by mean APY descending.
///
/// Ties keep key order so output is deterministic.
pub fn group_by<F>(records: &[PoolRecord], key: F) -> Vec<GroupStats>
where
    F: Fn(&PoolRecord) -> &str,
{
    let mut groups: HashMap<&str, Vec<&PoolRecord>> = HashMap::new();
    for r in records {
        groups.entry(key(r)).or_default().push(r);
    }

    let mut out: Vec<GroupStats> = groups
        .into_iter()
        .filter_map(|(k, members)| {
            let apys: Vec<f64> = members.iter().map(|r| r.apy_total).collect();
            let chains: HashSet<&str> = members.iter().map(|r| r.chain.as_str()).collect();
            Some(GroupStats {
                key: k.to_string(),
                apy: describe(&apys)?,
                total_tvl: members.iter().filter_map(|r| r.tvl_usd).sum(),
                chain_count: chains.len(),
            })
        })
        .collect();

    out.sort_by(|a, b| {
        b.apy
            .mean
            .partial_cmp(&a.apy.mean)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.key.cmp(&b.key))
    });
    out
}

/// Top `n` records by Sharpe proxy; records without one are skipped.
pub fn top_by_sharpe(records: &[PoolRecord], n: usize) -> Vec<&PoolRecord> {
    let mut ranked: Vec<&PoolRecord> = records
        .iter()
        .filter(|r| r.sharpe_proxy.is_some())
        .collect();
    ranked.sort_by(|a, b| {
        b.sharpe_proxy
            .partial_cmp(&a.sharpe_proxy)
            .unwrap_or(Ordering::Equal)
    });
    ranked.truncate(n);
    ranked
}
