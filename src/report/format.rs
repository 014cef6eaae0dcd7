//! Formatted terminal output.
//!
//! We keep formatting code in one place so the screening and persistence code
//! stays free of presentation concerns.

use std::collections::HashSet;
use std::path::Path;

use crate::domain::{CollectionTime, PoolRecord};
use crate::io::panel::PanelSummary;
use crate::report::stats::{GroupStats, describe, group_by, top_by_sharpe};
use crate::transform::FilterSummary;

const RULE_WIDTH: usize = 80;

/// Row limits and noise thresholds for the market report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportLimits {
    pub chains: usize,
    pub protocols: usize,
    pub assets: usize,
    pub sharpe: usize,
    pub min_protocol_pools: usize,
    pub min_asset_pools: usize,
}

impl Default for ReportLimits {
    fn default() -> Self {
        Self {
            chains: 15,
            protocols: 20,
            assets: 15,
            sharpe: 15,
            min_protocol_pools: 2,
            min_asset_pools: 3,
        }
    }
}

pub fn format_collect_header(at: &CollectionTime) -> String {
    format!(
        "=== DeFi Stablecoin Yield Collection ===\nCollection time: {}\n",
        at.display()
    )
}

pub fn format_filter_summary(summary: &FilterSummary) -> String {
    format!(
        "Filtered {} pools to {} stablecoin lending pools across {} chains from {} protocols\n",
        fmt_count(summary.pools_seen),
        fmt_count(summary.pools_kept),
        summary.chains,
        summary.protocols,
    )
}

/// Full market landscape report for one snapshot.
pub fn format_market_report(records: &[PoolRecord], limits: &ReportLimits) -> String {
    let mut out = String::new();
    if records.is_empty() {
        return out;
    }

    let rule = "=".repeat(RULE_WIDTH);
    out.push_str(&rule);
    out.push_str("\nDEFI STABLECOIN LENDING MARKET ANALYSIS\n");
    out.push_str(&rule);
    out.push('\n');

    out.push_str(&format_overview(records));

    out.push_str("\nChains (ranked by mean APY):\n");
    for (idx, g) in group_by(records, |r| r.chain.as_str())
        .iter()
        .take(limits.chains)
        .enumerate()
    {
        out.push_str(&format!(
            "  {:>2}. {:<15} | {:>5.2}% avg | {:>5.2}% med | {:>5} std | {:>3} pools | TVL: {}\n",
            idx + 1,
            truncate(&g.key, 15),
            g.apy.mean,
            g.apy.median,
            g.apy.std.map(|s| format!("{s:.2}")).unwrap_or_else(|| "-".to_string()),
            g.apy.count,
            fmt_millions(g.total_tvl),
        ));
    }

    out.push_str(&format!(
        "\nProtocols (top {} by mean APY, >= {} pools):\n",
        limits.protocols, limits.min_protocol_pools
    ));
    let protocols = min_count(
        group_by(records, |r| r.protocol.as_str()),
        limits.min_protocol_pools,
    );
    for (idx, g) in protocols.iter().take(limits.protocols).enumerate() {
        out.push_str(&format!(
            "  {:>2}. {:<20} | {:>5.2}% avg | {:>2} pools | {} chains | TVL: {}\n",
            idx + 1,
            truncate(&g.key, 20),
            g.apy.mean,
            g.apy.count,
            g.chain_count,
            fmt_millions(g.total_tvl),
        ));
    }

    out.push_str(&format!("\nStablecoins (>= {} pools):\n", limits.min_asset_pools));
    let assets = min_count(group_by(records, |r| r.asset.as_str()), limits.min_asset_pools);
    for (idx, g) in assets.iter().take(limits.assets).enumerate() {
        out.push_str(&format!(
            "  {:>2}. {:<12} | {:>5.2}% avg | {:>3} pools | TVL: {}\n",
            idx + 1,
            truncate(&g.key, 12),
            g.apy.mean,
            g.apy.count,
            fmt_millions(g.total_tvl),
        ));
    }

    let top = top_by_sharpe(records, limits.sharpe);
    if !top.is_empty() {
        out.push_str(&format!("\nRisk-adjusted (top {} by Sharpe proxy):\n", limits.sharpe));
        for (idx, r) in top.iter().enumerate() {
            out.push_str(&format!(
                "  {:>2}. {:<18} on {}\n      {:<10} | {:>5.2}% APY | Vol: {:>4.2}% | Sharpe: {:>5.2}\n",
                idx + 1,
                truncate(&r.protocol, 18),
                r.chain,
                truncate(&r.asset, 10),
                r.apy_total,
                r.apy_volatility.unwrap_or(0.0),
                r.sharpe_proxy.unwrap_or(0.0),
            ));
        }
    }

    out.push_str("\nBy protocol maturity:\n");
    out.push_str(&format_class_table(&group_by(records, |r| r.protocol_tier.label()), 25));
    out.push_str("\nBy chain type:\n");
    out.push_str(&format_class_table(&group_by(records, |r| r.chain_type.label()), 20));
    out.push_str("\nBy stablecoin type:\n");
    out.push_str(&format_class_table(&group_by(records, |r| r.stable_type.label()), 20));

    out.push('\n');
    out.push_str(&rule);
    out.push('\n');
    out
}

fn format_overview(records: &[PoolRecord]) -> String {
    let mut out = String::new();
    out.push_str("\nMarket overview:\n");
    out.push_str(&format!("  Total pools: {}\n", fmt_count(records.len())));
    out.push_str(&format!("  Chains covered: {}\n", distinct(records, |r| r.chain.as_str())));
    out.push_str(&format!("  Protocols: {}\n", distinct(records, |r| r.protocol.as_str())));
    out.push_str(&format!("  Assets: {}\n", distinct(records, |r| r.asset.as_str())));

    let apys: Vec<f64> = records.iter().map(|r| r.apy_total).collect();
    if let Some(d) = describe(&apys) {
        out.push_str("\n  APY statistics:\n");
        out.push_str(&format!("  - Mean: {:.2}%\n", d.mean));
        out.push_str(&format!("  - Median: {:.2}%\n", d.median));
        if let Some(std) = d.std {
            out.push_str(&format!("  - Std dev: {std:.2}%\n"));
        }
        out.push_str(&format!("  - Range: {:.2}% - {:.2}%\n", d.min, d.max));
        out.push_str(&format!("  - IQR: {:.2}% - {:.2}%\n", d.q25, d.q75));
    }

    let tvls: Vec<f64> = records.iter().filter_map(|r| r.tvl_usd).collect();
    if let Some(d) = describe(&tvls) {
        out.push_str(&format!("\n  Total TVL: ${}\n", fmt_thousands(tvls.iter().sum())));
        out.push_str(&format!("  Mean TVL per pool: ${}\n", fmt_thousands(d.mean)));
        out.push_str(&format!("  Median TVL per pool: ${}\n", fmt_thousands(d.median)));
    }

    out
}

fn distinct<'a>(records: &'a [PoolRecord], key: impl Fn(&'a PoolRecord) -> &'a str) -> usize {
    records.iter().map(key).collect::<HashSet<_>>().len()
}

fn format_class_table(groups: &[GroupStats], width: usize) -> String {
    let mut out = String::new();
    for g in groups {
        out.push_str(&format!(
            "  {:<width$} | {:>5.2}% avg | {:>5.2}% med | {:>3} pools\n",
            g.key, g.apy.mean, g.apy.median, g.apy.count,
        ));
    }
    out
}

fn min_count(groups: Vec<GroupStats>, min: usize) -> Vec<GroupStats> {
    groups.into_iter().filter(|g| g.apy.count >= min).collect()
}

pub fn format_collect_summary(records: usize, saved: &Path, latest: &Path) -> String {
    format!(
        "Data collection complete.\n  Total records: {}\n  Saved to: {}\n  Latest: {}\n",
        fmt_count(records),
        saved.display(),
        latest.display(),
    )
}

pub fn format_panel_summary(summary: &PanelSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Built panel with {} observations from {} snapshots\n",
        fmt_count(summary.observations),
        summary.files_read
    ));
    if let (Some(first), Some(last)) = (&summary.first_date, &summary.last_date) {
        out.push_str(&format!("  Time span: {first} to {last}\n"));
    }
    out.push_str(&format!("  Unique pools: {}\n", fmt_count(summary.unique_pools)));
    out.push_str(&format!("  Saved to: {}\n", summary.output.display()));
    out
}

fn fmt_millions(usd: f64) -> String {
    format!("${:.1}M", usd / 1e6)
}

/// Integer count with thousands separators.
fn fmt_count(n: usize) -> String {
    group_digits(&n.to_string())
}

/// Dollar amount rounded to whole units, with thousands separators.
fn fmt_thousands(v: f64) -> String {
    let rounded = format!("{:.0}", v.abs());
    let sign = if v < 0.0 && rounded != "0" { "-" } else { "" };
    format!("{sign}{}", group_digits(&rounded))
}

fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::domain::RawPool;
    use crate::transform::enrich;

    fn records() -> Vec<PoolRecord> {
        let at = CollectionTime::at(
            NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        );
        let pools: Vec<RawPool> = [
            ("p1", "aave-v3", "USDC", "Ethereum", 4.0, 1_500_000.0),
            ("p2", "aave-v3", "USDT", "Arbitrum", 6.0, 2_500_000.0),
            ("p3", "venus", "USDC", "BNB Chain", 8.0, 500_000.0),
        ]
        .into_iter()
        .map(|(id, project, symbol, chain, apy, tvl)| RawPool {
            pool: id.to_string(),
            project: project.to_string(),
            symbol: symbol.to_string(),
            chain: chain.to_string(),
            apy: Some(apy),
            apy_mean_30d: Some(apy - 1.0),
            tvl_usd: Some(tvl),
            ..RawPool::default()
        })
        .collect();
        enrich(&pools, &at)
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(fmt_count(0), "0");
        assert_eq!(fmt_count(999), "999");
        assert_eq!(fmt_count(1_234_567), "1,234,567");
        assert_eq!(fmt_thousands(4_500_000.4), "4,500,000");
        assert_eq!(fmt_thousands(-1234.0), "-1,234");
    }

    #[test]
    fn market_report_sections() {
        let report = format_market_report(&records(), &ReportLimits::default());

        assert!(report.contains("Total pools: 3"));
        assert!(report.contains("Chains covered: 3"));
        assert!(report.contains("- Mean: 6.00%"));
        assert!(report.contains("- IQR: 5.00% - 7.00%"));
        assert!(report.contains("Total TVL: $4,500,000"));
        // Only aave-v3 has at least two pools.
        assert!(
            report.contains("aave-v3              |  5.00% avg |  2 pools | 2 chains | TVL: $4.0M")
        );
        assert!(!report.contains("venus                |"));
        assert!(report.contains("Tier 1 - Blue Chip"));
        assert!(report.contains("L2 - Rollup"));
        assert!(report.contains("Fiat-backed"));
    }

    #[test]
    fn sharpe_section_respects_limit() {
        let limits = ReportLimits {
            sharpe: 1,
            ..ReportLimits::default()
        };
        let report = format_market_report(&records(), &limits);
        // venus: 8 / (1 + 0.5) is the best risk-adjusted pool.
        assert!(report.contains("   1. venus              on BNB Chain"));
        assert_eq!(report.matches("Sharpe:").count(), 1);
    }

    #[test]
    fn empty_report_is_empty() {
        assert!(format_market_report(&[], &ReportLimits::default()).is_empty());
    }
}
