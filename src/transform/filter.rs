//! Stablecoin lending pool screening.
//!
//! A pool survives only if every predicate holds. Matching rules differ per
//! field and are kept as-is: protocol and symbol are case-normalized substring
//! matches, the chain is an exact match.

use std::collections::HashSet;

use crate::domain::RawPool;
use crate::domain::catalog::{
    BLOCKCHAIN_NETWORKS, EXCLUDED_POOL_TYPES, LENDING_PROTOCOLS, STABLECOINS,
};

/// Counts describing one filter pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSummary {
    pub pools_seen: usize,
    pub pools_kept: usize,
    pub chains: usize,
    pub protocols: usize,
}

/// Keep only stablecoin lending pools on tracked chains with a positive APY.
pub fn filter_stablecoin_lending(pools: Vec<RawPool>) -> (Vec<RawPool>, FilterSummary) {
    let pools_seen = pools.len();
    let kept: Vec<RawPool> = pools.into_iter().filter(is_stablecoin_lending).collect();

    let chains: HashSet<&str> = kept.iter().map(|p| p.chain.as_str()).collect();
    let protocols: HashSet<&str> = kept.iter().map(|p| p.project.as_str()).collect();
    let summary = FilterSummary {
        pools_seen,
        pools_kept: kept.len(),
        chains: chains.len(),
        protocols: protocols.len(),
    };

    (kept, summary)
}

pub fn is_stablecoin_lending(pool: &RawPool) -> bool {
    !is_excluded_type(&pool.pool)
        && is_lending_protocol(&pool.project)
        && is_stablecoin_symbol(&pool.symbol)
        && is_tracked_chain(&pool.chain)
        && has_positive_apy(pool.apy)
}

pub fn is_excluded_type(pool_id: &str) -> bool {
    let id = pool_id.to_lowercase();
    EXCLUDED_POOL_TYPES.iter().any(|ex| id.contains(*ex))
}

pub fn is_lending_protocol(project: &str) -> bool {
    let project = project.to_lowercase();
    LENDING_PROTOCOLS.iter().any(|proto| project.contains(*proto))
}

pub fn is_stablecoin_symbol(symbol: &str) -> bool {
    let symbol = symbol.to_uppercase();
    STABLECOINS.iter().any(|stable| symbol.contains(*stable))
}

pub fn is_tracked_chain(chain: &str) -> bool {
    BLOCKCHAIN_NETWORKS.contains(&chain)
}

pub fn has_positive_apy(apy: Option<f64>) -> bool {
    apy.is_some_and(|v| v > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(id: &str, project: &str, symbol: &str, chain: &str, apy: Option<f64>) -> RawPool {
        RawPool {
            pool: id.to_string(),
            project: project.to_string(),
            symbol: symbol.to_string(),
            chain: chain.to_string(),
            apy,
            ..RawPool::default()
        }
    }

    #[test]
    fn keeps_matching_pool() {
        let p = pool("0xabc-eth", "aave-v3", "USDC", "Ethereum", Some(4.5));
        assert!(is_stablecoin_lending(&p));
    }

    #[test]
    fn rejects_missing_zero_or_negative_apy() {
        for apy in [None, Some(0.0), Some(-1.2)] {
            let p = pool("0xabc", "aave-v3", "USDC", "Ethereum", apy);
            assert!(!is_stablecoin_lending(&p), "apy {apy:?} should be rejected");
        }
    }

    #[test]
    fn rejects_excluded_pool_types() {
        for id in ["curve-LP-123", "yearn-vault-1", "beefy-farm", "perp-usdc", "OPTIONS-x"] {
            let p = pool(id, "aave-v3", "USDC", "Ethereum", Some(3.0));
            assert!(!is_stablecoin_lending(&p), "pool id {id} should be excluded");
        }
    }

    #[test]
    fn protocol_match_is_case_insensitive_substring() {
        assert!(is_lending_protocol("Aave-V3"));
        assert!(is_lending_protocol("venus-core-pool"));
        assert!(!is_lending_protocol("uniswap-v3"));
    }

    #[test]
    fn stablecoin_match_uses_upper_cased_symbol() {
        assert!(is_stablecoin_symbol("usdc"));
        assert!(is_stablecoin_symbol("WETH-DAI"));
        // Catalogue entries are compared verbatim, so mixed-case "USDbC" never matches.
        assert!(!is_stablecoin_symbol("usdbc"));
        assert!(!is_stablecoin_symbol("WETH"));
    }

    #[test]
    fn chain_match_is_exact_case() {
        assert!(is_tracked_chain("Arbitrum"));
        assert!(!is_tracked_chain("arbitrum"));
        assert!(!is_tracked_chain("Tron"));
    }

    #[test]
    fn retained_pools_all_match_catalogue() {
        let pools = vec![
            pool("a", "Aave-V3", "USDC", "Ethereum", Some(4.0)),
            pool("b", "uniswap-v3", "USDC", "Ethereum", Some(9.0)),
            pool("c", "compound-v3", "USDT", "Base", Some(5.0)),
            pool("d", "morpho-blue", "WETH", "Ethereum", Some(2.0)),
            pool("e", "spark", "DAI", "ethereum", Some(6.0)),
        ];
        let (kept, summary) = filter_stablecoin_lending(pools);

        let ids: Vec<&str> = kept.iter().map(|p| p.pool.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        for p in &kept {
            assert!(is_lending_protocol(&p.project));
        }
        assert_eq!(
            summary,
            FilterSummary {
                pools_seen: 5,
                pools_kept: 2,
                chains: 2,
                protocols: 2,
            }
        );
    }
}
