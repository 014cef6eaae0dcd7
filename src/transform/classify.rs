//! Ordered classification tables.
//!
//! Each table is scanned top to bottom and the first matching row wins, so the
//! row order *is* the priority order.

use crate::domain::{ChainType, ProtocolTier, StableType};

/// Substring needles, matched against the lower-cased protocol.
const PROTOCOL_TIERS: &[(ProtocolTier, &[&str])] = &[
    (ProtocolTier::BlueChip, &["aave", "compound", "maker"]),
    (ProtocolTier::Established, &["morpho", "spark"]),
    (ProtocolTier::Emerging, &["radiant", "venus", "benqi", "euler"]),
];

/// Exact chain names.
const CHAIN_TYPES: &[(ChainType, &[&str])] = &[
    (ChainType::Ethereum, &["Ethereum"]),
    (
        ChainType::Rollup,
        &[
            "Arbitrum",
            "Optimism",
            "Base",
            "zkSync",
            "Polygon zkEVM",
            "Linea",
            "Scroll",
            "Mantle",
            "Blast",
        ],
    ),
    (
        ChainType::Sidechain,
        &["Polygon", "BNB Chain", "Avalanche", "Fantom", "Gnosis"],
    ),
    (ChainType::AltL1, &["Flow", "Solana", "Near", "Aurora"]),
];

/// Substring needles, matched against the upper-cased asset symbol.
const STABLE_TYPES: &[(StableType, &[&str])] = &[
    (
        StableType::FiatBacked,
        &["USDC", "USDT", "BUSD", "EURC", "TUSD", "GUSD"],
    ),
    (
        StableType::Decentralized,
        &["DAI", "LUSD", "FRAX", "SUSD", "CRVUSD", "GHO"],
    ),
    (StableType::Algorithmic, &["UST", "USDD", "MIM"]),
];

pub fn classify_protocol_tier(protocol: &str) -> ProtocolTier {
    let protocol = protocol.to_lowercase();
    first_match(PROTOCOL_TIERS, |needle| protocol.contains(needle)).unwrap_or(ProtocolTier::Niche)
}

pub fn classify_chain_type(chain: &str) -> ChainType {
    first_match(CHAIN_TYPES, |name| chain == name).unwrap_or(ChainType::Other)
}

pub fn classify_stable_type(asset: &str) -> StableType {
    let asset = asset.to_uppercase();
    first_match(STABLE_TYPES, |needle| asset.contains(needle)).unwrap_or(StableType::Other)
}

fn first_match<T: Copy>(table: &[(T, &[&str])], matches: impl Fn(&str) -> bool) -> Option<T> {
    table
        .iter()
        .find(|(_, needles)| needles.iter().any(|&n| matches(n)))
        .map(|(label, _)| *label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_tiers() {
        assert_eq!(classify_protocol_tier("Aave-V3"), ProtocolTier::BlueChip);
        assert_eq!(classify_protocol_tier("compound-v2"), ProtocolTier::BlueChip);
        assert_eq!(classify_protocol_tier("morpho-blue"), ProtocolTier::Established);
        assert_eq!(classify_protocol_tier("spark"), ProtocolTier::Established);
        assert_eq!(classify_protocol_tier("venus-core-pool"), ProtocolTier::Emerging);
        assert_eq!(classify_protocol_tier("moonwell"), ProtocolTier::Niche);
    }

    #[test]
    fn protocol_tier_priority_follows_table_order() {
        // Matches both tier 1 ("aave") and tier 2 ("morpho"); tier 1 wins.
        assert_eq!(classify_protocol_tier("morpho-aave"), ProtocolTier::BlueChip);
    }

    #[test]
    fn chain_types() {
        assert_eq!(classify_chain_type("Ethereum"), ChainType::Ethereum);
        assert_eq!(classify_chain_type("Arbitrum"), ChainType::Rollup);
        assert_eq!(classify_chain_type("Polygon zkEVM"), ChainType::Rollup);
        assert_eq!(classify_chain_type("Polygon"), ChainType::Sidechain);
        assert_eq!(classify_chain_type("Solana"), ChainType::AltL1);
        assert_eq!(classify_chain_type("Cronos"), ChainType::Other);
    }

    #[test]
    fn chain_type_is_exact_match() {
        assert_eq!(classify_chain_type("arbitrum"), ChainType::Other);
        assert_eq!(classify_chain_type("zkSync Era"), ChainType::Other);
    }

    #[test]
    fn stable_types() {
        assert_eq!(classify_stable_type("USDC"), StableType::FiatBacked);
        assert_eq!(classify_stable_type("usdt"), StableType::FiatBacked);
        assert_eq!(classify_stable_type("crvUSD"), StableType::Decentralized);
        assert_eq!(classify_stable_type("GHO"), StableType::Decentralized);
        assert_eq!(classify_stable_type("MIM"), StableType::Algorithmic);
        assert_eq!(classify_stable_type("EURS"), StableType::Other);
    }

    #[test]
    fn stable_type_priority_follows_table_order() {
        // "DAI-USDC" hits both fiat-backed and decentralized; fiat-backed is checked first.
        assert_eq!(classify_stable_type("DAI-USDC"), StableType::FiatBacked);
        // "SUSD" is decentralized even though it contains "USD".
        assert_eq!(classify_stable_type("sUSD"), StableType::Decentralized);
    }
}
