//! Static lookup tables for pool screening.
//!
//! The protocol catalogue is commented by group; every entry counts equally
//! when deciding whether a pool belongs to a lending protocol.

/// Lending protocol identifiers (DeFiLlama project slugs), matched as
/// substrings of the lower-cased project.
pub const LENDING_PROTOCOLS: &[&str] = &[
    // Tier 1 established
    "aave-v3", "aave-v2", "compound-v3", "compound-v2", "compound-finance", "maker", "makerdao",
    // Morpho ecosystem
    "morpho-blue", "morpho-aave", "morpho-compound",
    // Emerging
    "spark", "radiant", "venus", "benqi", "euler", "silo", "ajna", "granary", "dforce", "tectonic",
    "moonwell", "angle", "sturdy",
    // Cross-chain native
    "stargate", "layerzero",
    // Flow ecosystem
    "kittypunk", "moremarkets", "increment", "flowty",
    // Other chains
    "solend", "port-finance", "apricot", "tulip",
];

/// Stablecoin tickers, matched as substrings of the upper-cased pool symbol.
///
/// Mixed-case entries are kept verbatim (`USDbC`, `stgUSDC`, ...).
pub const STABLECOINS: &[&str] = &[
    // USD pegged
    "USDC", "USDT", "DAI", "BUSD", "TUSD", "USDP", "GUSD", "LUSD", "FRAX", "UST", "USDD", "USDC.E",
    "USDbC", "stgUSDC",
    // EUR pegged
    "EURC", "EURS", "EURT", "agEUR",
    // Decentralized
    "sUSD", "MIM", "USDF", "crvUSD", "GHO",
];

/// Chains tracked by the collector, matched exactly (case-sensitive).
pub const BLOCKCHAIN_NETWORKS: &[&str] = &[
    "Ethereum",
    // L2s
    "Arbitrum",
    "Optimism",
    "Base",
    "zkSync Era",
    "Polygon zkEVM",
    "Linea",
    "Scroll",
    "Mantle",
    "Blast",
    // Sidechains
    "Polygon",
    "BNB Chain",
    "Avalanche",
    "Fantom",
    "Gnosis",
    "Celo",
    "Harmony",
    "Moonbeam",
    "Moonriver",
    // Alt L1s
    "Flow",
    "Solana",
    "Near",
    "Aurora",
    // Others
    "Metis",
    "Boba",
    "Cronos",
];

/// Pool id fragments that mark non-lending products.
pub const EXCLUDED_POOL_TYPES: &[&str] = &["lp", "vault", "farm", "leverage", "perp", "options"];
