//! Command-line parsing for the two batch jobs.
//!
//! Both binaries run with no arguments; every flag only overrides a default
//! that can also come from the environment (see `config`).

use std::path::PathBuf;

use clap::Parser;

/// `collect-yields`: fetch, filter, enrich and snapshot stablecoin lending pools.
#[derive(Debug, Parser, Clone, Default)]
#[command(
    name = "collect-yields",
    version,
    about = "Collect a DeFi stablecoin lending yield snapshot"
)]
pub struct CollectArgs {
    /// Data root; snapshots go to `<DIR>/raw`.
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Yield pools endpoint.
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// HTTP timeout in seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Number of pools in the risk-adjusted ranking.
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,
}

/// `build-panel`: fold all snapshots into one panel CSV.
#[derive(Debug, Parser, Clone, Default)]
#[command(
    name = "build-panel",
    version,
    about = "Concatenate yield snapshots into a (pool, date) panel"
)]
pub struct PanelArgs {
    /// Data root; reads `<DIR>/raw`, writes `<DIR>/processed/yield_panel.csv`.
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_is_valid() {
        let args = CollectArgs::try_parse_from(["collect-yields"]).unwrap();
        assert!(args.data_dir.is_none() && args.url.is_none() && args.top.is_none());
        let args = PanelArgs::try_parse_from(["build-panel"]).unwrap();
        assert!(args.data_dir.is_none());
    }

    #[test]
    fn flags_parse() {
        let args = CollectArgs::try_parse_from([
            "collect-yields",
            "--data-dir",
            "/tmp/yields",
            "--top",
            "5",
            "--timeout-secs",
            "10",
        ])
        .unwrap();
        assert_eq!(args.data_dir, Some(PathBuf::from("/tmp/yields")));
        assert_eq!(args.top, Some(5));
        assert_eq!(args.timeout_secs, Some(10));
    }
}
