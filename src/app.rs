//! Top-level application orchestration.
//!
//! The binaries in `src/bin/` are intentionally tiny; this module is the
//! "real main" for both jobs:
//! - `collect`: fetch, filter, enrich, snapshot, report
//! - `build_panel`: concatenate snapshots into the panel CSV

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{CollectArgs, PanelArgs};
use crate::config::{CollectConfig, PanelConfig, load_dotenv, process_env};
use crate::data::LlamaClient;
use crate::domain::CollectionTime;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `collect-yields` binary.
pub fn collect() -> Result<(), AppError> {
    load_dotenv();
    init_logging();
    let args = CollectArgs::parse();
    let config = CollectConfig::resolve(&args, process_env)?;
    run_collect(&config, CollectionTime::now())
}

/// Entry point for the `build-panel` binary.
pub fn build_panel() -> Result<(), AppError> {
    load_dotenv();
    init_logging();
    let args = PanelArgs::parse();
    let config = PanelConfig::resolve(&args, process_env);
    run_build_panel(&config)
}

pub fn run_collect(config: &CollectConfig, at: CollectionTime) -> Result<(), AppError> {
    println!("{}", crate::report::format_collect_header(&at));

    let client = LlamaClient::new(config.api_url.clone(), config.timeout)?;
    let output = match pipeline::run_collect(&client, at) {
        Ok(output) => output,
        Err(abort) => {
            println!("{}", abort.message());
            return Ok(());
        }
    };

    println!("{}", crate::report::format_filter_summary(&output.filter));

    let raw_dir = config.layout.raw_dir();
    let Some(saved) = crate::io::save_snapshot(&raw_dir, &output.records, &output.at)? else {
        println!("No data to save.");
        return Ok(());
    };

    print!(
        "{}",
        crate::report::format_market_report(&output.records, &config.limits)
    );
    println!();
    println!(
        "{}",
        crate::report::format_collect_summary(
            output.records.len(),
            &saved,
            &config.layout.latest_path()
        )
    );
    Ok(())
}

pub fn run_build_panel(config: &PanelConfig) -> Result<(), AppError> {
    let raw_dir = config.layout.raw_dir();
    match crate::io::build_panel(&raw_dir, &config.layout.panel_path())? {
        Some(summary) => println!("{}", crate::report::format_panel_summary(&summary)),
        None => println!(
            "No historical data yet in '{}'. Run collect-yields first.",
            raw_dir.display()
        ),
    }
    Ok(())
}

/// Install the stderr log subscriber. `RUST_LOG` overrides the default level.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok();
    if installed {
        info!(version = env!("CARGO_PKG_VERSION"), "logging initialised");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CollectConfig, DataLayout};
    use crate::report::ReportLimits;
    use std::time::Duration;

    #[test]
    fn collect_with_unreachable_endpoint_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = CollectConfig {
            // Port 1 is never listening locally: the connection is refused.
            api_url: "http://127.0.0.1:1/pools".to_string(),
            timeout: Duration::from_secs(2),
            layout: DataLayout::new(dir.path()),
            limits: ReportLimits::default(),
        };

        run_collect(&config, CollectionTime::now()).unwrap();
        assert!(!config.layout.raw_dir().exists());
        assert!(!config.layout.latest_path().exists());
    }

    #[test]
    fn build_panel_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let config = PanelConfig {
            layout: DataLayout::new(dir.path()),
        };

        // No snapshots yet: nothing written.
        run_build_panel(&config).unwrap();
        assert!(!config.layout.panel_path().exists());

        let raw = config.layout.raw_dir();
        std::fs::create_dir_all(&raw).unwrap();
        std::fs::write(
            raw.join("defi_yields_20240101_0000.csv"),
            "pool,date\nA,2024-01-01\n",
        )
        .unwrap();
        run_build_panel(&config).unwrap();
        assert!(config.layout.panel_path().exists());
    }
}
