//! Run configuration.
//!
//! Resolution order, lowest to highest priority: built-in defaults,
//! environment (a `.env` file is loaded if present), command-line flags.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::{CollectArgs, PanelArgs};
use crate::data::{DEFAULT_POOLS_URL, DEFAULT_TIMEOUT_SECS};
use crate::error::AppError;
use crate::io::{LATEST_FILE_NAME, PANEL_FILE_NAME};
use crate::report::ReportLimits;

pub const ENV_API_URL: &str = "YIELDS_API_URL";
pub const ENV_DATA_DIR: &str = "YIELDS_DATA_DIR";
pub const ENV_TIMEOUT_SECS: &str = "YIELDS_HTTP_TIMEOUT_SECS";

pub const DEFAULT_DATA_DIR: &str = "data";

/// On-disk layout under the data root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataLayout {
    root: PathBuf,
}

impl DataLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn raw_dir(&self) -> PathBuf {
        self.root.join("raw")
    }

    pub fn processed_dir(&self) -> PathBuf {
        self.root.join("processed")
    }

    pub fn latest_path(&self) -> PathBuf {
        self.raw_dir().join(LATEST_FILE_NAME)
    }

    pub fn panel_path(&self) -> PathBuf {
        self.processed_dir().join(PANEL_FILE_NAME)
    }
}

#[derive(Debug, Clone)]
pub struct CollectConfig {
    pub api_url: String,
    pub timeout: Duration,
    pub layout: DataLayout,
    pub limits: ReportLimits,
}

#[derive(Debug, Clone)]
pub struct PanelConfig {
    pub layout: DataLayout,
}

/// Load `.env` (if any) into the process environment.
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

/// Read a variable from the process environment, ignoring blanks.
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl CollectConfig {
    pub fn resolve(
        args: &CollectArgs,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let api_url = args
            .url
            .clone()
            .or_else(|| env(ENV_API_URL))
            .unwrap_or_else(|| DEFAULT_POOLS_URL.to_string());

        let timeout_secs = match args.timeout_secs {
            Some(secs) => secs,
            None => match env(ENV_TIMEOUT_SECS) {
                Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                    AppError::io(format!(
                        "Invalid {ENV_TIMEOUT_SECS} '{raw}': expected whole seconds."
                    ))
                })?,
                None => DEFAULT_TIMEOUT_SECS,
            },
        };
        if timeout_secs == 0 {
            return Err(AppError::io("HTTP timeout must be > 0 seconds."));
        }

        let mut limits = ReportLimits::default();
        if let Some(top) = args.top {
            if top == 0 {
                return Err(AppError::io("--top must be > 0."));
            }
            limits.sharpe = top;
        }

        Ok(Self {
            api_url,
            timeout: Duration::from_secs(timeout_secs),
            layout: resolve_layout(args.data_dir.as_deref(), &env),
            limits,
        })
    }
}

impl PanelConfig {
    pub fn resolve(args: &PanelArgs, env: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            layout: resolve_layout(args.data_dir.as_deref(), &env),
        }
    }
}

fn resolve_layout(flag: Option<&Path>, env: &impl Fn(&str) -> Option<String>) -> DataLayout {
    let root = flag
        .map(Path::to_path_buf)
        .or_else(|| env(ENV_DATA_DIR).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
    DataLayout::new(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_flags_or_env() {
        let cfg = CollectConfig::resolve(&CollectArgs::default(), env_of(&[])).unwrap();
        assert_eq!(cfg.api_url, DEFAULT_POOLS_URL);
        assert_eq!(cfg.timeout, Duration::from_secs(30));
        assert_eq!(cfg.layout.raw_dir(), PathBuf::from("data/raw"));
        assert_eq!(cfg.layout.latest_path(), PathBuf::from("data/raw/defi_yields_latest.csv"));
        assert_eq!(cfg.limits, ReportLimits::default());
    }

    #[test]
    fn flags_override_env() {
        let args = CollectArgs {
            data_dir: Some(PathBuf::from("/srv/yields")),
            top: Some(5),
            ..CollectArgs::default()
        };
        let env = env_of(&[
            (ENV_DATA_DIR, "/ignored"),
            (ENV_API_URL, "http://localhost:8080/pools"),
            (ENV_TIMEOUT_SECS, "5"),
        ]);
        let cfg = CollectConfig::resolve(&args, env).unwrap();
        assert_eq!(cfg.layout.root(), Path::new("/srv/yields"));
        assert_eq!(cfg.api_url, "http://localhost:8080/pools");
        assert_eq!(cfg.timeout, Duration::from_secs(5));
        assert_eq!(cfg.limits.sharpe, 5);
    }

    #[test]
    fn invalid_timeout_is_rejected() {
        let env = env_of(&[(ENV_TIMEOUT_SECS, "soon")]);
        let err = CollectConfig::resolve(&CollectArgs::default(), env).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_IO);

        let args = CollectArgs {
            timeout_secs: Some(0),
            ..CollectArgs::default()
        };
        assert!(CollectConfig::resolve(&args, env_of(&[])).is_err());
    }

    #[test]
    fn panel_layout_from_env() {
        let env = env_of(&[(ENV_DATA_DIR, "/var/yields")]);
        let cfg = PanelConfig::resolve(&PanelArgs::default(), env);
        assert_eq!(
            cfg.layout.panel_path(),
            PathBuf::from("/var/yields/processed/yield_panel.csv")
        );
    }
}
