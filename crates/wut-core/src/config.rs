//! Configuration types for wut.
//!
//! [`Config::load`] layers, in order: the embedded defaults, the user file
//! (`~/.config/wut/config.toml` or an explicit path), then `WUT_*`
//! environment variables (`WUT_REMOTE__TIMEOUT_SECS=30`). [`Config::defaults`]
//! returns the embedded defaults without touching the filesystem (useful in
//! tests).

use crate::error::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File name of the universe inside the data directory.
pub const UNIVERSE_FILE: &str = "esgf_cv_universe.db";

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[store]
path = ""
plan = ""

[remote]
base_url     = "https://esgf-node.ornl.gov/esgf-1-5-bridge/"
timeout_secs = 120
max_retries  = 2
backoff_ms   = 500

[output]
format = "table"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// `[store]` section. Empty strings mean "use the built-in location".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub plan: String,
}

impl StoreConfig {
    /// Location of the universe file.
    pub fn universe_path(&self) -> PathBuf {
        if self.path.is_empty() {
            data_dir().join(UNIVERSE_FILE)
        } else {
            PathBuf::from(&self.path)
        }
    }

    /// A user-supplied ingestion plan, if one is configured.
    pub fn plan_path(&self) -> Option<&Path> {
        (!self.plan.is_empty()).then(|| Path::new(&self.plan))
    }
}

/// `[remote]` section: the ESGF facet search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,
}

fn default_base_url() -> String { "https://esgf-node.ornl.gov/esgf-1-5-bridge/".to_string() }
fn default_timeout_secs() -> u64 { 120 }
fn default_max_retries() -> u32 { 2 }
fn default_backoff_ms() -> u64 { 500 }

impl RemoteConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn backoff(&self) -> Duration {
        Duration::from_millis(self.backoff_ms)
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            backoff_ms: default_backoff_ms(),
        }
    }
}

/// `[output]` section. The format name is validated by the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String { "table".to_string() }

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load the layered configuration. `path` overrides the default user
    /// config location; a missing file is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(config_path);

        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path.as_path()).required(false))
            .add_source(
                config::Environment::with_prefix("WUT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn home_dir() -> PathBuf {
    PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
}

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
        .join("wut")
        .join("config.toml")
}

/// Directory holding the universe file.
pub fn data_dir() -> PathBuf {
    std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local").join("share"))
        .join("wut")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
