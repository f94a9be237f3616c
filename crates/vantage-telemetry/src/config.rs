//! Telemetry configuration.
//!
//! Configuration lives in /etc/vantage/telemetry.toml. Every field has a
//! default so a missing or partial file still yields a usable configuration;
//! an unreadable file degrades to the defaults with a warning.

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// System configuration directory
pub const SYSTEM_CONFIG_DIR: &str = "/etc/vantage";
const CONFIG_FILE: &str = "telemetry.toml";

/// Placeholder routing key used until an embedder installs a real one.
const DEFAULT_INSTRUMENTATION_KEY: &str = "00000000-0000-0000-0000-000000000000";

static GLOBAL: OnceCell<TelemetryConfig> = OnceCell::new();

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Opaque key routing telemetry to the collection endpoint.
    #[serde(default = "default_instrumentation_key")]
    pub instrumentation_key: String,

    /// Whether telemetry collection is enabled.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_instrumentation_key() -> String {
    DEFAULT_INSTRUMENTATION_KEY.to_string()
}

fn default_enabled() -> bool {
    true
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            instrumentation_key: default_instrumentation_key(),
            enabled: default_enabled(),
        }
    }
}

impl TelemetryConfig {
    /// Default config file path.
    pub fn default_path() -> PathBuf {
        PathBuf::from(SYSTEM_CONFIG_DIR).join(CONFIG_FILE)
    }

    /// Load the configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("parsing config file {}", path.display()))
    }

    /// Load the configuration, degrading to defaults when the file is
    /// missing or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(err) if !path.exists() => {
                debug!("no config file at {}: {err}", path.display());
                Self::default()
            }
            Err(err) => {
                warn!("could not load config, using defaults: {err:#}");
                Self::default()
            }
        }
    }

    /// Install this configuration as the process-wide singleton.
    ///
    /// The first installed value wins; later calls return the existing one.
    pub fn install(self) -> &'static TelemetryConfig {
        GLOBAL.get_or_init(|| self)
    }

    /// Process-wide configuration, loaded from the default path on first use.
    pub fn global() -> &'static TelemetryConfig {
        GLOBAL.get_or_init(|| Self::load_or_default(&Self::default_path()))
    }
}
