//! Configuration loaded from `~/.config/aletwende/config.toml`.
//!
//! Precedence, lowest first: built-in defaults, the TOML file, environment
//! variables, command line flags.

use crate::application::FlowSettings;
use crate::domain::DEFAULT_MAX_STOPS;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub max_stops: usize,
    pub confirm_delay_ms: u64,
    pub tick_rate_ms: u64,
    /// Address reported by the location resolver.
    pub current_address: String,
    /// How long the location resolver reports "loading" before resolving.
    pub location_delay_ms: u64,
    pub stores_path: Option<PathBuf>,
    pub addresses_path: Option<PathBuf>,
    pub log_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_stops: DEFAULT_MAX_STOPS,
            confirm_delay_ms: 1500,
            tick_rate_ms: 100,
            current_address: "Rhodes Park, Lusaka".to_string(),
            location_delay_ms: 800,
            stores_path: None,
            addresses_path: None,
            log_path: None,
        }
    }
}

impl AppConfig {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("aletwende").join("config.toml"))
    }

    /// Loads the config file (if any) and applies environment overrides.
    ///
    /// An explicit `path` must exist; the default location is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_from_file(&path)?,
                _ => Self::default(),
            },
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = toml::from_str::<Self>(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        info!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Applies `ALETWENDE_*` overrides read through `var`. Unparseable
    /// values are logged and ignored.
    pub fn apply_env_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(v) = var("ALETWENDE_MAX_STOPS") {
            match v.parse() {
                Ok(max_stops) => self.max_stops = max_stops,
                Err(e) => warn!("Invalid ALETWENDE_MAX_STOPS value {v:?}: {e}"),
            }
        }
        if let Some(v) = var("ALETWENDE_CONFIRM_DELAY_MS") {
            match v.parse() {
                Ok(delay) => self.confirm_delay_ms = delay,
                Err(e) => warn!("Invalid ALETWENDE_CONFIRM_DELAY_MS value {v:?}: {e}"),
            }
        }
        if let Some(v) = var("ALETWENDE_CURRENT_ADDRESS") {
            self.current_address = v;
        }
    }

    pub fn flow_settings(&self) -> FlowSettings {
        FlowSettings {
            max_stops: self.max_stops,
            confirm_delay: Duration::from_millis(self.confirm_delay_ms),
        }
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(1))
    }

    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_path
            .clone()
            .or_else(|| dirs::data_local_dir().map(|dir| dir.join("aletwende").join("aletwende.log")))
    }
}
