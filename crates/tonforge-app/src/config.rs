//! User settings loaded from `~/.config/tonforge/config.toml`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use tonforge_chain::Network;
use tonforge_core::prelude::*;

/// Network selection and endpoint override
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkSettings {
    /// Target environment
    pub environment: Network,
    /// Endpoint URL override; the public endpoint for the environment is
    /// used when unset
    pub endpoint: Option<String>,
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            environment: Network::Testnet,
            endpoint: None,
        }
    }
}

/// Console/layout preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Render the grey timestamp segment after each log line
    pub show_timestamps: bool,
    /// Console height as a percentage of the screen
    pub console_ratio: u16,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            show_timestamps: true,
            console_ratio: 30,
        }
    }
}

/// Top-level settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub network: NetworkSettings,
    pub ui: UiSettings,
}

impl Settings {
    /// Endpoint to connect to, falling back to the environment default
    pub fn endpoint(&self) -> Option<String> {
        self.network
            .endpoint
            .clone()
            .or_else(|| {
                tonforge_chain::default_endpoint(self.network.environment)
                    .map(str::to_string)
            })
    }
}

/// Default config file location
pub fn config_path() -> PathBuf {
    let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("tonforge").join("config.toml")
}

/// Load settings, falling back to defaults on a missing or invalid file
pub fn load_settings(path: &Path) -> Settings {
    match std::fs::read_to_string(path) {
        Ok(raw) => match toml::from_str(&raw) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("invalid config at {}: {e}", path.display());
                Settings::default()
            }
        },
        Err(_) => Settings::default(),
    }
}

/// Persist settings to disk
pub fn save_settings(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let raw = toml::to_string_pretty(settings)
        .map_err(|e| Error::config(format!("serialize settings: {e}")))?;
    std::fs::write(path, raw)?;
    Ok(())
}
