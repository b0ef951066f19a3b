use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::ecs::core::error::ConfigError;
use crate::ecs::plugins::registry::MenuConfig;

/// Top-level configuration of the overlay app.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Update ticks per second of the app loop.
    pub tick_hz: f64,
    /// Consecutive non-`Tracking` updates tolerated before an anchor's object is hidden.
    pub lost_tracking_grace_cycles: u32,
    /// `tracing` env-filter directive installed by the binary.
    pub log_filter: String,
    /// Seconds between debug summaries.
    pub debug_interval_secs: f32,
    pub menu: MenuConfig,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            tick_hz: 30.0,
            lost_tracking_grace_cycles: 0,
            log_filter: "info,meal_overlay=debug".to_string(),
            debug_interval_secs: 5.0,
            menu: MenuConfig::default(),
        }
    }
}

impl OverlayConfig {
    /// Built-in configuration used when no config file is given.
    pub fn demo() -> Self {
        Self {
            menu: MenuConfig::demo(),
            ..Self::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.menu.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
