use std::fs;
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

const CONFIG_FILE: &str = "paradiddle.json";

/// Application configuration (paradiddle.json).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Substring used to auto-select a MIDI input port. None picks the
    /// first available port.
    pub port_keyword: Option<String>,
    /// Reader thread sleep between polls, in milliseconds.
    pub poll_interval_ms: u64,
    /// How long auto-detection waits for a matching port, in seconds.
    pub detect_timeout_secs: u64,
    /// Width of the rolling staff window, in seconds.
    pub seconds_visible: f32,
    /// Staff repaint rate.
    pub update_fps: u32,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port_keyword: Some("USB".to_string()),
            poll_interval_ms: 10,
            detect_timeout_secs: 15,
            seconds_visible: 5.0,
            update_fps: 30,
            window_width: 900.0,
            window_height: 500.0,
        }
    }
}

impl AppConfig {
    /// Loads config from the default config file.
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(CONFIG_FILE)
    }

    /// Loads config from a specified path.
    /// Returns default config if the file doesn't exist.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Saves config to the default config file.
    pub fn save(&self) -> Result<()> {
        self.save_to(CONFIG_FILE)
    }

    /// Saves config to a specified path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
