//! Load: config loading from file and environment variables.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::model::CartlogConfig;

pub const CONFIG_FILE_ENV: &str = "CARTLOG_CONFIG_FILE";
pub const DEFAULT_CONFIG_FILE: &str = "/etc/cartlog/cartlog.toml";

const BUFFER_THRESHOLD_ENV: &str = "CARTLOG_BUFFER_THRESHOLD";
const OUTPUT_JSON_ENV: &str = "CARTLOG_OUTPUT_JSON";
const SHOW_RAW_ENV: &str = "CARTLOG_SHOW_RAW";

impl CartlogConfig {
    /// Load configuration from file or environment variables
    /// Priority: Environment Variables > Config File > Defaults
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = std::env::var(CONFIG_FILE_ENV)
            .unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_from(&config_path)
    }

    /// As [`CartlogConfig::load`], with an explicit config file path.
    /// A missing file is not an error.
    pub fn load_from(config_path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config = if Path::new(config_path).exists() {
            tracing::info!("Loading configuration from: {}", config_path);
            let mut config = Self::from_file(config_path)?;
            // Environment variables override file config
            config.apply_overrides(|key| std::env::var(key).ok());
            config
        } else {
            tracing::debug!("Config file not found at {}, using environment variables", config_path);
            Self::from_env()
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: CartlogConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Overwrite settings from `lookup` (normally the process environment).
    /// Values that fail to parse are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(threshold) = lookup(BUFFER_THRESHOLD_ENV).and_then(|s| s.parse().ok()) {
            self.scan.buffer_threshold = threshold;
        }
        if let Some(json) = lookup(OUTPUT_JSON_ENV).and_then(|s| s.parse().ok()) {
            self.output.json = json;
        }
        if let Some(raw) = lookup(SHOW_RAW_ENV).and_then(|s| s.parse().ok()) {
            self.output.show_raw = raw;
        }
    }
}
