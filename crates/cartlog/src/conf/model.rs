use serde::{Deserialize, Serialize};

/// Files larger than this are streamed from disk instead of held in memory.
pub const DEFAULT_BUFFER_THRESHOLD: u64 = 20 * 1024 * 1024;

/// Upper bound accepted by [`CartlogConfig::validate`].
pub const MAX_BUFFER_THRESHOLD: u64 = 1024 * 1024 * 1024;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartlogConfig {
    pub scan: ScanConfig,
    pub output: OutputConfig,
}

/// How a log file is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// File size in bytes above which records are re-read from disk on every
    /// pass rather than kept in memory.
    pub buffer_threshold: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            buffer_threshold: DEFAULT_BUFFER_THRESHOLD,
        }
    }
}

/// Defaults for the `cartlog` command line tool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Print records as JSON lines instead of log text.
    pub json: bool,
    /// Include lines that are not CaRT log lines.
    pub show_raw: bool,
}

impl CartlogConfig {
    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.scan.buffer_threshold > MAX_BUFFER_THRESHOLD {
            return Err(format!(
                "scan.buffer_threshold must be <= {} bytes (got {})",
                MAX_BUFFER_THRESHOLD, self.scan.buffer_threshold
            ));
        }
        Ok(())
    }
}
