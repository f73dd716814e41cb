//! Configuration module
//!
//! Optional TOML config file supplying run defaults. Precedence is
//! CLI flag > config file > built-in default; the CLI layer applies it.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{SplitXError, SplitXResult};

/// Accepted x264 presets, slowest to fastest is not meaningful here;
/// anything else is rejected at load time rather than deep inside libav.
const KNOWN_PRESETS: &[&str] = &[
    "ultrafast",
    "superfast",
    "veryfast",
    "faster",
    "fast",
    "medium",
    "slow",
    "slower",
    "veryslow",
];

/// Top-level configuration file contents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitterConfig {
    /// Default output geometry and frame rate
    pub defaults: Defaults,
    /// Encode contract knobs
    pub encode: Encode,
    /// Accepted range for the per-segment target duration
    pub limits: Limits,
}

/// Default target resolution and frame rate
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            width: 848,
            height: 480,
            fps: 30,
        }
    }
}

/// Encode preset and bitrate; the codec itself is fixed
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Encode {
    pub preset: String,
    pub bitrate_kbps: u32,
}

impl Default for Encode {
    fn default() -> Self {
        Self {
            preset: "medium".to_string(),
            bitrate_kbps: 5000,
        }
    }
}

/// Caller-enforced bounds on the target segment duration in seconds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    pub min_duration: f64,
    pub max_duration: f64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            min_duration: 1.0,
            max_duration: 5.0,
        }
    }
}

impl SplitterConfig {
    /// Load configuration from a TOML file and validate it.
    pub fn load(path: &Path) -> SplitXResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| SplitXError::InvalidArgument {
            message: format!("Failed to read config file '{}': {e}", path.display()),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| SplitXError::InvalidArgument {
            message: format!("Failed to parse config file '{}': {e}", path.display()),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Check the loaded values are usable before a run starts.
    pub fn validate(&self) -> SplitXResult<()> {
        if !KNOWN_PRESETS.contains(&self.encode.preset.as_str()) {
            return Err(SplitXError::InvalidArgument {
                message: format!("Unknown encode preset '{}'", self.encode.preset),
            });
        }
        if self.encode.bitrate_kbps == 0 {
            return Err(SplitXError::InvalidArgument {
                message: "Bitrate cannot be zero".to_string(),
            });
        }
        if self.defaults.width == 0 || self.defaults.height == 0 || self.defaults.fps == 0 {
            return Err(SplitXError::InvalidArgument {
                message: format!(
                    "Default geometry cannot be zero ({}x{} @ {} fps)",
                    self.defaults.width, self.defaults.height, self.defaults.fps
                ),
            });
        }
        if self.limits.min_duration <= 0.0 || self.limits.max_duration < self.limits.min_duration {
            return Err(SplitXError::InvalidArgument {
                message: format!(
                    "Invalid duration limits: {} - {}",
                    self.limits.min_duration, self.limits.max_duration
                ),
            });
        }
        Ok(())
    }

    /// Validate a requested segment duration against the configured bounds.
    pub fn check_duration(&self, duration: f64) -> SplitXResult<()> {
        if !duration.is_finite()
            || duration < self.limits.min_duration
            || duration > self.limits.max_duration
        {
            return Err(SplitXError::InvalidArgument {
                message: format!(
                    "Target duration {duration}s outside accepted range {}s - {}s",
                    self.limits.min_duration, self.limits.max_duration
                ),
            });
        }
        Ok(())
    }
}
