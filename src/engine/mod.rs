//! Reframe-and-encode engine module

use serde::{Deserialize, Serialize};

pub mod reframe;

pub use reframe::ReframeEncoder;

/// Fixed per-segment encode contract
///
/// One H.264 codec profile, no audio. Only the preset and bitrate can be
/// adjusted, and only through the config layer; the CLI does not expose
/// them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodeSpec {
    /// Output frame width in pixels
    pub width: u32,
    /// Output frame height in pixels
    pub height: u32,
    /// Output frame rate, forced regardless of source rate
    pub fps: u32,
    /// x264 quality preset
    pub preset: String,
    /// Target bitrate in kilobits per second
    pub bitrate_kbps: u32,
}

impl EncodeSpec {
    /// Target bitrate in bits per second, as libavcodec expects it
    pub fn bitrate(&self) -> usize {
        self.bitrate_kbps as usize * 1000
    }
}

/// Per-segment render configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Input file path
    pub input_path: String,
    /// Output file path for this segment
    pub output_path: String,
    /// Segment start time in seconds (inclusive)
    pub start_time: f64,
    /// Segment end time in seconds (exclusive)
    pub end_time: f64,
}
