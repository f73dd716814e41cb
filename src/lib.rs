//! SplitX CLI Video Segmenter Library
//!
//! A command-line tool that splits one input video into fixed-duration
//! segments, center-crops each to a target aspect ratio, resizes and
//! frame-rate-normalizes it, strips audio, and packages the results into a
//! single zip archive.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod package;
pub mod pipeline;
pub mod planner;
pub mod probe;

// Re-export commonly used types
pub use config::SplitterConfig;
pub use engine::{EncodeSpec, ReframeEncoder, RenderConfig};
pub use error::{SplitXError, SplitXResult};
pub use geometry::{compute_crop, CropRect};
pub use pipeline::SplitRequest;
pub use planner::{plan, Segment, SegmentPlan};
pub use probe::SourceVideo;

/// Initialize SplitX library
pub fn init() -> SplitXResult<()> {
    // Initialize FFmpeg
    ffmpeg_next::init().map_err(|e| SplitXError::FFmpegInitError {
        message: e.to_string(),
    })?;

    Ok(())
}
