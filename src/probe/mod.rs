//! Source video probing module
//!
//! Opens the input container once to read the stream metadata the pipeline
//! needs: duration, frame dimensions, and frame rate. Decoding itself
//! happens later, per segment, in the engine.

use std::path::{Path, PathBuf};

use ffmpeg_next as ffmpeg;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{SplitXError, SplitXResult};

/// Immutable metadata view of the decoded input
#[derive(Debug, Clone, Serialize)]
pub struct SourceVideo {
    /// Path the source was opened from
    pub path: PathBuf,
    /// Total duration in seconds
    pub duration: f64,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Average frame rate in frames per second
    pub frame_rate: f64,
}

impl SourceVideo {
    /// Source aspect ratio (width over height)
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

/// Probe a video file for the metadata needed to plan and reframe it.
pub fn probe(path: &Path) -> SplitXResult<SourceVideo> {
    info!("Probing source video: {}", path.display());

    if !path.exists() {
        return Err(SplitXError::InputFileNotFound {
            path: path.display().to_string(),
        });
    }

    let ictx = ffmpeg::format::input(path).map_err(|e| SplitXError::Decode {
        message: format!("Failed to open input file: {e}"),
    })?;

    let stream = ictx
        .streams()
        .best(ffmpeg::media::Type::Video)
        .ok_or_else(|| SplitXError::Decode {
            message: "No video stream found in input file".to_string(),
        })?;

    let params = stream.parameters();
    let decoder = ffmpeg::codec::context::Context::from_parameters(params)
        .map_err(|e| SplitXError::Decode {
            message: format!("Failed to read video stream parameters: {e}"),
        })?
        .decoder()
        .video()
        .map_err(|e| SplitXError::Decode {
            message: format!("Failed to open video decoder: {e}"),
        })?;

    let width = decoder.width();
    let height = decoder.height();
    if width == 0 || height == 0 {
        return Err(SplitXError::Decode {
            message: format!("Source reports invalid dimensions {width}x{height}"),
        });
    }

    // Container duration in AV_TIME_BASE units; fall back to the stream
    // duration scaled by its own timebase when the container has none.
    let duration = if ictx.duration() > 0 {
        ictx.duration() as f64 / ffmpeg::ffi::AV_TIME_BASE as f64
    } else {
        let tb = stream.time_base();
        stream.duration() as f64 * tb.numerator() as f64 / tb.denominator() as f64
    };
    if !duration.is_finite() || duration <= 0.0 {
        return Err(SplitXError::Decode {
            message: "Could not determine source duration".to_string(),
        });
    }

    let rate = stream.avg_frame_rate();
    let frame_rate = if rate.denominator() != 0 {
        rate.numerator() as f64 / rate.denominator() as f64
    } else {
        0.0
    };

    let source = SourceVideo {
        path: path.to_path_buf(),
        duration,
        width,
        height,
        frame_rate,
    };

    debug!(
        "Probed {}x{} @ {:.3} fps, {:.3}s",
        source.width, source.height, source.frame_rate, source.duration
    );

    Ok(source)
}
