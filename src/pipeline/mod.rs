//! Run orchestration module
//!
//! Drives one complete split run: probe the source, plan the segments,
//! compute the shared crop geometry, render every segment strictly
//! sequentially, then package the staging directory into the output
//! archive. The staging directory is a [`tempfile::TempDir`] owned by the
//! run, so it is removed on every exit path, success or failure.

use std::fs::File;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::info;

use crate::engine::{EncodeSpec, ReframeEncoder, RenderConfig};
use crate::error::{SplitXError, SplitXResult};
use crate::geometry;
use crate::package;
use crate::planner;
use crate::probe;

/// Everything one split run needs from the caller
#[derive(Debug, Clone)]
pub struct SplitRequest {
    /// Input video file (MP4 or MOV expected)
    pub input: PathBuf,
    /// Target duration for each segment in seconds
    pub target_duration: f64,
    /// Encode contract: resolution, frame rate, preset, bitrate
    pub encode: EncodeSpec,
    /// Emit an empty caption sidecar per segment
    pub create_captions: bool,
    /// Final archive path
    pub output: PathBuf,
}

/// Execute one split run and return the archive path.
///
/// Segments are rendered one at a time and never buffered concurrently;
/// each render owns its decoder/encoder state for the duration of its call
/// only, keeping peak memory to roughly one segment's worth of frames.
pub fn run(request: &SplitRequest) -> SplitXResult<PathBuf> {
    let source = probe::probe(&request.input)?;
    let plan = planner::plan(source.duration, request.target_duration)?;
    info!("Splitting video into {} segments", plan.count());

    // Crop geometry is computed once from the original source dimensions;
    // every segment comes from the same stream and shares it.
    let crop = geometry::compute_crop(
        source.width,
        source.height,
        request.encode.width,
        request.encode.height,
    )?;

    let staging = TempDir::new().map_err(SplitXError::IoError)?;
    let encoder = ReframeEncoder::new(crop, request.encode.clone());

    for segment in &plan.segments {
        let output_path = staging.path().join(format!("{}.mp4", segment.file_stem()));
        let config = RenderConfig {
            input_path: request.input.display().to_string(),
            output_path: output_path.display().to_string(),
            start_time: segment.start,
            end_time: segment.end,
        };
        encoder.render(&config)?;

        if request.create_captions {
            write_caption_placeholder(&staging.path().join(format!("{}.txt", segment.file_stem())))?;
        }
    }

    package::write_archive(staging.path(), &request.output)?;

    info!("Split run completed: {}", request.output.display());
    Ok(request.output.clone())
}

/// Create an empty sidecar text file for a segment.
///
/// Deliberately empty: a placeholder for a downstream captioning step.
fn write_caption_placeholder(path: &Path) -> SplitXResult<()> {
    File::create(path).map_err(SplitXError::IoError)?;
    Ok(())
}
