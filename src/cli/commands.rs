//! Command implementations

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::args::{InspectArgs, SplitArgs};
use crate::config::SplitterConfig;
use crate::engine::EncodeSpec;
use crate::pipeline::{self, SplitRequest};
use crate::probe::{self, SourceVideo};

/// Execute the split command
pub fn split(args: SplitArgs) -> Result<()> {
    info!("Starting split operation");
    info!("Input: {}", args.input.display());
    info!("Target duration: {:.2}s", args.duration);

    let config = match &args.config {
        Some(path) => SplitterConfig::load(path)
            .with_context(|| format!("Failed to load config '{}'", path.display()))?,
        None => SplitterConfig::default(),
    };

    // The accepted duration range is enforced here, at the caller boundary;
    // the planner itself only requires a positive duration.
    config.check_duration(args.duration)?;

    let encode = EncodeSpec {
        width: args.width.unwrap_or(config.defaults.width),
        height: args.height.unwrap_or(config.defaults.height),
        fps: args.fps.unwrap_or(config.defaults.fps),
        preset: config.encode.preset.clone(),
        bitrate_kbps: config.encode.bitrate_kbps,
    };
    info!(
        "Target format: {}x{} @ {} fps, preset {}, {} kbps",
        encode.width, encode.height, encode.fps, encode.preset, encode.bitrate_kbps
    );

    let request = SplitRequest {
        input: args.input,
        target_duration: args.duration,
        encode,
        create_captions: args.captions,
        output: args.output,
    };

    let archive = pipeline::run(&request).context("Failed to process video")?;
    println!("{}", archive.display());

    info!("Split operation completed successfully");
    Ok(())
}

/// Execute the inspect command
pub fn inspect(args: InspectArgs) -> Result<()> {
    info!("Starting inspect operation");
    info!("Input: {}", args.input.display());

    let source = probe::probe(&args.input).context("Failed to inspect input file")?;

    if args.json {
        let json = serde_json::to_string_pretty(&source)
            .context("Failed to serialize source info to JSON")?;
        println!("{}", json);
    } else {
        display_source_info(&source);
    }

    info!("Inspect operation completed successfully");
    Ok(())
}

/// Display source information in human-readable format
fn display_source_info(source: &SourceVideo) {
    println!("Source Video");
    println!("============");
    println!("File: {}", source.path.display());
    println!("Duration: {:.3}s", source.duration);
    println!("Resolution: {}x{}", source.width, source.height);
    println!("Frame Rate: {:.3} fps", source.frame_rate);
    println!("Aspect Ratio: {:.4}", source.aspect_ratio());
}
