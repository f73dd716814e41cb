//! SplitX CLI Video Segmenter
//!
//! Splits one input video into fixed-duration segments, each reframed to a
//! target aspect ratio/resolution/frame rate, audio stripped, and packages
//! them into a single zip archive.
//!
//! # Usage
//!
//! ```bash
//! splitter split --input "video.mp4" --duration 2.5 --captions
//! splitter split --input "video.mov" --width 1080 --height 1920 --fps 24
//! splitter inspect --input "video.mp4" --json
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use splitx_cli::cli::{commands, Cli, Commands};

/// Main entry point for the SplitX CLI application
fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG takes precedence over --log-level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cli.log_level.clone())),
        )
        .init();

    info!("Starting SplitX CLI Video Segmenter");

    // Initialize FFmpeg once for the whole run
    splitx_cli::init()?;

    // Execute the requested command
    match cli.command {
        Commands::Split(args) => {
            info!("Executing split command");
            commands::split(args)?;
        }
        Commands::Inspect(args) => {
            info!("Executing inspect command");
            commands::inspect(args)?;
        }
    }

    info!("SplitX CLI completed successfully");
    Ok(())
}
