//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

/// Arguments for the split command
#[derive(Args, Debug)]
pub struct SplitArgs {
    /// Input video file path (MP4 or MOV)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Target duration for each segment in seconds
    #[arg(short, long, default_value = "2.5")]
    pub duration: f64,

    /// Target frame width in pixels (default from config)
    #[arg(long, value_parser = clap::value_parser!(u32).range(16..=7680))]
    pub width: Option<u32>,

    /// Target frame height in pixels (default from config)
    #[arg(long, value_parser = clap::value_parser!(u32).range(16..=4320))]
    pub height: Option<u32>,

    /// Target frame rate (default from config)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: Option<u32>,

    /// Create an empty caption sidecar per segment
    #[arg(long)]
    pub captions: bool,

    /// Output archive path
    #[arg(short, long, default_value = "processed_videos.zip")]
    pub output: PathBuf,

    /// Configuration file path
    #[arg(long, env = "SPLITX_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Arguments for the inspect command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Input video file path
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}
