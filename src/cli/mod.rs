//! CLI module for SplitX
//!
//! This module handles command-line argument parsing and command execution.

use clap::{Parser, Subcommand};

pub mod args;
pub mod commands;

/// SplitX CLI Video Segmenter
///
/// A command-line tool that splits one video into fixed-duration segments,
/// reframed to a target aspect ratio and resolution, and packages them into
/// a single zip archive.
#[derive(Parser)]
#[command(name = "splitter")]
#[command(about = "SplitX CLI Video Segmenter - Fixed-duration video splitting made simple")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Logging level
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Split a video into fixed-duration, reframed segments
    Split(args::SplitArgs),
    /// Inspect video file information
    Inspect(args::InspectArgs),
}
