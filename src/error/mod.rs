//! Error handling module for SplitX

use thiserror::Error;

/// Main error type for SplitX operations
#[derive(Error, Debug)]
pub enum SplitXError {
    /// Input file not found or inaccessible
    #[error("Input file not found: {path}")]
    InputFileNotFound { path: String },

    /// Source shorter than one segment
    #[error("Video too short ({duration:.1}s < {target:.1}s)")]
    TooShort { duration: f64, target: f64 },

    /// Source file unreadable, corrupt, or lacking a usable video stream
    #[error("Failed to decode source video: {message}")]
    Decode { message: String },

    /// Encoder failure on a segment
    #[error("Failed to encode segment: {message}")]
    Encode { message: String },

    /// Archive assembly failure
    #[error("Failed to package output archive: {message}")]
    Packaging { message: String },

    /// Invalid scalar parameter
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// FFmpeg initialization error
    #[error("Failed to initialize FFmpeg: {message}")]
    FFmpegInitError { message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// FFmpeg error
    #[error("FFmpeg error: {0}")]
    FFmpegError(#[from] ffmpeg_next::Error),
}

/// Result type alias for SplitX operations
pub type SplitXResult<T> = std::result::Result<T, SplitXError>;
