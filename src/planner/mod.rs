//! Segment planning module
//!
//! Decides how many whole segments fit in the source duration and assigns
//! each its [start, end) time window. Planning is a pure computation over
//! two numbers; no media is touched here.

use serde::{Deserialize, Serialize};

use crate::error::{SplitXError, SplitXResult};

/// One planned time slice of the source video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Zero-based position in the plan
    pub index: usize,
    /// Start time in seconds (inclusive)
    pub start: f64,
    /// End time in seconds (exclusive)
    pub end: f64,
}

impl Segment {
    /// One-based file stem used for output naming (`segment1`, `segment2`, ...)
    pub fn file_stem(&self) -> String {
        format!("segment{}", self.index + 1)
    }

    /// Segment length in seconds
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Complete segmentation plan for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentPlan {
    /// Target length of every segment in seconds
    pub target_duration: f64,
    /// Planned segments in timeline order
    pub segments: Vec<Segment>,
}

impl SegmentPlan {
    /// Number of planned segments
    pub fn count(&self) -> usize {
        self.segments.len()
    }
}

/// Compute the segmentation plan for a source of `source_duration` seconds.
///
/// Produces `floor(source_duration / target_duration)` contiguous,
/// non-overlapping windows of exactly `target_duration` seconds starting at
/// zero. Any remainder shorter than one segment at the tail is dropped:
/// uniform segment length is preferred over maximal coverage.
///
/// Fails with [`SplitXError::TooShort`] when the source cannot hold even a
/// single segment, so the run aborts before any encoding work begins.
pub fn plan(source_duration: f64, target_duration: f64) -> SplitXResult<SegmentPlan> {
    if !target_duration.is_finite() || target_duration <= 0.0 {
        return Err(SplitXError::InvalidArgument {
            message: format!("Target duration must be positive, got {target_duration}"),
        });
    }

    if source_duration < target_duration {
        return Err(SplitXError::TooShort {
            duration: source_duration,
            target: target_duration,
        });
    }

    let count = (source_duration / target_duration).floor() as usize;
    let segments = (0..count)
        .map(|index| {
            let start = index as f64 * target_duration;
            Segment {
                index,
                start,
                end: start + target_duration,
            }
        })
        .collect();

    Ok(SegmentPlan {
        target_duration,
        segments,
    })
}
