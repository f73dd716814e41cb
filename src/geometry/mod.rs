//! Crop geometry module
//!
//! Computes the centered rectangle that converts the source aspect ratio to
//! the target aspect ratio without distorting pixel content. The rectangle
//! is computed once per run from the original source dimensions and shared
//! by every segment, since all segments come from the same stream.

use serde::{Deserialize, Serialize};

use crate::error::{SplitXError, SplitXResult};

/// Crop rectangle relative to the source frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRect {
    /// Horizontal offset of the left edge in pixels
    pub x: u32,
    /// Vertical offset of the top edge in pixels
    pub y: u32,
    /// Rectangle width in pixels
    pub width: u32,
    /// Rectangle height in pixels
    pub height: u32,
}

impl CropRect {
    /// Whether the rectangle covers the whole source frame (no actual crop)
    pub fn is_identity(&self, source_w: u32, source_h: u32) -> bool {
        self.x == 0 && self.y == 0 && self.width == source_w && self.height == source_h
    }
}

/// Compute the center-crop rectangle matching the target aspect ratio.
///
/// When the source is relatively wider than the target, full height is kept
/// and width is cropped; otherwise full width is kept and height is cropped.
/// Equal ratios fall into the second branch and yield the identity
/// rectangle. The result always stays within the source bounds and is
/// centered with at most one pixel of margin asymmetry from rounding.
///
/// A rectangle that rounds to zero in either dimension (extreme aspect
/// mismatch) is rejected as a fatal decode-class condition rather than
/// silently producing a degenerate frame.
pub fn compute_crop(
    source_w: u32,
    source_h: u32,
    target_w: u32,
    target_h: u32,
) -> SplitXResult<CropRect> {
    if source_w == 0 || source_h == 0 {
        return Err(SplitXError::Decode {
            message: format!("Source dimensions cannot be zero ({source_w}x{source_h})"),
        });
    }
    if target_w == 0 || target_h == 0 {
        return Err(SplitXError::InvalidArgument {
            message: format!("Target dimensions cannot be zero ({target_w}x{target_h})"),
        });
    }

    let target_ratio = target_w as f64 / target_h as f64;
    let source_ratio = source_w as f64 / source_h as f64;

    let rect = if source_ratio > target_ratio {
        // Source relatively wider: keep height, crop width, center horizontally
        let new_width = (source_h as f64 * target_ratio).round() as u32;
        CropRect {
            x: (source_w - new_width.min(source_w)) / 2,
            y: 0,
            width: new_width.min(source_w),
            height: source_h,
        }
    } else {
        // Source relatively taller or equal: keep width, crop height, center
        // vertically. Equal ratios land here with new_height == source_h.
        let new_height = (source_w as f64 / target_ratio).round() as u32;
        CropRect {
            x: 0,
            y: (source_h - new_height.min(source_h)) / 2,
            width: source_w,
            height: new_height.min(source_h),
        }
    };

    if rect.width == 0 || rect.height == 0 {
        return Err(SplitXError::Decode {
            message: format!(
                "Crop of {source_w}x{source_h} to aspect {target_w}:{target_h} \
                 produces a degenerate {}x{} rectangle",
                rect.width, rect.height
            ),
        });
    }

    Ok(rect)
}
