mod box_filter;
mod nearest;

pub use box_filter::resize;
pub use nearest::resample;

use image::RgbaImage;

use crate::error::ThumbError;
use crate::geometry::Rect;

/// Outcome of validating a scaling request before any pixels are read.
enum Prepared {
    /// Nothing to scale; a zero-filled image stands in for the result.
    Empty(RgbaImage),
    /// Proceed over the source rectangle, clipped to the image bounds.
    Proceed(Rect),
}

/// Shared guards for both resamplers: negative destination dimensions
/// are a caller error; a zero destination dimension or a degenerate
/// source rectangle yields a defined empty result.
fn prepare(bounds: Rect, rect: Rect, dest_w: i32, dest_h: i32) -> Result<Prepared, ThumbError> {
    if dest_w < 0 || dest_h < 0 {
        return Err(ThumbError::InvalidDimensions {
            width: dest_w,
            height: dest_h,
        });
    }
    let rect = rect.intersect(&bounds);
    if dest_w == 0 || dest_h == 0 || rect.is_empty() {
        return Ok(Prepared::Empty(empty_image(rect)));
    }
    Ok(Prepared::Proceed(rect))
}

/// Zero-filled image sized to `rect`, extents clamped to non-negative.
fn empty_image(rect: Rect) -> RgbaImage {
    RgbaImage::new(rect.width().max(0) as u32, rect.height().max(0) as u32)
}

/// The bounds rectangle of a decoded image, anchored at the origin.
fn image_bounds(width: u32, height: u32) -> Rect {
    Rect::from_size(width as i32, height as i32)
}
