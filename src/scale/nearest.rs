use image::{DynamicImage, GenericImageView, RgbaImage};

use super::{Prepared, image_bounds, prepare};
use crate::error::ThumbError;
use crate::geometry::Rect;

/// Resample the `rect` slice of `src` to `dest_w` x `dest_h` by nearest
/// neighbor.
///
/// Each destination pixel copies the single source pixel its coordinates
/// map onto (integer truncation), with no averaging or anti-aliasing.
/// Reads go through the generic pixel accessor, so any source layout
/// works. Same guard behavior as [`super::resize`].
pub fn resample(
    src: &DynamicImage,
    rect: Rect,
    dest_w: i32,
    dest_h: i32,
) -> Result<RgbaImage, ThumbError> {
    let rect = match prepare(image_bounds(src.width(), src.height()), rect, dest_w, dest_h)? {
        Prepared::Empty(img) => return Ok(img),
        Prepared::Proceed(rect) => rect,
    };
    let src_w = i64::from(rect.width());
    let src_h = i64::from(rect.height());
    let (dest_w, dest_h) = (dest_w as u32, dest_h as u32);

    let mut out = RgbaImage::new(dest_w, dest_h);
    for y in 0..dest_h {
        let sub_y = i64::from(y) * src_h / i64::from(dest_h);
        for x in 0..dest_w {
            let sub_x = i64::from(x) * src_w / i64::from(dest_w);
            let pixel = src.get_pixel(
                (i64::from(rect.min_x) + sub_x) as u32,
                (i64::from(rect.min_y) + sub_y) as u32,
            );
            out.put_pixel(x, y, pixel);
        }
    }
    Ok(out)
}
