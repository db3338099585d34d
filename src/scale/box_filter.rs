use image::{DynamicImage, GenericImageView, RgbaImage};

use super::{Prepared, empty_image, image_bounds, prepare};
use crate::error::ThumbError;
use crate::geometry::Rect;

/// Resize the `rect` slice of `src` to `dest_w` x `dest_h` with
/// exact-area box filtering.
///
/// Every source pixel contributes to each destination cell it overlaps,
/// weighted by the exact integer area of overlap in the scaled
/// coordinate space. Destination channels are the truncated average of
/// the accumulated sums. Integer arithmetic throughout, so output is
/// bit-identical across platforms and free of seams and rounding drift.
///
/// Only 8-bit interleaved RGBA sources are supported; any other layout
/// yields a zero-filled image sized to `rect` rather than an error.
pub fn resize(
    src: &DynamicImage,
    rect: Rect,
    dest_w: i32,
    dest_h: i32,
) -> Result<RgbaImage, ThumbError> {
    let rect = match prepare(image_bounds(src.width(), src.height()), rect, dest_w, dest_h)? {
        Prepared::Empty(img) => return Ok(img),
        Prepared::Proceed(rect) => rect,
    };
    match src {
        DynamicImage::ImageRgba8(buf) => Ok(resize_rgba(buf, rect, dest_w as u64, dest_h as u64)),
        _ => Ok(empty_image(rect)),
    }
}

/// The accumulation pass. Source pixel `x` of the rect spans
/// `[x*dest_w, (x+1)*dest_w)` in a coordinate space where each
/// destination cell is `src_w` units wide (symmetrically for y), so the
/// overlap of a pixel with a destination cell is an exact integer area.
fn resize_rgba(src: &RgbaImage, rect: Rect, dest_w: u64, dest_h: u64) -> RgbaImage {
    let src_w = rect.width() as u64;
    let src_h = rect.height() as u64;
    // Total source area mapped into one destination cell.
    let area = src_w * src_h;
    let mut sum = vec![0u64; (4 * dest_w * dest_h) as usize];
    let stride = src.width() as usize * 4;
    let pix: &[u8] = src.as_raw();

    for y in rect.min_y..rect.max_y {
        let row = &pix[y as usize * stride..];
        for x in rect.min_x..rect.max_x {
            let p = &row[x as usize * 4..x as usize * 4 + 4];
            let (r, g, b, a) = (
                u64::from(p[0]),
                u64::from(p[1]),
                u64::from(p[2]),
                u64::from(p[3]),
            );
            // Spread the pixel over the destination rows it overlaps.
            let mut py = (y - rect.min_y) as u64 * dest_h;
            let mut rem_y = dest_h;
            while rem_y > 0 {
                let span_y = (src_h - py % src_h).min(rem_y);
                // And over the destination columns.
                let mut px = (x - rect.min_x) as u64 * dest_w;
                let mut rem_x = dest_w;
                let mut index = (4 * ((py / src_h) * dest_w + px / src_w)) as usize;
                while rem_x > 0 {
                    let span_x = (src_w - px % src_w).min(rem_x);
                    let weight = span_x * span_y;
                    sum[index] += r * weight;
                    sum[index + 1] += g * weight;
                    sum[index + 2] += b * weight;
                    sum[index + 3] += a * weight;
                    index += 4;
                    px += span_x;
                    rem_x -= span_x;
                }
                py += span_y;
                rem_y -= span_y;
            }
        }
    }

    average(&sum, dest_w as u32, dest_h as u32, area)
}

/// Convert the accumulated sums to averages, truncating to 8 bits.
fn average(sum: &[u64], width: u32, height: u32, area: u64) -> RgbaImage {
    let mut out = RgbaImage::new(width, height);
    for (dst, acc) in out.chunks_exact_mut(4).zip(sum.chunks_exact(4)) {
        dst[0] = (acc[0] / area) as u8;
        dst[1] = (acc[1] / area) as u8;
        dst[2] = (acc[2] / area) as u8;
        dst[3] = (acc[3] / area) as u8;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn solid(width: u32, height: u32, color: [u8; 4]) -> DynamicImage {
        let mut img = RgbaImage::new(width, height);
        for pixel in img.pixels_mut() {
            *pixel = Rgba(color);
        }
        DynamicImage::ImageRgba8(img)
    }

    fn gray_row(values: &[u8]) -> DynamicImage {
        let mut img = RgbaImage::new(values.len() as u32, 1);
        for (x, v) in values.iter().enumerate() {
            img.put_pixel(x as u32, 0, Rgba([*v, *v, *v, 255]));
        }
        DynamicImage::ImageRgba8(img)
    }

    #[test]
    fn test_uniform_downscale_is_invariant() {
        let src = solid(4, 4, [10, 20, 30, 255]);
        let out = resize(&src, Rect::from_size(4, 4), 2, 2).unwrap();
        assert_eq!(out.dimensions(), (2, 2));
        for pixel in out.pixels() {
            assert_eq!(pixel.0, [10, 20, 30, 255]);
        }
    }

    #[test]
    fn test_downscale_to_single_pixel_averages() {
        let mut img = RgbaImage::new(2, 2);
        img.put_pixel(0, 0, Rgba([0, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([255, 255, 255, 255]));
        img.put_pixel(0, 1, Rgba([255, 255, 255, 255]));
        img.put_pixel(1, 1, Rgba([0, 0, 0, 255]));

        let out = resize(
            &DynamicImage::ImageRgba8(img),
            Rect::from_size(2, 2),
            1,
            1,
        )
        .unwrap();
        // (0 + 255 + 255 + 0) / 4, truncated.
        assert_eq!(out.get_pixel(0, 0).0, [127, 127, 127, 255]);
    }

    #[test]
    fn test_fractional_downscale_weights() {
        let src = gray_row(&[30, 60, 90]);
        let out = resize(&src, Rect::from_size(3, 1), 2, 1).unwrap();
        // Cell 0 covers pixel 0 fully and a third of pixel 1:
        // (30*2 + 60*1) / 3; cell 1 is (60*1 + 90*2) / 3.
        assert_eq!(out.get_pixel(0, 0).0[0], 40);
        assert_eq!(out.get_pixel(1, 0).0[0], 80);
    }

    #[test]
    fn test_fractional_upscale_weights() {
        let src = gray_row(&[100, 200]);
        let out = resize(&src, Rect::from_size(2, 1), 3, 1).unwrap();
        // The middle destination cell straddles both source pixels evenly.
        assert_eq!(out.get_pixel(0, 0).0[0], 100);
        assert_eq!(out.get_pixel(1, 0).0[0], 150);
        assert_eq!(out.get_pixel(2, 0).0[0], 200);
    }

    #[test]
    fn test_uniform_upscale_is_invariant() {
        let src = solid(1, 1, [7, 8, 9, 100]);
        let out = resize(&src, Rect::from_size(1, 1), 3, 3).unwrap();
        assert_eq!(out.dimensions(), (3, 3));
        for pixel in out.pixels() {
            assert_eq!(pixel.0, [7, 8, 9, 100]);
        }
    }

    #[test]
    fn test_block_downscale_matches_block_averages() {
        // Four uniform 2x2 quadrants collapse to their own colors.
        let mut img = RgbaImage::new(4, 4);
        let quadrant = |x: u32, y: u32| -> [u8; 4] {
            match (x < 2, y < 2) {
                (true, true) => [200, 0, 0, 255],
                (false, true) => [0, 200, 0, 255],
                (true, false) => [0, 0, 200, 255],
                (false, false) => [200, 200, 0, 255],
            }
        };
        for y in 0..4 {
            for x in 0..4 {
                img.put_pixel(x, y, Rgba(quadrant(x, y)));
            }
        }

        let out = resize(
            &DynamicImage::ImageRgba8(img),
            Rect::from_size(4, 4),
            2,
            2,
        )
        .unwrap();
        assert_eq!(out.get_pixel(0, 0).0, [200, 0, 0, 255]);
        assert_eq!(out.get_pixel(1, 0).0, [0, 200, 0, 255]);
        assert_eq!(out.get_pixel(0, 1).0, [0, 0, 200, 255]);
        assert_eq!(out.get_pixel(1, 1).0, [200, 200, 0, 255]);
    }

    #[test]
    fn test_conserves_intensity_under_downscale() {
        let mut img = RgbaImage::new(4, 4);
        for y in 0..4 {
            for x in 0..4 {
                let v = (16 * (y * 4 + x)) as u8;
                img.put_pixel(x, y, Rgba([v, v, v, 255]));
            }
        }
        let src_sum: u64 = img.pixels().map(|p| u64::from(p.0[0])).sum();

        let out = resize(
            &DynamicImage::ImageRgba8(img),
            Rect::from_size(4, 4),
            2,
            2,
        )
        .unwrap();
        let out_sum: u64 = out.pixels().map(|p| u64::from(p.0[0])).sum();

        // destArea/srcArea = 1/4; each output pixel truncates at most one
        // unit, so the scaled totals differ by less than the pixel count.
        let expected = src_sum / 4;
        assert!(expected - out_sum < 4, "{expected} vs {out_sum}");
    }

    #[test]
    fn test_subrectangle_is_honored() {
        let mut img = RgbaImage::new(4, 4);
        for y in 0..4 {
            for x in 0..4 {
                let color = if x < 2 { 255 } else { 0 };
                img.put_pixel(x, y, Rgba([color, color, color, 255]));
            }
        }

        let src = DynamicImage::ImageRgba8(img);
        let left = resize(&src, Rect::new(0, 0, 2, 4), 1, 1).unwrap();
        let right = resize(&src, Rect::new(2, 0, 4, 4), 1, 1).unwrap();
        assert_eq!(left.get_pixel(0, 0).0[0], 255);
        assert_eq!(right.get_pixel(0, 0).0[0], 0);
    }

    #[test]
    fn test_oversized_rect_is_clipped() {
        let src = solid(4, 4, [50, 60, 70, 255]);
        let out = resize(&src, Rect::new(-2, -2, 10, 10), 2, 2).unwrap();
        assert_eq!(out.dimensions(), (2, 2));
        assert_eq!(out.get_pixel(1, 1).0, [50, 60, 70, 255]);
    }

    #[test]
    fn test_zero_destination_yields_source_sized_blank() {
        let src = solid(4, 4, [50, 60, 70, 255]);
        let out = resize(&src, Rect::from_size(4, 4), 0, 5).unwrap();
        assert_eq!(out.dimensions(), (4, 4));
        assert!(out.pixels().all(|p| p.0 == [0, 0, 0, 0]));
    }

    #[test]
    fn test_degenerate_rect_yields_empty() {
        let src = solid(4, 4, [50, 60, 70, 255]);
        let out = resize(&src, Rect::from_size(0, 0), 2, 2).unwrap();
        assert_eq!(out.dimensions(), (0, 0));
    }

    #[test]
    fn test_negative_dimensions_are_an_error() {
        let src = solid(4, 4, [50, 60, 70, 255]);
        let err = resize(&src, Rect::from_size(4, 4), -1, 2).unwrap_err();
        assert!(matches!(
            err,
            ThumbError::InvalidDimensions {
                width: -1,
                height: 2
            }
        ));
    }

    #[test]
    fn test_unsupported_layout_yields_rect_sized_blank() {
        let src = DynamicImage::ImageRgb8(image::RgbImage::new(4, 4));
        let out = resize(&src, Rect::from_size(4, 4), 2, 2).unwrap();
        assert_eq!(out.dimensions(), (4, 4));
        assert!(out.pixels().all(|p| p.0 == [0, 0, 0, 0]));
    }
}
