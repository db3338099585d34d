use std::str::FromStr;

use crate::geometry::Rect;

/// A parsed size descriptor: `"100s"`, `"200w"`, `"100h"`, `"100w50h"`,
/// or `"full"`.
///
/// `full` takes precedence over everything else; a square token (`Ns`)
/// takes precedence over independent width/height tokens. A dimension
/// that was not present in the descriptor stays `None` and is later
/// derived from the source aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeSpec {
    width: Option<u32>,
    height: Option<u32>,
    square: bool,
    full: bool,
}

impl SizeSpec {
    /// Parse a size descriptor.
    ///
    /// Parsing is total: malformed input never fails, it just leaves the
    /// corresponding fields unset. The first `Ns` token wins over any
    /// `Nw`/`Nh` tokens; `"100h200w"` and `"200w100h"` are equivalent.
    pub fn parse(descriptor: &str) -> Self {
        if descriptor == "full" {
            return Self {
                width: None,
                height: None,
                square: false,
                full: true,
            };
        }
        if let Some(side) = scan_dimension(descriptor, b's') {
            return Self {
                width: Some(side),
                height: Some(side),
                square: true,
                full: false,
            };
        }
        Self {
            width: scan_dimension(descriptor, b'w'),
            height: scan_dimension(descriptor, b'h'),
            square: false,
            full: false,
        }
    }

    pub fn width(&self) -> Option<u32> {
        self.width
    }

    pub fn height(&self) -> Option<u32> {
        self.height
    }

    pub fn is_square(&self) -> bool {
        self.square
    }

    pub fn is_full(&self) -> bool {
        self.full
    }

    /// True when the descriptor carried no recognizable constraint at all.
    pub fn is_unconstrained(&self) -> bool {
        !self.full && self.width.is_none() && self.height.is_none()
    }

    /// The sub-rectangle of `source` to keep before scaling: centered and
    /// matching the requested aspect ratio. Never larger than `source`;
    /// upscaling happens only through [`SizeSpec::target_dimensions`].
    pub fn crop_rect(&self, source: Rect) -> Rect {
        if self.full {
            return source;
        }
        if self.square {
            return centered_square(source);
        }
        match (self.width, self.height) {
            // A box constraint crops to the requested aspect ratio.
            (Some(w), Some(h)) => crop_to_ratio(source, w, h),
            // A single-dimension constraint never crops; the free
            // dimension is derived from the source aspect ratio instead.
            _ => source,
        }
    }

    /// The final output dimensions for a source rectangle.
    ///
    /// Explicit dimensions are honored verbatim and may exceed the
    /// source resolution; unset ones are derived from the source aspect
    /// ratio with integer truncation. A degenerate source makes any
    /// derived dimension 0.
    pub fn target_dimensions(&self, source: Rect) -> (u32, u32) {
        let src_w = source.width().max(0) as u32;
        let src_h = source.height().max(0) as u32;
        match (self.width, self.height) {
            (Some(w), Some(h)) => (w, h),
            (Some(w), None) => (w, derive_dimension(src_h, src_w, w)),
            (None, Some(h)) => (derive_dimension(src_w, src_h, h), h),
            (None, None) => (src_w, src_h),
        }
    }
}

impl FromStr for SizeSpec {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// Scale `free` by `set / anchor`, truncating. `0 / 0` sources yield 0.
fn derive_dimension(free: u32, anchor: u32, set: u32) -> u32 {
    if anchor == 0 {
        return 0;
    }
    (u64::from(free) * u64::from(set) / u64::from(anchor)) as u32
}

/// First decimal integer in `s` immediately followed by `suffix`.
fn scan_dimension(s: &str, suffix: u8) -> Option<u32> {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i].is_ascii_digit() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            if bytes.get(i) == Some(&suffix)
                && let Ok(n) = s[start..i].parse::<u32>()
            {
                return Some(n);
            }
        } else {
            i += 1;
        }
    }
    None
}

/// The largest centered square inside `source`, with floored offsets.
fn centered_square(source: Rect) -> Rect {
    if source.is_square() {
        return source;
    }
    let side = source.width().min(source.height());
    Rect::at(
        source.min_x + (source.width() - side) / 2,
        source.min_y + (source.height() - side) / 2,
        side,
        side,
    )
}

/// The largest centered sub-rectangle of `source` with aspect ratio
/// `target_w : target_h`. The comparison is an exact integer
/// cross-multiplication; trims are floored. A square source with a
/// non-square target keeps its width and crops its height.
fn crop_to_ratio(source: Rect, target_w: u32, target_h: u32) -> Rect {
    let sw = i64::from(source.width());
    let sh = i64::from(source.height());
    let tw = i64::from(target_w);
    let th = i64::from(target_h);
    if tw == 0 || th == 0 || sw * th == sh * tw {
        return source;
    }
    if sw * th > sh * tw {
        // Source is wider than the target ratio: height limits, trim width.
        let new_w = (sh * tw / th) as i32;
        Rect::at(
            source.min_x + (source.width() - new_w) / 2,
            source.min_y,
            new_w,
            source.height(),
        )
    } else {
        // Source is taller than the target ratio: width limits, trim height.
        let new_h = (sw * th / tw) as i32;
        Rect::at(
            source.min_x,
            source.min_y + (source.height() - new_h) / 2,
            source.width(),
            new_h,
        )
    }
}
