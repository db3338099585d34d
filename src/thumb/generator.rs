use std::path::{Path, PathBuf};

use anyhow::Result;
use image::{DynamicImage, GenericImageView, ImageReader, RgbaImage};
use log::debug;
use rayon::prelude::*;

use crate::cli::ScaleFilter;
use crate::error::ThumbError;
use crate::geometry::Rect;
use crate::scale;
use crate::size::SizeSpec;

/// Metadata for one generated thumbnail, feeding logs and the manifest.
#[derive(Debug, Clone)]
pub struct ThumbRecord {
    pub source: PathBuf,
    pub output: PathBuf,
    pub source_width: u32,
    pub source_height: u32,
    /// The sub-rectangle of the source that was kept before scaling.
    pub crop: Rect,
    pub width: u32,
    pub height: u32,
}

/// Options applying to a whole batch run.
#[derive(Debug, Clone)]
pub struct ThumbOptions {
    pub spec: SizeSpec,
    pub filter: ScaleFilter,
    pub output_dir: PathBuf,
    pub suffix: String,
}

/// Generate a thumbnail for every path. Files run in parallel; each
/// individual resize is a single synchronous pass.
pub fn generate_thumbnails(paths: &[PathBuf], options: &ThumbOptions) -> Result<Vec<ThumbRecord>> {
    paths
        .par_iter()
        .map(|path| generate_single(path, options))
        .collect()
}

fn generate_single(path: &Path, options: &ThumbOptions) -> Result<ThumbRecord> {
    let decoded = ImageReader::open(path)
        .map_err(|e| ThumbError::ImageLoad {
            path: path.to_path_buf(),
            source: e.into(),
        })?
        .decode()
        .map_err(|e| ThumbError::ImageLoad {
            path: path.to_path_buf(),
            source: e,
        })?;

    // Normalize to the one layout the box filter supports.
    let src = DynamicImage::ImageRgba8(decoded.into_rgba8());
    let bounds = Rect::from_size(src.width() as i32, src.height() as i32);

    let crop = options.spec.crop_rect(bounds);
    let (width, height) = options.spec.target_dimensions(crop);
    debug!(
        "{}: {}x{} -> crop {}x{} -> {}x{}",
        path.display(),
        bounds.width(),
        bounds.height(),
        crop.width(),
        crop.height(),
        width,
        height
    );

    let thumb = match options.filter {
        ScaleFilter::Box => scale::resize(&src, crop, width as i32, height as i32)?,
        ScaleFilter::Nearest => scale::resample(&src, crop, width as i32, height as i32)?,
    };

    let output = output_path(path, &options.output_dir, &options.suffix);
    save_thumbnail(thumb, &output)?;

    Ok(ThumbRecord {
        source: path.to_path_buf(),
        output,
        source_width: bounds.width() as u32,
        source_height: bounds.height() as u32,
        crop,
        width,
        height,
    })
}

/// `<output_dir>/<stem><suffix>.<ext>`, keeping the source format.
fn output_path(source: &Path, output_dir: &Path, suffix: &str) -> PathBuf {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("thumb");
    let ext = source
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("png");
    output_dir.join(format!("{stem}{suffix}.{ext}"))
}

/// Save the thumbnail, converting to RGB for formats without alpha.
fn save_thumbnail(thumb: RgbaImage, path: &Path) -> Result<()> {
    let is_jpeg = path
        .extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg"));

    let result = if is_jpeg {
        DynamicImage::ImageRgba8(thumb).to_rgb8().save(path)
    } else {
        thumb.save(path)
    };

    result.map_err(|e| ThumbError::ImageSave {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(())
}
