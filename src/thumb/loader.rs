use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::error::ThumbError;

const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp"];

/// Collect image paths from input files and directories.
///
/// Directories are walked recursively; non-image files are skipped. A
/// missing input path is an error, and so is ending up with no images
/// at all. Results are sorted so batch output and manifest order are
/// stable across runs.
pub fn collect_image_paths(inputs: &[impl AsRef<Path>]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for input in inputs {
        let path = input.as_ref();
        if !path.exists() {
            return Err(ThumbError::InputNotFound(path.to_path_buf()).into());
        }

        if path.is_file() {
            if is_supported_image(path) {
                paths.push(path.to_path_buf());
            }
        } else if path.is_dir() {
            collect_from_directory(path, &mut paths)?;
        }
    }

    if paths.is_empty() {
        return Err(ThumbError::NoImages.into());
    }

    paths.sort();
    Ok(paths)
}

fn collect_from_directory(dir: &Path, paths: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir).context("Failed to read directory")? {
        let entry = entry?;
        let path = entry.path();

        if path.is_file() && is_supported_image(&path) {
            paths.push(path);
        } else if path.is_dir() {
            collect_from_directory(&path, paths)?;
        }
    }

    Ok(())
}

fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
