use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThumbError {
    #[error("Invalid target dimensions {width}x{height}: negative sizes are not allowed")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("Failed to load image '{path}': {source}")]
    ImageLoad {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to save image '{path}': {source}")]
    ImageSave {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("No valid images found in input")]
    NoImages,

    #[error("Input path does not exist: {0}")]
    InputNotFound(PathBuf),

    #[error("Failed to write output file '{path}': {source}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },
}
