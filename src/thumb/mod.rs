mod generator;
mod loader;
mod manifest;

pub use generator::{ThumbOptions, ThumbRecord, generate_thumbnails};
pub use loader::collect_image_paths;
pub use manifest::write_manifest;
