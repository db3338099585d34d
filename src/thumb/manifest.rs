use std::fs;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use super::ThumbRecord;
use crate::error::ThumbError;

#[derive(Serialize)]
struct Manifest {
    meta: Meta,
    thumbnails: Vec<JsonThumb>,
}

#[derive(Serialize)]
struct Meta {
    app: &'static str,
    version: &'static str,
    size: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonThumb {
    source: String,
    output: String,
    source_size: Size,
    crop: Crop,
    size: Size,
}

#[derive(Serialize)]
struct Size {
    w: u32,
    h: u32,
}

#[derive(Serialize)]
struct Crop {
    x: i32,
    y: i32,
    w: i32,
    h: i32,
}

/// Write a JSON manifest describing every generated thumbnail.
pub fn write_manifest(records: &[ThumbRecord], path: &Path, descriptor: &str) -> Result<()> {
    let manifest = Manifest {
        meta: Meta {
            app: "minithumb",
            version: env!("CARGO_PKG_VERSION"),
            size: descriptor.to_string(),
        },
        thumbnails: records.iter().map(record_to_json).collect(),
    };

    let json = serde_json::to_string_pretty(&manifest)?;
    fs::write(path, json).map_err(|e| ThumbError::OutputWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

fn record_to_json(record: &ThumbRecord) -> JsonThumb {
    JsonThumb {
        source: record.source.to_string_lossy().to_string(),
        output: record.output.to_string_lossy().to_string(),
        source_size: Size {
            w: record.source_width,
            h: record.source_height,
        },
        crop: Crop {
            x: record.crop.min_x,
            y: record.crop.min_y,
            w: record.crop.width(),
            h: record.crop.height(),
        },
        size: Size {
            w: record.width,
            h: record.height,
        },
    }
}
