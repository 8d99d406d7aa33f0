//! Recipe image preparation.
//!
//! Images never reach the backend; they are downscaled, re-encoded as
//! JPEG, and stored in the overlay cache as data URLs. Inputs are
//! bounded before any work happens so one oversized file cannot blow up
//! the cache.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use base64::{engine::general_purpose::STANDARD as Base64, Engine as _};
use image::codecs::jpeg::JpegEncoder;
use thiserror::Error;

/// Largest accepted source file.
pub const MAX_SOURCE_BYTES: u64 = 6 * 1024 * 1024;
/// Images are scaled down to fit within this square. Smaller images are
/// left at their original size.
pub const MAX_DIMENSION: u32 = 1024;
/// JPEG re-encode quality.
const JPEG_QUALITY: u8 = 85;

pub const DATA_URL_PREFIX: &str = "data:image/jpeg;base64,";

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("Image is too large ({size} bytes, limit is {limit})")]
    TooLarge { size: u64, limit: u64 },

    #[error("Could not read image file: {0}")]
    Unreadable(#[from] std::io::Error),

    #[error("Could not decode image: {0}")]
    Decode(String),

    #[error("Could not encode image: {0}")]
    Encode(String),
}

/// Reads an image file and prepares the overlay payload for it.
pub fn prepare_image(path: &Path) -> Result<String, ImageError> {
    let size = fs::metadata(path)?.len();
    if size > MAX_SOURCE_BYTES {
        return Err(ImageError::TooLarge {
            size,
            limit: MAX_SOURCE_BYTES,
        });
    }
    let bytes = fs::read(path)?;
    encode_data_url(&bytes)
}

/// Decodes raw image bytes, downscales to fit [`MAX_DIMENSION`], and
/// returns a JPEG data URL.
pub fn encode_data_url(bytes: &[u8]) -> Result<String, ImageError> {
    let img = image::load_from_memory(bytes).map_err(|e| ImageError::Decode(e.to_string()))?;

    let img = if img.width() > MAX_DIMENSION || img.height() > MAX_DIMENSION {
        img.thumbnail(MAX_DIMENSION, MAX_DIMENSION)
    } else {
        img
    };

    // JPEG has no alpha channel
    let rgb = img.to_rgb8();
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut Cursor::new(&mut buf), JPEG_QUALITY)
        .encode_image(&rgb)
        .map_err(|e| ImageError::Encode(e.to_string()))?;

    Ok(format!("{}{}", DATA_URL_PREFIX, Base64.encode(&buf)))
}
