//! Variant encoding.
//!
//! Ladder rungs are normalized to a single raster format (lossy WebP at a
//! fixed quality) regardless of the source format, keeping storage and
//! bandwidth predictable. The original's format is preserved only for the
//! unmodified original object.

use anyhow::{anyhow, Result};
use image::DynamicImage;

/// Fixed lossy quality for ladder rungs.
pub const VARIANT_QUALITY: f32 = 80.0;

/// MIME type of encoded ladder rungs.
pub const VARIANT_FORMAT_MIME: &str = "image/webp";

/// File extension of encoded ladder rungs.
pub const VARIANT_FORMAT_EXT: &str = "webp";

/// Encode an image as lossy WebP.
pub fn encode_webp(img: &DynamicImage, quality: f32) -> Result<Vec<u8>> {
    // The WebP encoder only accepts 8-bit RGB/RGBA buffers
    let rgba = DynamicImage::ImageRgba8(img.to_rgba8());
    let encoder =
        webp::Encoder::from_image(&rgba).map_err(|e| anyhow!("WebP encoding failed: {}", e))?;
    Ok(encoder.encode(quality).to_vec())
}

/// File extension for an accepted MIME type, used to name originals.
pub fn extension_for_mime(mime: &str) -> Option<&'static str> {
    match mime.to_lowercase().as_str() {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        "video/mp4" => Some("mp4"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgba, RgbaImage};
    use std::io::Cursor;

    #[test]
    fn test_encode_webp_round_trip() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(64, 48, Rgba([0, 128, 255, 255])));
        let encoded = encode_webp(&img, VARIANT_QUALITY).unwrap();
        assert!(!encoded.is_empty());

        let decoded = image::ImageReader::new(Cursor::new(&encoded))
            .with_guessed_format()
            .unwrap()
            .decode()
            .unwrap();
        assert_eq!(decoded.dimensions(), (64, 48));
    }

    #[test]
    fn test_extension_for_mime() {
        assert_eq!(extension_for_mime("image/jpeg"), Some("jpg"));
        assert_eq!(extension_for_mime("IMAGE/PNG"), Some("png"));
        assert_eq!(extension_for_mime("video/mp4"), Some("mp4"));
        assert_eq!(extension_for_mime("image/gif"), None);
    }
}
