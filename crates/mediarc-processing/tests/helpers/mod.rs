#![allow(dead_code)]

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use mediarc_processing::{IngestLimits, UploadFile};
use std::io::Cursor;

pub const TEST_LIMITS: IngestLimits = IngestLimits {
    max_file_bytes: 20 * 1024 * 1024,
    max_batch_files: 10,
};

/// Encode a flat-color JPEG of the given dimensions.
pub fn jpeg_file(width: u32, height: u32) -> UploadFile {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([180, 90, 30])));
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Jpeg)
        .unwrap();
    UploadFile {
        content_type: "image/jpeg".to_string(),
        data: buffer,
    }
}

/// Encode a flat-color PNG of the given dimensions.
pub fn png_file(width: u32, height: u32) -> UploadFile {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([30, 90, 180])));
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .unwrap();
    UploadFile {
        content_type: "image/png".to_string(),
        data: buffer,
    }
}

/// A fake MP4 payload; the pipeline stores video bytes unmodified and never
/// decodes them.
pub fn mp4_file() -> UploadFile {
    let mut data = Vec::new();
    data.extend_from_slice(&[0x00, 0x00, 0x00, 0x20]);
    data.extend_from_slice(b"ftypisom");
    data.extend_from_slice(&[0u8; 512]);
    UploadFile {
        content_type: "video/mp4".to_string(),
        data,
    }
}

/// Decode image bytes and return (width, height).
pub fn decode_dimensions(data: &[u8]) -> (u32, u32) {
    use image::GenericImageView;
    image::ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .unwrap()
        .decode()
        .unwrap()
        .dimensions()
}
