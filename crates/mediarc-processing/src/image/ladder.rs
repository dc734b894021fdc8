//! The fixed variant ladder: decode once, render every rung.

use anyhow::{Context, Result};
use image::GenericImageView;
use mediarc_core::VariantName;
use std::io::Cursor;
use std::sync::Arc;

use super::encoder::{encode_webp, VARIANT_QUALITY};
use super::resize::scale_to_width;

/// One rendered rung: rung name plus encoded bytes.
#[derive(Debug)]
pub struct RenderedVariant {
    pub name: VariantName,
    pub data: Vec<u8>,
}

/// All rungs rendered from one source image, plus the source dimensions
/// captured from the single decode.
#[derive(Debug)]
pub struct RenderedLadder {
    pub width: u32,
    pub height: u32,
    pub variants: Vec<RenderedVariant>,
}

/// Decode a source image once and render the full ladder from it.
///
/// Decode and encodes are CPU-bound and run on blocking threads; rung
/// encodes run in parallel but every one is awaited before this returns, so
/// nothing downstream can observe a partial ladder. Any decode or encode
/// failure aborts the whole ladder.
pub async fn render_ladder(data: Vec<u8>) -> Result<RenderedLadder> {
    let img = tokio::task::spawn_blocking(move || {
        image::ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .context("Failed to sniff image format")?
            .decode()
            .context("Failed to decode image")
    })
    .await??;

    let (width, height) = img.dimensions();
    let img = Arc::new(img);

    let mut tasks = Vec::with_capacity(VariantName::LADDER.len());
    for name in VariantName::LADDER {
        let img = img.clone();
        tasks.push(tokio::task::spawn_blocking(move || {
            let resized = scale_to_width(&img, name.max_width());
            let data = encode_webp(&resized, VARIANT_QUALITY)
                .with_context(|| format!("Failed to encode {} variant", name))?;
            Ok::<RenderedVariant, anyhow::Error>(RenderedVariant { name, data })
        }));
    }

    let mut variants = Vec::with_capacity(tasks.len());
    for task in tasks {
        variants.push(task.await??);
    }

    Ok(RenderedLadder {
        width,
        height,
        variants,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([40, 90, 160])));
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Jpeg)
            .unwrap();
        buffer
    }

    fn decoded_width(data: &[u8]) -> u32 {
        image::ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .unwrap()
            .decode()
            .unwrap()
            .dimensions()
            .0
    }

    #[tokio::test]
    async fn test_ladder_renders_every_rung() {
        let ladder = render_ladder(jpeg_bytes(2000, 1500)).await.unwrap();

        assert_eq!(ladder.width, 2000);
        assert_eq!(ladder.height, 1500);
        assert_eq!(ladder.variants.len(), VariantName::LADDER.len());

        for variant in &ladder.variants {
            let width = decoded_width(&variant.data);
            assert_eq!(width, variant.name.max_width());
        }
    }

    #[tokio::test]
    async fn test_ladder_never_upscales() {
        let ladder = render_ladder(jpeg_bytes(500, 400)).await.unwrap();

        for variant in &ladder.variants {
            let width = decoded_width(&variant.data);
            assert!(width <= 500);
            assert!(width <= variant.name.max_width());
        }
    }

    #[tokio::test]
    async fn test_ladder_rejects_garbage() {
        let result = render_ladder(b"definitely not an image".to_vec()).await;
        assert!(result.is_err());
    }
}
