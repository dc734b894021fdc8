use image::{imageops::FilterType, DynamicImage, GenericImageView};

/// Select appropriate filter type based on resize ratio
pub fn select_filter(orig_width: u32, orig_height: u32, new_width: u32, new_height: u32) -> FilterType {
    let width_ratio = orig_width as f32 / new_width as f32;
    let height_ratio = orig_height as f32 / new_height as f32;
    let max_ratio = width_ratio.max(height_ratio);

    if max_ratio > 2.0 {
        FilterType::Triangle
    } else if max_ratio > 1.5 {
        FilterType::CatmullRom
    } else {
        FilterType::Lanczos3
    }
}

/// Scale an image down to at most `max_width` pixels wide, preserving the
/// aspect ratio. Sources already within the ceiling are returned unchanged;
/// upscaling never happens.
pub fn scale_to_width(img: &DynamicImage, max_width: u32) -> DynamicImage {
    let (orig_width, orig_height) = img.dimensions();

    if orig_width <= max_width {
        return img.clone();
    }

    let aspect_ratio = orig_height as f32 / orig_width as f32;
    let target_height = ((max_width as f32 * aspect_ratio).round() as u32).max(1);
    let filter = select_filter(orig_width, orig_height, max_width, target_height);

    img.resize_exact(max_width, target_height, filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn test_image(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba([255, 0, 0, 255])))
    }

    #[test]
    fn test_scale_down_preserves_aspect() {
        let img = test_image(2000, 1500);
        let scaled = scale_to_width(&img, 1600);
        assert_eq!(scaled.dimensions(), (1600, 1200));
    }

    #[test]
    fn test_no_upscaling() {
        let img = test_image(100, 80);
        let scaled = scale_to_width(&img, 320);
        assert_eq!(scaled.dimensions(), (100, 80));
    }

    #[test]
    fn test_exact_width_untouched() {
        let img = test_image(320, 200);
        let scaled = scale_to_width(&img, 320);
        assert_eq!(scaled.dimensions(), (320, 200));
    }

    #[test]
    fn test_extreme_aspect_keeps_min_height() {
        let img = test_image(4000, 2);
        let scaled = scale_to_width(&img, 320);
        assert_eq!(scaled.dimensions().0, 320);
        assert!(scaled.dimensions().1 >= 1);
    }

    #[test]
    fn test_filter_selection_thresholds() {
        assert_eq!(select_filter(1000, 1000, 400, 400), FilterType::Triangle);
        assert_eq!(select_filter(1000, 1000, 600, 600), FilterType::CatmullRom);
        assert_eq!(select_filter(1000, 1000, 900, 900), FilterType::Lanczos3);
    }
}
