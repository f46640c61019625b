use image::DynamicImage;
use image::imageops::FilterType;

/// Resample a raster to exactly `width` x `height` with Lanczos3 filtering.
///
/// The target dimensions are applied as given; proportions are allowed to
/// distort. This free-form stretch is intentional, so `resize_exact` is
/// used rather than the aspect-preserving `resize`.
pub fn resample(source: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    source.resize_exact(width, height, FilterType::Lanczos3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn gradient_rgba(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x % 256) as u8, (y % 256) as u8, 90, 255])
        }))
    }

    #[test]
    fn output_has_exactly_requested_dimensions() {
        let source = gradient_rgba(64, 48);
        for (w, h) in [(1, 1), (3, 97), (64, 48), (130, 20)] {
            let resized = resample(&source, w, h);
            assert_eq!(resized.width(), w);
            assert_eq!(resized.height(), h);
        }
    }

    #[test]
    fn stretch_is_not_aspect_corrected() {
        // A 40x40 source pushed to 80x10 must come out 80x10, not letterboxed.
        let resized = resample(&gradient_rgba(40, 40), 80, 10);
        assert_eq!((resized.width(), resized.height()), (80, 10));
    }

    #[test]
    fn color_mode_survives_resampling() {
        let rgb = DynamicImage::new_rgb8(20, 20);
        assert!(!resample(&rgb, 10, 10).color().has_alpha());
        let rgba = gradient_rgba(20, 20);
        assert!(resample(&rgba, 10, 10).color().has_alpha());
    }
}
