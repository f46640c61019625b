use super::PipelineError;
use crate::config::ImageLimits;
use image::error::{LimitError, LimitErrorKind};
use image::{DynamicImage, ImageReader, Limits};
use std::io::{BufRead, Cursor, Read, Seek};
use std::path::Path;

/// Channel layout of a decoded raster, reduced to the cases the encoder
/// cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Grayscale,
    GrayscaleAlpha,
    Rgb,
    Rgba,
}

impl ColorMode {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Grayscale => "Grayscale",
            Self::GrayscaleAlpha => "Grayscale + alpha",
            Self::Rgb => "RGB",
            Self::Rgba => "RGBA",
        }
    }

    pub const fn has_alpha(self) -> bool {
        matches!(self, Self::GrayscaleAlpha | Self::Rgba)
    }
}

/// A decoded raster plus the attributes the rest of the pipeline reads.
///
/// Owned by a single invocation (or one UI session); dropping it releases
/// the pixel buffer.
pub struct SourceImage {
    image: DynamicImage,
}

impl SourceImage {
    pub const fn new(image: DynamicImage) -> Self {
        Self { image }
    }

    pub const fn image(&self) -> &DynamicImage {
        &self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn color_mode(&self) -> ColorMode {
        color_mode_of(&self.image)
    }
}

pub(crate) fn color_mode_of(image: &DynamicImage) -> ColorMode {
    let color = image.color();
    if color.has_alpha() {
        if color.has_color() {
            ColorMode::Rgba
        } else {
            ColorMode::GrayscaleAlpha
        }
    } else if color.has_color() {
        ColorMode::Rgb
    } else {
        ColorMode::Grayscale
    }
}

fn decode_reader<R>(limits: &ImageLimits, mut reader: ImageReader<R>) -> Result<SourceImage, PipelineError>
where
    R: Read + Seek + BufRead,
{
    let mut decoder_limits = Limits::default();
    decoder_limits.max_image_width = Some(limits.image_dim);
    decoder_limits.max_image_height = Some(limits.image_dim);
    decoder_limits.max_alloc = Some(limits.alloc_bytes);
    reader.limits(decoder_limits);
    let image = reader.decode().map_err(PipelineError::Decode)?;
    // Per-side and allocation ceilings are enforced by the decoder; the
    // pixel budget has no `Limits` field and is checked afterwards.
    let total_pixels = u64::from(image.width()) * u64::from(image.height());
    if total_pixels > limits.total_pixels {
        return Err(PipelineError::Decode(image::ImageError::Limits(
            LimitError::from_kind(LimitErrorKind::DimensionError),
        )));
    }
    Ok(SourceImage::new(image))
}

/// Decode an in-memory byte stream into a raster, enforcing size limits.
pub fn decode_from_bytes(limits: &ImageLimits, bytes: Vec<u8>) -> Result<SourceImage, PipelineError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|err| PipelineError::Decode(image::ImageError::IoError(err)))?;
    decode_reader(limits, reader)
}

/// Decode an image file from disk, enforcing size limits.
pub fn decode_from_path(limits: &ImageLimits, path: &Path) -> Result<SourceImage, PipelineError> {
    let reader = ImageReader::open(path)
        .and_then(ImageReader::with_guessed_format)
        .map_err(|err| PipelineError::Decode(image::ImageError::IoError(err)))?;
    decode_reader(limits, reader)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageEncoder, RgbaImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_fn(width, height, |x, y| {
            image::Rgba([(x % 256) as u8, (y % 256) as u8, 60, 255])
        });
        let mut bytes = Vec::new();
        image::codecs::png::PngEncoder::new(Cursor::new(&mut bytes))
            .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgba8)
            .unwrap();
        bytes
    }

    #[test]
    fn decodes_png_bytes_with_dimensions() {
        let source = decode_from_bytes(&ImageLimits::default(), png_bytes(12, 7)).unwrap();
        assert_eq!(source.width(), 12);
        assert_eq!(source.height(), 7);
        assert_eq!(source.color_mode(), ColorMode::Rgba);
    }

    #[test]
    fn garbage_bytes_are_a_decode_error() {
        let result = decode_from_bytes(&ImageLimits::default(), vec![0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(PipelineError::Decode(_))));
    }

    #[test]
    fn per_side_limit_rejects_oversized_image() {
        let limits = ImageLimits {
            image_dim: 8,
            ..ImageLimits::default()
        };
        let result = decode_from_bytes(&limits, png_bytes(300, 10));
        assert!(matches!(result, Err(PipelineError::Decode(_))));
    }

    #[test]
    fn pixel_budget_rejects_decoded_image() {
        // 1500x1000 is inside the per-side and allocation ceilings but over
        // a 1 MP total budget.
        let limits = ImageLimits {
            total_pixels: 1_000_000,
            ..ImageLimits::default()
        };
        let result = decode_from_bytes(&limits, png_bytes(1500, 1000));
        assert!(matches!(result, Err(PipelineError::Decode(_))));
        assert!(decode_from_bytes(&limits, png_bytes(1000, 1000)).is_ok());
    }

    #[test]
    fn color_mode_classifies_channel_layouts() {
        use image::DynamicImage;
        let rgb = DynamicImage::new_rgb8(2, 2);
        let gray = DynamicImage::new_luma8(2, 2);
        let gray_alpha = DynamicImage::new_luma_a8(2, 2);
        assert_eq!(color_mode_of(&rgb), ColorMode::Rgb);
        assert!(!color_mode_of(&rgb).has_alpha());
        assert_eq!(color_mode_of(&gray), ColorMode::Grayscale);
        assert_eq!(color_mode_of(&gray_alpha), ColorMode::GrayscaleAlpha);
        assert!(color_mode_of(&gray_alpha).has_alpha());
    }
}
