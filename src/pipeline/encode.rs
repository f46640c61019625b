use super::params::{OutputFormat, TransformParams};
use super::PipelineError;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::{ColorType, DynamicImage, ExtendedColorType, ImageEncoder, RgbImage, RgbaImage};
use rayon::prelude::*;
use std::io::Cursor;

/// Minimum pixel count before parallelizing the white-composite pass.
const PARALLEL_PIXEL_THRESHOLD: usize = 262_144; // 512x512

/// The sole pipeline output: encoded bytes plus the metadata the shell
/// needs to display or save them. Ownership transfers to the caller.
#[derive(Debug, Clone)]
pub struct EncodedArtifact {
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
    pub file_name: String,
}

impl EncodedArtifact {
    pub const fn byte_len(&self) -> usize {
        self.bytes.len()
    }
}

/// Encode a resized raster according to the target format and quality.
///
/// PNG is lossless and keeps the raster's channel layout and sample depth,
/// 16-bit included; the quality value is ignored entirely. JPEG cannot
/// carry alpha, so rasters with an alpha or luminance-alpha channel are
/// composited onto an opaque white canvas first, using alpha as the blend
/// mask.
pub fn encode(resized: &DynamicImage, params: &TransformParams) -> Result<EncodedArtifact, PipelineError> {
    let mut bytes = Vec::new();
    match params.format {
        OutputFormat::Png => {
            let encoder = PngEncoder::new_with_quality(
                Cursor::new(&mut bytes),
                CompressionType::Best,
                PngFilter::Adaptive,
            );
            let color = resized.color();
            match color {
                ColorType::L8
                | ColorType::La8
                | ColorType::Rgb8
                | ColorType::Rgba8
                | ColorType::L16
                | ColorType::La16
                | ColorType::Rgb16
                | ColorType::Rgba16 => {
                    encoder
                        .write_image(
                            resized.as_bytes(),
                            resized.width(),
                            resized.height(),
                            color.into(),
                        )
                        .map_err(PipelineError::Encode)?;
                }
                // Float rasters have no PNG representation; quantize.
                _ => {
                    let rgba = resized.to_rgba8();
                    let (width, height) = rgba.dimensions();
                    encoder
                        .write_image(rgba.as_raw(), width, height, ExtendedColorType::Rgba8)
                        .map_err(PipelineError::Encode)?;
                }
            }
        }
        OutputFormat::Jpeg => {
            let rgb = if resized.color().has_alpha() {
                flatten_alpha_onto_white(&resized.to_rgba8())
            } else {
                resized.to_rgb8()
            };
            let (width, height) = rgb.dimensions();
            let mut encoder = JpegEncoder::new_with_quality(Cursor::new(&mut bytes), params.quality);
            encoder
                .encode(rgb.as_raw(), width, height, ExtendedColorType::Rgb8)
                .map_err(PipelineError::Encode)?;
        }
    }
    Ok(EncodedArtifact {
        bytes,
        mime_type: params.format.mime_type(),
        file_name: params.artifact_file_name(),
    })
}

/// Composite an RGBA raster onto an opaque white background.
///
/// Standard source-over blend against white with integer rounding:
/// fully transparent pixels come out exactly (255, 255, 255).
pub fn flatten_alpha_onto_white(rgba: &RgbaImage) -> RgbImage {
    let (width, height) = rgba.dimensions();
    let total_pixels = (width as usize) * (height as usize);
    let src = rgba.as_raw();
    let composite = |idx: usize| -> [u8; 3] {
        let px = &src[idx * 4..idx * 4 + 4];
        let alpha = u32::from(px[3]);
        let inverse = 255 - alpha;
        let blend = |channel: u8| {
            #[allow(clippy::cast_possible_truncation)]
            {
                ((u32::from(channel) * alpha + 255 * inverse + 127) / 255) as u8
            }
        };
        [blend(px[0]), blend(px[1]), blend(px[2])]
    };
    let pixels: Vec<u8> = if total_pixels >= PARALLEL_PIXEL_THRESHOLD {
        (0..total_pixels)
            .into_par_iter()
            .flat_map_iter(composite)
            .collect()
    } else {
        let mut out = Vec::with_capacity(total_pixels * 3);
        for idx in 0..total_pixels {
            out.extend_from_slice(&composite(idx));
        }
        out
    };
    RgbImage::from_raw(width, height, pixels).expect("composite buffer matches raster dimensions")
}
