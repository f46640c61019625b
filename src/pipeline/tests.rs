use super::*;
use crate::config::ImageLimits;
use image::{DynamicImage, ImageEncoder, Rgb, RgbImage, Rgba, RgbaImage};
use std::io::Cursor;

fn encode_png(image: &DynamicImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(Cursor::new(&mut bytes));
    if image.color().has_alpha() {
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        encoder
            .write_image(rgba.as_raw(), width, height, image::ExtendedColorType::Rgba8)
            .unwrap();
    } else {
        let rgb = image.to_rgb8();
        let (width, height) = rgb.dimensions();
        encoder
            .write_image(rgb.as_raw(), width, height, image::ExtendedColorType::Rgb8)
            .unwrap();
    }
    bytes
}

fn opaque_rgb_source(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 251) as u8, (y % 239) as u8, ((x ^ y) % 256) as u8])
    }))
}

#[test]
fn full_pipeline_hd_to_jpeg_scenario() {
    // 1920x1080 opaque RGB, 800x600, q85, JPEG.
    let bytes = encode_png(&opaque_rgb_source(1920, 1080));
    let params = TransformParams {
        width: 800,
        height: 600,
        quality: 85,
        format: OutputFormat::Jpeg,
    };
    let artifact = transform(&ImageLimits::default(), bytes, &params).unwrap();
    assert_eq!(artifact.mime_type, "image/jpeg");
    assert_eq!(artifact.file_name, "resized_800x600.jpg");
    let decoded = image::load_from_memory(&artifact.bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (800, 600));
    assert!(!decoded.color().has_alpha());
}

#[test]
fn transparent_rgba_to_jpeg_scenario() {
    // 500x500 fully transparent RGBA kept at 500x500: every pixel must
    // decode as pure white.
    let source = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
        500,
        500,
        Rgba([90, 10, 180, 0]),
    ));
    let params = TransformParams {
        width: 500,
        height: 500,
        quality: 85,
        format: OutputFormat::Jpeg,
    };
    let artifact = transform(&ImageLimits::default(), encode_png(&source), &params).unwrap();
    let decoded = image::load_from_memory(&artifact.bytes).unwrap().to_rgb8();
    assert!(decoded.pixels().all(|p| p.0 == [255, 255, 255]));
}

#[test]
fn invalid_parameters_fail_before_decoding() {
    // Garbage bytes never reach the decoder when validation fails first.
    let params = TransformParams {
        width: 0,
        height: 600,
        quality: 85,
        format: OutputFormat::Jpeg,
    };
    let result = transform(&ImageLimits::default(), vec![0xde, 0xad], &params);
    assert!(matches!(result, Err(PipelineError::InvalidParameter(_))));
}

#[test]
fn png_export_keeps_alpha_through_the_pipeline() {
    let source = DynamicImage::ImageRgba8(RgbaImage::from_fn(40, 40, |x, _| {
        Rgba([200, 120, 40, (x * 6 % 256) as u8])
    }));
    let params = TransformParams {
        width: 40,
        height: 40,
        quality: 85,
        format: OutputFormat::Png,
    };
    let artifact = transform(&ImageLimits::default(), encode_png(&source), &params).unwrap();
    assert_eq!(artifact.file_name, "resized_40x40.png");
    let decoded = image::load_from_memory(&artifact.bytes).unwrap();
    assert!(decoded.color().has_alpha());
    assert_eq!(decoded.to_rgba8().as_raw(), source.to_rgba8().as_raw());
}

#[test]
fn sixteen_bit_png_survives_the_pipeline() {
    let raster = image::ImageBuffer::from_pixel(4, 4, image::Rgb([257u16, 513, 40_000]));
    let source = SourceImage::new(DynamicImage::ImageRgb16(raster));
    let params = TransformParams {
        width: 4,
        height: 4,
        quality: 85,
        format: OutputFormat::Png,
    };
    let artifact = transform_decoded(&source, &params).unwrap();
    let decoded = image::load_from_memory(&artifact.bytes).unwrap();
    assert_eq!(decoded.color(), image::ColorType::Rgb16);
    assert_eq!(decoded.to_rgb16().as_raw(), source.image().to_rgb16().as_raw());
}

#[test]
fn transform_is_deterministic() {
    let bytes = encode_png(&opaque_rgb_source(64, 64));
    let params = TransformParams {
        width: 30,
        height: 50,
        quality: 70,
        format: OutputFormat::Jpeg,
    };
    let first = transform(&ImageLimits::default(), bytes.clone(), &params).unwrap();
    let second = transform(&ImageLimits::default(), bytes, &params).unwrap();
    assert_eq!(first.bytes, second.bytes);
}

#[test]
fn transform_decoded_matches_transform() {
    let image = opaque_rgb_source(48, 32);
    let params = TransformParams {
        width: 20,
        height: 20,
        quality: 85,
        format: OutputFormat::Jpeg,
    };
    let via_bytes =
        transform(&ImageLimits::default(), encode_png(&image), &params).unwrap();
    let source = SourceImage::new(image);
    let via_decoded = transform_decoded(&source, &params).unwrap();
    assert_eq!(via_bytes.bytes, via_decoded.bytes);
}
