use super::PixpressApp;
use crate::config::ImageLimits;
use crate::image_info::{ImageMeta, human_readable_bytes};
use crate::pipeline::SourceImage;
use arboard::{Clipboard, Error as ClipboardError};
use egui::Context;
use image::{DynamicImage, RgbaImage};

impl PixpressApp {
    pub(crate) fn paste_image_from_clipboard(&mut self, ctx: &Context) {
        self.pending_image_task = None;
        let limits = self.config.effective_image_limits();
        match capture_clipboard_image(&limits) {
            Ok((source, byte_len)) => {
                let meta = ImageMeta::from_clipboard(u64::try_from(byte_len).ok());
                let name = meta.display_name();
                self.set_loaded_source(ctx, source, Some(meta));
                self.set_status(format!("Loaded {name}"));
            }
            Err(err) => self.set_status(err),
        }
    }
}

fn capture_clipboard_image(limits: &ImageLimits) -> Result<(SourceImage, usize), String> {
    let mut clipboard = Clipboard::new().map_err(describe_clipboard_error)?;
    let data = clipboard.get_image().map_err(describe_clipboard_error)?;
    let (width, height, expected_len) = admit_capture(limits, data.width, data.height)?;
    let mut bytes = data.bytes.into_owned();
    if bytes.len() < expected_len {
        return Err(
            "Paste failed: the clipboard delivered fewer bytes than its reported size."
                .to_string(),
        );
    }
    bytes.truncate(expected_len);
    let raster = RgbaImage::from_raw(width, height, bytes)
        .ok_or_else(|| "Paste failed: the clipboard pixel data is malformed.".to_string())?;
    Ok((
        SourceImage::new(DynamicImage::ImageRgba8(raster)),
        expected_len,
    ))
}

/// Check a reported capture size against the configured decode limits and
/// return the RGBA buffer length a well-formed capture must have.
fn admit_capture(
    limits: &ImageLimits,
    width: usize,
    height: usize,
) -> Result<(u32, u32, usize), String> {
    if width == 0 || height == 0 {
        return Err("Paste failed: the clipboard holds an empty image.".to_string());
    }
    let w = u32::try_from(width).unwrap_or(u32::MAX);
    let h = u32::try_from(height).unwrap_or(u32::MAX);
    if w > limits.image_dim || h > limits.image_dim {
        return Err(format!(
            "Paste failed: {width}x{height} is over the {} px per-side limit.",
            limits.image_dim
        ));
    }
    let total_pixels = u64::from(w) * u64::from(h);
    if total_pixels > limits.total_pixels {
        return Err(format!(
            "Paste failed: {width}x{height} is ~{} MP, over the ~{} MP budget.",
            total_pixels / 1_000_000,
            limits.total_pixels / 1_000_000
        ));
    }
    let rgba_bytes = total_pixels.saturating_mul(4);
    if rgba_bytes > limits.alloc_bytes {
        return Err(format!(
            "Paste failed: needs {} of RGBA data, over the {} allocation cap.",
            human_readable_bytes(rgba_bytes),
            human_readable_bytes(limits.alloc_bytes)
        ));
    }
    usize::try_from(rgba_bytes)
        .map(|len| (w, h, len))
        .map_err(|_| "Paste failed: the clipboard image does not fit in memory.".to_string())
}

fn describe_clipboard_error(err: ClipboardError) -> String {
    let detail = match err {
        ClipboardError::ContentNotAvailable => "no image on the clipboard".to_string(),
        ClipboardError::ClipboardNotSupported => {
            "clipboard access is unavailable in this environment".to_string()
        }
        ClipboardError::ClipboardOccupied => "the clipboard is busy, try again shortly".to_string(),
        ClipboardError::ConversionFailure => {
            "the clipboard content could not be converted to pixels".to_string()
        }
        ClipboardError::Unknown { description } => description,
        other => other.to_string(),
    };
    format!("Paste failed: {detail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> ImageLimits {
        ImageLimits {
            image_dim: 100,
            total_pixels: 5_000,
            alloc_bytes: 16_000,
        }
    }

    #[test]
    fn empty_capture_is_rejected() {
        assert!(admit_capture(&limits(), 0, 10).is_err());
        assert!(admit_capture(&limits(), 10, 0).is_err());
    }

    #[test]
    fn per_side_limit_applies_to_captures() {
        let err = admit_capture(&limits(), 101, 10).unwrap_err();
        assert!(err.contains("per-side"));
    }

    #[test]
    fn pixel_budget_applies_to_captures() {
        let err = admit_capture(&limits(), 90, 90).unwrap_err();
        assert!(err.contains("budget"));
    }

    #[test]
    fn allocation_cap_applies_to_captures() {
        let roomy = ImageLimits {
            image_dim: 100,
            total_pixels: 1_000_000,
            alloc_bytes: 1_000,
        };
        let err = admit_capture(&roomy, 50, 50).unwrap_err();
        assert!(err.contains("RGBA"));
    }

    #[test]
    fn admitted_capture_reports_rgba_len() {
        let (w, h, len) = admit_capture(&limits(), 20, 30).unwrap();
        assert_eq!((w, h, len), (20, 30, 20 * 30 * 4));
    }
}
