use super::PipelineError;
use serde::{Deserialize, Serialize};

/// Lowest JPEG quality the encoder accepts from the UI or config.
pub const QUALITY_MIN: u8 = 10;
/// Highest JPEG quality.
pub const QUALITY_MAX: u8 = 100;

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;
pub const DEFAULT_QUALITY: u8 = 85;

/// Output encoding for the exported artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Jpeg,
    Png,
}

impl OutputFormat {
    pub const ALL: [Self; 2] = [Self::Jpeg, Self::Png];

    /// Human-readable label for UI display.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Jpeg => "JPEG",
            Self::Png => "PNG",
        }
    }

    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }

    pub const fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
        }
    }

    /// Whether the quality parameter has any effect on the encoded output.
    pub const fn is_lossy(self) -> bool {
        matches!(self, Self::Jpeg)
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Jpeg
    }
}

/// Target dimensions, quality, and format for one pipeline invocation.
///
/// Immutable once handed to the pipeline; the target width/height are
/// applied exactly as given with no aspect-ratio correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformParams {
    pub width: u32,
    pub height: u32,
    pub quality: u8,
    pub format: OutputFormat,
}

impl TransformParams {
    /// Reject out-of-range parameters before any pipeline work starts.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.width == 0 {
            return Err(PipelineError::InvalidParameter(
                "target width must be at least 1 pixel".to_string(),
            ));
        }
        if self.height == 0 {
            return Err(PipelineError::InvalidParameter(
                "target height must be at least 1 pixel".to_string(),
            ));
        }
        if !(QUALITY_MIN..=QUALITY_MAX).contains(&self.quality) {
            return Err(PipelineError::InvalidParameter(format!(
                "quality {} outside supported range {QUALITY_MIN}..={QUALITY_MAX}",
                self.quality
            )));
        }
        Ok(())
    }

    /// Suggested file name for the artifact, e.g. `resized_800x600.jpg`.
    pub fn artifact_file_name(&self) -> String {
        format!(
            "resized_{}x{}.{}",
            self.width,
            self.height,
            self.format.extension()
        )
    }
}

impl Default for TransformParams {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            quality: DEFAULT_QUALITY,
            format: OutputFormat::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn params(width: u32, height: u32, quality: u8) -> TransformParams {
        TransformParams {
            width,
            height,
            quality,
            format: OutputFormat::Jpeg,
        }
    }

    #[test]
    fn default_params_are_valid() {
        assert!(TransformParams::default().validate().is_ok());
    }

    #[test]
    fn zero_width_rejected() {
        let err = params(0, 600, 85).validate().unwrap_err();
        assert!(matches!(err, PipelineError::InvalidParameter(_)));
    }

    #[test]
    fn zero_height_rejected() {
        let err = params(800, 0, 85).validate().unwrap_err();
        assert!(matches!(err, PipelineError::InvalidParameter(_)));
    }

    #[test]
    fn quality_just_outside_range_rejected() {
        assert!(params(800, 600, QUALITY_MIN - 1).validate().is_err());
        assert!(params(800, 600, 0).validate().is_err());
        assert!(matches!(
            params(800, 600, QUALITY_MAX + 1).validate(),
            Err(PipelineError::InvalidParameter(_))
        ));
    }

    #[test]
    fn quality_bounds_accepted() {
        assert!(params(1, 1, QUALITY_MIN).validate().is_ok());
        assert!(params(1, 1, QUALITY_MAX).validate().is_ok());
    }

    #[test]
    fn artifact_file_name_embeds_dimensions() {
        assert_eq!(params(800, 600, 85).artifact_file_name(), "resized_800x600.jpg");
        let png = TransformParams {
            format: OutputFormat::Png,
            ..params(32, 48, 85)
        };
        assert_eq!(png.artifact_file_name(), "resized_32x48.png");
    }
}
