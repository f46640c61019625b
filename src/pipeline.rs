//! The image transform pipeline: decode -> resample -> encode.
//!
//! Stateless and synchronous; one invocation owns its buffers and every
//! error is terminal for that invocation. The UI shell decides when to
//! invoke it and what to do with the artifact.

mod decode;
mod encode;
mod error;
mod params;
mod resample;

pub use decode::{ColorMode, SourceImage, decode_from_bytes, decode_from_path};
pub use encode::{EncodedArtifact, encode, flatten_alpha_onto_white};
pub use error::PipelineError;
pub use params::{
    DEFAULT_HEIGHT, DEFAULT_QUALITY, DEFAULT_WIDTH, OutputFormat, QUALITY_MAX, QUALITY_MIN,
    TransformParams,
};
pub use resample::resample;

use crate::config::ImageLimits;

/// Run the whole pipeline on raw bytes:
/// `encode(resample(decode(bytes), w, h), format, quality)`.
///
/// Deterministic for identical inputs; parameters are validated before
/// any decoding starts.
pub fn transform(
    limits: &ImageLimits,
    bytes: Vec<u8>,
    params: &TransformParams,
) -> Result<EncodedArtifact, PipelineError> {
    params.validate()?;
    let source = decode_from_bytes(limits, bytes)?;
    transform_decoded(&source, params)
}

/// Resample and encode an already-decoded raster.
///
/// The shell uses this for exports so the image is not decoded twice.
pub fn transform_decoded(
    source: &SourceImage,
    params: &TransformParams,
) -> Result<EncodedArtifact, PipelineError> {
    params.validate()?;
    let resized = resample(source.image(), params.width, params.height);
    encode(&resized, params)
}

#[cfg(test)]
mod tests;
