use thiserror::Error;

/// Everything that can go wrong inside one pipeline invocation.
///
/// Every variant is terminal for the invocation: no retries, no partial
/// output. The shell turns the message into a status-bar line and waits
/// for corrected input.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The input bytes were not a recognizable image in a supported format.
    #[error("unable to read image: {0}")]
    Decode(#[source] image::ImageError),

    /// Color-mode conversion or the codec write failed.
    #[error("failed to encode image: {0}")]
    Encode(#[source] image::ImageError),

    /// Width/height/quality outside the supported range; rejected before
    /// any decoding or resampling happens.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}
