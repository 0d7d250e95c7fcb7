//! Error types for the steganography core.

use thiserror::Error;

/// Result type alias for encoder operations.
pub type Result<T> = std::result::Result<T, StegoError>;

/// Errors raised while embedding a message.
///
/// Decoding never fails, so this only covers the encoder.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StegoError {
    /// The message needs more carrier bytes than the image has after its header.
    #[error(
        "image is not large enough to hold this message: need {required} carrier bytes but only {available} available"
    )]
    CapacityExceeded { required: usize, available: usize },
}
