//! # Error Types
//!
//! Every fallible operation in the library returns [`StegoError`]. The
//! variants map one-to-one onto the failure outcomes of a hide or reveal:
//!
//! - carrier too small ([`StegoError::Capacity`])
//! - header unbuildable or unparseable ([`StegoError::Header`],
//!   [`StegoError::CorruptHeader`])
//! - wrong passcode ([`StegoError::Authentication`])
//! - buffer/header mismatch ([`StegoError::Extraction`])
//! - image and file I/O at the codec boundary
//!
//! [`MetadataUnavailable`] is deliberately *not* a `StegoError` variant: it is
//! the only non-fatal outcome and travels inside a successful reveal.

use thiserror::Error;

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, StegoError>;

/// Errors that can occur while hiding or revealing a message.
#[derive(Debug, Error)]
pub enum StegoError {
    /// The payload needs more bits than the carrier has elements.
    /// Always raised before the pixel buffer is modified.
    #[error("message too large for this image: payload needs {required} bits, carrier holds {available}")]
    Capacity { required: usize, available: usize },

    /// A header could not be built from the given lengths.
    #[error("cannot build header: {0}")]
    Header(HeaderError),

    /// The leading 24 characters of the carrier are not a valid header.
    /// Usually means the image was never used as a carrier.
    #[error("invalid or corrupted header: {0}")]
    CorruptHeader(HeaderError),

    /// The supplied passcode does not match the embedded one.
    #[error("incorrect passcode")]
    Authentication,

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    /// Cooperative cancellation was requested mid-operation.
    #[error("operation cancelled")]
    Cancelled,

    /// A required text input was empty.
    #[error("{0} must not be empty")]
    EmptyInput(&'static str),

    /// Pixel data length disagrees with the declared dimensions.
    #[error("pixel data has {actual} bytes, expected {expected} for {width}x{height}x{channels}")]
    BufferShape {
        width: u32,
        height: u32,
        channels: u8,
        expected: usize,
        actual: usize,
    },

    /// The output path does not name a lossless format this crate writes.
    #[error("unsupported output format '{0}': carriers must be saved as PNG")]
    UnsupportedFormat(String),

    /// PNG compression level outside 0..=9.
    #[error("compression level {0} out of range (0-9)")]
    InvalidCompression(u8),

    #[error("metadata serialization failed: {0}")]
    Metadata(#[from] serde_json::Error),

    #[error("image codec error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Header build/parse failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    #[error("{field} length {value} exceeds the 8-digit limit")]
    FieldTooLarge { field: &'static str, value: usize },

    #[error("{0}")]
    Malformed(String),
}

/// Bit extraction failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    /// More bits were requested than the buffer has elements.
    #[error("requested {requested} bits but the carrier only has {available} samples")]
    OutOfRange { requested: usize, available: usize },
}

/// Non-fatal marker: the metadata block could not be parsed.
///
/// The message is still returned when this happens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("metadata unavailable or corrupted: {reason}")]
pub struct MetadataUnavailable {
    pub reason: String,
}
