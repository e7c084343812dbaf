//! # Image Processing and Steganography
//!
//! Sample-level LSB embedding and extraction, plus the boundary to image files.
//!
//! - [`pixels`]: flat sample buffer with known dimensions
//! - [`embed`]: write bits into sample LSBs
//! - [`extract`]: read bits back from sample LSBs
//! - [`progress`]: progress callback and cooperative cancellation
//! - [`image_io`]: lossless PNG codec backed by the `image` crate

pub mod embed;
pub mod extract;
pub mod image_io;
pub mod pixels;
pub mod progress;

// Re-export main types for convenience
pub use embed::embed;
pub use extract::extract;
pub use image_io::{ChannelOrder, LosslessCodec};
pub use pixels::PixelBuffer;
pub use progress::Progress;
