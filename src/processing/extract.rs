//! # LSB Extraction
//!
//! Reads back the least significant bit of the first `n` samples of a pixel
//! buffer. Extraction never mutates the buffer, so callers read the header
//! prefix first and then re-read a longer prefix once the lengths are known.

use super::pixels::PixelBuffer;
use super::progress::Progress;
use crate::codec::bits::BitSequence;
use crate::common::error::{ExtractionError, Result};

/// Return the LSBs of the first `n` samples of `buffer`, in order.
///
/// # Errors
/// - [`ExtractionError::OutOfRange`] if `n` exceeds the sample count
/// - [`crate::StegoError::Cancelled`] if the cancel flag is raised
pub fn extract(buffer: &PixelBuffer, n: usize, progress: &mut Progress<'_>) -> Result<BitSequence> {
    if n > buffer.len() {
        return Err(ExtractionError::OutOfRange {
            requested: n,
            available: buffer.len(),
        }
        .into());
    }

    let mut bits = BitSequence::with_capacity(n);
    for (i, &sample) in buffer.as_bytes()[..n].iter().enumerate() {
        progress.tick(i, n)?;
        bits.push(sample & 1);
    }
    progress.finish(n);

    Ok(bits)
}
