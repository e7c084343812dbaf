//! # LSB Embedding
//!
//! Writes a bit sequence into the least significant bits of a pixel buffer.
//!
//! ## Algorithm
//!
//! For each bit index `i` in `0..bits.len()`:
//! 1. Clear the LSB of sample `i` (`& 0xFE`)
//! 2. Set it to bit `i` (`| bit`)
//!
//! Samples are visited in buffer order (row-major, channel-interleaved), one
//! bit per sample. Samples past `bits.len()` are never touched, and each
//! touched sample changes by at most 1.
//!
//! ### Capacity
//! A buffer of `n` samples holds `n` bits. The check runs before the first
//! write, so an oversized payload leaves the buffer untouched.

use log::debug;

use super::pixels::PixelBuffer;
use super::progress::Progress;
use crate::codec::bits::BitSequence;
use crate::common::error::{Result, StegoError};

/// Embed `bits` into the low bits of `buffer` and return the modified buffer.
///
/// # Errors
/// - [`StegoError::Capacity`] if `bits` is longer than the buffer
/// - [`StegoError::Cancelled`] if the progress cancel flag is raised; the
///   partially written buffer is dropped
///
/// # Example
/// ```ignore
/// let bits = payload.to_bits();
/// let stego = embed(buffer, &bits, &mut Progress::silent())?;
/// ```
pub fn embed(mut buffer: PixelBuffer, bits: &BitSequence, progress: &mut Progress<'_>) -> Result<PixelBuffer> {
    let total = bits.len();
    if total > buffer.len() {
        return Err(StegoError::Capacity {
            required: total,
            available: buffer.len(),
        });
    }

    debug!("embedding {} bits into {} samples", total, buffer.len());

    let samples = buffer.as_bytes_mut();
    for (i, bit) in bits.iter().enumerate() {
        progress.tick(i, total)?;
        samples[i] = (samples[i] & 0xFE) | (bit & 1);
    }
    progress.finish(total);

    Ok(buffer)
}
