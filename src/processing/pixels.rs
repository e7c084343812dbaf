//! # Pixel Buffer
//!
//! Flat, row-major, channel-interleaved view over decoded image samples.
//! One element per channel sample, so an RGB image of `w x h` pixels has
//! `w * h * 3` elements. Each element can carry one payload bit.

use crate::common::error::{Result, StegoError};

/// Decoded pixel samples plus the dimensions needed to re-encode them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    channels: u8,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw samples, checking that the length matches the dimensions.
    pub fn new(width: u32, height: u32, channels: u8, data: Vec<u8>) -> Result<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(channels as usize));

        match expected {
            Some(expected) if expected == data.len() => Ok(Self {
                width,
                height,
                channels,
                data,
            }),
            _ => Err(StegoError::BufferShape {
                width,
                height,
                channels,
                expected: expected.unwrap_or(usize::MAX),
                actual: data.len(),
            }),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Number of samples, which is also the capacity in payload bits.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }
}
