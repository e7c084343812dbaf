//! # Bit Codec
//!
//! Converts text to and from a flat sequence of single-bit values.
//!
//! Every character occupies exactly 8 bits, most-significant bit first.
//! Only the low 8 bits of each code point are kept, so text is effectively
//! Latin-1: U+0000..=U+00FF round-trip, anything above loses its high bits.

use std::ops::Index;

/// Ordered sequence of bit values, each stored as a `u8` that is 0 or 1.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitSequence {
    bits: Vec<u8>,
}

impl BitSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: Vec::with_capacity(capacity),
        }
    }

    /// Append one bit. Only the lowest bit of `bit` is kept.
    pub fn push(&mut self, bit: u8) {
        self.bits.push(bit & 1);
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bits
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.bits.iter().copied()
    }
}

impl Index<usize> for BitSequence {
    type Output = u8;

    fn index(&self, index: usize) -> &u8 {
        &self.bits[index]
    }
}

impl FromIterator<u8> for BitSequence {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        Self {
            bits: iter.into_iter().map(|b| b & 1).collect(),
        }
    }
}

impl From<Vec<u8>> for BitSequence {
    fn from(bits: Vec<u8>) -> Self {
        bits.into_iter().collect()
    }
}

/// Number of characters in `text`. All length fields count characters,
/// not UTF-8 bytes.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Encode `text` as 8 bits per character, MSB first.
pub fn encode(text: &str) -> BitSequence {
    let mut bits = BitSequence::with_capacity(char_len(text) * 8);
    for ch in text.chars() {
        let byte = (ch as u32 & 0xFF) as u8;
        for shift in (0..8).rev() {
            bits.push((byte >> shift) & 1);
        }
    }
    bits
}

/// Decode groups of 8 bits back into characters.
///
/// Each byte maps to the character with the same code (U+0000..=U+00FF).
/// A trailing group shorter than 8 bits is ignored.
pub fn decode(bits: &BitSequence) -> String {
    bits.as_slice()
        .chunks_exact(8)
        .map(|group| {
            let byte = group.iter().fold(0u8, |acc, &bit| (acc << 1) | (bit & 1));
            char::from(byte)
        })
        .collect()
}
