//! # Header Codec
//!
//! The header is the first 24 characters of every payload: three
//! zero-padded 8-digit decimal fields, in this order:
//!
//! ```text
//! [8 digits] metadata_length
//! [8 digits] passcode_length
//! [8 digits] message_length
//! ```
//!
//! All lengths count characters. A header that fails to parse is the main
//! signal that an image is not a carrier at all.

use std::fmt;

use crate::common::error::HeaderError;

/// Header length in characters.
pub const HEADER_LEN: usize = 24;

/// Width of each decimal field.
pub const FIELD_WIDTH: usize = 8;

/// Largest value that fits in an 8-digit field.
pub const MAX_FIELD_VALUE: usize = 99_999_999;

/// Header length in bits, i.e. how many carrier samples it occupies.
pub const HEADER_BITS: usize = HEADER_LEN * 8;

const FIELD_NAMES: [&str; 3] = ["metadata", "passcode", "message"];

/// The three lengths carried by a header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderLengths {
    pub metadata_len: usize,
    pub passcode_len: usize,
    pub message_len: usize,
}

impl HeaderLengths {
    /// Total payload length in characters, header included.
    ///
    /// Returns `None` on overflow, which only a hand-crafted header on a
    /// 32-bit target could trigger.
    pub fn payload_len(&self) -> Option<usize> {
        HEADER_LEN
            .checked_add(self.metadata_len)?
            .checked_add(self.passcode_len)?
            .checked_add(self.message_len)
    }
}

/// A validated 24-digit header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header(String);

impl Header {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Build a header from the three lengths.
pub fn build(
    metadata_len: usize,
    passcode_len: usize,
    message_len: usize,
) -> Result<Header, HeaderError> {
    let values = [metadata_len, passcode_len, message_len];
    let mut text = String::with_capacity(HEADER_LEN);
    for (&field, value) in FIELD_NAMES.iter().zip(values) {
        if value > MAX_FIELD_VALUE {
            return Err(HeaderError::FieldTooLarge { field, value });
        }
        text.push_str(&format!("{:0width$}", value, width = FIELD_WIDTH));
    }
    Ok(Header(text))
}

/// Parse a 24-character header back into its three lengths.
pub fn parse(header_text: &str) -> Result<HeaderLengths, HeaderError> {
    let chars: Vec<char> = header_text.chars().collect();
    if chars.len() != HEADER_LEN {
        return Err(HeaderError::Malformed(format!(
            "expected {} characters, found {}",
            HEADER_LEN,
            chars.len()
        )));
    }

    let mut values = [0usize; 3];
    for (i, field) in chars.chunks_exact(FIELD_WIDTH).enumerate() {
        values[i] = parse_field(FIELD_NAMES[i], field)?;
    }

    Ok(HeaderLengths {
        metadata_len: values[0],
        passcode_len: values[1],
        message_len: values[2],
    })
}

fn parse_field(name: &str, field: &[char]) -> Result<usize, HeaderError> {
    field.iter().try_fold(0usize, |acc, &ch| match ch.to_digit(10) {
        Some(digit) => Ok(acc * 10 + digit as usize),
        None => Err(HeaderError::Malformed(format!(
            "{} length field is not decimal",
            name
        ))),
    })
}
