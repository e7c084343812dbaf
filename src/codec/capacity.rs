//! Capacity arithmetic.
//!
//! One payload bit occupies one carrier sample, so a buffer of `n` samples
//! holds `n / 8` payload characters, header and metadata included.

use super::header::{HEADER_LEN, MAX_FIELD_VALUE};
use super::payload::Metadata;
use crate::common::error::Result;

/// Carrier samples needed for a payload of `payload_chars` characters.
pub fn required_bits(payload_chars: usize) -> usize {
    payload_chars * 8
}

/// Largest message, in characters, that fits once the metadata and
/// passcode lengths are known.
pub fn max_message_len(buffer_len: usize, metadata_len: usize, passcode_len: usize) -> usize {
    (buffer_len / 8).saturating_sub(HEADER_LEN + metadata_len + passcode_len)
}

/// Message capacity estimate before the message itself is known.
///
/// Uses the exact metadata size for `filename` with a worst-case 8-digit
/// message length, so the real capacity is never smaller than this.
pub fn estimate_max_message_len(
    buffer_len: usize,
    filename: &str,
    passcode_len: usize,
) -> Result<usize> {
    let worst_case = Metadata {
        timestamp: "0000-00-00T00:00:00.000000".to_string(),
        original_filename: filename.to_string(),
        message_length: MAX_FIELD_VALUE,
        passcode_hash: "0".repeat(64),
    };
    let metadata_len = worst_case.to_text()?.len();
    Ok(max_message_len(buffer_len, metadata_len, passcode_len))
}

/// Rough "~N characters" hint computed from the file size alone.
///
/// Compressed files hold far more pixels than bytes, so this is only a
/// ballpark figure for display next to a file picker.
pub fn file_size_estimate(file_size_bytes: u64) -> u64 {
    file_size_bytes * 8 / 64
}
