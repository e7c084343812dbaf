//! # Payload Assembly
//!
//! A payload is four parts concatenated with no separators:
//!
//! ```text
//! [24 chars ] header           three 8-digit lengths, see `header`
//! [M chars  ] metadata         JSON object, ASCII only
//! [P chars  ] passcode         as typed by the user
//! [N chars  ] message          the hidden text
//! ```
//!
//! Only the header lengths mark the boundaries between parts.
//!
//! ## Passcode handling
//!
//! The passcode is stored in the clear and authentication compares it
//! directly. The SHA-256 `passcode_hash` in the metadata is informational
//! only. Anyone who can run extraction can read the passcode; the format
//! offers no confidentiality. Switching to hash-based authentication would
//! change the wire format and break existing carriers.

use chrono::NaiveDateTime;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::bits::{self, char_len, BitSequence};
use super::header::{self, Header, HEADER_BITS, HEADER_LEN};
use crate::common::error::{
    ExtractionError, HeaderError, MetadataUnavailable, Result, StegoError,
};

/// Timestamp layout written into the metadata (ISO-8601, microseconds).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Descriptive record stored between the header and the passcode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub timestamp: String,
    pub original_filename: String,
    pub message_length: usize,
    #[serde(default)]
    pub passcode_hash: String,
}

impl Metadata {
    pub fn new(message: &str, passcode: &str, original_filename: &str, now: NaiveDateTime) -> Self {
        Self {
            timestamp: now.format(TIMESTAMP_FORMAT).to_string(),
            original_filename: original_filename.to_string(),
            message_length: char_len(message),
            passcode_hash: passcode_hash(passcode),
        }
    }

    /// Serialize to JSON with every non-ASCII character escaped, so the
    /// text survives the 8-bit-per-character encoding unchanged.
    pub fn to_text(&self) -> Result<String> {
        let json = serde_json::to_string(self)?;
        Ok(escape_non_ascii(&json))
    }

    pub fn from_text(text: &str) -> std::result::Result<Self, MetadataUnavailable> {
        serde_json::from_str(text).map_err(|e| MetadataUnavailable {
            reason: e.to_string(),
        })
    }

    /// Human-readable lines for display after a successful reveal.
    pub fn summary(&self) -> String {
        format!(
            "Original filename: {}\nTimestamp: {}\nMessage length: {} characters",
            self.original_filename, self.timestamp, self.message_length
        )
    }
}

/// SHA-256 of the passcode's UTF-8 bytes, lowercase hex.
pub fn passcode_hash(passcode: &str) -> String {
    format!("{:x}", Sha256::digest(passcode.as_bytes()))
}

/// Replace each non-ASCII character with `\uXXXX` (surrogate pairs above
/// the BMP). Only valid on JSON text, where such characters can only
/// appear inside string literals.
fn escape_non_ascii(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for ch in json.chars() {
        if ch.is_ascii() {
            out.push(ch);
        } else {
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                out.push_str(&format!("\\u{:04x}", unit));
            }
        }
    }
    out
}

/// A fully assembled payload, ready to be turned into bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    header: Header,
    metadata_len: usize,
    text: String,
}

impl Payload {
    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn metadata_text(&self) -> &str {
        let start = HEADER_LEN;
        // Header and metadata are pure ASCII, so char offsets are byte offsets.
        &self.text[start..start + self.metadata_len]
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Payload length in characters.
    pub fn char_len(&self) -> usize {
        char_len(&self.text)
    }

    /// Number of carrier samples the payload occupies.
    pub fn required_bits(&self) -> usize {
        super::capacity::required_bits(self.char_len())
    }

    pub fn to_bits(&self) -> BitSequence {
        bits::encode(&self.text)
    }
}

/// Result of a successful reveal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revealed {
    pub message: String,
    /// `Err` when the metadata block is unreadable; the message is still valid.
    pub metadata: std::result::Result<Metadata, MetadataUnavailable>,
}

/// Compose `header ∥ metadata ∥ passcode ∥ message`.
///
/// Fails only when a length does not fit its 8-digit header field. Whether
/// the payload fits a carrier is checked at embedding time.
pub fn assemble(
    message: &str,
    passcode: &str,
    original_filename: &str,
    now: NaiveDateTime,
) -> Result<Payload> {
    let metadata = Metadata::new(message, passcode, original_filename, now);
    let metadata_text = metadata.to_text()?;
    let metadata_len = metadata_text.len();

    let header = header::build(metadata_len, char_len(passcode), char_len(message))
        .map_err(StegoError::Header)?;

    let mut text = String::with_capacity(HEADER_LEN + metadata_len + passcode.len() + message.len());
    text.push_str(header.as_str());
    text.push_str(&metadata_text);
    text.push_str(passcode);
    text.push_str(message);

    debug!(
        "assembled payload: header={} metadata={} chars, total={} chars",
        header,
        metadata_len,
        char_len(&text)
    );

    Ok(Payload {
        header,
        metadata_len,
        text,
    })
}

/// Recover the message from a carrier.
///
/// `extract_fn(n)` must return the first `n` payload bits of the carrier. It
/// is called twice: once for the header, once for the whole payload.
pub fn disassemble<F>(mut extract_fn: F, passcode: &str) -> Result<Revealed>
where
    F: FnMut(usize) -> Result<BitSequence>,
{
    let header_text = bits::decode(&extract_fn(HEADER_BITS)?);
    let lengths = header::parse(&header_text).map_err(StegoError::CorruptHeader)?;

    let total_chars = lengths
        .payload_len()
        .filter(|chars| chars.checked_mul(8).is_some())
        .ok_or_else(|| {
            StegoError::CorruptHeader(HeaderError::Malformed(
                "declared payload length overflows".to_string(),
            ))
        })?;
    let total_bits = total_chars * 8;
    debug!(
        "header declares metadata={} passcode={} message={} ({} bits)",
        lengths.metadata_len, lengths.passcode_len, lengths.message_len, total_bits
    );

    let chars: Vec<char> = bits::decode(&extract_fn(total_bits)?).chars().collect();
    if chars.len() < total_chars {
        return Err(ExtractionError::OutOfRange {
            requested: total_bits,
            available: chars.len() * 8,
        }
        .into());
    }

    let meta_start = HEADER_LEN;
    let pass_start = meta_start + lengths.metadata_len;
    let msg_start = pass_start + lengths.passcode_len;

    let stored_passcode: String = chars[pass_start..msg_start].iter().collect();
    if stored_passcode != passcode {
        return Err(StegoError::Authentication);
    }

    let metadata_text: String = chars[meta_start..pass_start].iter().collect();
    let message: String = chars[msg_start..total_chars].iter().collect();

    let metadata = Metadata::from_text(&metadata_text);
    if let Err(e) = &metadata {
        warn!("{}", e);
    }

    Ok(Revealed { message, metadata })
}
