//! # Hide / Reveal Pipeline
//!
//! Glues the codec to an image file boundary:
//!
//! ```text
//! hide:   file -> ImageCodec::decode -> assemble -> embed -> ImageCodec::encode -> file
//! reveal: file -> ImageCodec::decode -> disassemble(extract) -> message
//! ```
//!
//! The image library is injected through [`ImageCodec`], so the pipeline can
//! run against real files ([`crate::LosslessCodec`]) or an in-memory fake.

use chrono::Local;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

use crate::codec::capacity::{estimate_max_message_len, max_message_len};
use crate::codec::payload::{self, Revealed};
use crate::common::error::{Result, StegoError};
use crate::processing::embed::embed;
use crate::processing::extract::extract;
use crate::processing::pixels::PixelBuffer;
use crate::processing::progress::Progress;

/// Image decode/encode capability.
pub trait ImageCodec {
    /// Read `path` into a flat sample buffer.
    fn decode(&self, path: &Path) -> Result<PixelBuffer>;

    /// Write `buffer` to `path` losslessly at the given compression level.
    fn encode(&self, path: &Path, buffer: &PixelBuffer, compression_level: u8) -> Result<()>;
}

/// Everything needed to hide one message.
#[derive(Debug, Clone)]
pub struct HideRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub message: String,
    pub passcode: String,
    pub compression_level: u8,
}

/// Outcome of a successful hide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HideReport {
    /// Payload length in characters, header included
    pub payload_chars: usize,
    /// Carrier samples overwritten
    pub bits_used: usize,
    /// Total carrier samples
    pub capacity_bits: usize,
}

/// Carrier dimensions and how much it can hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarrierInfo {
    pub width: u32,
    pub height: u32,
    pub channels: u8,
    pub capacity_bits: usize,
    /// Conservative message capacity for a passcode of `passcode_len` chars
    pub estimated_max_message_len: usize,
}

/// Hide `request.message` in `request.input` and write the carrier to
/// `request.output`.
///
/// Fails with [`StegoError::Capacity`] before anything is written when the
/// payload does not fit.
pub fn hide<C: ImageCodec>(
    codec: &C,
    request: &HideRequest,
    progress: &mut Progress<'_>,
) -> Result<HideReport> {
    if request.message.is_empty() {
        return Err(StegoError::EmptyInput("message"));
    }
    if request.passcode.is_empty() {
        return Err(StegoError::EmptyInput("passcode"));
    }

    let buffer = codec.decode(&request.input)?;
    let capacity_bits = buffer.len();

    let payload = payload::assemble(
        &request.message,
        &request.passcode,
        &file_name(&request.input),
        Local::now().naive_local(),
    )?;

    let bits_used = payload.required_bits();
    if bits_used > capacity_bits {
        let fits = max_message_len(
            capacity_bits,
            payload.metadata_text().len(),
            request.passcode.chars().count(),
        );
        warn!(
            "message does not fit: {} bits needed, {} available (max ~{} characters)",
            bits_used, capacity_bits, fits
        );
        return Err(StegoError::Capacity {
            required: bits_used,
            available: capacity_bits,
        });
    }

    let stego = embed(buffer, &payload.to_bits(), progress)?;
    codec.encode(&request.output, &stego, request.compression_level)?;

    info!(
        "hid {} characters in {} ({} of {} samples used)",
        request.message.chars().count(),
        request.output.display(),
        bits_used,
        capacity_bits
    );

    Ok(HideReport {
        payload_chars: payload.char_len(),
        bits_used,
        capacity_bits,
    })
}

/// Recover the message hidden in `path`, if `passcode` matches.
pub fn reveal<C: ImageCodec>(
    codec: &C,
    path: &Path,
    passcode: &str,
    progress: &mut Progress<'_>,
) -> Result<Revealed> {
    if passcode.is_empty() {
        return Err(StegoError::EmptyInput("passcode"));
    }

    let buffer = codec.decode(path)?;
    debug!("revealing from {} ({} samples)", path.display(), buffer.len());

    let revealed = payload::disassemble(|n| extract(&buffer, n, progress), passcode)?;

    info!(
        "revealed {} characters from {}",
        revealed.message.chars().count(),
        path.display()
    );
    Ok(revealed)
}

/// Describe the carrier at `path` without modifying it.
pub fn inspect<C: ImageCodec>(codec: &C, path: &Path, passcode_len: usize) -> Result<CarrierInfo> {
    let buffer = codec.decode(path)?;
    let estimated_max_message_len =
        estimate_max_message_len(buffer.len(), &file_name(path), passcode_len)?;

    Ok(CarrierInfo {
        width: buffer.width(),
        height: buffer.height(),
        channels: buffer.channels(),
        capacity_bits: buffer.len(),
        estimated_max_message_len,
    })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
