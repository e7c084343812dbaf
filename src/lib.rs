//! # lsb-vault
//!
//! Hides a text message in the least significant bits of an image's pixel
//! samples, recoverable only with the matching passcode.
//!
//! ## Layers
//!
//! - [`codec`]: bit conversion, the 24-digit header, payload assembly
//! - [`processing`]: pixel buffers, LSB embed/extract, PNG file boundary
//! - [`pipeline`]: end-to-end hide / reveal over an injected [`ImageCodec`]
//! - [`common`]: errors and configuration
//!
//! ## Limitations
//!
//! - No confidentiality: the passcode is stored in the carrier in plaintext.
//! - Characters are byte-valued; code points above U+00FF lose their high bits.
//! - Any lossy re-encoding, resize, or format conversion destroys the payload.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use lsb_vault::{hide, reveal, HideRequest, LosslessCodec, Progress};
//!
//! let codec = LosslessCodec::default();
//! hide(&codec, &HideRequest {
//!     input: "cover.png".into(),
//!     output: "encrypted.png".into(),
//!     message: "meet at dawn".into(),
//!     passcode: "hunter2".into(),
//!     compression_level: 9,
//! }, &mut Progress::silent())?;
//!
//! let revealed = reveal(&codec, "encrypted.png".as_ref(), "hunter2", &mut Progress::silent())?;
//! assert_eq!(revealed.message, "meet at dawn");
//! ```

pub mod codec;
pub mod common;
pub mod pipeline;
pub mod processing;

pub use codec::{BitSequence, Metadata, Payload, Revealed};
pub use common::config::VaultConfig;
pub use common::error::{ExtractionError, HeaderError, MetadataUnavailable, Result, StegoError};
pub use pipeline::{hide, inspect, reveal, CarrierInfo, HideReport, HideRequest, ImageCodec};
pub use processing::{ChannelOrder, LosslessCodec, PixelBuffer, Progress};
