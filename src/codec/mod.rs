//! # Payload Codec
//!
//! Pure text-level logic, independent of any image library:
//!
//! - [`bits`]: text to bit sequence and back
//! - [`header`]: the 24-digit length header
//! - [`payload`]: header + metadata + passcode + message assembly
//! - [`capacity`]: how much text a carrier can hold

pub mod bits;
pub mod capacity;
pub mod header;
pub mod payload;

pub use bits::BitSequence;
pub use header::{HeaderLengths, HEADER_BITS, HEADER_LEN};
pub use payload::{assemble, disassemble, Metadata, Payload, Revealed};
