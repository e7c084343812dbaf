//! # Common Components
//!
//! Shared utilities used by the library and both binaries.
//!
//! ## Modules
//!
//! - [`error`]: Error taxonomy for hide and reveal
//! - [`config`]: TOML configuration loading

pub mod config;
pub mod error;
