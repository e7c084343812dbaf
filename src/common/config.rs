//! # Configuration
//!
//! Optional TOML configuration shared by the `encrypt` and `decrypt`
//! binaries. Every field has a default, so an absent file or an empty
//! section behaves exactly like the built-in settings.
//!
//! ```toml
//! [codec]
//! compression_level = 9
//! channel_order = "bgr"
//!
//! [progress]
//! interval_bits = 1000
//!
//! [output]
//! default_filename = "encrypted.png"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::processing::image_io::ChannelOrder;

/// Load a TOML configuration file and deserialize it into the specified type.
///
/// # Arguments
/// - `path`: Path to the TOML configuration file
///
/// # Returns
/// - `Ok(T)`: Successfully loaded and parsed configuration
/// - `Err`: File I/O or parsing error
///
/// # Example
/// ```ignore
/// let config: VaultConfig = load_config("config/vault.toml")?;
/// ```
pub fn load_config<T, P>(path: P) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    let config: T = toml::from_str(&content)
        .with_context(|| format!("parsing config file {}", path.display()))?;
    Ok(config)
}

/// Top-level configuration for both binaries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VaultConfig {
    pub codec: CodecConfig,
    pub progress: ProgressConfig,
    pub output: OutputConfig,
}

impl VaultConfig {
    /// Load from `path` when given, otherwise fall back to defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(path) => load_config(path),
            None => Ok(Self::default()),
        }
    }
}

/// Image codec settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// PNG compression level, 0 (fastest) to 9 (smallest)
    pub compression_level: u8,
    /// Sample order inside each pixel of the flat buffer
    pub channel_order: ChannelOrder,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            compression_level: 9,
            channel_order: ChannelOrder::Bgr,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    /// How many bits are processed between progress callbacks
    pub interval_bits: usize,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            interval_bits: crate::processing::progress::DEFAULT_INTERVAL_BITS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// File name used by `encrypt` when no `--output` is given
    pub default_filename: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_filename: "encrypted.png".to_string(),
        }
    }
}
