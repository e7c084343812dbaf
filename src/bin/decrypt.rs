//! # Decrypt Binary Entry Point
//!
//! Reveals a message hidden by `encrypt`.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin decrypt -- --input encrypted.png --passcode hunter2
//! ```
//!
//! The message is printed to stdout, followed by the embedded metadata
//! (original file name, timestamp, message length) when it is readable.

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Builder;
use log::{debug, info, LevelFilter};
use std::io::Write;
use std::path::PathBuf;

use lsb_vault::{reveal, LosslessCodec, Progress, VaultConfig};

/// Command-line arguments for the decrypt binary
#[derive(Parser, Debug)]
#[command(author, version, about = "Reveal a message hidden inside an image", long_about = None)]
struct Args {
    /// Carrier image produced by `encrypt`
    #[arg(short, long)]
    input: PathBuf,

    /// Passcode used when the message was hidden
    #[arg(short, long)]
    passcode: String,

    /// Optional TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Initialize the logging system with timestamp, level, and message formatting.
///
/// Format: `[HH:MM:SS] [LEVEL] message`
fn init_logger(verbose: bool) {
    Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] [{}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter_level(if verbose { LevelFilter::Debug } else { LevelFilter::Info })
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.verbose);

    let config = VaultConfig::load_or_default(args.config.as_ref())?;
    let codec = LosslessCodec::new(config.codec.channel_order);

    info!("🔓 Decrypting {}...", args.input.display());

    let mut progress = Progress::new(config.progress.interval_bits).on_progress(|done, total| {
        debug!("extracting {:.0}%", done as f64 * 100.0 / total.max(1) as f64);
    });
    let revealed = reveal(&codec, &args.input, &args.passcode, &mut progress)
        .with_context(|| format!("Decryption failed for {}", args.input.display()))?;

    info!("✅ Decryption complete!");

    println!("Decrypted Message:");
    println!("{}", revealed.message);
    println!();
    println!("Metadata:");
    match &revealed.metadata {
        Ok(metadata) => println!("{}", metadata.summary()),
        Err(_) => println!("Metadata unavailable or corrupted"),
    }

    Ok(())
}
