//! # Encrypt Binary Entry Point
//!
//! Hides a message in a cover image and writes the carrier as PNG.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin encrypt -- --input cover.jpg --message "meet at dawn" --passcode hunter2
//! cargo run --bin encrypt -- --input cover.png --message-file note.txt --passcode hunter2 \
//!   --output carrier.png --compression 6
//! cargo run --bin encrypt -- --input cover.png --info
//! ```

use anyhow::{bail, Context, Result};
use clap::Parser;
use env_logger::Builder;
use log::{debug, info, LevelFilter};
use std::io::Write;
use std::path::PathBuf;

use lsb_vault::codec::capacity::file_size_estimate;
use lsb_vault::processing::image_io::MAX_COMPRESSION_LEVEL;
use lsb_vault::{hide, inspect, HideRequest, LosslessCodec, Progress, VaultConfig};

/// Command-line arguments for the encrypt binary
#[derive(Parser, Debug)]
#[command(author, version, about = "Hide a message inside an image", long_about = None)]
struct Args {
    /// Cover image to hide the message in
    #[arg(short, long)]
    input: PathBuf,

    /// Message text
    #[arg(short, long, conflicts_with = "message_file")]
    message: Option<String>,

    /// Read the message from a file instead
    #[arg(long)]
    message_file: Option<PathBuf>,

    /// Passcode required to reveal the message
    #[arg(short, long)]
    passcode: Option<String>,

    /// Output PNG (defaults to the configured file name)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// PNG compression level, 0-9
    #[arg(long)]
    compression: Option<u8>,

    /// Optional TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print carrier capacity and exit
    #[arg(long)]
    info: bool,

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

    if args.info {
        let passcode_len = args.passcode.as_deref().map_or(0, |p| p.chars().count());
        let carrier = inspect(&codec, &args.input, passcode_len)
            .with_context(|| format!("reading {}", args.input.display()))?;
        let file_size = std::fs::metadata(&args.input)?.len();

        println!("Dimensions: {}x{} ({} channels)", carrier.width, carrier.height, carrier.channels);
        println!("Size: {:.1}KB", file_size as f64 / 1024.0);
        println!("Capacity: {} bits", carrier.capacity_bits);
        println!("Max message: {} characters", carrier.estimated_max_message_len);
        println!("Quick estimate from file size: ~{} characters", file_size_estimate(file_size));
        return Ok(());
    }

    let message = match (args.message, args.message_file) {
        (Some(message), _) => message,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("reading message file {}", path.display()))?,
        (None, None) => bail!("Please enter a message (--message or --message-file)"),
    };
    let Some(passcode) = args.passcode else {
        bail!("Please enter a passcode (--passcode)");
    };

    let compression_level = args.compression.unwrap_or(config.codec.compression_level);
    if compression_level > MAX_COMPRESSION_LEVEL {
        bail!("Compression level must be between 0 and {}", MAX_COMPRESSION_LEVEL);
    }

    let request = HideRequest {
        output: args
            .output
            .unwrap_or_else(|| PathBuf::from(&config.output.default_filename)),
        input: args.input,
        message,
        passcode,
        compression_level,
    };

    info!("🔒 Encrypting into {}...", request.output.display());

    let mut progress = Progress::new(config.progress.interval_bits).on_progress(|done, total| {
        debug!("embedding {:.0}%", done as f64 * 100.0 / total.max(1) as f64);
    });
    let report = hide(&codec, &request, &mut progress)
        .with_context(|| format!("hiding message in {}", request.input.display()))?;

    info!(
        "✅ Encryption complete! Saved as: {} ({} of {} samples used)",
        request.output.display(),
        report.bits_used,
        report.capacity_bits
    );

    Ok(())
}
