//! # Image File Boundary
//!
//! [`LosslessCodec`] turns image files into [`PixelBuffer`]s and back using
//! the `image` crate. It is the only place in the library that touches image
//! formats; the codec and embedding layers see flat sample buffers only.
//!
//! ## Lossless only
//!
//! Every payload bit lives in a sample LSB, so any lossy re-encoding destroys
//! the payload. Carriers are therefore always written as PNG, and an output
//! path with any other extension is rejected before the file is created.
//! Reading is permissive (any format the `image` crate decodes can serve as
//! a cover image), but a warning is logged for lossy inputs since they can
//! never be carriers produced by this tool.
//!
//! ## Channel order
//!
//! Decoded pixels are flattened to three samples each, alpha dropped.
//! [`ChannelOrder::Bgr`] (the default) stores blue first, which matches the
//! layout of carriers written by the earlier desktop encoder.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ColorType, ImageEncoder, ImageFormat};

use super::pixels::PixelBuffer;
use crate::common::error::{Result, StegoError};
use crate::pipeline::ImageCodec;

/// Highest accepted PNG compression level.
pub const MAX_COMPRESSION_LEVEL: u8 = 9;

/// Order of the colour samples inside each pixel of the flat buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelOrder {
    Rgb,
    #[default]
    Bgr,
}

/// PNG-writing codec backed by the `image` crate.
#[derive(Debug, Clone, Default)]
pub struct LosslessCodec {
    channel_order: ChannelOrder,
}

impl LosslessCodec {
    pub fn new(channel_order: ChannelOrder) -> Self {
        Self { channel_order }
    }

    pub fn channel_order(&self) -> ChannelOrder {
        self.channel_order
    }
}

impl ImageCodec for LosslessCodec {
    fn decode(&self, path: &Path) -> Result<PixelBuffer> {
        if let Ok(format) = ImageFormat::from_path(path) {
            if is_lossy(format) {
                warn!(
                    "{} is a lossy {:?} image: fine as a cover, but it cannot hold an embedded payload",
                    path.display(),
                    format
                );
            }
        }

        let rgb = image::open(path)?.to_rgb8();
        let (width, height) = rgb.dimensions();
        let mut data = rgb.into_raw();
        if self.channel_order == ChannelOrder::Bgr {
            swap_red_blue(&mut data, 3);
        }

        debug!("decoded {} ({}x{}, {} samples)", path.display(), width, height, data.len());
        PixelBuffer::new(width, height, 3, data)
    }

    fn encode(&self, path: &Path, buffer: &PixelBuffer, compression_level: u8) -> Result<()> {
        ensure_png(path)?;
        let compression = compression_type(compression_level)?;

        let color_type = match buffer.channels() {
            1 => ColorType::L8,
            3 => ColorType::Rgb8,
            4 => ColorType::Rgba8,
            n => {
                return Err(StegoError::UnsupportedFormat(format!(
                    "{}-channel pixel data",
                    n
                )))
            }
        };

        let mut samples = buffer.as_bytes().to_vec();
        if self.channel_order == ChannelOrder::Bgr && buffer.channels() >= 3 {
            swap_red_blue(&mut samples, buffer.channels() as usize);
        }

        let writer = BufWriter::new(File::create(path)?);
        let encoder = PngEncoder::new_with_quality(writer, compression, FilterType::Adaptive);
        encoder.write_image(&samples, buffer.width(), buffer.height(), color_type)?;

        debug!(
            "wrote {} ({}x{}, compression level {})",
            path.display(),
            buffer.width(),
            buffer.height(),
            compression_level
        );
        Ok(())
    }
}

fn is_lossy(format: ImageFormat) -> bool {
    matches!(format, ImageFormat::Jpeg | ImageFormat::WebP | ImageFormat::Avif)
}

fn ensure_png(path: &Path) -> Result<()> {
    match ImageFormat::from_path(path) {
        Ok(ImageFormat::Png) => Ok(()),
        _ => Err(StegoError::UnsupportedFormat(
            path.extension()
                .map(|ext| ext.to_string_lossy().into_owned())
                .unwrap_or_else(|| "<none>".to_string()),
        )),
    }
}

/// Map a 0-9 level onto the presets the PNG encoder offers.
fn compression_type(level: u8) -> Result<CompressionType> {
    match level {
        0..=3 => Ok(CompressionType::Fast),
        4..=6 => Ok(CompressionType::Default),
        7..=MAX_COMPRESSION_LEVEL => Ok(CompressionType::Best),
        _ => Err(StegoError::InvalidCompression(level)),
    }
}

/// Swap the first and third sample of every pixel (RGB <-> BGR).
fn swap_red_blue(samples: &mut [u8], channels: usize) {
    for pixel in samples.chunks_exact_mut(channels) {
        pixel.swap(0, 2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn write_cover(path: &Path) {
        let img = RgbImage::from_fn(4, 3, |x, y| Rgb([x as u8 * 10, y as u8 * 20, 200]));
        img.save(path).unwrap();
    }

    #[test]
    fn test_decode_bgr_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cover.png");
        write_cover(&path);

        let buffer = LosslessCodec::new(ChannelOrder::Bgr).decode(&path).unwrap();
        assert_eq!((buffer.width(), buffer.height(), buffer.channels()), (4, 3, 3));
        // pixel (1, 0) = RGB(10, 0, 200) stored as B, G, R
        assert_eq!(&buffer.as_bytes()[3..6], &[200, 0, 10]);
    }

    #[test]
    fn test_decode_rgb_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cover.png");
        write_cover(&path);

        let buffer = LosslessCodec::new(ChannelOrder::Rgb).decode(&path).unwrap();
        assert_eq!(&buffer.as_bytes()[3..6], &[10, 0, 200]);
    }

    #[test]
    fn test_encode_decode_preserves_every_sample() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let data: Vec<u8> = (0..4 * 3 * 3).map(|i| (i * 7) as u8).collect();
        let buffer = PixelBuffer::new(4, 3, 3, data).unwrap();

        for order in [ChannelOrder::Bgr, ChannelOrder::Rgb] {
            let codec = LosslessCodec::new(order);
            codec.encode(&path, &buffer, 9).unwrap();
            assert_eq!(codec.decode(&path).unwrap(), buffer);
        }
    }

    #[test]
    fn test_encode_rejects_lossy_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.jpg");
        let buffer = PixelBuffer::new(1, 1, 3, vec![1, 2, 3]).unwrap();

        let err = LosslessCodec::default().encode(&path, &buffer, 9).unwrap_err();
        assert!(matches!(err, StegoError::UnsupportedFormat(ext) if ext == "jpg"));
        assert!(!path.exists());
    }

    #[test]
    fn test_compression_levels() {
        assert!(matches!(compression_type(0), Ok(CompressionType::Fast)));
        assert!(matches!(compression_type(5), Ok(CompressionType::Default)));
        assert!(matches!(compression_type(9), Ok(CompressionType::Best)));
        assert!(matches!(compression_type(10), Err(StegoError::InvalidCompression(10))));
    }
}
