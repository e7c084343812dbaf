//! End-to-end hide/reveal through real PNG files.

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage, Rgba, RgbaImage};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::path::{Path, PathBuf};
    use std::sync::atomic::AtomicBool;
    use tempfile::TempDir;

    use lsb_vault::codec::bits::decode as decode_bits;
    use lsb_vault::codec::payload::{assemble, passcode_hash};
    use lsb_vault::codec::HEADER_BITS;
    use lsb_vault::processing::{embed, extract};
    use lsb_vault::{
        hide, inspect, reveal, ChannelOrder, HideRequest, ImageCodec, LosslessCodec, PixelBuffer,
        Progress, StegoError,
    };

    fn noisy_cover(dir: &TempDir, name: &str, width: u32, height: u32, seed: u64) -> PathBuf {
        let mut rng = StdRng::seed_from_u64(seed);
        let img = RgbImage::from_fn(width, height, |_, _| Rgb([rng.gen(), rng.gen(), rng.gen()]));
        let path = dir.path().join(name);
        img.save(&path).unwrap();
        path
    }

    fn request(input: &Path, output: &Path, message: &str, passcode: &str) -> HideRequest {
        HideRequest {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            message: message.to_string(),
            passcode: passcode.to_string(),
            compression_level: 9,
        }
    }

    #[test]
    fn test_png_round_trip() {
        let dir = TempDir::new().unwrap();
        let cover = noisy_cover(&dir, "cover.png", 64, 48, 1);
        let carrier = dir.path().join("encrypted.png");
        let codec = LosslessCodec::default();

        let message = "The eagle lands at midnight.\nBring the map.";
        hide(&codec, &request(&cover, &carrier, message, "Tr0ub4dor&3"), &mut Progress::silent())
            .unwrap();

        let revealed = reveal(&codec, &carrier, "Tr0ub4dor&3", &mut Progress::silent()).unwrap();
        assert_eq!(revealed.message, message);

        let metadata = revealed.metadata.unwrap();
        assert_eq!(metadata.original_filename, "cover.png");
        assert_eq!(metadata.message_length, message.chars().count());
        assert_eq!(metadata.passcode_hash, passcode_hash("Tr0ub4dor&3"));
    }

    #[test]
    fn test_random_messages_round_trip() {
        let dir = TempDir::new().unwrap();
        let cover = noisy_cover(&dir, "cover.png", 80, 80, 2);
        let codec = LosslessCodec::new(ChannelOrder::Rgb);
        let mut rng = StdRng::seed_from_u64(99);

        for round in 0..5 {
            let len = rng.gen_range(1..400);
            let message: String = (0..len).map(|_| rng.gen_range(0x20u8..0x7F) as char).collect();
            let passcode: String = (0..rng.gen_range(1..20))
                .map(|_| rng.gen_range(b'a'..=b'z') as char)
                .collect();
            let carrier = dir.path().join(format!("out{}.png", round));

            hide(&codec, &request(&cover, &carrier, &message, &passcode), &mut Progress::silent())
                .unwrap();
            let revealed = reveal(&codec, &carrier, &passcode, &mut Progress::silent()).unwrap();
            assert_eq!(revealed.message, message);
        }
    }

    #[test]
    fn test_latin1_message_round_trips() {
        let dir = TempDir::new().unwrap();
        let cover = noisy_cover(&dir, "cover.png", 40, 40, 3);
        let carrier = dir.path().join("encrypted.png");
        let codec = LosslessCodec::default();

        let message = "Caf\u{e9} cr\u{e8}me \u{bd} \u{a3}5";
        hide(&codec, &request(&cover, &carrier, message, "pw"), &mut Progress::silent()).unwrap();
        let revealed = reveal(&codec, &carrier, "pw", &mut Progress::silent()).unwrap();
        assert_eq!(revealed.message, message);
    }

    #[test]
    fn test_wrong_passcode_is_rejected() {
        let dir = TempDir::new().unwrap();
        let cover = noisy_cover(&dir, "cover.png", 40, 40, 4);
        let carrier = dir.path().join("encrypted.png");
        let codec = LosslessCodec::default();

        hide(&codec, &request(&cover, &carrier, "classified", "right"), &mut Progress::silent())
            .unwrap();

        for wrong in ["wrong", "Right", "righ", "right "] {
            let err = reveal(&codec, &carrier, wrong, &mut Progress::silent()).unwrap_err();
            assert!(matches!(err, StegoError::Authentication), "{:?}", err);
            assert!(!err.to_string().contains("classified"));
        }
    }

    #[test]
    fn test_untouched_cover_has_no_payload() {
        let dir = TempDir::new().unwrap();
        // Solid mid-grey: every LSB is 0, so the header decodes to NUL characters
        let img = RgbImage::from_pixel(32, 32, Rgb([128, 128, 128]));
        let cover = dir.path().join("grey.png");
        img.save(&cover).unwrap();

        let err = reveal(&LosslessCodec::default(), &cover, "pw", &mut Progress::silent())
            .unwrap_err();
        assert!(matches!(err, StegoError::CorruptHeader(_)));
    }

    #[test]
    fn test_capacity_boundary() {
        let dir = TempDir::new().unwrap();
        let cover = noisy_cover(&dir, "cover.png", 30, 20, 5);
        let codec = LosslessCodec::default();
        let passcode = "pw";

        let info = inspect(&codec, &cover, passcode.len()).unwrap();
        assert_eq!(info.capacity_bits, 30 * 20 * 3);

        // Largest message whose full payload still fits. The timestamp has a
        // fixed width, so any `now` gives the same payload size.
        let now = chrono::Local::now().naive_local();
        let fits = (1..info.capacity_bits / 8)
            .take_while(|&n| {
                assemble(&"e".repeat(n), passcode, "cover.png", now)
                    .unwrap()
                    .required_bits()
                    <= info.capacity_bits
            })
            .last()
            .unwrap();
        assert!(fits >= info.estimated_max_message_len);

        let carrier = dir.path().join("exact.png");
        hide(
            &codec,
            &request(&cover, &carrier, &"e".repeat(fits), passcode),
            &mut Progress::silent(),
        )
        .unwrap();
        let revealed = reveal(&codec, &carrier, passcode, &mut Progress::silent()).unwrap();
        assert_eq!(revealed.message.len(), fits);

        let err = hide(
            &codec,
            &request(&cover, &dir.path().join("over.png"), &"e".repeat(fits + 1), passcode),
            &mut Progress::silent(),
        )
        .unwrap_err();
        assert!(matches!(err, StegoError::Capacity { .. }));
    }

    #[test]
    fn test_exact_fit_and_one_over() {
        // Build the payload first, then size the carrier to match it exactly.
        let now = chrono::Local::now().naive_local();
        let payload = assemble("hello", "ab", "cover.png", now).unwrap();
        let payload_bits = payload.to_bits();
        let len = payload_bits.len();

        let exact = PixelBuffer::new(len as u32, 1, 1, vec![0x80; len]).unwrap();
        let stego = embed(exact, &payload_bits, &mut Progress::silent()).unwrap();
        let recovered = extract(&stego, len, &mut Progress::silent()).unwrap();
        assert_eq!(decode_bits(&recovered), payload.as_str());

        let short = PixelBuffer::new(len as u32 - 1, 1, 1, vec![0x80; len - 1]).unwrap();
        let err = embed(short, &payload_bits, &mut Progress::silent()).unwrap_err();
        assert!(matches!(err, StegoError::Capacity { .. }));
    }

    #[test]
    fn test_hide_too_large_leaves_no_output() {
        let dir = TempDir::new().unwrap();
        let cover = noisy_cover(&dir, "tiny.png", 8, 8, 6);
        let carrier = dir.path().join("encrypted.png");

        let err = hide(
            &LosslessCodec::default(),
            &request(&cover, &carrier, &"a".repeat(500), "pw"),
            &mut Progress::silent(),
        )
        .unwrap_err();
        assert!(matches!(err, StegoError::Capacity { available: 192, .. }));
        assert!(!carrier.exists());
    }

    #[test]
    fn test_alpha_cover_is_flattened() {
        let dir = TempDir::new().unwrap();
        let img = RgbaImage::from_fn(40, 40, |x, y| Rgba([x as u8, y as u8, 7, 99]));
        let cover = dir.path().join("alpha.png");
        img.save(&cover).unwrap();
        let carrier = dir.path().join("encrypted.png");
        let codec = LosslessCodec::default();

        let buffer = codec.decode(&cover).unwrap();
        assert_eq!(buffer.channels(), 3);

        hide(&codec, &request(&cover, &carrier, "alpha", "pw"), &mut Progress::silent()).unwrap();
        assert_eq!(
            reveal(&codec, &carrier, "pw", &mut Progress::silent()).unwrap().message,
            "alpha"
        );
    }

    #[test]
    fn test_only_payload_samples_change() {
        let dir = TempDir::new().unwrap();
        let cover = noisy_cover(&dir, "cover.png", 50, 50, 7);
        let carrier = dir.path().join("encrypted.png");
        let codec = LosslessCodec::default();

        let report = hide(&codec, &request(&cover, &carrier, "locality", "pw"), &mut Progress::silent())
            .unwrap();

        let before = codec.decode(&cover).unwrap();
        let after = codec.decode(&carrier).unwrap();
        for (i, (&a, &b)) in before.as_bytes().iter().zip(after.as_bytes()).enumerate() {
            if i < report.bits_used {
                assert!(a.abs_diff(b) <= 1);
            } else {
                assert_eq!(a, b);
            }
        }
        assert!(report.bits_used > HEADER_BITS);
    }

    #[test]
    fn test_cancelled_hide_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let cover = noisy_cover(&dir, "cover.png", 40, 40, 8);
        let carrier = dir.path().join("encrypted.png");
        let cancel = AtomicBool::new(true);

        let mut progress = Progress::new(100).with_cancel_flag(&cancel);
        let err = hide(
            &LosslessCodec::default(),
            &request(&cover, &carrier, "never", "pw"),
            &mut progress,
        )
        .unwrap_err();
        assert!(matches!(err, StegoError::Cancelled));
        assert!(!carrier.exists());
    }
}
