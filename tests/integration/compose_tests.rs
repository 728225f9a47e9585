//! Composer integration tests.
//!
//! Tests verify:
//! - Canvas dimensions follow `(modules + 2 * border) * box_size`
//! - Logos never change the canvas size
//! - Logos are bounded to a quarter of the canvas and centered
//! - Rendered codes scan back to the original payload

use image::{GenericImageView, Rgb};
use qrcode::{EcLevel, QrCode};

use qr_logo_server::qr::{ComposerOptions, ErrorCorrection, QrComposer};
use qr_logo_server::ComposeError;

use super::test_utils::{
    bounding_box, create_jpeg_logo, create_rgb_logo_png, create_rgba_disc_logo_png, is_valid_png,
    scan_qr,
};

const PAYLOADS: &[&str] = &[
    "a",
    "https://example.com",
    "Hello, World!",
    "https://example.com/a/much/longer/path?with=query&params=1#and-a-fragment",
];

fn expected_side(payload: &str) -> u32 {
    let code = QrCode::with_error_correction_level(payload, EcLevel::H).unwrap();
    (code.width() as u32 + 2 * 4) * 10
}

fn is_red(p: &Rgb<u8>) -> bool {
    p.0[0] > 200 && p.0[1] < 60 && p.0[2] < 60
}

// =============================================================================
// Dimensions
// =============================================================================

#[test]
fn test_dimensions_match_module_count() {
    let composer = QrComposer::default();

    for payload in PAYLOADS {
        let png = composer.compose(payload, None).unwrap();
        assert!(is_valid_png(&png));

        let img = image::load_from_memory(&png).unwrap();
        let side = expected_side(payload);
        assert_eq!(img.dimensions(), (side, side), "payload {:?}", payload);
    }
}

#[test]
fn test_custom_options_dimensions() {
    let composer = QrComposer::new(
        ComposerOptions::default()
            .with_error_correction(ErrorCorrection::L)
            .with_box_size(3)
            .with_border(2),
    );

    let code = QrCode::with_error_correction_level("https://example.com", EcLevel::L).unwrap();
    let side = (code.width() as u32 + 4) * 3;

    let img = composer.render("https://example.com").unwrap();
    assert_eq!(img.dimensions(), (side, side));
}

#[test]
fn test_logo_does_not_change_dimensions() {
    let composer = QrComposer::default();
    let logos = [
        create_rgb_logo_png(800, 200, [255, 0, 0]),
        create_rgb_logo_png(3, 3, [255, 0, 0]),
        create_rgba_disc_logo_png(120, [255, 0, 0]),
        create_jpeg_logo(64, 128, [255, 0, 0]),
    ];

    for payload in PAYLOADS {
        let plain = image::load_from_memory(&composer.compose(payload, None).unwrap()).unwrap();
        for logo in &logos {
            let png = composer.compose(payload, Some(logo.as_slice())).unwrap();
            let with_logo = image::load_from_memory(&png).unwrap();
            assert_eq!(plain.dimensions(), with_logo.dimensions());
        }
    }
}

// =============================================================================
// Logo Placement
// =============================================================================

#[test]
fn test_logo_bounded_and_centered() {
    let composer = QrComposer::default();

    for (w, h) in [(1000, 1000), (1200, 300), (300, 1200), (50, 20)] {
        let logo = create_rgb_logo_png(w, h, [255, 0, 0]);
        let png = composer.compose("https://example.com", Some(logo.as_slice())).unwrap();
        let img = image::load_from_memory(&png).unwrap().to_rgb8();
        let (cw, ch) = img.dimensions();

        let (x0, y0, x1, y1) = bounding_box(&img, is_red).expect("logo pixels present");
        let (lw, lh) = (x1 - x0 + 1, y1 - y0 + 1);

        assert!(lw <= cw / 4, "logo width {} exceeds {}", lw, cw / 4);
        assert!(lh <= ch / 4, "logo height {} exceeds {}", lh, ch / 4);
        assert_eq!(x0, (cw - lw) / 2);
        assert_eq!(y0, (ch - lh) / 2);
    }
}

#[test]
fn test_small_logo_not_upscaled() {
    let composer = QrComposer::default();
    let logo = create_rgb_logo_png(12, 8, [255, 0, 0]);

    let png = composer.compose("https://example.com", Some(logo.as_slice())).unwrap();
    let img = image::load_from_memory(&png).unwrap().to_rgb8();

    let (x0, y0, x1, y1) = bounding_box(&img, is_red).unwrap();
    assert_eq!((x1 - x0 + 1, y1 - y0 + 1), (12, 8));
}

#[test]
fn test_aspect_ratio_preserved() {
    let composer = QrComposer::default();
    let logo = create_rgb_logo_png(1200, 300, [255, 0, 0]);

    let png = composer.compose("https://example.com", Some(logo.as_slice())).unwrap();
    let img = image::load_from_memory(&png).unwrap().to_rgb8();
    let (cw, _) = img.dimensions();

    let (x0, y0, x1, y1) = bounding_box(&img, is_red).unwrap();
    let (lw, lh) = (x1 - x0 + 1, y1 - y0 + 1);
    assert_eq!(lw, cw / 4);
    assert_eq!(lh, lw / 4);
}

#[test]
fn test_transparent_corners_keep_modules() {
    let composer = QrComposer::default();
    let plain = image::load_from_memory(&composer.compose("https://example.com", None).unwrap())
        .unwrap()
        .to_rgb8();

    let logo = create_rgba_disc_logo_png(60, [255, 0, 0]);
    let png = composer.compose("https://example.com", Some(logo.as_slice())).unwrap();
    let img = image::load_from_memory(&png).unwrap().to_rgb8();

    let (cw, ch) = img.dimensions();
    let (x, y) = ((cw - 60) / 2, (ch - 60) / 2);

    // Corners of the logo square are transparent, so the QR shows through
    for (px, py) in [(x, y), (x + 59, y), (x, y + 59), (x + 59, y + 59)] {
        assert_eq!(img.get_pixel(px, py), plain.get_pixel(px, py));
    }

    // The disc itself is painted
    assert!(is_red(img.get_pixel(cw / 2, ch / 2)));
}

#[test]
fn test_output_is_deterministic() {
    let composer = QrComposer::default();
    let logo = create_rgba_disc_logo_png(200, [0, 128, 255]);

    let first = composer.compose("https://example.com", Some(logo.as_slice())).unwrap();
    let second = composer.compose("https://example.com", Some(logo.as_slice())).unwrap();
    assert_eq!(first, second);
}

// =============================================================================
// Scanning
// =============================================================================

#[test]
fn test_scan_recovers_payload() {
    let composer = QrComposer::default();

    for payload in PAYLOADS {
        let png = composer.compose(payload, None).unwrap();
        assert_eq!(scan_qr(&png), *payload);
    }
}

#[test]
fn test_hex_round_trip_scans() {
    let composer = QrComposer::default();
    let png = composer.compose("https://example.com", None).unwrap();

    let hex_string = hex::encode(&png);
    assert!(hex_string
        .chars()
        .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));

    let decoded = hex::decode(&hex_string).unwrap();
    assert_eq!(decoded, png.to_vec());
    assert_eq!(scan_qr(&decoded), "https://example.com");
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_payload_over_capacity() {
    let composer = QrComposer::default();
    let payload = "https://example.com/".repeat(200);

    assert!(matches!(
        composer.compose(&payload, None),
        Err(ComposeError::Encoding(_))
    ));
}

#[test]
fn test_truncated_logo_rejected() {
    let composer = QrComposer::default();
    let logo = create_rgb_logo_png(50, 50, [255, 0, 0]);

    let result = composer.compose("https://example.com", Some(&logo[..logo.len() / 2]));
    assert!(matches!(result, Err(ComposeError::LogoDecode { .. })));
}
