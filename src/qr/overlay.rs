//! Logo overlay.
//!
//! The logo is shrunk to fit a box a quarter of the canvas on each side,
//! then pasted at the center of the QR code.
//!
//! # Design Decisions
//!
//! - **Downscale only**: A logo that already fits is pasted at its native size.
//!
//! - **Alpha as mask**: Logos carrying an alpha channel are blended, so
//!   transparent regions leave the underlying modules visible. They are
//!   resampled with premultiplied alpha, so the color hidden under fully
//!   transparent pixels never bleeds into the edges.
//!
//! - **Opaque rectangle otherwise**: Logos without alpha overwrite every pixel
//!   in their rectangle. The high error-correction level is what keeps the
//!   symbol readable.

use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};
use tracing::debug;

/// Compute thumbnail dimensions for a `width` x `height` image bounded by
/// `max_width` x `max_height`.
///
/// The aspect ratio is preserved and the image is never enlarged. When
/// scaling is needed, the binding side takes its limit and the other side is
/// rounded down or up, whichever keeps the aspect ratio closer. Neither side
/// drops below 1.
pub fn thumbnail_size(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    let (max_width, max_height) = (max_width.max(1), max_height.max(1));

    if width <= max_width && height <= max_height {
        return (width, height);
    }

    let aspect = width as f64 / height as f64;
    let (box_w, box_h) = (max_width as f64, max_height as f64);

    if box_w / box_h >= aspect {
        let w = round_aspect(box_h * aspect, |n| (aspect - n / box_h).abs());
        (w, max_height)
    } else {
        let h = round_aspect(box_w / aspect, |n| {
            if n == 0.0 {
                0.0
            } else {
                (aspect - box_w / n).abs()
            }
        });
        (max_width, h)
    }
}

/// Pick floor or ceil of `value`, whichever scores lower; ties go to floor.
fn round_aspect(value: f64, score: impl Fn(f64) -> f64) -> u32 {
    let (lo, hi) = (value.floor(), value.ceil());
    let picked = if score(hi) < score(lo) { hi } else { lo };
    (picked as u32).max(1)
}

/// Top-left corner that centers a `logo` sized box on a `canvas` sized box.
///
/// Uses integer division, so odd remainders bias one pixel toward the origin.
#[inline]
pub fn center_offset(canvas: (u32, u32), logo: (u32, u32)) -> (u32, u32) {
    (
        canvas.0.saturating_sub(logo.0) / 2,
        canvas.1.saturating_sub(logo.1) / 2,
    )
}

/// Scale `logo` into the center box of `canvas` and paste it.
///
/// The bounding box is `canvas / divisor` on each axis. Returns the pasted
/// rectangle as `(x, y, width, height)`.
pub fn paste_logo(
    canvas: &mut RgbImage,
    logo: &DynamicImage,
    divisor: u32,
) -> (u32, u32, u32, u32) {
    let divisor = divisor.max(1);
    let (canvas_w, canvas_h) = canvas.dimensions();
    let (target_w, target_h) = thumbnail_size(
        logo.width(),
        logo.height(),
        canvas_w / divisor,
        canvas_h / divisor,
    );
    let (x, y) = center_offset((canvas_w, canvas_h), (target_w, target_h));

    debug!(
        logo_width = logo.width(),
        logo_height = logo.height(),
        target_width = target_w,
        target_height = target_h,
        x = x,
        y = y,
        has_alpha = logo.color().has_alpha(),
        "Pasting logo"
    );

    if logo.color().has_alpha() {
        let scaled = scale(premultiply(logo.to_rgba8()), target_w, target_h);
        blend_premultiplied(canvas, &scaled, x, y);
    } else {
        let scaled = scale(logo.to_rgb8(), target_w, target_h);
        imageops::replace(canvas, &scaled, i64::from(x), i64::from(y));
    }

    (x, y, target_w, target_h)
}

fn scale<P>(
    img: image::ImageBuffer<P, Vec<u8>>,
    width: u32,
    height: u32,
) -> image::ImageBuffer<P, Vec<u8>>
where
    P: image::Pixel<Subpixel = u8> + 'static,
{
    if img.dimensions() == (width, height) {
        img
    } else {
        imageops::resize(&img, width, height, FilterType::CatmullRom)
    }
}

/// Scale each color channel by its pixel's alpha.
fn premultiply(mut img: RgbaImage) -> RgbaImage {
    for Rgba([r, g, b, a]) in img.pixels_mut() {
        let alpha = u32::from(*a);
        for c in [r, g, b] {
            *c = ((u32::from(*c) * alpha + 127) / 255) as u8;
        }
    }
    img
}

/// Paste a premultiplied `logo` at (`x`, `y`) using its alpha channel as the
/// mask.
fn blend_premultiplied(canvas: &mut RgbImage, logo: &RgbaImage, x: u32, y: u32) {
    let (canvas_w, canvas_h) = canvas.dimensions();

    for (lx, ly, &Rgba([r, g, b, a])) in logo.enumerate_pixels() {
        let (cx, cy) = (x + lx, y + ly);
        if cx >= canvas_w || cy >= canvas_h {
            continue;
        }
        let under = canvas.get_pixel(cx, cy).0;
        // Bicubic overshoot can leave a channel above its alpha
        let mix = |fg: u8, bg: u8| -> u8 {
            let a = u32::from(a);
            ((u32::from(fg) * 255 + u32::from(bg) * (255 - a) + 127) / 255).min(255) as u8
        };
        canvas.put_pixel(
            cx,
            cy,
            Rgb([mix(r, under[0]), mix(g, under[1]), mix(b, under[2])]),
        );
    }
}

// =============================================================================
// Tests
// =============================================================================
