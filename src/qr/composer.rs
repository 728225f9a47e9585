//! QR symbol encoding, rasterization and PNG output.
//!
//! Matrix generation and Reed-Solomon coding are delegated to the `qrcode`
//! crate, used without its rendering features. Rasterization is done here so
//! the canvas is a plain `image::RgbImage` the overlay step can paint on.

use std::io::Cursor;

use bytes::Bytes;
use image::{ImageFormat, Rgb, RgbImage};
use qrcode::{Color, EcLevel, QrCode};
use tracing::debug;

use super::overlay::paste_logo;
use crate::error::ComposeError;

/// Default pixel size of one module.
pub const DEFAULT_BOX_SIZE: u32 = 10;

/// Default quiet-zone width in modules.
pub const DEFAULT_BORDER: u32 = 4;

/// Default divisor applied to the canvas size to get the logo bounding box.
pub const DEFAULT_LOGO_DIVISOR: u32 = 4;

const DARK: Rgb<u8> = Rgb([0, 0, 0]);
const LIGHT: Rgb<u8> = Rgb([255, 255, 255]);

// =============================================================================
// Options
// =============================================================================

/// QR error-correction level.
///
/// Higher levels trade capacity for resilience; `H` recovers from roughly 30%
/// of modules being obscured, which is what leaves room for a centered logo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ErrorCorrection {
    /// ~7% recovery
    L,
    /// ~15% recovery
    M,
    /// ~25% recovery
    Q,
    /// ~30% recovery
    #[default]
    H,
}

impl From<ErrorCorrection> for EcLevel {
    fn from(level: ErrorCorrection) -> Self {
        match level {
            ErrorCorrection::L => EcLevel::L,
            ErrorCorrection::M => EcLevel::M,
            ErrorCorrection::Q => EcLevel::Q,
            ErrorCorrection::H => EcLevel::H,
        }
    }
}

/// Rendering options for [`QrComposer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComposerOptions {
    /// Error-correction level of the generated symbol
    pub error_correction: ErrorCorrection,

    /// Pixels per module
    pub box_size: u32,

    /// Quiet-zone width in modules
    pub border: u32,

    /// The logo is fit into `canvas / logo_divisor` on each axis
    pub logo_divisor: u32,
}

impl Default for ComposerOptions {
    fn default() -> Self {
        Self {
            error_correction: ErrorCorrection::H,
            box_size: DEFAULT_BOX_SIZE,
            border: DEFAULT_BORDER,
            logo_divisor: DEFAULT_LOGO_DIVISOR,
        }
    }
}

impl ComposerOptions {
    pub fn with_error_correction(mut self, level: ErrorCorrection) -> Self {
        self.error_correction = level;
        self
    }

    pub fn with_box_size(mut self, box_size: u32) -> Self {
        self.box_size = box_size;
        self
    }

    pub fn with_border(mut self, border: u32) -> Self {
        self.border = border;
        self
    }
}

// =============================================================================
// Composer
// =============================================================================

/// Renders payloads into PNG-encoded QR codes with an optional centered logo.
///
/// The composer is immutable and holds no per-request state, so a single
/// instance can be shared across threads behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct QrComposer {
    options: ComposerOptions,
}

impl QrComposer {
    /// Create a composer with the given options.
    pub fn new(options: ComposerOptions) -> Self {
        Self { options }
    }

    /// Get the rendering options.
    pub fn options(&self) -> &ComposerOptions {
        &self.options
    }

    /// Encode the payload into the smallest QR version that fits.
    fn encode(&self, payload: &str) -> Result<QrCode, ComposeError> {
        let code = QrCode::with_error_correction_level(
            payload.as_bytes(),
            self.options.error_correction.into(),
        )?;
        Ok(code)
    }

    /// Side length in pixels of the canvas for a symbol `modules` wide.
    fn side_for(&self, modules: usize) -> Result<u32, ComposeError> {
        let invalid = || ComposeError::InvalidCanvas {
            modules,
            box_size: self.options.box_size,
        };

        if self.options.box_size == 0 {
            return Err(invalid());
        }

        u32::try_from(modules)
            .ok()
            .and_then(|m| m.checked_add(self.options.border.checked_mul(2)?))
            .and_then(|m| m.checked_mul(self.options.box_size))
            .ok_or_else(invalid)
    }

    /// Side length in pixels of the canvas the payload renders to.
    ///
    /// Equals `(module_count + 2 * border) * box_size`.
    pub fn canvas_size(&self, payload: &str) -> Result<u32, ComposeError> {
        let code = self.encode(payload)?;
        self.side_for(code.width())
    }

    /// Encode and rasterize the payload to a black-on-white RGB image.
    pub fn render(&self, payload: &str) -> Result<RgbImage, ComposeError> {
        let code = self.encode(payload)?;
        let modules = code.width();
        let side = self.side_for(modules)?;

        debug!(
            version = ?code.version(),
            modules = modules,
            side = side,
            "Encoded QR symbol"
        );

        let colors = code.to_colors();
        let box_size = self.options.box_size;
        let border = self.options.border;

        let canvas = RgbImage::from_fn(side, side, |px, py| {
            let (mx, my) = (px / box_size, py / box_size);
            if mx < border || my < border {
                return LIGHT;
            }
            let (x, y) = ((mx - border) as usize, (my - border) as usize);
            if x >= modules || y >= modules {
                return LIGHT;
            }
            match colors[y * modules + x] {
                Color::Dark => DARK,
                Color::Light => LIGHT,
            }
        });

        Ok(canvas)
    }

    /// Render the payload, paste the logo if given, and return PNG bytes.
    ///
    /// # Errors
    ///
    /// - [`ComposeError::Encoding`] if the payload exceeds the symbol capacity
    /// - [`ComposeError::LogoDecode`] if `logo` is not a decodable image
    /// - [`ComposeError::PngEncode`] if PNG serialization fails
    pub fn compose(&self, payload: &str, logo: Option<&[u8]>) -> Result<Bytes, ComposeError> {
        let mut canvas = self.render(payload)?;

        if let Some(logo_bytes) = logo {
            let logo = image::load_from_memory(logo_bytes).map_err(|e| {
                ComposeError::LogoDecode {
                    message: e.to_string(),
                }
            })?;
            paste_logo(&mut canvas, &logo, self.options.logo_divisor);
        }

        let mut output = Vec::new();
        canvas
            .write_to(&mut Cursor::new(&mut output), ImageFormat::Png)
            .map_err(|e| ComposeError::PngEncode {
                message: e.to_string(),
            })?;

        Ok(Bytes::from(output))
    }
}

// =============================================================================
// Tests
// =============================================================================
