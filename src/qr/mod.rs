//! QR code composition.
//!
//! This module turns a text payload into a PNG-encoded QR code, optionally with
//! a logo composited at its center.
//!
//! # Pipeline
//!
//! ```text
//! ┌──────────┐   ┌───────────┐   ┌──────────────┐   ┌─────────┐
//! │ payload  │──▶│  encode   │──▶│  rasterize   │──▶│  paste  │──▶ PNG bytes
//! │ (text)   │   │ (qrcode)  │   │ (RGB canvas) │   │  logo?  │
//! └──────────┘   └───────────┘   └──────────────┘   └─────────┘
//! ```
//!
//! # Components
//!
//! - [`QrComposer`]: Entry point, owns the rendering options
//! - [`ComposerOptions`]: Error-correction level, module size, border, logo box divisor
//! - [`overlay`]: Thumbnail sizing, centering and alpha-masked pasting of logos
//!
//! # Example
//!
//! ```
//! use qr_logo_server::qr::QrComposer;
//!
//! let composer = QrComposer::default();
//! let png = composer.compose("https://example.com", None).unwrap();
//! assert_eq!(&png[1..4], b"PNG");
//! ```

mod composer;
pub mod overlay;

pub use composer::{
    ComposerOptions, ErrorCorrection, QrComposer, DEFAULT_BORDER, DEFAULT_BOX_SIZE,
    DEFAULT_LOGO_DIVISOR,
};
pub use overlay::{center_offset, paste_logo, thumbnail_size};
