//! Configuration management for the QR logo server.
//!
//! This module provides a flexible configuration system that supports:
//! - Command-line arguments via clap
//! - Environment variables with `QR_` prefix
//! - Sensible defaults for all optional settings
//!
//! # Environment Variables
//!
//! - `QR_HOST` - Server bind address (default: 0.0.0.0)
//! - `QR_PORT` - Server port (default: 5000)
//! - `QR_ERROR_CORRECTION` - QR error-correction level, one of l, m, q, h (default: h)
//! - `QR_BOX_SIZE` - Pixels per module (default: 10)
//! - `QR_BORDER` - Quiet-zone width in modules (default: 4)
//! - `QR_MAX_UPLOAD_BYTES` - Maximum request body size (default: 10MB)
//! - `QR_CORS_ORIGINS` - Comma-separated allowed origins (default: any)
//! - `QR_VERBOSE` - Debug logging (default: true)

use clap::{ArgAction, Parser};

use crate::qr::{ComposerOptions, ErrorCorrection, DEFAULT_BORDER, DEFAULT_BOX_SIZE};

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 5000;

/// Default maximum upload size in bytes (10MB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Largest accepted module size in pixels.
pub const MAX_BOX_SIZE: u32 = 100;

/// Largest accepted quiet zone in modules.
pub const MAX_BORDER: u32 = 64;

// =============================================================================
// CLI Arguments
// =============================================================================

/// QR logo server - renders QR codes with a centered logo over HTTP.
#[derive(Parser, Debug, Clone)]
#[command(name = "qr-logo-server")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "QR_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "QR_PORT")]
    pub port: u16,

    /// Maximum accepted request body size in bytes (covers the logo upload).
    #[arg(long, default_value_t = DEFAULT_MAX_UPLOAD_BYTES, env = "QR_MAX_UPLOAD_BYTES")]
    pub max_upload_bytes: usize,

    // =========================================================================
    // QR Rendering
    // =========================================================================
    /// Error-correction level of generated symbols.
    #[arg(long, value_enum, default_value_t = ErrorCorrection::H, env = "QR_ERROR_CORRECTION")]
    pub error_correction: ErrorCorrection,

    /// Pixel size of one QR module.
    #[arg(long, default_value_t = DEFAULT_BOX_SIZE, env = "QR_BOX_SIZE")]
    pub box_size: u32,

    /// Width of the blank border, in modules.
    #[arg(long, default_value_t = DEFAULT_BORDER, env = "QR_BORDER")]
    pub border: u32,

    // =========================================================================
    // CORS Configuration
    // =========================================================================
    /// Allowed CORS origins (comma-separated).
    ///
    /// If not specified, allows any origin.
    #[arg(long, env = "QR_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Option<Vec<String>>,

    // =========================================================================
    // Logging Configuration
    // =========================================================================
    /// Enable verbose logging (debug level). Pass `--verbose=false` to quiet.
    #[arg(short, long, default_value_t = true, action = ArgAction::Set, env = "QR_VERBOSE")]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.box_size == 0 || self.box_size > MAX_BOX_SIZE {
            return Err(format!("box_size must be between 1 and {}", MAX_BOX_SIZE));
        }

        if self.border > MAX_BORDER {
            return Err(format!("border must be at most {}", MAX_BORDER));
        }

        if self.max_upload_bytes == 0 {
            return Err("max_upload_bytes must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Rendering options derived from the configuration.
    pub fn composer_options(&self) -> ComposerOptions {
        ComposerOptions::default()
            .with_error_correction(self.error_correction)
            .with_box_size(self.box_size)
            .with_border(self.border)
    }
}

// =============================================================================
// Tests
// =============================================================================
