//! # QR Logo Server
//!
//! An HTTP service that renders a URL as a QR code, optionally places a logo
//! at its center, and returns the PNG as a hex string.
//!
//! ## Features
//!
//! - **High error correction**: Symbols default to level H so a centered logo
//!   stays scannable
//! - **Logo compositing**: Logos are thumbnailed to a quarter of the canvas and
//!   pasted with their alpha channel as mask
//! - **Stateless**: Every request renders from scratch, nothing is stored
//!
//! ## Architecture
//!
//! - [`qr`] - QR encoding, rasterization and logo overlay
//! - [`server`] - Axum-based HTTP server and routes
//! - [`config`] - CLI and configuration types
//! - [`error`] - Error types
//!
//! ## Example
//!
//! ```rust,no_run
//! use qr_logo_server::{create_router, QrComposer, RouterConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let router = create_router(QrComposer::default(), RouterConfig::new());
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await.unwrap();
//!     axum::serve(listener, router).await.unwrap();
//! }
//! ```

pub mod config;
pub mod error;
pub mod qr;
pub mod server;

// Re-export commonly used types
pub use config::Config;
pub use error::ComposeError;
pub use qr::{center_offset, thumbnail_size, ComposerOptions, ErrorCorrection, QrComposer};
pub use server::{
    create_router, generate_handler, health_handler, ApiError, AppState, ErrorResponse,
    GenerateResponse, HealthResponse, RouterConfig,
};
