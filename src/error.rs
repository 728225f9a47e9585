use thiserror::Error;

/// Errors that can occur while composing a QR code image
#[derive(Debug, Error)]
pub enum ComposeError {
    /// Payload does not fit in a QR symbol at the configured error-correction level
    #[error("Failed to encode QR code: {0}")]
    Encoding(#[from] qrcode::types::QrError),

    /// Supplied logo bytes are not a decodable image
    #[error("Failed to decode logo image: {message}")]
    LogoDecode { message: String },

    /// The final canvas could not be written as PNG
    #[error("Failed to encode PNG: {message}")]
    PngEncode { message: String },

    /// Options produce a canvas that is empty or overflows u32
    #[error("Cannot build a QR canvas of {modules} modules at {box_size}px per module")]
    InvalidCanvas { modules: usize, box_size: u32 },
}

impl ComposeError {
    /// True when the payload itself could not be encoded.
    pub fn is_payload_error(&self) -> bool {
        matches!(self, ComposeError::Encoding(_))
    }
}
