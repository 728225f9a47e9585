//! HTTP request handlers for the QR generation API.
//!
//! # Endpoints
//!
//! - `POST /generate` - Render a QR code, optionally with a logo
//! - `GET /health` - Health check endpoint

use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::error::ComposeError;
use crate::qr::QrComposer;

/// Multipart field carrying the payload.
pub const URL_FIELD: &str = "url";

/// Multipart field carrying the optional logo file.
pub const LOGO_FIELD: &str = "logo";

/// Message returned when the `url` field is absent or empty.
pub const MISSING_URL_MESSAGE: &str = "URL is required";

// =============================================================================
// Application State
// =============================================================================

/// Shared application state containing the QR composer.
///
/// This is passed to all handlers via Axum's State extractor.
#[derive(Clone)]
pub struct AppState {
    /// Renders QR codes; immutable and shared by all requests
    pub composer: Arc<QrComposer>,
}

impl AppState {
    /// Create a new application state with the given composer.
    pub fn new(composer: QrComposer) -> Self {
        Self {
            composer: Arc::new(composer),
        }
    }
}

// =============================================================================
// Request Parameters
// =============================================================================

/// Fields read from a `POST /generate` multipart body.
#[derive(Debug, Default)]
pub struct GenerateForm {
    /// Payload to encode
    pub url: Option<String>,

    /// Raw logo image bytes
    pub logo: Option<Bytes>,

    /// Filename the client sent with the logo part
    pub logo_filename: Option<String>,
}

impl GenerateForm {
    /// Read the known fields from a multipart stream.
    ///
    /// The first occurrence of each field wins; unknown fields are skipped.
    /// A `logo` part only counts when it is a file part (it carries a
    /// `filename`). The `url` field is decoded as UTF-8 with invalid sequences
    /// replaced by U+FFFD.
    pub async fn read(multipart: &mut Multipart) -> Result<Self, ApiError> {
        let mut form = GenerateForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::Multipart(e.body_text()))?
        {
            let name = field.name().map(str::to_owned);
            match name.as_deref() {
                Some(URL_FIELD) if form.url.is_none() => {
                    let data = field
                        .bytes()
                        .await
                        .map_err(|e| ApiError::Multipart(e.body_text()))?;
                    form.url = Some(String::from_utf8_lossy(&data).into_owned());
                }
                Some(LOGO_FIELD) if form.logo.is_none() && field.file_name().is_some() => {
                    let filename = field.file_name().map(str::to_owned);
                    let data = field
                        .bytes()
                        .await
                        .map_err(|e| ApiError::Multipart(e.body_text()))?;
                    form.logo = Some(data);
                    form.logo_filename = filename;
                }
                _ => {}
            }
        }

        Ok(form)
    }

    /// The payload, unless missing or empty.
    pub fn payload(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.is_empty())
    }

    /// The logo bytes, unless no file was chosen.
    ///
    /// Browsers submit a part with an empty filename for a file input left
    /// blank. A named upload is returned even when it is empty, and then
    /// fails to decode.
    pub fn logo_bytes(&self) -> Option<Bytes> {
        match self.logo_filename.as_deref() {
            Some(name) if !name.is_empty() => self.logo.clone(),
            _ => None,
        }
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// Successful `POST /generate` response.
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Lowercase hex encoding of the PNG bytes
    pub qr_code: String,
}

/// JSON error response returned for all error conditions.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}

impl ErrorResponse {
    /// Create a new error response.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}

// =============================================================================
// Error Mapping
// =============================================================================

/// Errors surfaced by the HTTP handlers.
#[derive(Debug)]
pub enum ApiError {
    /// Required `url` field absent or empty
    MissingUrl,

    /// QR rendering failed
    Compose(ComposeError),

    /// The multipart body could not be read
    Multipart(String),

    /// Unexpected failure (e.g. the blocking render task panicked)
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingUrl => StatusCode::BAD_REQUEST,
            ApiError::Compose(_) | ApiError::Multipart(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message exposed to the caller.
    pub fn message(&self) -> String {
        match self {
            ApiError::MissingUrl => MISSING_URL_MESSAGE.to_string(),
            ApiError::Compose(err) => err.to_string(),
            ApiError::Multipart(msg) => format!("Failed to read form data: {}", msg),
            ApiError::Internal(msg) => format!("Internal error: {}", msg),
        }
    }
}

impl From<ComposeError> for ApiError {
    fn from(err: ComposeError) -> Self {
        ApiError::Compose(err)
    }
}

/// Convert ApiError to HTTP response.
///
/// - 4xx errors are logged at WARN level (client errors)
/// - 5xx errors are logged at ERROR level (server errors)
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();

        if status.is_server_error() {
            match &self {
                ApiError::Compose(err) if err.is_payload_error() => {
                    warn!(status = status.as_u16(), "Payload rejected: {}", message)
                }
                _ => error!(status = status.as_u16(), "Server error: {}", message),
            }
        } else {
            warn!(status = status.as_u16(), "Client error: {}", message);
        }

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle QR generation requests.
///
/// # Endpoint
///
/// `POST /generate`
///
/// # Form Fields (multipart/form-data)
///
/// - `url`: Text to encode (required)
/// - `logo`: Image file to place at the center (optional)
///
/// # Response
///
/// - `200 OK`: `{"qr_code": "<hex-encoded PNG>"}`
/// - `400 Bad Request`: `{"error": "URL is required"}`
/// - `500 Internal Server Error`: `{"error": "<message>"}`
pub async fn generate_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let form = match multipart {
        Ok(mut multipart) => GenerateForm::read(&mut multipart).await?,
        Err(rejection) => {
            // Not a multipart body, so there is no url field either
            debug!("Request without multipart form: {}", rejection);
            GenerateForm::default()
        }
    };

    let payload = form.payload().ok_or(ApiError::MissingUrl)?.to_owned();
    let logo = form.logo_bytes();

    info!(
        payload_len = payload.len(),
        logo_bytes = logo.as_ref().map_or(0, |l| l.len()),
        "Generating QR code"
    );

    let composer = Arc::clone(&state.composer);
    let png = tokio::task::spawn_blocking(move || composer.compose(&payload, logo.as_deref()))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    debug!(png_bytes = png.len(), "QR code generated");

    Ok(Json(GenerateResponse {
        qr_code: hex::encode(&png),
    }))
}

/// Handle health check requests.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response
///
/// `200 OK` with JSON body:
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0"
/// }
/// ```
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// =============================================================================
// Tests
// =============================================================================
