//! HTTP server layer for the QR logo server.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         HTTP Layer                              │
//! │              POST /generate (multipart/form-data)               │
//! │                                                                 │
//! │  ┌──────────────────────────┐  ┌──────────────────────────────┐ │
//! │  │        handlers          │  │           routes             │ │
//! │  │ (form parsing, errors)   │  │ (CORS, tracing, body limit)  │ │
//! │  └──────────────────────────┘  └──────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod handlers;
pub mod routes;

pub use handlers::{
    generate_handler, health_handler, ApiError, AppState, ErrorResponse, GenerateForm,
    GenerateResponse, HealthResponse,
};
pub use routes::{create_router, RouterConfig};
