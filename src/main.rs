//! QR logo server - renders QR codes with a centered logo over HTTP.
//!
//! This binary starts the HTTP server and configures all components.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use qr_logo_server::{
    config::Config,
    qr::QrComposer,
    server::{create_router, RouterConfig},
};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();
    run_serve(config).await
}

async fn run_serve(config: Config) -> ExitCode {
    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let options = config.composer_options();

    info!("QR logo server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration:");
    info!("  Error correction: {:?}", options.error_correction);
    info!(
        "  Module size: {}px, border: {} modules",
        options.box_size, options.border
    );
    info!("  Max upload: {} bytes", config.max_upload_bytes);
    match config.cors_origins {
        Some(ref origins) => info!("  CORS origins: {}", origins.join(", ")),
        None => info!("  CORS origins: any"),
    }
    if config.verbose {
        warn!("  Verbose logging enabled; pass --verbose=false in production");
    }

    let router = create_router(QrComposer::new(options), build_router_config(&config));

    let addr = config.bind_address();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    info!("Server listening on: http://{}", addr);
    info!(
        "  Try: curl -F url=https://example.com http://{}/generate",
        addr
    );

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "qr_logo_server=debug,tower_http=debug"
    } else {
        "qr_logo_server=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build RouterConfig from the application Config.
fn build_router_config(config: &Config) -> RouterConfig {
    let router_config = RouterConfig::new().with_max_upload_bytes(config.max_upload_bytes);

    let router_config = match config.cors_origins {
        Some(ref origins) => router_config.with_cors_origins(origins.clone()),
        None => router_config.with_cors_any_origin(),
    };

    router_config.with_tracing(!config.no_tracing)
}
