//! # courier-rest - HL7 v2 Message Gateway
//!
//! This crate exposes the Courier message pipeline over HTTP. A request to
//! `/hl7/createMessage` builds an HL7 v2 admission message, writes it to disk
//! in both the pipe-delimited (ER7) and XML encodings, and prints it together
//! with a structure dump.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use courier_rest::{create_app, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Configure the server
//!     let config = ServerConfig::default();
//!
//!     // Create the Axum application
//!     let app = create_app(config.clone());
//!
//!     // Start the server
//!     let listener = tokio::net::TcpListener::bind(config.socket_addr()).await?;
//!     axum::serve(listener, app).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Endpoint | HTTP Method | Response |
//! |----------|-------------|----------|
//! | `/hl7/createMessage[?type=A01]` | GET | `HL7 message created successfully!` |
//! | `/service1/hello` | GET | `Hello Service1` |
//! | `/service2/hello` | GET | `Hello Service 2` |
//! | `/health` | GET | JSON status |
//! | `/_liveness` | GET | 200 |
//!
//! ## Error Handling
//!
//! Failures are returned as `{"error": {"kind": ..., "message": ...}}` with
//! 400 for unsupported message types and 500 for everything else. See
//! [`error`].
//!
//! ## Architecture
//!
//! - [`config`] - Server configuration
//! - [`error`] - Error types and their HTTP mapping
//! - [`pipeline`] - Build, encode, write and print a message
//! - [`state`] - Application state (pipeline, configuration)
//! - [`handlers`] - HTTP request handlers
//! - [`routing`] - Route configuration

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod pipeline;
pub mod routing;
pub mod state;

// Re-export commonly used types
pub use config::ServerConfig;
pub use error::{RestError, RestResult};
pub use pipeline::{Pipeline, PipelineError, PipelineReport};
pub use state::AppState;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the Axum application for `config`.
///
/// Messages are stamped with wall-clock time, written into
/// `config.output_dir` and printed to stdout. Use
/// [`create_app_with_pipeline`] to supply another pipeline.
pub fn create_app(config: ServerConfig) -> Router {
    let pipeline = Pipeline::from_config(&config);
    create_app_with_pipeline(pipeline, config)
}

/// Creates the Axum application around an existing pipeline.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use courier_hl7::{MessageFactory, SystemClock};
/// use courier_rest::pipeline::{FileSystemSink, MemorySink, Pipeline};
/// use courier_rest::{create_app_with_pipeline, ServerConfig};
///
/// let dir = tempfile::tempdir().unwrap();
/// let pipeline = Pipeline::new(
///     MessageFactory::with_defaults(Arc::new(SystemClock)),
///     Arc::new(FileSystemSink::new(dir.path())),
///     Arc::new(MemorySink::new()),
/// );
/// let app = create_app_with_pipeline(pipeline, ServerConfig::for_testing(dir.path()));
/// ```
pub fn create_app_with_pipeline(pipeline: Pipeline, config: ServerConfig) -> Router {
    info!(
        output_dir = %config.output_dir.display(),
        message_types = ?pipeline.factory().supported_types(),
        "Creating gateway"
    );

    // Create application state
    let state = AppState::new(pipeline, config.clone());

    // Build the router with all gateway routes
    let router = routing::create_routes(state);

    // Build middleware stack
    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::REQUEST_TIMEOUT,
            std::time::Duration::from_secs(config.request_timeout),
        ));

    // Add CORS if enabled
    let router = if config.enable_cors {
        router.layer(build_cors_layer(&config))
    } else {
        router
    };

    router.layer(service_builder)
}

/// Builds the CORS layer from the configured origins.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([axum::http::Method::GET])
        .allow_headers(Any);

    if config.cors_origins == "*" {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup. `RUST_LOG` takes
/// precedence over `level` when set.
///
/// # Arguments
///
/// * `level` - The log level (error, warn, info, debug, trace)
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "courier={level},courier_rest={level},courier_hl7={level},courier_serde={level},tower_http=debug"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
