//! Gateway route configuration.

use axum::{Router, routing::get};

use crate::handlers;
use crate::state::AppState;

/// Creates all gateway routes.
///
/// # Routes
///
/// - `GET /hl7/createMessage` - Build, encode and store a message
/// - `GET /service1/hello` - Greeting
/// - `GET /service2/hello` - Greeting
/// - `GET /health` - Health check
/// - `GET /_liveness` - Liveness probe
pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/hl7/createMessage",
            get(handlers::create_message_handler),
        )
        .route("/service1/hello", get(handlers::service1_handler))
        .route("/service2/hello", get(handlers::service2_handler))
        .route("/health", get(handlers::health_handler))
        .route("/_liveness", get(handlers::liveness_handler))
        .with_state(state)
}
