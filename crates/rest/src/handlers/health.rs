//! Probes for load balancers and orchestrators.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::error::RestResult;
use crate::state::AppState;

/// `GET [base]/health`
///
/// Reports the trigger events the gateway can build and the one used when a
/// request names none.
pub async fn health_handler(State(state): State<AppState>) -> RestResult<Response> {
    debug!("Health probe");

    let health_response = serde_json::json!({
        "status": "healthy",
        "messageTypes": state.pipeline().factory().supported_types(),
        "defaultMessageType": state.default_message_type(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    });

    Ok((StatusCode::OK, Json(health_response)).into_response())
}

/// `GET [base]/_liveness`
pub async fn liveness_handler() -> impl IntoResponse {
    StatusCode::OK
}
