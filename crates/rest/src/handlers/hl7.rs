//! Message creation handler.

use axum::extract::{Query, State};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{RestError, RestResult};
use crate::state::AppState;

/// Body returned when a run completes.
pub const CREATED_MESSAGE: &str = "HL7 message created successfully!";

/// Query parameters of `GET /hl7/createMessage`.
#[derive(Debug, Default, Deserialize)]
pub struct CreateMessageParams {
    /// Trigger event code; the configured default when absent.
    #[serde(rename = "type")]
    pub message_type: Option<String>,
}

/// Builds a message, writes both encodings and prints it.
///
/// The pipeline does blocking file IO, so it runs on the blocking pool.
///
/// # HTTP Request
///
/// `GET [base]/hl7/createMessage[?type=A01]`
///
/// # Response
///
/// - `200 OK` - `HL7 message created successfully!`
/// - `400 Bad Request` - the trigger event is not supported
/// - `500 Internal Server Error` - building, encoding or writing failed
pub async fn create_message_handler(
    State(state): State<AppState>,
    Query(params): Query<CreateMessageParams>,
) -> RestResult<&'static str> {
    let message_type = params
        .message_type
        .unwrap_or_else(|| state.default_message_type().to_string());
    debug!(message_type = %message_type, "Processing createMessage request");

    let pipeline = state.pipeline_arc();
    let report = tokio::task::spawn_blocking(move || pipeline.run(&message_type))
        .await
        .map_err(|e| RestError::InternalError {
            message: format!("pipeline task failed: {}", e),
        })??;

    info!(
        control_id = %report.control_id,
        pipe_bytes = report.pipe_bytes,
        xml_bytes = report.xml_bytes,
        "Message created"
    );
    Ok(CREATED_MESSAGE)
}
