//! Application state for the Courier HTTP surface.
//!
//! Handlers share one [`Pipeline`] and the server configuration. Both are
//! built once at startup.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::pipeline::Pipeline;

/// Shared application state.
///
/// # Example
///
/// ```rust
/// use courier_rest::{AppState, ServerConfig};
/// use courier_rest::pipeline::Pipeline;
///
/// let config = ServerConfig::default();
/// let state = AppState::new(Pipeline::from_config(&config), config);
/// assert!(state.pipeline().factory().supports("A01"));
/// ```
#[derive(Debug, Clone)]
pub struct AppState {
    pipeline: Arc<Pipeline>,
    config: Arc<ServerConfig>,
}

impl AppState {
    /// Creates a new AppState with the given pipeline and configuration.
    pub fn new(pipeline: Pipeline, config: ServerConfig) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the pipeline.
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Returns a clone of the pipeline Arc, for moving into blocking tasks.
    pub fn pipeline_arc(&self) -> Arc<Pipeline> {
        Arc::clone(&self.pipeline)
    }

    /// Returns a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the trigger event built when a request names none.
    pub fn default_message_type(&self) -> &str {
        &self.config.message_type
    }
}
