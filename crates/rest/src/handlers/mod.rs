//! HTTP request handlers.
//!
//! - [`hl7`] - Runs the message pipeline
//! - [`hello`] - Plain-text greeting endpoints
//! - [`health`] - Health check endpoints

pub mod health;
pub mod hello;
pub mod hl7;

// Re-export handlers for convenience
pub use health::{health_handler, liveness_handler};
pub use hello::{service1_handler, service2_handler};
pub use hl7::create_message_handler;
