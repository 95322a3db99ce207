//! Greeting endpoints.

use tracing::debug;

/// `GET [base]/service1/hello`
pub async fn service1_handler() -> &'static str {
    debug!("Processing service1 greeting");
    "Hello Service1"
}

/// `GET [base]/service2/hello`
pub async fn service2_handler() -> &'static str {
    debug!("Processing service2 greeting");
    "Hello Service 2"
}
