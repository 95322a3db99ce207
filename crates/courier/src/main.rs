//! Courier
//!
//! Serves the HL7 v2 admission message gateway over HTTP.

use clap::Parser;
use courier_rest::{ServerConfig, create_app, init_logging};
use tracing::info;

/// Starts the Axum HTTP server.
async fn serve(app: axum::Router, config: &ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    info!(address = %addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    info!(
        port = config.port,
        host = %config.host,
        output_dir = %config.output_dir.display(),
        pipe_output = %config.pipe_output_path().display(),
        xml_output = %config.xml_output_path().display(),
        segment_terminator = %config.segment_terminator,
        "Starting Courier gateway"
    );

    let app = create_app(config.clone());
    serve(app, &config).await
}
