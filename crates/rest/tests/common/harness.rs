//! Gateway test harness.
//!
//! Runs the full router against a temporary output directory, a stopped
//! clock and an in-memory console.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use axum_test::TestServer;
use chrono::{NaiveDate, NaiveDateTime};
use courier_hl7::{FixedClock, MessageFactory};
use courier_rest::pipeline::{FileSystemSink, MemorySink, Pipeline};
use courier_rest::{ServerConfig, create_app_with_pipeline};
use tempfile::TempDir;

/// The instant every harness clock starts at.
pub fn start_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 9)
        .and_then(|d| d.and_hms_opt(12, 5, 7))
        .expect("valid date")
}

/// Test harness for the gateway.
///
/// # Example
///
/// ```rust,ignore
/// let harness = GatewayHarness::new();
/// let response = harness.server.get("/hl7/createMessage").await;
/// assert_eq!(response.status_code(), 200);
/// assert!(harness.pipe_path().exists());
/// ```
pub struct GatewayHarness {
    /// The test server instance.
    pub server: TestServer,

    /// The clock used by the message builders.
    pub clock: Arc<FixedClock>,

    /// Everything the pipeline printed.
    pub console: Arc<MemorySink>,

    /// Server configuration.
    pub config: ServerConfig,

    dir: TempDir,
}

impl GatewayHarness {
    /// Creates a harness with the testing configuration.
    pub fn new() -> Self {
        Self::with_config(|config| config)
    }

    /// Creates a harness after adjusting the testing configuration.
    pub fn with_config(adjust: impl FnOnce(ServerConfig) -> ServerConfig) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let config = adjust(ServerConfig::for_testing(dir.path()));

        let clock = Arc::new(FixedClock::new(start_time()));
        let console = Arc::new(MemorySink::new());
        let pipeline = Pipeline::new(
            MessageFactory::with_defaults(clock.clone()),
            Arc::new(FileSystemSink::new(&config.output_dir)),
            console.clone(),
        )
        .with_artifact_names(&config.pipe_output_file, &config.xml_output_file)
        .with_terminator(config.segment_terminator);

        let app = create_app_with_pipeline(pipeline, config.clone());
        let server = TestServer::new(app).expect("Failed to create test server");

        Self {
            server,
            clock,
            console,
            config,
            dir,
        }
    }

    /// Returns the temporary output directory.
    pub fn dir(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Returns the path of the pipe-delimited artifact.
    pub fn pipe_path(&self) -> PathBuf {
        self.config.pipe_output_path()
    }

    /// Returns the path of the XML artifact.
    pub fn xml_path(&self) -> PathBuf {
        self.config.xml_output_path()
    }

    /// Reads the pipe-delimited artifact.
    pub fn read_pipe(&self) -> String {
        fs::read_to_string(self.pipe_path()).expect("Failed to read pipe artifact")
    }

    /// Reads the XML artifact.
    pub fn read_xml(&self) -> String {
        fs::read_to_string(self.xml_path()).expect("Failed to read XML artifact")
    }
}
