//! Server configuration for the Courier gateway.
//!
//! Every setting can come from a command line flag, a `COURIER_*` environment
//! variable or a struct literal in code. Flags win over the environment.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `COURIER_SERVER_PORT` | 8080 | Server port |
//! | `COURIER_SERVER_HOST` | 127.0.0.1 | Host to bind |
//! | `COURIER_LOG_LEVEL` | info | Log level |
//! | `COURIER_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `COURIER_ENABLE_CORS` | true | Enable CORS |
//! | `COURIER_CORS_ORIGINS` | * | Allowed origins |
//! | `COURIER_OUTPUT_DIR` | . | Directory the encoded messages are written to |
//! | `COURIER_PIPE_OUTPUT_FILE` | testPipeDelimitedOutputFile.txt | Pipe-delimited output file name |
//! | `COURIER_XML_OUTPUT_FILE` | testXmlOutputFile.xml | XML output file name |
//! | `COURIER_MESSAGE_TYPE` | A01 | Trigger event built when a request names none |
//! | `COURIER_SEGMENT_TERMINATOR` | cr | Pipe segment terminator (cr, lf, crlf) |
//!
//! # Example
//!
//! ```rust
//! use courier_rest::ServerConfig;
//!
//! let from_env = ServerConfig::from_env();
//! assert!(from_env.validate().is_ok());
//!
//! let config = ServerConfig {
//!     output_dir: "/var/lib/courier".into(),
//!     ..Default::default()
//! };
//! assert!(config.xml_output_path().ends_with("testXmlOutputFile.xml"));
//! ```

use std::path::{Path, PathBuf};

use clap::Parser;
use courier_serde::SegmentTerminator;

/// Default name of the pipe-delimited output file.
pub const DEFAULT_PIPE_OUTPUT_FILE: &str = "testPipeDelimitedOutputFile.txt";

/// Default name of the XML output file.
pub const DEFAULT_XML_OUTPUT_FILE: &str = "testXmlOutputFile.xml";

/// Settings of the HTTP listener and of the message pipeline.
///
/// Parse it with [`ServerConfig::parse`] in the binary; use
/// [`ServerConfig::from_env`] or a struct literal elsewhere.
#[derive(Debug, Clone, Parser)]
#[command(name = "courier")]
#[command(about = "HL7 v2 admission message gateway")]
pub struct ServerConfig {
    /// TCP port of the HTTP listener.
    #[arg(short, long, env = "COURIER_SERVER_PORT", default_value = "8080")]
    pub port: u16,

    /// Interface the listener binds to.
    #[arg(long, env = "COURIER_SERVER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Level for the courier crates when `RUST_LOG` is unset.
    #[arg(long, env = "COURIER_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Seconds before a request is answered with 408.
    #[arg(long, env = "COURIER_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Whether to answer cross-origin requests.
    #[arg(long, env = "COURIER_ENABLE_CORS", default_value = "true")]
    pub enable_cors: bool,

    /// Origins allowed by CORS: `*` or a comma-separated list.
    #[arg(long, env = "COURIER_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Directory the encoded messages are written to.
    #[arg(long, env = "COURIER_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// File name of the pipe-delimited output.
    #[arg(long, env = "COURIER_PIPE_OUTPUT_FILE", default_value = DEFAULT_PIPE_OUTPUT_FILE)]
    pub pipe_output_file: String,

    /// File name of the XML output.
    #[arg(long, env = "COURIER_XML_OUTPUT_FILE", default_value = DEFAULT_XML_OUTPUT_FILE)]
    pub xml_output_file: String,

    /// Trigger event built when a request does not name one.
    #[arg(long, env = "COURIER_MESSAGE_TYPE", default_value = "A01")]
    pub message_type: String,

    /// Segment terminator of the pipe-delimited output (cr, lf, crlf).
    #[arg(long, env = "COURIER_SEGMENT_TERMINATOR", default_value = "cr")]
    pub segment_terminator: SegmentTerminator,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            request_timeout: 30,
            enable_cors: true,
            cors_origins: "*".to_string(),
            output_dir: PathBuf::from("."),
            pipe_output_file: DEFAULT_PIPE_OUTPUT_FILE.to_string(),
            xml_output_file: DEFAULT_XML_OUTPUT_FILE.to_string(),
            message_type: "A01".to_string(),
            segment_terminator: SegmentTerminator::Cr,
        }
    }
}

impl ServerConfig {
    /// Reads the `COURIER_*` environment variables, ignoring the process
    /// arguments. Unparseable input yields the defaults.
    pub fn from_env() -> Self {
        Self::try_parse_from(["courier"]).unwrap_or_default()
    }

    /// Returns `host:port`.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the path of the pipe-delimited output file.
    pub fn pipe_output_path(&self) -> PathBuf {
        self.output_dir.join(&self.pipe_output_file)
    }

    /// Returns the path of the XML output file.
    pub fn xml_output_path(&self) -> PathBuf {
        self.output_dir.join(&self.xml_output_file)
    }

    /// Checks the settings and returns every problem found.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port must be between 1 and 65535".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout must be at least one second".to_string());
        }

        for (label, name) in [
            ("Pipe output file", &self.pipe_output_file),
            ("XML output file", &self.xml_output_file),
        ] {
            if !is_plain_file_name(name) {
                errors.push(format!("{} must be a plain file name, got '{}'", label, name));
            }
        }

        if self.pipe_output_file == self.xml_output_file {
            errors.push("Pipe and XML output files cannot be the same".to_string());
        }

        if self.message_type.trim().is_empty() {
            errors.push("Message type cannot be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Returns settings for tests: artifacts go to `output_dir`, the port is
    /// left to the OS and CORS is off.
    pub fn for_testing(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            port: 0,
            log_level: "debug".to_string(),
            request_timeout: 5,
            enable_cors: false,
            output_dir: output_dir.into(),
            ..Default::default()
        }
    }
}

fn is_plain_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(std::path::Component::Normal(_)), None)
    )
}
