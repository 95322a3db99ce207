//! The message pipeline behind `GET /hl7/createMessage`.
//!
//! One run builds a message, encodes it in both grammars, writes each
//! encoding to its artifact and prints the encoded message and the structure
//! dump. Steps run in this order, and the first failure aborts the rest:
//!
//! 1. create the message through the [`MessageFactory`]
//! 2. encode it as ER7
//! 3. print the ER7 text
//! 4. write the ER7 artifact
//! 5. encode it as XML and write the XML artifact
//! 6. print the structure dump
//!
//! Artifact names are fixed per pipeline, so runs take a write lock around
//! steps 4 and 5. Concurrent runs never interleave their files; the last run
//! to take the lock wins.

pub mod sink;

use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use courier_hl7::{BuildError, Message, MessageFactory, SystemClock, print_structure};
use courier_serde::pipe::to_pipe_string;
use courier_serde::xml::to_xml_string;
use courier_serde::{SegmentTerminator, SerdeError};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::{DEFAULT_PIPE_OUTPUT_FILE, DEFAULT_XML_OUTPUT_FILE, ServerConfig};

pub use sink::{ArtifactError, ArtifactSink, DumpSink, FileSystemSink, MemorySink, StdoutSink};

/// Errors that abort a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// No builder is registered for the requested trigger event.
    #[error("{code} message type is not supported yet")]
    UnsupportedType {
        /// The requested trigger event code.
        code: String,
    },

    /// The builder rejected a value.
    #[error("failed to build message: {0}")]
    Construction(#[source] BuildError),

    /// An encoder rejected the message.
    #[error("failed to encode message: {0}")]
    Encoding(#[from] SerdeError),

    /// An artifact could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Io {
        /// The artifact path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// Console output failed.
    #[error("failed to print message: {0}")]
    Dump(#[source] io::Error),
}

impl From<BuildError> for PipelineError {
    fn from(err: BuildError) -> Self {
        match err {
            BuildError::UnsupportedType { code } => PipelineError::UnsupportedType { code },
            other => PipelineError::Construction(other),
        }
    }
}

impl From<ArtifactError> for PipelineError {
    fn from(err: ArtifactError) -> Self {
        PipelineError::Io {
            path: err.path,
            source: err.source,
        }
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    /// MSH-10 of the built message.
    pub control_id: String,
    /// Message structure name (`ADT_A01`).
    pub structure: String,
    /// Where the ER7 encoding was written.
    pub pipe_path: PathBuf,
    /// Size of the ER7 encoding in bytes.
    pub pipe_bytes: usize,
    /// Where the XML encoding was written.
    pub xml_path: PathBuf,
    /// Size of the XML encoding in bytes.
    pub xml_bytes: usize,
}

/// Builds, encodes and stores messages.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use courier_hl7::{MessageFactory, SystemClock};
/// use courier_rest::pipeline::{FileSystemSink, MemorySink, Pipeline};
///
/// let dir = tempfile::tempdir().unwrap();
/// let pipeline = Pipeline::new(
///     MessageFactory::with_defaults(Arc::new(SystemClock)),
///     Arc::new(FileSystemSink::new(dir.path())),
///     Arc::new(MemorySink::new()),
/// );
/// let report = pipeline.run("A01").unwrap();
/// assert_eq!(report.structure, "ADT_A01");
/// ```
#[derive(Debug)]
pub struct Pipeline {
    factory: MessageFactory,
    artifacts: Arc<dyn ArtifactSink>,
    dump: Arc<dyn DumpSink>,
    pipe_artifact: String,
    xml_artifact: String,
    terminator: SegmentTerminator,
    write_lock: Mutex<()>,
}

impl Pipeline {
    /// Creates a pipeline with the default artifact names and terminator.
    pub fn new(
        factory: MessageFactory,
        artifacts: Arc<dyn ArtifactSink>,
        dump: Arc<dyn DumpSink>,
    ) -> Self {
        Self {
            factory,
            artifacts,
            dump,
            pipe_artifact: DEFAULT_PIPE_OUTPUT_FILE.to_string(),
            xml_artifact: DEFAULT_XML_OUTPUT_FILE.to_string(),
            terminator: SegmentTerminator::default(),
            write_lock: Mutex::new(()),
        }
    }

    /// Creates the production pipeline described by `config`: wall-clock
    /// time, files in `config.output_dir`, console output on stdout.
    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(
            MessageFactory::with_defaults(Arc::new(SystemClock)),
            Arc::new(FileSystemSink::new(&config.output_dir)),
            Arc::new(StdoutSink),
        )
        .with_artifact_names(&config.pipe_output_file, &config.xml_output_file)
        .with_terminator(config.segment_terminator)
    }

    /// Sets the artifact names of the two encodings.
    pub fn with_artifact_names(mut self, pipe: impl Into<String>, xml: impl Into<String>) -> Self {
        self.pipe_artifact = pipe.into();
        self.xml_artifact = xml.into();
        self
    }

    /// Sets the ER7 segment terminator.
    pub fn with_terminator(mut self, terminator: SegmentTerminator) -> Self {
        self.terminator = terminator;
        self
    }

    /// Returns the message factory.
    pub fn factory(&self) -> &MessageFactory {
        &self.factory
    }

    /// Runs the pipeline for one trigger event code.
    pub fn run(&self, message_type: &str) -> Result<PipelineReport, PipelineError> {
        info!(message_type, "Creating HL7 message");
        let message = self.factory.create(message_type)?;
        info!(structure = message.structure(), "Message was constructed successfully");

        let er7 = to_pipe_string(message.as_ref(), self.terminator)?;
        self.dump.print(&er7).map_err(PipelineError::Dump)?;

        let (pipe_path, xml_path, xml_bytes) = {
            let _guard = self
                .write_lock
                .lock()
                .unwrap_or_else(PoisonError::into_inner);

            let pipe_path = self.artifacts.write(&self.pipe_artifact, er7.as_bytes())?;
            info!(path = %pipe_path.display(), "Message serialized to file");

            let xml = to_xml_string(message.as_ref())?;
            let xml_path = self.artifacts.write(&self.xml_artifact, xml.as_bytes())?;
            info!(path = %xml_path.display(), "Message serialized to file");

            (pipe_path, xml_path, xml.len())
        };

        debug!("Printing message structure");
        self.dump
            .print(&print_structure(message.as_ref()))
            .map_err(PipelineError::Dump)?;

        Ok(PipelineReport {
            control_id: control_id(message.as_ref()),
            structure: message.structure().to_string(),
            pipe_path,
            pipe_bytes: er7.len(),
            xml_path,
            xml_bytes,
        })
    }
}

fn control_id(message: &dyn Message) -> String {
    message
        .segments()
        .iter()
        .find(|segment| segment.id() == "MSH")
        .and_then(|msh| msh.field(10).as_text())
        .unwrap_or_default()
        .to_string()
}
