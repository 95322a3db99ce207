//! Output destinations of a pipeline run.
//!
//! [`ArtifactSink`] receives the encoded message files; [`DumpSink`] receives
//! the console output (the encoded message and the structure dump).

use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use thiserror::Error;
use tracing::debug;

/// A failed artifact write.
#[derive(Debug, Error)]
#[error("failed to write {}: {source}", path.display())]
pub struct ArtifactError {
    /// Where the write was attempted.
    pub path: PathBuf,
    /// The underlying IO error.
    #[source]
    pub source: io::Error,
}

/// Destination for named encoded artifacts.
pub trait ArtifactSink: fmt::Debug + Send + Sync {
    /// Replaces the artifact called `name` with `bytes` and returns where it
    /// was stored.
    fn write(&self, name: &str, bytes: &[u8]) -> Result<PathBuf, ArtifactError>;
}

/// Writes artifacts as files inside one directory.
#[derive(Debug, Clone)]
pub struct FileSystemSink {
    root: PathBuf,
}

impl FileSystemSink {
    /// Creates a sink rooted at `root`. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the output directory.
    pub fn root(&self) -> &PathBuf {
        &self.root
    }
}

impl ArtifactSink for FileSystemSink {
    fn write(&self, name: &str, bytes: &[u8]) -> Result<PathBuf, ArtifactError> {
        let path = self.root.join(name);
        let fail = |source| ArtifactError {
            path: path.clone(),
            source,
        };

        fs::create_dir_all(&self.root).map_err(fail)?;
        let mut writer = BufWriter::new(File::create(&path).map_err(fail)?);
        writer.write_all(bytes).map_err(fail)?;
        let file = writer.into_inner().map_err(|e| fail(e.into_error()))?;
        file.sync_all().map_err(fail)?;

        debug!(path = %path.display(), bytes = bytes.len(), "Artifact written");
        Ok(path)
    }
}

/// Destination for console output.
pub trait DumpSink: fmt::Debug + Send + Sync {
    /// Emits one block of text.
    fn print(&self, text: &str) -> io::Result<()>;
}

/// Prints to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl DumpSink for StdoutSink {
    fn print(&self, text: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{}", text)?;
        out.flush()
    }
}

/// Keeps printed blocks in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<String>>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every block printed so far, oldest first.
    pub fn entries(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl DumpSink for MemorySink {
    fn print(&self, text: &str) -> io::Result<()> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(text.to_string());
        Ok(())
    }
}
