//! Output destinations for serialized records
//!
//! A [`Sink`] is any byte destination: standard output, a file, a socket,
//! an in-memory buffer. Sinks are shared by reference and never closed by
//! the logger; the embedding application owns their lifetime.

pub mod buffer;

pub use buffer::SharedBuffer;

use crate::core::{LoggerError, Result};
use parking_lot::Mutex;
use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

/// A named, shareable byte destination.
///
/// Cloning a `Sink` shares the underlying writer. Each write holds the
/// sink's lock for the whole record, so lines from concurrent callers never
/// interleave.
#[derive(Clone)]
pub struct Sink {
    name: Arc<str>,
    writer: Arc<Mutex<dyn Write + Send>>,
}

impl Sink {
    /// Wrap any writer.
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self::named("writer", writer)
    }

    pub fn named<W: Write + Send + 'static>(name: impl Into<String>, writer: W) -> Self {
        let name: String = name.into();
        Self {
            name: Arc::from(name),
            writer: Arc::new(Mutex::new(writer)),
        }
    }

    pub fn stdout() -> Self {
        Self::named("stdout", io::stdout())
    }

    pub fn stderr() -> Self {
        Self::named("stderr", io::stderr())
    }

    /// Open `path` for appending, creating it if needed.
    ///
    /// Writes go straight to the file without buffering, one `write_all`
    /// per record.
    pub fn file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                LoggerError::io_operation("opening log file", path.display().to_string(), e)
            })?;
        Ok(Self::named(path.display().to_string(), file))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Write the whole buffer under the sink's lock.
    pub fn write_all(&self, bytes: &[u8]) -> Result<()> {
        self.writer
            .lock()
            .write_all(bytes)
            .map_err(|e| LoggerError::sink_write(self.name(), e))
    }

    pub fn flush(&self) -> Result<()> {
        self.writer
            .lock()
            .flush()
            .map_err(|e| LoggerError::sink_write(self.name(), e))
    }

    /// Whether two handles refer to the same destination.
    pub fn same_destination(&self, other: &Sink) -> bool {
        Arc::ptr_eq(&self.writer, &other.writer)
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink").field("name", &self.name).finish()
    }
}

impl From<SharedBuffer> for Sink {
    fn from(buffer: SharedBuffer) -> Self {
        Sink::named("buffer", buffer)
    }
}

/// Writes the same bytes to several sinks in order.
///
/// The first failing sink aborts the write: later sinks do not receive the
/// record and the error is returned. Nothing is retried.
#[derive(Debug, Clone)]
pub struct MultiSink {
    sinks: Vec<Sink>,
}

impl MultiSink {
    /// Build a fan-out over `sinks`, falling back to stdout when empty.
    pub fn new(sinks: Vec<Sink>) -> Self {
        if sinks.is_empty() {
            return Self {
                sinks: vec![Sink::stdout()],
            };
        }
        Self { sinks }
    }

    pub fn sinks(&self) -> &[Sink] {
        &self.sinks
    }

    pub fn write_all(&self, bytes: &[u8]) -> Result<()> {
        for sink in &self.sinks {
            sink.write_all(bytes)?;
        }
        Ok(())
    }

    /// Flush every sink, returning the first error after trying them all.
    pub fn flush(&self) -> Result<()> {
        let mut first_error = None;
        for sink in &self.sinks {
            if let Err(e) = sink.flush() {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}
