//! Message-only logger for code that expects an unstructured interface
//!
//! [`StandardLogger`] writes through the same JSON handler as [`Logger`](crate::Logger)
//! but takes plain lines: through [`StandardLogger::print`], as an
//! [`io::Write`](std::io::Write) target where every line becomes a record,
//! or as the backend of the `log` crate facade.

use crate::core::{
    default_handler, Context, Handler, JsonHandler, Level, LoggerError, Record, Result,
};
use crate::sinks::Sink;
use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

pub struct StandardLogger {
    level: Level,
    handler: Arc<JsonHandler>,
    pending: Vec<u8>,
}

impl StandardLogger {
    /// Create a logger emitting at `level` to `outputs` (stdout when empty).
    pub fn new(level: Level, outputs: Vec<Sink>) -> Self {
        Self {
            level,
            handler: default_handler(level, outputs),
            pending: Vec::new(),
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Emit `message` as one record at this logger's level.
    pub fn print(&self, message: impl Into<String>) -> Result<()> {
        self.emit(self.level, message.into())
    }

    pub fn print_fmt(&self, args: fmt::Arguments<'_>) -> Result<()> {
        self.emit(self.level, args.to_string())
    }

    /// Register as the `log` crate's global logger.
    ///
    /// Fails if another `log` backend is already installed.
    pub fn install(self) -> Result<()> {
        let filter = self.level.to_level_filter();
        log::set_boxed_logger(Box::new(self))
            .map_err(|e| LoggerError::config("log", e.to_string()))?;
        log::set_max_level(filter);
        Ok(())
    }

    fn emit(&self, level: Level, message: String) -> Result<()> {
        let record = Record::new(level, message);
        self.handler.handle(&Context::background(), &record)
    }

    fn emit_line(&self, line: &[u8]) -> io::Result<()> {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        let message = String::from_utf8_lossy(line).into_owned();
        self.emit(self.level, message).map_err(io::Error::other)
    }
}

impl Write for StandardLogger {
    /// Emit one record per complete line and buffer the unterminated rest.
    ///
    /// A failed record is not retained: when the first line of `buf` fails
    /// the error is returned with nothing consumed, and a later failure ends
    /// the call early with the count of bytes already emitted.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut consumed = 0;
        while let Some(offset) = buf[consumed..].iter().position(|b| *b == b'\n') {
            let end = consumed + offset;
            let line = [self.pending.as_slice(), &buf[consumed..end]].concat();
            match self.emit_line(&line) {
                Ok(()) => {
                    self.pending.clear();
                    consumed = end + 1;
                }
                Err(e) if consumed == 0 => return Err(e),
                Err(_) => return Ok(consumed),
            }
        }
        self.pending.extend_from_slice(&buf[consumed..]);
        Ok(buf.len())
    }

    /// Emit any unterminated trailing text, then flush the sinks.
    fn flush(&mut self) -> io::Result<()> {
        if !self.pending.is_empty() {
            let line = std::mem::take(&mut self.pending);
            self.emit_line(&line)?;
        }
        self.handler.flush().map_err(io::Error::other)
    }
}

impl log::Log for StandardLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.handler.enabled(Level::from(metadata.level()))
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            // The log facade has no error channel
            let _ = self.emit(Level::from(record.level()), record.args().to_string());
        }
    }

    fn flush(&self) {
        let _ = self.handler.flush();
    }
}

impl fmt::Debug for StandardLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StandardLogger")
            .field("level", &self.level)
            .field("sinks", &self.handler.sinks())
            .finish()
    }
}
