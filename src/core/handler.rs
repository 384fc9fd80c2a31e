//! Record handlers
//!
//! A [`Handler`] decides whether a level is enabled and turns records into
//! bytes on its sinks. [`JsonHandler`] writes one JSON object per line
//! (JSONL), which log processors such as Loki or the ELK stack ingest as is.

use super::{context::Context, error::Result, log_level::Level, record::Record};
use crate::sinks::{MultiSink, Sink};
use std::sync::Arc;

pub trait Handler: Send + Sync {
    /// Whether records at `level` would be written.
    fn enabled(&self, level: Level) -> bool;

    /// Write `record`. Records below the handler's level are dropped silently.
    fn handle(&self, ctx: &Context, record: &Record) -> Result<()>;

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "handler"
    }
}

/// Writes each record as a single-line JSON object to every configured sink.
#[derive(Debug, Clone)]
pub struct JsonHandler {
    level: Level,
    sinks: MultiSink,
}

impl JsonHandler {
    /// Create a handler for `level` over `outputs`.
    ///
    /// An empty `outputs` list falls back to standard output.
    pub fn new(level: Level, outputs: Vec<Sink>) -> Self {
        Self {
            level,
            sinks: MultiSink::new(outputs),
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn sinks(&self) -> &[Sink] {
        self.sinks.sinks()
    }
}

impl Handler for JsonHandler {
    fn enabled(&self, level: Level) -> bool {
        level >= self.level
    }

    fn handle(&self, _ctx: &Context, record: &Record) -> Result<()> {
        if !self.enabled(record.level) {
            return Ok(());
        }

        let line = record.to_json_line()?;
        self.sinks.write_all(&line)
    }

    fn flush(&self) -> Result<()> {
        self.sinks.flush()
    }

    fn name(&self) -> &str {
        "json"
    }
}

/// Build the default JSON handler for `level` writing to `outputs`.
pub fn default_handler(level: Level, outputs: Vec<Sink>) -> Arc<JsonHandler> {
    Arc::new(JsonHandler::new(level, outputs))
}
