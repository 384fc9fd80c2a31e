//! Main logger implementation

use super::{
    config::{Config, ContextFieldsExtractor},
    context::Context,
    error::{LoggerError, Result},
    field::Field,
    handler::Handler,
    log_level::Level,
    metrics::LoggerMetrics,
    record::Record,
};
use std::fmt;
use std::panic::{self, AssertUnwindSafe, Location};
use std::path::Path;
use std::sync::Arc;

/// Format a call site as `<path>:<line>`, with `trim_path_prefix` removed
/// from the front of the path when it is a leading path prefix.
///
/// The prefix is matched by whole path components, so `/src/app` trims
/// `/src/app/main.rs` to `main.rs` but leaves `/src/application/main.rs`
/// untouched.
pub fn source_annotation(file: &str, line: u32, trim_path_prefix: &str) -> String {
    let path = Path::new(file);
    let path = if trim_path_prefix.is_empty() {
        path
    } else {
        path.strip_prefix(trim_path_prefix).unwrap_or(path)
    };
    format!("{}:{}", path.display(), line)
}

/// A configured logger.
///
/// The configuration is fixed at construction. Logging methods never fail:
/// write errors are counted in [`LoggerMetrics`] and passed to the
/// configured write-error callback (or reported on stderr).
///
/// Every logging method is `#[track_caller]`, so with source annotation
/// enabled the `source` field names the line that called it.
///
/// # Example
///
/// ```
/// use slogger::{Config, Field, Level, Logger, SharedBuffer};
///
/// let buffer = SharedBuffer::new();
/// let logger = Logger::new(
///     Config::new()
///         .with_level(Level::Debug)
///         .with_output(buffer.clone().into()),
/// );
///
/// logger.warn("disk full", [Field::new("mount", "/var")]);
/// assert!(buffer.contents().contains(r#""msg":"disk full""#));
/// ```
pub struct Logger {
    config: Config,
    handler: Arc<dyn Handler>,
    extractor: ContextFieldsExtractor,
    metrics: LoggerMetrics,
}

impl Logger {
    #[must_use]
    pub fn new(config: Config) -> Self {
        let handler = config.resolve_handler();
        let extractor = config.resolve_extractor();

        Self {
            config,
            handler,
            extractor,
            metrics: LoggerMetrics::new(),
        }
    }

    /// The configuration as supplied.
    ///
    /// Defaults resolved at construction (the stdout sink, the JSON handler,
    /// the empty extractor) stay in the logger, so the returned value can be
    /// modified and passed to [`Logger::new`] again.
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn handler(&self) -> &Arc<dyn Handler> {
        &self.handler
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Get the number of records lost to write failures
    pub fn dropped_count(&self) -> u64 {
        self.metrics.dropped_count()
    }

    pub fn enabled(&self, level: Level) -> bool {
        self.handler.enabled(level)
    }

    pub fn flush(&self) -> Result<()> {
        self.handler.flush()
    }

    #[track_caller]
    pub fn log(
        &self,
        level: Level,
        message: impl Into<String>,
        fields: impl IntoIterator<Item = Field>,
    ) {
        let ctx = Context::background();
        self.dispatch(&ctx, false, level, message.into(), fields, Location::caller());
    }

    /// Log with fields from the context-field extractor appended after `fields`.
    #[track_caller]
    pub fn log_ctx(
        &self,
        ctx: &Context,
        level: Level,
        message: impl Into<String>,
        fields: impl IntoIterator<Item = Field>,
    ) {
        self.dispatch(ctx, true, level, message.into(), fields, Location::caller());
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, message: impl Into<String>, fields: impl IntoIterator<Item = Field>) {
        self.log(Level::Debug, message, fields);
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, message: impl Into<String>, fields: impl IntoIterator<Item = Field>) {
        self.log(Level::Info, message, fields);
    }

    #[inline]
    #[track_caller]
    pub fn warn(&self, message: impl Into<String>, fields: impl IntoIterator<Item = Field>) {
        self.log(Level::Warn, message, fields);
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, message: impl Into<String>, fields: impl IntoIterator<Item = Field>) {
        self.log(Level::Error, message, fields);
    }

    #[inline]
    #[track_caller]
    pub fn debug_ctx(
        &self,
        ctx: &Context,
        message: impl Into<String>,
        fields: impl IntoIterator<Item = Field>,
    ) {
        self.log_ctx(ctx, Level::Debug, message, fields);
    }

    #[inline]
    #[track_caller]
    pub fn info_ctx(
        &self,
        ctx: &Context,
        message: impl Into<String>,
        fields: impl IntoIterator<Item = Field>,
    ) {
        self.log_ctx(ctx, Level::Info, message, fields);
    }

    #[inline]
    #[track_caller]
    pub fn warn_ctx(
        &self,
        ctx: &Context,
        message: impl Into<String>,
        fields: impl IntoIterator<Item = Field>,
    ) {
        self.log_ctx(ctx, Level::Warn, message, fields);
    }

    #[inline]
    #[track_caller]
    pub fn error_ctx(
        &self,
        ctx: &Context,
        message: impl Into<String>,
        fields: impl IntoIterator<Item = Field>,
    ) {
        self.log_ctx(ctx, Level::Error, message, fields);
    }

    /// Build the record and hand it to the handler.
    ///
    /// Field order is caller fields, then context fields, then `source`.
    fn dispatch(
        &self,
        ctx: &Context,
        with_context: bool,
        level: Level,
        message: String,
        fields: impl IntoIterator<Item = Field>,
        caller: &'static Location<'static>,
    ) {
        if !self.handler.enabled(level) {
            self.metrics.record_filtered();
            return;
        }

        let mut record = Record::new(level, message).with_fields(fields);
        if with_context {
            record.fields.extend((self.extractor)(ctx));
        }
        if self.config.add_source {
            record.source = Some(source_annotation(
                caller.file(),
                caller.line(),
                &self.config.trim_path_prefix,
            ));
        }

        // A panicking handler must not unwind into the caller's code
        let result = panic::catch_unwind(AssertUnwindSafe(|| self.handler.handle(ctx, &record)));

        match result {
            Ok(Ok(())) => {
                self.metrics.record_logged();
            }
            Ok(Err(e)) => self.report_write_failure(&e),
            Err(panic_info) => {
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                let err = LoggerError::other(format!(
                    "handler '{}' panicked: {}",
                    self.handler.name(),
                    panic_msg
                ));
                self.report_write_failure(&err);
            }
        }
    }

    fn report_write_failure(&self, err: &LoggerError) {
        let dropped = self.metrics.record_dropped() + 1;

        if let Some(ref callback) = self.config.on_write_error {
            callback(err);
            return;
        }

        // Report the first failure and periodically thereafter
        if dropped == 1 || dropped % 1000 == 0 {
            eprintln!(
                "[LOGGER ERROR] Failed to write log record ({} dropped so far): {}",
                dropped, err
            );
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(e) = self.handler.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("config", &self.config)
            .field("metrics", &self.metrics)
            .finish()
    }
}
