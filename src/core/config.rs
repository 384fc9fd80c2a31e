//! Logger configuration
//!
//! A [`Config`] is a plain value: build it with the `with_*` methods, hand
//! it to [`Logger::new`](super::Logger::new) or
//! [`set_config`](crate::global::set_config), and any field left unset is
//! resolved to its default when the logger is built. The resolved handler
//! lives in the logger, never in the `Config`, so a config read back from a
//! logger can be changed and applied again.

use super::{
    context::Context,
    error::{LoggerError, Result},
    field::Field,
    handler::{default_handler, Handler},
    log_level::Level,
};
use crate::sinks::Sink;
use std::env;
use std::fmt;
use std::sync::Arc;

/// Environment variable holding the minimum level (`debug`, `info`, `warn`, `error`)
pub const ENV_LEVEL: &str = "SLOGGER_LEVEL";
/// Environment variable enabling source annotation (`1`, `true`, `yes`, `on`)
pub const ENV_ADD_SOURCE: &str = "SLOGGER_ADD_SOURCE";
/// Environment variable holding the path prefix trimmed from `source`
pub const ENV_TRIM_PATH_PREFIX: &str = "SLOGGER_TRIM_PATH_PREFIX";

/// Maps the context of a `*_ctx` call to extra fields for its record.
pub type ContextFieldsExtractor = Arc<dyn Fn(&Context) -> Vec<Field> + Send + Sync>;

/// Invoked with every sink write failure.
pub type WriteErrorCallback = Arc<dyn Fn(&LoggerError) + Send + Sync>;

#[derive(Clone, Default)]
pub struct Config {
    /// Minimum level. Defaults to `Info`.
    pub level: Level,

    /// Add a `source` field with the call site's `file:line`.
    pub add_source: bool,

    /// Path prefix removed from the `source` file path.
    pub trim_path_prefix: String,

    /// Sinks every record is written to. Defaults to stdout.
    pub outputs: Vec<Sink>,

    /// Extra fields for context-aware calls. Defaults to none.
    pub context_fields_extractor: Option<ContextFieldsExtractor>,

    /// Pre-built handler. When unset, a JSON handler over `level` and `outputs` is built.
    pub handler: Option<Arc<dyn Handler>>,

    /// Observer for write failures. When unset, failures are reported on stderr.
    pub on_write_error: Option<WriteErrorCallback>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read level, source annotation and trim prefix from the environment.
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::new();

        if let Some(level) = lookup(ENV_LEVEL) {
            config.level = level
                .parse()
                .map_err(|message: String| LoggerError::config(ENV_LEVEL, message))?;
        }

        if let Some(flag) = lookup(ENV_ADD_SOURCE) {
            config.add_source = match flag.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "" | "0" | "false" | "no" | "off" => false,
                other => {
                    return Err(LoggerError::config(
                        ENV_ADD_SOURCE,
                        format!("expected a boolean, got '{}'", other),
                    ))
                }
            };
        }

        if let Some(prefix) = lookup(ENV_TRIM_PATH_PREFIX) {
            config.trim_path_prefix = prefix;
        }

        Ok(config)
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_source(mut self, add_source: bool) -> Self {
        self.add_source = add_source;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_trim_path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.trim_path_prefix = prefix.into();
        self
    }

    /// Add one sink
    #[must_use = "builder methods return a new value"]
    pub fn with_output(mut self, sink: Sink) -> Self {
        self.outputs.push(sink);
        self
    }

    /// Replace the sink list
    #[must_use = "builder methods return a new value"]
    pub fn with_outputs(mut self, sinks: Vec<Sink>) -> Self {
        self.outputs = sinks;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_context_fields_extractor<F>(mut self, extractor: F) -> Self
    where
        F: Fn(&Context) -> Vec<Field> + Send + Sync + 'static,
    {
        self.context_fields_extractor = Some(Arc::new(extractor));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handler = Some(handler);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_on_write_error<F>(mut self, callback: F) -> Self
    where
        F: Fn(&LoggerError) + Send + Sync + 'static,
    {
        self.on_write_error = Some(Arc::new(callback));
        self
    }

    /// Fill every unset field with its default.
    ///
    /// The handler is built last, so it sees the defaulted sinks.
    #[must_use]
    pub fn ensure_defaults(mut self) -> Self {
        self.outputs = self.resolve_outputs();
        self.context_fields_extractor = Some(self.resolve_extractor());
        self.handler = Some(self.resolve_handler());
        self
    }

    /// The sinks records go to: `outputs`, or stdout when empty.
    fn resolve_outputs(&self) -> Vec<Sink> {
        if self.outputs.is_empty() {
            vec![Sink::stdout()]
        } else {
            self.outputs.clone()
        }
    }

    pub(crate) fn resolve_extractor(&self) -> ContextFieldsExtractor {
        match &self.context_fields_extractor {
            Some(extractor) => Arc::clone(extractor),
            None => Arc::new(|_: &Context| Vec::<Field>::new()),
        }
    }

    /// The supplied handler, or a JSON handler over `level` and the resolved sinks.
    pub(crate) fn resolve_handler(&self) -> Arc<dyn Handler> {
        match &self.handler {
            Some(handler) => Arc::clone(handler),
            None => default_handler(self.level, self.resolve_outputs()),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("level", &self.level)
            .field("add_source", &self.add_source)
            .field("trim_path_prefix", &self.trim_path_prefix)
            .field("outputs", &self.outputs)
            .field(
                "context_fields_extractor",
                &self.context_fields_extractor.as_ref().map(|_| "<fn>"),
            )
            .field("handler", &self.handler.as_ref().map(|h| h.name().to_string()))
            .field("on_write_error", &self.on_write_error.as_ref().map(|_| "<fn>"))
            .finish()
    }
}
