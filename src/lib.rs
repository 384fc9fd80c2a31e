//! # slogger
//!
//! A small structured-logging facade. Records are written as one JSON
//! object per line to any number of sinks, filtered by a minimum level,
//! optionally annotated with the call site and with fields derived from a
//! per-call [`Context`].
//!
//! ```text
//! {"time":"2025-01-08T10:30:45.123456789+09:00","level":"WARN","msg":"disk full","mount":"/var","source":"src/main.rs:42"}
//! ```
//!
//! ## Usage
//!
//! - **Global**: [`set_config`] once at startup, then the free functions
//!   ([`info()`], [`warn_ctx()`], ...) or the macros ([`info!`], ...).
//! - **Owned**: build a [`Logger`] from a [`Config`] and pass it around.
//! - **Legacy**: [`StandardLogger`] for code that wants plain lines, an
//!   `io::Write`, or a `log` crate backend.

pub mod core;
pub mod global;
pub mod macros;
pub mod sinks;
pub mod standard_logger;

pub mod prelude {
    pub use crate::core::{
        Config, Context, Field, FieldValue, Handler, JsonHandler, Level, Logger, LoggerError,
        LoggerMetrics, Record, Result,
    };
    pub use crate::sinks::{SharedBuffer, Sink};
    pub use crate::standard_logger::StandardLogger;
}

pub use crate::core::{
    default_handler, source_annotation, Config, Context, ContextFieldsExtractor, Field,
    FieldValue, Handler, JsonHandler, Level, Logger, LoggerError, LoggerMetrics, Record, Result,
    WriteErrorCallback,
};
pub use global::{
    config, debug, debug_ctx, error, error_ctx, info, info_ctx, logger, set_config, set_logger,
    warn, warn_ctx,
};
pub use sinks::{MultiSink, SharedBuffer, Sink};
pub use standard_logger::StandardLogger;
