//! Core logger types and traits

pub mod config;
pub mod context;
pub mod error;
pub mod field;
pub mod handler;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod record;

pub use config::{Config, ContextFieldsExtractor, WriteErrorCallback};
pub use context::Context;
pub use error::{LoggerError, Result};
pub use field::{Field, FieldValue};
pub use handler::{default_handler, Handler, JsonHandler};
pub use log_level::Level;
pub use logger::{source_annotation, Logger};
pub use metrics::LoggerMetrics;
pub use record::Record;
