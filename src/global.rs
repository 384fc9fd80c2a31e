//! Process-wide logger
//!
//! The free functions here log through a single global [`Logger`], created
//! with [`Config::default`] on first use (Info level, JSON to stdout).
//! [`set_config`] builds a new logger and swaps it in whole: a concurrent
//! call sees either the old configuration with the old handler or the new
//! one with the new handler, never a mix. Calls already running on the old
//! logger finish writing to the old sinks.

use crate::core::{Config, Context, Field, Level, Logger};
use parking_lot::RwLock;
use std::sync::{Arc, OnceLock};

static GLOBAL: OnceLock<RwLock<Arc<Logger>>> = OnceLock::new();

fn slot() -> &'static RwLock<Arc<Logger>> {
    GLOBAL.get_or_init(|| RwLock::new(Arc::new(Logger::default())))
}

/// Replace the global configuration, applying defaults to unset fields.
pub fn set_config(config: Config) {
    set_logger(Logger::new(config));
}

/// Install a pre-built logger as the global one.
pub fn set_logger(logger: Logger) {
    let logger = Arc::new(logger);
    let previous = std::mem::replace(&mut *slot().write(), logger);
    // The old logger flushes on drop; do that outside the lock
    drop(previous);
}

/// The current global logger.
pub fn logger() -> Arc<Logger> {
    Arc::clone(&slot().read())
}

/// The current global configuration, as last passed to [`set_config`].
///
/// Resolved defaults are not included, so the result can be modified and
/// applied again with [`set_config`].
pub fn config() -> Config {
    logger().config().clone()
}

#[track_caller]
pub fn log(level: Level, message: impl Into<String>, fields: impl IntoIterator<Item = Field>) {
    logger().log(level, message, fields);
}

#[track_caller]
pub fn log_ctx(
    ctx: &Context,
    level: Level,
    message: impl Into<String>,
    fields: impl IntoIterator<Item = Field>,
) {
    logger().log_ctx(ctx, level, message, fields);
}

/// Log a debug level message.
#[track_caller]
pub fn debug(message: impl Into<String>, fields: impl IntoIterator<Item = Field>) {
    logger().log(Level::Debug, message, fields);
}

/// Log an info level message.
#[track_caller]
pub fn info(message: impl Into<String>, fields: impl IntoIterator<Item = Field>) {
    logger().log(Level::Info, message, fields);
}

/// Log a warning level message.
#[track_caller]
pub fn warn(message: impl Into<String>, fields: impl IntoIterator<Item = Field>) {
    logger().log(Level::Warn, message, fields);
}

/// Log an error level message.
#[track_caller]
pub fn error(message: impl Into<String>, fields: impl IntoIterator<Item = Field>) {
    logger().log(Level::Error, message, fields);
}

/// Log a debug level message with context fields.
#[track_caller]
pub fn debug_ctx(
    ctx: &Context,
    message: impl Into<String>,
    fields: impl IntoIterator<Item = Field>,
) {
    logger().log_ctx(ctx, Level::Debug, message, fields);
}

/// Log an info level message with context fields.
#[track_caller]
pub fn info_ctx(
    ctx: &Context,
    message: impl Into<String>,
    fields: impl IntoIterator<Item = Field>,
) {
    logger().log_ctx(ctx, Level::Info, message, fields);
}

/// Log a warning level message with context fields.
#[track_caller]
pub fn warn_ctx(
    ctx: &Context,
    message: impl Into<String>,
    fields: impl IntoIterator<Item = Field>,
) {
    logger().log_ctx(ctx, Level::Warn, message, fields);
}

/// Log an error level message with context fields.
#[track_caller]
pub fn error_ctx(
    ctx: &Context,
    message: impl Into<String>,
    fields: impl IntoIterator<Item = Field>,
) {
    logger().log_ctx(ctx, Level::Error, message, fields);
}
