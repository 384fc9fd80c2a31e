//! Logging macros for the global logger.
//!
//! Fields are written as `key => value` pairs after the message, in the
//! order they should appear in the record.
//!
//! # Examples
//!
//! ```
//! use slogger::{info, warn_ctx, Context};
//!
//! // Basic logging
//! info!("server started");
//!
//! // With fields
//! let port = 8080;
//! info!("listening", "port" => port, "tls" => false);
//!
//! // With a context for the configured extractor
//! let ctx = Context::background();
//! warn_ctx!(&ctx, "slow request", "elapsed_ms" => 1250);
//! ```

/// Build a `Vec<Field>` from `key => value` pairs.
///
/// # Examples
///
/// ```
/// use slogger::{fields, Field};
///
/// let fields = fields!("user" => "alice", "attempt" => 3);
/// assert_eq!(fields[0], Field::new("user", "alice"));
/// assert_eq!(fields.len(), 2);
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        ::std::vec::Vec::<$crate::Field>::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        ::std::vec![$($crate::Field::new($key, $value)),+]
    };
}

/// Log a message at the given level through the global logger.
///
/// # Examples
///
/// ```
/// use slogger::{log, Level};
/// log!(Level::Info, "simple message");
/// log!(Level::Error, "request failed", "status" => 500);
/// ```
#[macro_export]
macro_rules! log {
    ($level:expr, $msg:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::global::log($level, $msg, $crate::fields!($($key => $value),*))
    };
}

/// Log a message at the given level with context fields through the global logger.
#[macro_export]
macro_rules! log_ctx {
    ($ctx:expr, $level:expr, $msg:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::global::log_ctx($ctx, $level, $msg, $crate::fields!($($key => $value),*))
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($msg:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::log!($crate::Level::Debug, $msg $(, $key => $value)*)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($msg:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::log!($crate::Level::Info, $msg $(, $key => $value)*)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($msg:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::log!($crate::Level::Warn, $msg $(, $key => $value)*)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($msg:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::log!($crate::Level::Error, $msg $(, $key => $value)*)
    };
}

/// Log a debug-level message with context fields.
#[macro_export]
macro_rules! debug_ctx {
    ($ctx:expr, $msg:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::log_ctx!($ctx, $crate::Level::Debug, $msg $(, $key => $value)*)
    };
}

/// Log an info-level message with context fields.
#[macro_export]
macro_rules! info_ctx {
    ($ctx:expr, $msg:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::log_ctx!($ctx, $crate::Level::Info, $msg $(, $key => $value)*)
    };
}

/// Log a warning-level message with context fields.
#[macro_export]
macro_rules! warn_ctx {
    ($ctx:expr, $msg:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::log_ctx!($ctx, $crate::Level::Warn, $msg $(, $key => $value)*)
    };
}

/// Log an error-level message with context fields.
#[macro_export]
macro_rules! error_ctx {
    ($ctx:expr, $msg:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::log_ctx!($ctx, $crate::Level::Error, $msg $(, $key => $value)*)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{Field, FieldValue};

    #[test]
    fn test_fields_macro_empty() {
        let fields = fields!();
        assert!(fields.is_empty());
    }

    #[test]
    fn test_fields_macro_keeps_order() {
        let user = String::from("alice");
        let fields = fields!("user" => &user, "attempt" => 3, "admin" => false,);

        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0], Field::new("user", "alice"));
        assert_eq!(fields[1].value, FieldValue::Int(3));
        assert_eq!(fields[2].key, "admin");
    }
}
