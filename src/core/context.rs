//! Per-call context for the `*_ctx` logging functions
//!
//! A `Context` is opaque to the logger: it is handed to the configured
//! context-field extractor and to the handler, nothing more. Applications
//! store request-scoped data in it (a request id, a user, a trace id) and
//! the extractor turns that data into fields.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};

type Values = HashMap<TypeId, Arc<dyn Any + Send + Sync>>;

/// Immutable, cheaply clonable bag of typed values with an optional deadline.
///
/// # Example
///
/// ```
/// use slogger::Context;
///
/// #[derive(Debug, PartialEq)]
/// struct RequestId(String);
///
/// let ctx = Context::background().with_value(RequestId("req-42".into()));
/// assert_eq!(ctx.value::<RequestId>(), Some(&RequestId("req-42".into())));
/// ```
#[derive(Clone, Default)]
pub struct Context {
    values: Arc<Values>,
    deadline: Option<Instant>,
}

impl Context {
    /// The empty context, used by the plain logging functions.
    pub fn background() -> Self {
        static BACKGROUND: OnceLock<Context> = OnceLock::new();
        BACKGROUND.get_or_init(Context::default).clone()
    }

    /// Derive a context that also carries `value`, replacing any earlier value of the same type.
    #[must_use]
    pub fn with_value<T: Any + Send + Sync>(&self, value: T) -> Self {
        let mut values = Values::clone(&self.values);
        values.insert(TypeId::of::<T>(), Arc::new(value));
        Self {
            values: Arc::new(values),
            deadline: self.deadline,
        }
    }

    pub fn value<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.values
            .get(&TypeId::of::<T>())
            .and_then(|value| (**value).downcast_ref::<T>())
    }

    /// Derive a context with a deadline. An earlier existing deadline wins.
    #[must_use]
    pub fn with_deadline(&self, deadline: Instant) -> Self {
        let deadline = match self.deadline {
            Some(current) if current < deadline => current,
            _ => deadline,
        };
        Self {
            values: Arc::clone(&self.values),
            deadline: Some(deadline),
        }
    }

    #[must_use]
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("values", &self.values.len())
            .field("deadline", &self.deadline)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct TraceId(&'static str);

    #[derive(Debug, PartialEq)]
    struct UserId(u64);

    #[test]
    fn test_background_is_empty() {
        let ctx = Context::background();
        assert!(ctx.value::<TraceId>().is_none());
        assert!(ctx.deadline().is_none());
        assert!(!ctx.is_expired());
    }

    #[test]
    fn test_values_are_typed_and_copy_on_write() {
        let parent = Context::background().with_value(TraceId("t-1"));
        let child = parent.with_value(UserId(9)).with_value(TraceId("t-2"));

        assert_eq!(parent.value::<TraceId>(), Some(&TraceId("t-1")));
        assert!(parent.value::<UserId>().is_none());
        assert_eq!(child.value::<TraceId>(), Some(&TraceId("t-2")));
        assert_eq!(child.value::<UserId>(), Some(&UserId(9)));
    }

    #[test]
    fn test_earlier_deadline_wins() {
        let now = Instant::now();
        let ctx = Context::background()
            .with_deadline(now + Duration::from_secs(5))
            .with_deadline(now + Duration::from_secs(60));
        assert_eq!(ctx.deadline(), Some(now + Duration::from_secs(5)));

        let expired = ctx.with_deadline(now);
        assert!(expired.is_expired());
    }
}
