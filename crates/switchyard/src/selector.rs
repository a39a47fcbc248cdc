//! Routing-key extraction.
//!
//! A [`Selector`] derives the routing key from a single event attribute.
//! Extraction is total: it never fails. An unset attribute, a missing
//! extension, or an extension value with no string form all yield the
//! empty string, which simply matches no registered handler.
//!
//! The built-in selectors cover the common attributes; [`Selector::custom`]
//! accepts any user-supplied function:
//!
//! ```rust,ignore
//! let router = Router::new().with_selector(Selector::extension("tenant"));
//!
//! // or an arbitrary derivation:
//! let router = Router::new().with_selector(Selector::custom(|event| {
//!     format!("{}/{}", event.source(), event.event_type())
//! }));
//! ```

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::event::Event;

/// A type-erased user-supplied key-extraction function.
pub type SelectorFn = Arc<dyn Fn(&dyn Event) -> String + Send + Sync>;

/// Strategy for deriving the routing key from an event.
///
/// Exactly one selector is active per router, chosen at construction time.
#[derive(Clone, Default)]
pub enum Selector {
    /// Route by the declared type attribute. This is the default.
    #[default]
    Type,

    /// Route by the origin attribute.
    Source,

    /// Route by the subject attribute.
    Subject,

    /// Route by the string form of the named extension value.
    Extension(String),

    /// Route by a user-supplied function.
    Custom(SelectorFn),
}

impl Selector {
    /// Selects the named extension as the key source.
    pub fn extension(name: impl Into<String>) -> Self {
        Selector::Extension(name.into())
    }

    /// Wraps a user-supplied extraction function.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&dyn Event) -> String + Send + Sync + 'static,
    {
        Selector::Custom(Arc::new(f))
    }

    /// Derives the routing key for `event`.
    pub fn key(&self, event: &dyn Event) -> String {
        match self {
            Selector::Type => event.event_type().to_owned(),
            Selector::Source => event.source().to_owned(),
            Selector::Subject => event.subject().to_owned(),
            Selector::Extension(name) => event
                .extension(name)
                .and_then(extension_to_string)
                .unwrap_or_default(),
            Selector::Custom(f) => f(event),
        }
    }
}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Type => f.write_str("Type"),
            Selector::Source => f.write_str("Source"),
            Selector::Subject => f.write_str("Subject"),
            Selector::Extension(name) => f.debug_tuple("Extension").field(name).finish(),
            Selector::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Converts an extension value to its string form.
///
/// Strings, numbers, and booleans convert; null, arrays, and objects have
/// no string form and yield `None`. The extension selector folds `None`
/// into the empty key, the same outcome as an absent extension.
pub fn extension_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use serde_json::json;
    use std::any::Any;
    use std::collections::HashMap;

    struct TestEvent {
        ty: &'static str,
        source: &'static str,
        subject: &'static str,
        extensions: HashMap<String, Value>,
    }

    impl Event for TestEvent {
        fn validate(&self) -> Result<(), ValidationError> {
            Ok(())
        }

        fn event_type(&self) -> &str {
            self.ty
        }

        fn source(&self) -> &str {
            self.source
        }

        fn subject(&self) -> &str {
            self.subject
        }

        fn extension(&self, name: &str) -> Option<&Value> {
            self.extensions.get(name)
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn sample() -> TestEvent {
        TestEvent {
            ty: "com.example.ping",
            source: "/services/ping",
            subject: "greeting",
            extensions: HashMap::from([
                ("tag".to_owned(), json!("blue")),
                ("priority".to_owned(), json!(5)),
                ("urgent".to_owned(), json!(true)),
                ("payload".to_owned(), json!({ "nested": 1 })),
            ]),
        }
    }

    #[test]
    fn built_in_selectors_read_their_attribute() {
        let event = sample();
        assert_eq!(Selector::Type.key(&event), "com.example.ping");
        assert_eq!(Selector::Source.key(&event), "/services/ping");
        assert_eq!(Selector::Subject.key(&event), "greeting");
        assert_eq!(Selector::extension("tag").key(&event), "blue");
    }

    #[test]
    fn extension_selector_stringifies_numbers_and_bools() {
        let event = sample();
        assert_eq!(Selector::extension("priority").key(&event), "5");
        assert_eq!(Selector::extension("urgent").key(&event), "true");
    }

    #[test]
    fn absent_extension_yields_empty_key() {
        assert_eq!(Selector::extension("missing").key(&sample()), "");
    }

    #[test]
    fn unconvertible_extension_yields_empty_key() {
        assert_eq!(Selector::extension("payload").key(&sample()), "");
    }

    #[test]
    fn custom_selector_runs_user_function() {
        let selector =
            Selector::custom(|event| format!("{}:{}", event.source(), event.event_type()));
        assert_eq!(selector.key(&sample()), "/services/ping:com.example.ping");
    }

    #[test]
    fn default_selector_routes_by_type() {
        assert_eq!(Selector::default().key(&sample()), "com.example.ping");
    }

    #[test]
    fn conversion_rejects_structured_values() {
        assert_eq!(extension_to_string(&json!("s")), Some("s".to_owned()));
        assert_eq!(extension_to_string(&json!(42)), Some("42".to_owned()));
        assert_eq!(extension_to_string(&json!(false)), Some("false".to_owned()));
        assert_eq!(extension_to_string(&json!(null)), None);
        assert_eq!(extension_to_string(&json!([1, 2])), None);
        assert_eq!(extension_to_string(&json!({ "k": "v" })), None);
    }
}
