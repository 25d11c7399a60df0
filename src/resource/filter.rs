//! In-memory filtering of cached result sets.

use std::fmt;

use serde_json::Value;

use crate::cache::CLOSURE_TOKEN;

/// Predicate type accepted by [`FilterSpec::Predicate`].
pub type Predicate = Box<dyn Fn(&Value) -> bool + Send + Sync>;

/// What a record's field must look like to be kept.
///
/// # Example
///
/// ```rust
/// use battlenet_api::resource::FilterSpec;
/// use serde_json::json;
///
/// let exact = FilterSpec::from("Lightbringer");
/// assert!(exact.matches(&json!("Lightbringer")));
///
/// let any_of = FilterSpec::from(vec!["Lightbringer", "Tichondrius"]);
/// assert!(any_of.matches(&json!("Tichondrius")));
///
/// let starts_with_l = FilterSpec::predicate(|v| v.as_str().is_some_and(|s| s.starts_with('L')));
/// assert!(starts_with_l.matches(&json!("Lightbringer")));
/// ```
pub enum FilterSpec {
    /// The field must equal this value.
    Value(Value),
    /// The field must equal one of these values.
    AnyOf(Vec<Value>),
    /// The predicate must return `true` for the field.
    Predicate(Predicate),
}

impl FilterSpec {
    /// Wraps a closure as a predicate filter.
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Box::new(f))
    }

    /// Returns `true` if `value` passes the filter.
    ///
    /// Comparisons are structural: `"1"`, `1` and `true` are distinct.
    #[must_use]
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Self::Value(expected) => value == expected,
            Self::AnyOf(candidates) => candidates.contains(value),
            Self::Predicate(f) => f(value),
        }
    }

    /// Returns the arguments used to derive this filter's cache key.
    ///
    /// A predicate cannot be rendered, so it is keyed by the field name and
    /// [`CLOSURE_TOKEN`].
    #[must_use]
    pub fn cache_args(&self, field: &str) -> Value {
        match self {
            Self::Value(value) => value.clone(),
            Self::AnyOf(values) => Value::Array(values.clone()),
            Self::Predicate(_) => Value::Array(vec![
                Value::String(field.to_string()),
                Value::String(CLOSURE_TOKEN.to_string()),
            ]),
        }
    }

    /// Returns `true` for an empty string, `null` or an empty list.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Value(value) => crate::clients::is_empty_value(value),
            Self::AnyOf(values) => values.is_empty(),
            Self::Predicate(_) => false,
        }
    }
}

impl fmt::Debug for FilterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::AnyOf(values) => f.debug_tuple("AnyOf").field(values).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

impl From<Value> for FilterSpec {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(values) => Self::AnyOf(values),
            other => Self::Value(other),
        }
    }
}

impl From<&str> for FilterSpec {
    fn from(value: &str) -> Self {
        Self::Value(Value::String(value.to_string()))
    }
}

impl From<String> for FilterSpec {
    fn from(value: String) -> Self {
        Self::Value(Value::String(value))
    }
}

impl From<bool> for FilterSpec {
    fn from(value: bool) -> Self {
        Self::Value(Value::Bool(value))
    }
}

impl From<i64> for FilterSpec {
    fn from(value: i64) -> Self {
        Self::Value(Value::from(value))
    }
}

impl From<u64> for FilterSpec {
    fn from(value: u64) -> Self {
        Self::Value(Value::from(value))
    }
}

/// Non-finite values become `null`, which matches nothing.
impl From<f64> for FilterSpec {
    fn from(value: f64) -> Self {
        Self::Value(Value::from(value))
    }
}

impl From<Vec<&str>> for FilterSpec {
    fn from(values: Vec<&str>) -> Self {
        Self::AnyOf(values.into_iter().map(Value::from).collect())
    }
}

impl From<Vec<String>> for FilterSpec {
    fn from(values: Vec<String>) -> Self {
        Self::AnyOf(values.into_iter().map(Value::from).collect())
    }
}

/// Keeps the records whose `field` passes `spec`.
///
/// Records that are not objects, lack `field`, or hold `null` in it are
/// always dropped. The input is not modified and no cache is consulted.
///
/// # Example
///
/// ```rust
/// use battlenet_api::resource::{filter, FilterSpec};
/// use serde_json::json;
///
/// let realms = vec![
///     json!({"name": "Lightbringer", "population": "high"}),
///     json!({"name": "Tichondrius", "population": "low"}),
///     json!({"slug": "no-name"}),
/// ];
///
/// let low = filter(&realms, "population", &FilterSpec::from("low"));
/// assert_eq!(low, vec![json!({"name": "Tichondrius", "population": "low"})]);
/// ```
#[must_use]
pub fn filter(results: &[Value], field: &str, spec: &FilterSpec) -> Vec<Value> {
    results
        .iter()
        .filter(|record| match record.get(field) {
            None | Some(Value::Null) => false,
            Some(value) => spec.matches(value),
        })
        .cloned()
        .collect()
}
