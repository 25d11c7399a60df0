//! Query-string state for resource clients.
//!
//! This module provides [`QueryValue`] and [`QueryParams`], an insertion
//! ordered mapping that renders to a URL-encoded query string. List values
//! expand to one `key=value` pair per element.

use std::fmt;

/// A query parameter value: a single string or a list of strings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryValue {
    /// Rendered as one `key=value` pair.
    Single(String),
    /// Rendered as one `key=value` pair per element.
    List(Vec<String>),
}

impl QueryValue {
    /// Returns `true` for an empty string or an empty list.
    ///
    /// Empty values are never stored in the query. `"0"` is not empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(value) => value.is_empty(),
            Self::List(values) => values.is_empty(),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(values: Vec<String>) -> Self {
        Self::List(values)
    }
}

impl From<Vec<&str>> for QueryValue {
    fn from(values: Vec<&str>) -> Self {
        Self::List(values.into_iter().map(String::from).collect())
    }
}

impl From<&[&str]> for QueryValue {
    fn from(values: &[&str]) -> Self {
        Self::List(values.iter().map(|v| (*v).to_string()).collect())
    }
}

/// Query parameters kept in insertion order.
///
/// Setting an existing name replaces its value in place, so the position of
/// a parameter in the rendered string is the position of its first write.
///
/// # Example
///
/// ```rust
/// use battlenet_api::clients::QueryParams;
///
/// let mut query = QueryParams::new();
/// query.insert("realms", vec!["Aman'Thul", "Lightbringer"]);
/// query.insert("locale", "en_US");
///
/// assert_eq!(query.build(), "realms=Aman%27Thul&realms=Lightbringer&locale=en_US");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: Vec<(String, QueryValue)>,
}

impl QueryParams {
    /// Creates an empty query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a parameter, replacing any previous value under the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<QueryValue>) {
        let name = name.into();
        let value = value.into();

        if let Some(slot) = self.params.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.params.push((name, value));
        }
    }

    /// Returns the value stored under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&QueryValue> {
        self.params
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value)
    }

    /// Iterates over the parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.params.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns `true` if no parameters are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Removes every parameter.
    pub fn clear(&mut self) {
        self.params.clear();
    }

    /// Renders the URL-encoded query string (without a leading `?`).
    #[must_use]
    pub fn build(&self) -> String {
        let mut pairs = Vec::new();

        for (name, value) in &self.params {
            match value {
                QueryValue::Single(v) => pairs.push(format!("{name}={}", urlencoding::encode(v))),
                QueryValue::List(values) => {
                    for v in values {
                        pairs.push(format!("{name}={}", urlencoding::encode(v)));
                    }
                }
            }
        }

        pairs.join("&")
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.build())
    }
}
