//! Declared value sets for filterable fields.

use serde_json::Value;

use crate::error::ConfigError;

/// The valid values of each enumerated field of a resource.
///
/// Fields that are not declared accept any value.
///
/// # Example
///
/// ```rust
/// use battlenet_api::resource::Schema;
/// use serde_json::json;
///
/// let schema = Schema::new().field("population", [json!("low"), json!("high")]);
///
/// assert_eq!(schema.values("population").unwrap().len(), 2);
/// assert!(schema.validate("op", "population", &json!("low")).is_ok());
/// assert!(schema.validate("op", "population", &json!("huge")).is_err());
/// assert!(schema.validate("op", "name", &json!("anything")).is_ok());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Schema {
    fields: Vec<(&'static str, Vec<Value>)>,
}

impl Schema {
    /// Creates an empty schema.
    #[must_use]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Declares the valid values of `name`.
    #[must_use]
    pub fn field(mut self, name: &'static str, values: impl IntoIterator<Item = Value>) -> Self {
        let values: Vec<Value> = values.into_iter().collect();
        if let Some(slot) = self.fields.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = values;
        } else {
            self.fields.push((name, values));
        }
        self
    }

    /// Returns the valid values of `name`, if declared.
    #[must_use]
    pub fn values(&self, name: &str) -> Option<&[Value]> {
        self.fields
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, values)| values.as_slice())
    }

    /// Iterates over the declared fields.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &[Value])> {
        self.fields.iter().map(|(name, values)| (*name, values.as_slice()))
    }

    /// Returns `true` if no field is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Checks `value` against the declared values of `field`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidFilterArgument`] naming `operation` and
    /// the value if `field` is declared and `value` is not one of its values.
    pub fn validate(&self, operation: &str, field: &str, value: &Value) -> Result<(), ConfigError> {
        match self.values(field) {
            Some(allowed) if !allowed.contains(value) => Err(ConfigError::InvalidFilterArgument {
                operation: operation.to_string(),
                value: value.to_string(),
                reason: format!("not a valid {field}"),
            }),
            _ => Ok(()),
        }
    }
}
