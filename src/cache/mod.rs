//! Result caching for resource clients.
//!
//! Every [`ResourceClient`](crate::clients::ResourceClient) owns one cache
//! backend for its whole lifetime. The default backend, [`MemoryCache`],
//! keeps decoded results in memory with no expiry, no eviction and no size
//! bound; it exists to avoid repeating the same HTTP request or the same
//! filter pass within one session. Other backends can be plugged in through
//! the [`CacheStore`] trait.
//!
//! # Keys
//!
//! Keys are derived from an operation name and its arguments by
//! [`derive_key`]:
//!
//! ```rust
//! use battlenet_api::cache::derive_key;
//! use serde_json::json;
//!
//! assert_eq!(
//!     derive_key("RealmApi::filter_by_name", &json!(["Lightbringer", "Tichondrius"])),
//!     "RealmApi.filter_by_name-Lightbringer-Tichondrius"
//! );
//! assert_eq!(derive_key("DataApi::item", &json!(0)), "DataApi.item-0");
//! assert_eq!(derive_key("DataApi::classes", &json!(null)), "DataApi.classes");
//! ```

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

/// Separator used by qualified operation names.
const SCOPE_SEPARATOR: &str = "::";

/// Token standing in for a predicate argument, which cannot be stringified.
pub const CLOSURE_TOKEN: &str = "Closure";

/// A key/value store for decoded API results.
///
/// Implementations decide where values live; the resource layer only relies
/// on `set` followed by `has`/`get` with the same key returning the value.
pub trait CacheStore: fmt::Debug + Send {
    /// Returns the stored value, or `None` if nothing was stored under `key`.
    fn get(&self, key: &str) -> Option<Value>;

    /// Returns `true` if a value was stored under exactly `key`.
    fn has(&self, key: &str) -> bool;

    /// Stores `value` under `key`, overwriting any previous value.
    fn set(&mut self, key: &str, value: Value);

    /// Derives a cache key from an operation name and its arguments.
    fn key(&self, name: &str, args: &Value) -> String {
        derive_key(name, args)
    }
}

/// In-memory cache that lives as long as its owning client.
#[derive(Debug, Default, Clone)]
pub struct MemoryCache {
    storage: HashMap<String, Value>,
}

impl MemoryCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Returns `true` if nothing has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

impl CacheStore for MemoryCache {
    fn get(&self, key: &str) -> Option<Value> {
        self.storage.get(key).cloned()
    }

    fn has(&self, key: &str) -> bool {
        self.storage.contains_key(key)
    }

    fn set(&mut self, key: &str, value: Value) {
        self.storage.insert(key.to_string(), value);
    }
}

/// Derives a deterministic cache key.
///
/// The scope separator `::` in `name` becomes `.`. Unless `args` is absent
/// (`null` or an empty list), a dash and the dash-joined arguments are
/// appended; `0`, `false` and `""` all count as present. Finally every
/// character outside `[A-Za-z0-9_-]` is replaced by `.`.
#[must_use]
pub fn derive_key(name: &str, args: &Value) -> String {
    let mut key = name.replace(SCOPE_SEPARATOR, ".");

    let is_absent = match args {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        _ => false,
    };

    if !is_absent {
        key.push('-');
        match args {
            Value::Array(items) => {
                let parts: Vec<String> = items.iter().map(stringify_arg).collect();
                key.push_str(&parts.join("-"));
            }
            other => key.push_str(&stringify_arg(other)),
        }
    }

    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '.'
            }
        })
        .collect()
}

fn stringify_arg(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_key_replaces_scope_separator() {
        assert_eq!(
            derive_key("battlenet_api::wow::RealmApi::results", &Value::Null),
            "battlenet_api.wow.RealmApi.results"
        );
    }

    #[test]
    fn test_key_appends_scalar_args() {
        assert_eq!(derive_key("op", &json!("low")), "op-low");
        assert_eq!(derive_key("op", &json!(49623)), "op-49623");
        assert_eq!(derive_key("op", &json!(true)), "op-true");
    }

    #[test]
    fn test_key_treats_zero_as_present() {
        assert_eq!(derive_key("op", &json!(0)), "op-0");
        assert_eq!(derive_key("op", &json!(false)), "op-false");
    }

    #[test]
    fn test_key_treats_null_and_empty_list_as_absent() {
        assert_eq!(derive_key("op", &Value::Null), "op");
        assert_eq!(derive_key("op", &json!([])), "op");
    }

    #[test]
    fn test_key_joins_list_args_with_dash() {
        assert_eq!(derive_key("op", &json!(["name", CLOSURE_TOKEN])), "op-name-Closure");
        assert_eq!(derive_key("op", &json!([1, "b", false])), "op-1-b-false");
    }

    #[test]
    fn test_key_sanitizes_disallowed_characters() {
        assert_eq!(derive_key("op", &json!("Aman'Thul")), "op-Aman.Thul");
        assert_eq!(derive_key("a b/c", &json!("x y")), "a.b.c-x.y");
        assert_eq!(derive_key("op", &json!("Zul'jin é")), "op-Zul.jin..");

        let key = derive_key("Some::Op", &json!({"nested": [1, 2]}));
        assert!(key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.'));
    }

    #[test]
    fn test_key_is_deterministic() {
        let args = json!(["Lightbringer", "Tichondrius"]);
        assert_eq!(derive_key("op::name", &args), derive_key("op::name", &args));
    }

    #[test]
    fn test_memory_cache_get_has_set() {
        let mut cache = MemoryCache::new();
        assert!(cache.is_empty());
        assert!(!cache.has("k"));
        assert_eq!(cache.get("k"), None);

        cache.set("k", json!([1, 2]));
        assert!(cache.has("k"));
        assert_eq!(cache.get("k"), Some(json!([1, 2])));

        cache.set("k", json!("replaced"));
        assert_eq!(cache.get("k"), Some(json!("replaced")));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_memory_cache_stores_null_values() {
        let mut cache = MemoryCache::new();
        cache.set("empty", Value::Null);
        assert!(cache.has("empty"));
        assert_eq!(cache.get("empty"), Some(Value::Null));
    }

    #[test]
    fn test_trait_key_uses_derive_key() {
        let cache = MemoryCache::new();
        assert_eq!(cache.key("a::b", &json!("c")), "a.b-c");
    }
}
