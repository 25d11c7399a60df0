//! Resource abstraction for Battle.net endpoints.
//!
//! A resource wraps a [`ResourceClient`] pointed at one endpoint and decides
//! how that endpoint's canonical result set is loaded into the client cache.
//! Everything else is shared:
//!
//! - **[`Resource`] trait**: the capability a resource implements (client
//!   access, schema, cache population, filtering)
//! - **[`ResourceExt`] trait**: `results()` and the memoized `filter_by()`,
//!   provided for every [`Resource`] through a blanket implementation so
//!   they cannot be overridden
//! - **[`FilterSpec`]** and **[`filter`]**: the inclusion rule
//! - **[`Schema`]**: declared values of enumerated fields
//!
//! # Implementing a Resource
//!
//! ```rust,ignore
//! use battlenet_api::clients::ResourceClient;
//! use battlenet_api::resource::{Resource, ResourceExt, BASE_CACHE_KEY};
//! use battlenet_api::ApiError;
//!
//! struct Pets {
//!     client: ResourceClient,
//! }
//!
//! impl Resource for Pets {
//!     fn client(&self) -> &ResourceClient {
//!         &self.client
//!     }
//!
//!     fn client_mut(&mut self) -> &mut ResourceClient {
//!         &mut self.client
//!     }
//!
//!     async fn cache(&mut self) -> Result<bool, ApiError> {
//!         if self.client.cache_engine().has(BASE_CACHE_KEY) {
//!             return Ok(true);
//!         }
//!         let response = self.client.request().await;
//!         // store response.response()["pets"] under BASE_CACHE_KEY ...
//!         Ok(true)
//!     }
//! }
//!
//! // Usage:
//! let rare = pets.filter_by("Pets::rare", "quality", "rare".into()).await?;
//! ```

mod filter;
mod schema;

pub use filter::{filter, FilterSpec, Predicate};
pub use schema::Schema;

use serde_json::{Map, Value};

use crate::clients::ResourceClient;
use crate::error::ApiError;

/// Cache key of a resource's unfiltered result set.
pub const BASE_CACHE_KEY: &str = "__cache";

static EMPTY_SCHEMA: Schema = Schema::new();

/// A Battle.net endpoint built on a [`ResourceClient`].
#[allow(async_fn_in_trait)]
pub trait Resource {
    /// Returns the underlying client.
    fn client(&self) -> &ResourceClient;

    /// Returns the underlying client mutably.
    fn client_mut(&mut self) -> &mut ResourceClient;

    /// Returns the declared values of this resource's enumerated fields.
    fn schema(&self) -> &Schema {
        &EMPTY_SCHEMA
    }

    /// Populates [`BASE_CACHE_KEY`] with the unfiltered result set.
    ///
    /// Returns `Ok(true)` when the base set is available and `Ok(false)` when
    /// the API returned nothing usable. The default does nothing and reports
    /// success: a resource without a canonical result set has nothing to
    /// store.
    ///
    /// # Errors
    ///
    /// Implementations return [`ApiError::Transport`] when the request fails.
    async fn cache(&mut self) -> Result<bool, ApiError> {
        Ok(true)
    }

    /// Keeps the records of `results` whose `field` passes `spec`.
    fn filter(&self, results: &[Value], field: &str, spec: &FilterSpec) -> Vec<Value> {
        filter(results, field, spec)
    }
}

/// Operations shared by every [`Resource`].
#[allow(async_fn_in_trait)]
pub trait ResourceExt: Resource {
    /// Returns the unfiltered result set, populating it first if needed.
    ///
    /// Returns `None` if the resource stored nothing.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Resource::cache`].
    async fn results(&mut self) -> Result<Option<Value>, ApiError>;

    /// Filters the base result set, memoizing the outcome.
    ///
    /// The memo key is derived from `operation` and the filter arguments
    /// (see [`FilterSpec::cache_args`]). A repeated call with the same
    /// arguments returns the memoized list without filtering again. When
    /// different arguments map to the same key (`"1"` and `1`, say), the
    /// filter runs again and replaces the entry. A missing or non-list base
    /// set filters to an empty list.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Resource::cache`].
    async fn filter_by(
        &mut self,
        operation: &str,
        field: &str,
        spec: FilterSpec,
    ) -> Result<Vec<Value>, ApiError>;
}

impl<R: Resource + ?Sized> ResourceExt for R {
    async fn results(&mut self) -> Result<Option<Value>, ApiError> {
        self.cache().await?;
        self.client_mut().mark_queried();

        Ok(self.client().cache_engine().get(BASE_CACHE_KEY))
    }

    async fn filter_by(
        &mut self,
        operation: &str,
        field: &str,
        spec: FilterSpec,
    ) -> Result<Vec<Value>, ApiError> {
        self.cache().await?;
        self.client_mut().mark_queried();

        let engine = self.client().cache_engine();
        let args = spec.cache_args(field);
        let key = engine.key(operation, &args);

        // Keys flatten JSON types and sanitize text, so `"1"` and `1` share
        // one. Only reuse an entry built from the same arguments.
        if let Some(cached) = engine.get(&key).and_then(|entry| memoized(entry, &args)) {
            tracing::debug!("Filter cache hit for {}", key);
            return Ok(cached);
        }

        tracing::debug!("Filter cache miss for {}", key);
        let base = match engine.get(BASE_CACHE_KEY) {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        };

        let results = self.filter(&base, field, &spec);
        let mut entry = Map::new();
        entry.insert(MEMO_ARGS.to_string(), args);
        entry.insert(MEMO_RESULTS.to_string(), Value::Array(results.clone()));
        self.client_mut()
            .cache_engine_mut()
            .set(&key, Value::Object(entry));

        Ok(results)
    }
}

const MEMO_ARGS: &str = "args";
const MEMO_RESULTS: &str = "results";

/// Returns the memoized list if `entry` was computed for `args`.
fn memoized(entry: Value, args: &Value) -> Option<Vec<Value>> {
    let Value::Object(mut entry) = entry else {
        return None;
    };
    if entry.get(MEMO_ARGS) != Some(args) {
        return None;
    }
    match entry.remove(MEMO_RESULTS) {
        Some(Value::Array(results)) => Some(results),
        _ => None,
    }
}
