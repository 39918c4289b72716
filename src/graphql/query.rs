//! Query lifecycle: preloaded handles, lazily triggered reads, and the
//! suspending read result both resolve to.

use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

use super::document::Operation;
use super::environment::Environment;
use super::FetchError;

pub type Variables = Map<String, Value>;

/// Build a variables map from a JSON object literal; anything else is empty.
pub fn variables(value: Value) -> Variables {
    match value {
        Value::Object(map) => map,
        _ => Variables::new(),
    }
}

/// Identity of a request: operation name plus canonical variables JSON.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RequestKey {
    pub operation: &'static str,
    pub variables: String,
}

impl RequestKey {
    pub fn new(operation: &'static str, variables: &Value) -> Self {
        // serde_json maps are ordered, so equal variables render equally.
        Self {
            operation,
            variables: variables.to_string(),
        }
    }
}

impl fmt::Display for RequestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.operation, self.variables)
    }
}

/// Opaque handle to a dispatched query.
#[derive(Clone, Debug)]
pub struct QueryRef {
    pub(crate) key: RequestKey,
    pub(crate) operation: &'static Operation,
    pub(crate) variables: Arc<Value>,
}

impl QueryRef {
    pub fn key(&self) -> &RequestKey {
        &self.key
    }
}

/// Data read for a query, with the variables its fragment refs must be read with.
#[derive(Clone, Debug)]
pub struct QueryResult {
    pub data: Value,
    pub variables: Arc<Value>,
}

/// Result of a suspending read.
#[derive(Clone, Debug)]
pub enum Suspense<T> {
    /// Data not available yet; render a placeholder.
    Pending,
    Ready(T),
    Failed(FetchError),
}

impl<T> Suspense<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, Suspense::Pending)
    }

    /// Chain a fallible step onto ready data.
    pub fn and_then<U>(self, f: impl FnOnce(T) -> Result<U, FetchError>) -> Suspense<U> {
        match self {
            Suspense::Pending => Suspense::Pending,
            Suspense::Ready(v) => match f(v) {
                Ok(u) => Suspense::Ready(u),
                Err(e) => Suspense::Failed(e),
            },
            Suspense::Failed(e) => Suspense::Failed(e),
        }
    }
}

/// How a view obtains its query.
#[derive(Clone, Debug)]
pub enum QueryLifecycle {
    /// Preloaded view whose handle has not been issued yet.
    Idle,
    /// Dispatched ahead of time by the shell; the view only reads.
    Preloaded(QueryRef),
    /// Dispatched by the view itself the first time it renders.
    LazyTriggered(Variables),
}

impl QueryLifecycle {
    /// Suspending read. Lazy lifecycles dispatch on first call; the environment
    /// deduplicates, so later calls reuse the same request.
    pub fn resolve(
        &self,
        operation: &'static Operation,
        env: &mut Environment,
    ) -> Suspense<QueryResult> {
        match self {
            QueryLifecycle::Idle => Suspense::Pending,
            QueryLifecycle::Preloaded(query) => env.lookup(query),
            QueryLifecycle::LazyTriggered(vars) => {
                let query = env.fetch(operation, vars.clone());
                env.lookup(&query)
            }
        }
    }

    pub fn is_lazy(&self) -> bool {
        matches!(self, QueryLifecycle::LazyTriggered(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_keys_ignore_insertion_order() {
        let a = json!({"first": 10, "after": null});
        let b = json!({"after": null, "first": 10});
        assert_eq!(RequestKey::new("Q", &a), RequestKey::new("Q", &b));
        assert_ne!(
            RequestKey::new("Q", &json!({"first": 10})),
            RequestKey::new("Q", &json!({"first": 12}))
        );
    }

    #[test]
    fn suspense_combinators_keep_pending_and_failure() {
        let pending: Suspense<u32> = Suspense::Pending;
        assert!(pending.and_then(|v| Ok(v + 1)).is_pending());

        let failed: Suspense<u32> = Suspense::Failed(FetchError::Missing("x".into()));
        assert!(matches!(failed.and_then(|v| Ok(v + 1)), Suspense::Failed(_)));

        let ready = Suspense::Ready(1u32).and_then(|v| Ok(v * 2));
        assert!(matches!(ready, Suspense::Ready(2)));

        let broken = Suspense::Ready(1u32).and_then(|_| Err::<u32, _>(FetchError::Missing("y".into())));
        assert!(matches!(broken, Suspense::Failed(_)));
    }

    #[test]
    fn variables_helper_accepts_objects_only() {
        assert_eq!(variables(json!({"first": 12})).len(), 1);
        assert!(variables(json!([1, 2])).is_empty());
    }
}
