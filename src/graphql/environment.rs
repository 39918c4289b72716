//! The data-fetching environment: transport + normalized store + request table.
//!
//! Constructed once by the binary and handed to `App`, which passes it down to
//! each view. Fetches run on tokio tasks and report back through the app event
//! channel; the store is only written from the UI loop, one response at a time.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

use super::document::{Fragment, Operation};
use super::query::{QueryRef, QueryResult, RequestKey, Suspense, Variables};
use super::store::{self, RecordStore, FRAGMENTS_KEY, ID_KEY, ROOT_ID};
use super::transport::{GraphQlRequest, Transport, TransportError};
use super::FetchError;
use crate::types::AppEvent;

/// Reply for one dispatched request, delivered on the app event channel.
#[derive(Debug)]
pub struct FetchCompleted {
    pub key: RequestKey,
    pub result: Result<Value, TransportError>,
}

#[derive(Debug, Clone)]
enum RequestState {
    InFlight(&'static Operation),
    Complete,
    Failed(FetchError),
}

/// Handle to one entity's data for a specific fragment, taken from a masked parent read.
#[derive(Debug, Clone)]
pub struct FragmentRef {
    pub id: String,
    pub(crate) variables: Arc<Value>,
}

impl FragmentRef {
    /// Extract the ref from a masked object if it spreads `fragment`.
    pub fn from_masked(value: &Value, fragment: &Fragment, variables: &Arc<Value>) -> Option<Self> {
        let spreads = value
            .get(FRAGMENTS_KEY)
            .and_then(|m| m.get(fragment.name()))
            .and_then(Value::as_bool)
            .unwrap_or(false);
        if !spreads {
            return None;
        }
        let id = value.get(ID_KEY)?.as_str()?;
        Some(Self {
            id: id.to_string(),
            variables: Arc::clone(variables),
        })
    }
}

pub struct Environment {
    transport: Arc<dyn Transport>,
    store: RecordStore,
    requests: HashMap<RequestKey, RequestState>,
    events: UnboundedSender<AppEvent>,
    dispatched: usize,
}

impl Environment {
    pub fn new(transport: Arc<dyn Transport>, events: UnboundedSender<AppEvent>) -> Self {
        Self {
            transport,
            store: RecordStore::new(),
            requests: HashMap::new(),
            events,
            dispatched: 0,
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Number of network requests issued so far.
    pub fn dispatched(&self) -> usize {
        self.dispatched
    }

    pub fn in_flight(&self) -> usize {
        self.requests
            .values()
            .filter(|s| matches!(s, RequestState::InFlight(_)))
            .count()
    }

    /// Dispatch `operation` unless an identical request is already known.
    /// Must be called from within a tokio runtime.
    pub fn fetch(&mut self, operation: &'static Operation, provided: Variables) -> QueryRef {
        let parsed = operation.parsed();
        let variables = match &parsed {
            Ok(p) => store::with_defaults(&p.variables, &provided),
            Err(_) => Value::Object(provided),
        };
        let key = RequestKey::new(operation.name(), &variables);
        let query = QueryRef {
            key: key.clone(),
            operation,
            variables: Arc::new(variables.clone()),
        };
        if self.requests.contains_key(&key) {
            return query;
        }

        let text = match parsed {
            Ok(p) => p.text.clone(),
            Err(e) => {
                log::error!("{key}: {e}");
                self.requests.insert(key, RequestState::Failed(e));
                return query;
            }
        };

        log::info!("dispatch {key}");
        self.requests.insert(key.clone(), RequestState::InFlight(operation));
        self.dispatched += 1;

        let transport = Arc::clone(&self.transport);
        let events = self.events.clone();
        let request = GraphQlRequest {
            query: text,
            variables,
            operation: operation.name(),
        };
        tokio::spawn(async move {
            let result = transport.execute(request).await;
            let _ = events.send(AppEvent::Fetched(FetchCompleted { key, result }));
        });
        query
    }

    /// Apply a network reply: publish data into the store or record the failure.
    pub fn on_completed(&mut self, done: FetchCompleted) {
        let FetchCompleted { key, result } = done;
        let Some(&RequestState::InFlight(operation)) = self.requests.get(&key) else {
            log::warn!("ignoring reply for unknown request {key}");
            return;
        };
        let state = match result {
            Ok(body) => self.publish_response(&key, operation, &body),
            Err(e) => Err(FetchError::Transport(e)),
        };
        match state {
            Ok(()) => {
                log::info!("complete {key} (store v{})", self.store.version());
                self.requests.insert(key, RequestState::Complete);
            }
            Err(e) => {
                log::error!("failed {key}: {e}");
                self.requests.insert(key, RequestState::Failed(e));
            }
        }
    }

    fn publish_response(
        &mut self,
        key: &RequestKey,
        operation: &'static Operation,
        body: &Value,
    ) -> Result<(), FetchError> {
        let errors: Vec<String> = body
            .get("errors")
            .and_then(Value::as_array)
            .map(|errs| {
                errs.iter()
                    .map(|e| {
                        e.get("message")
                            .and_then(Value::as_str)
                            .unwrap_or("unknown error")
                            .to_string()
                    })
                    .collect()
            })
            .unwrap_or_default();

        let data = match body.get("data") {
            Some(d) if d.is_object() => d,
            _ if !errors.is_empty() => return Err(FetchError::GraphQl(errors)),
            _ => return Err(FetchError::Missing("response has no data".into())),
        };
        if !errors.is_empty() {
            log::warn!("{key}: partial data with errors: {}", errors.join("; "));
        }

        let parsed = operation.parsed()?;
        let variables: Value = serde_json::from_str(&key.variables)
            .map_err(|e| FetchError::Document(e.to_string()))?;
        self.store
            .publish(&parsed.selection_set, &parsed.fragments, &variables, data)
    }

    /// Suspending read of a query's root selection.
    pub fn lookup(&self, query: &QueryRef) -> Suspense<QueryResult> {
        match self.requests.get(&query.key) {
            None | Some(RequestState::InFlight(_)) => Suspense::Pending,
            Some(RequestState::Failed(e)) => Suspense::Failed(e.clone()),
            Some(RequestState::Complete) => {
                let parsed = match query.operation.parsed() {
                    Ok(p) => p,
                    Err(e) => return Suspense::Failed(e),
                };
                match self
                    .store
                    .read(ROOT_ID, &parsed.selection_set, &query.variables)
                {
                    Ok(data) => Suspense::Ready(QueryResult {
                        data,
                        variables: Arc::clone(&query.variables),
                    }),
                    Err(e) => Suspense::Failed(e),
                }
            }
        }
    }

    /// Resolve a fragment ref to the fields `fragment` declares.
    pub fn read_fragment(&self, fragment: &Fragment, r: &FragmentRef) -> Result<Value, FetchError> {
        let def = fragment.definition()?;
        self.store.read(&r.id, &def.selection_set, &r.variables)
    }
}
