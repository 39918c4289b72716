//! Declarative GraphQL data layer: composed documents, a pluggable transport,
//! a normalized record store and suspending query reads.

pub mod document;
pub mod environment;
pub mod query;
pub mod store;
pub mod transport;

pub use document::{Fragment, Operation};
pub use environment::{Environment, FetchCompleted, FragmentRef};
pub use query::{variables, QueryLifecycle, QueryRef, QueryResult, RequestKey, Suspense, Variables};
pub use store::{DataId, RecordStore};
pub use transport::{GraphQlRequest, HttpTransport, Transport, TransportError};

/// Why a query could not produce data.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server answered, but with `errors` and no `data`.
    #[error("graphql errors: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    #[error("invalid document: {0}")]
    Document(String),

    /// Data expected by a reader is not in the store.
    #[error("missing data: {0}")]
    Missing(String),
}
