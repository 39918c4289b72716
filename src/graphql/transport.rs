//! Network layer: one HTTP POST of `{query, variables}` per request.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::sync::OnceLock;
use std::time::Duration;

static HTTP: OnceLock<reqwest::Client> = OnceLock::new();

fn http_client() -> &'static reqwest::Client {
    HTTP.get_or_init(|| {
        reqwest::Client::builder()
            .pool_max_idle_per_host(8)
            .tcp_nodelay(true)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new())
    })
}

/// Wire body of a GraphQL request.
#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest {
    pub query: String,
    pub variables: Value,
    /// Operation name, for logging only (not sent).
    #[serde(skip)]
    pub operation: &'static str,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("http {status}: response failed")]
    Status { status: u16 },

    #[error("invalid response body: {0}")]
    Body(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            TransportError::Body(e.to_string())
        } else {
            TransportError::Request(e.to_string())
        }
    }
}

/// The single configurable network function used by the environment.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform one request and return the parsed JSON response.
    async fn execute(&self, request: GraphQlRequest) -> Result<Value, TransportError>;
}

/// reqwest-backed transport against a fixed endpoint.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    endpoint: String,
    timeout: Option<Duration>,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout,
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: GraphQlRequest) -> Result<Value, TransportError> {
        log::debug!(
            "POST {} operation={} variables={}",
            self.endpoint,
            request.operation,
            request.variables
        );

        let mut req = http_client()
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(&request);
        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }

        let res = req.send().await?;
        let status = res.status();
        if !status.is_success() {
            log::warn!("{} -> http {}", request.operation, status);
            return Err(TransportError::Status {
                status: status.as_u16(),
            });
        }
        let body: Value = res.json().await?;
        Ok(body)
    }
}
