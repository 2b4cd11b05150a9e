//! Port for a host-provided, callback-style HTTP primitive.
//!
//! Workflow hosts usually ship their own request helper (proxy settings,
//! certificate handling, request logging). The infra crate adapts anything
//! implementing [`RequestPrimitive`] into a fetch-compatible transport, so
//! the senders never need to know which one executed a call.

use async_trait::async_trait;
use ledgerlink_domain::HttpMethod;
use serde_json::Value;
use thiserror::Error;

/// Header list as `(name, value)` pairs, names in any case.
pub type HeaderPairs = Vec<(String, String)>;

/// Body as handed over by the primitive.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RawBody {
    #[default]
    Absent,
    /// Unparsed payload, typically JSON text.
    Text(String),
    /// Payload the primitive already decoded.
    Json(Value),
}

/// Options passed to the primitive for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HeaderPairs,
    pub body: Option<String>,
    /// Ask for status and headers too, not only the body.
    pub return_full_response: bool,
}

/// Full response as reported by the primitive. Missing pieces are defaulted
/// by the adapter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrimitiveResponse {
    pub status_code: Option<u16>,
    pub status_message: Option<String>,
    pub headers: HeaderPairs,
    pub body: RawBody,
}

/// Failure raised by the primitive.
///
/// Hosts usually raise on non-2xx responses and attach what they received;
/// `response` and `status_code` carry that, when known.
#[derive(Debug, Clone, Default, PartialEq, Error)]
#[error("{message}")]
pub struct PrimitiveError {
    pub message: String,
    pub status_code: Option<u16>,
    pub response: Option<PrimitiveResponse>,
}

impl PrimitiveError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), ..Self::default() }
    }

    pub fn with_response(mut self, response: PrimitiveResponse) -> Self {
        self.response = Some(response);
        self
    }

    pub fn with_status(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }
}

/// Callback-style request primitive supplied by the workflow host.
#[async_trait]
pub trait RequestPrimitive: Send + Sync {
    /// Execute one request.
    async fn request(
        &self,
        options: PrimitiveRequest,
    ) -> std::result::Result<PrimitiveResponse, PrimitiveError>;
}
