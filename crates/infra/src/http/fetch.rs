//! Fetch-compatible transports
//!
//! Every transport resolves a [`FetchRequest`] into a [`SyntheticResponse`].
//! Status interpretation is left to the caller: a non-2xx answer is a
//! successfully fetched response, not an error.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use ledgerlink_core::{
    HeaderPairs, PrimitiveError, PrimitiveRequest, PrimitiveResponse, RawBody, RequestPrimitive,
};
use ledgerlink_domain::{HttpConfig, HttpMethod, LedgerLinkError, Result};
use reqwest::header::HeaderMap;
use reqwest::{Client as ReqwestClient, Method, StatusCode};
use tracing::{debug, instrument, warn};
use url::Url;

use super::response::SyntheticResponse;
use crate::errors::InfraError;

/// Status reported when a failed primitive call carries no status of its own.
const FALLBACK_STATUS: u16 = 500;
const FALLBACK_STATUS_TEXT: &str = "Internal Server Error";

/// Single request in fetch terms.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HeaderPairs,
    pub body: Option<String>,
}

impl FetchRequest {
    pub fn new(target: impl Into<RequestTarget>) -> Self {
        Self { url: target.into().0, ..Self::default() }
    }

    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    pub fn headers(mut self, headers: impl Into<HeaderInput>) -> Self {
        self.headers.extend(headers.into().flatten());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Anything a URL can be taken from: text, a parsed URL, or a built request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTarget(String);

impl From<&str> for RequestTarget {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RequestTarget {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<Url> for RequestTarget {
    fn from(value: Url) -> Self {
        Self(value.into())
    }
}

impl From<&Url> for RequestTarget {
    fn from(value: &Url) -> Self {
        Self(value.as_str().to_string())
    }
}

impl From<&reqwest::Request> for RequestTarget {
    fn from(value: &reqwest::Request) -> Self {
        Self(value.url().as_str().to_string())
    }
}

/// Header shapes accepted by [`FetchRequest::headers`].
#[derive(Debug, Clone)]
pub enum HeaderInput {
    Map(HeaderMap),
    Pairs(HeaderPairs),
    Plain(BTreeMap<String, String>),
}

impl HeaderInput {
    /// Flatten into `(name, value)` pairs; non-UTF-8 values are skipped.
    pub fn flatten(self) -> HeaderPairs {
        match self {
            Self::Map(map) => map
                .iter()
                .filter_map(|(name, value)| {
                    value.to_str().ok().map(|value| (name.as_str().to_string(), value.to_string()))
                })
                .collect(),
            Self::Pairs(pairs) => pairs,
            Self::Plain(map) => map.into_iter().collect(),
        }
    }
}

impl From<HeaderMap> for HeaderInput {
    fn from(value: HeaderMap) -> Self {
        Self::Map(value)
    }
}

impl From<HeaderPairs> for HeaderInput {
    fn from(value: HeaderPairs) -> Self {
        Self::Pairs(value)
    }
}

impl From<BTreeMap<String, String>> for HeaderInput {
    fn from(value: BTreeMap<String, String>) -> Self {
        Self::Plain(value)
    }
}

impl From<HashMap<String, String>> for HeaderInput {
    fn from(value: HashMap<String, String>) -> Self {
        Self::Plain(value.into_iter().collect())
    }
}

/// Fetch-compatible transport.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Execute one request. Errors mean no response could be produced.
    async fn fetch(&self, request: FetchRequest) -> Result<SyntheticResponse>;
}

/// Fetch over a host-provided callback primitive.
///
/// Never rejects: primitive failures are turned into a response carrying
/// whatever status, headers and body could be recovered from the failure.
#[derive(Clone)]
pub struct CallbackFetch {
    primitive: Arc<dyn RequestPrimitive>,
}

/// Adapt a callback primitive into a [`Fetch`].
pub fn fetch_from_callback(primitive: Arc<dyn RequestPrimitive>) -> CallbackFetch {
    CallbackFetch { primitive }
}

#[async_trait]
impl Fetch for CallbackFetch {
    #[instrument(skip_all, fields(method = %request.method, url = %request.url))]
    async fn fetch(&self, request: FetchRequest) -> Result<SyntheticResponse> {
        let options = PrimitiveRequest {
            url: request.url,
            method: request.method,
            headers: request.headers,
            body: request.body,
            return_full_response: true,
        };

        match self.primitive.request(options).await {
            Ok(raw) => {
                let status = raw.status_code.unwrap_or(200);
                debug!(status, "primitive returned a response");
                Ok(SyntheticResponse::from_pairs(
                    raw.body,
                    status,
                    raw.status_message.unwrap_or_default(),
                    &raw.headers,
                ))
            }
            Err(err) => {
                debug!(error = %err, "primitive failed, recovering response");
                Ok(recovered(err))
            }
        }
    }
}

fn recovered(err: PrimitiveError) -> SyntheticResponse {
    let PrimitiveError { message, status_code, response } = err;
    let PrimitiveResponse { status_code: response_status, status_message, headers, body } =
        response.unwrap_or_default();

    let status = status_code.or(response_status);
    let status_text = status_message.filter(|text| !text.is_empty()).unwrap_or_else(|| {
        status
            .and_then(|code| StatusCode::from_u16(code).ok())
            .and_then(|code| code.canonical_reason())
            .unwrap_or(FALLBACK_STATUS_TEXT)
            .to_string()
    });
    let body = match body {
        RawBody::Absent if !message.is_empty() => RawBody::Text(message),
        other => other,
    };

    SyntheticResponse::from_pairs(body, status.unwrap_or(FALLBACK_STATUS), status_text, &headers)
}

/// Network fetch over reqwest. One attempt, no retries.
#[derive(Clone)]
pub struct DirectFetch {
    client: ReqwestClient,
}

impl DirectFetch {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .no_proxy()
            .build()
            .map_err(|err| LedgerLinkError::from(InfraError::from(err)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetch for DirectFetch {
    #[instrument(skip_all, fields(method = %request.method, url = %request.url))]
    async fn fetch(&self, request: FetchRequest) -> Result<SyntheticResponse> {
        let mut builder = self.client.request(reqwest_method(request.method), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|err| {
            warn!(error = %err, "HTTP request failed");
            LedgerLinkError::from(InfraError::from(err))
        })?;

        let status = response.status();
        let headers = response.headers().clone();
        let text =
            response.text().await.map_err(|err| LedgerLinkError::from(InfraError::from(err)))?;
        debug!(%status, bytes = text.len(), "received HTTP response");

        let body = if text.is_empty() { RawBody::Absent } else { RawBody::Text(text) };
        Ok(SyntheticResponse::new(
            body,
            status.as_u16(),
            status.canonical_reason().unwrap_or_default(),
            headers,
        ))
    }
}

fn reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    }
}
