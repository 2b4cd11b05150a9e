//! Request/response descriptors shared by the resource handlers and the
//! per-domain senders.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Media type sent in `Accept`/`Content-Type` for most domains.
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Media type of the SCIM identity endpoints.
pub const SCIM_MEDIA_TYPE: &str = "application/scim+json";

/// API family of the upstream platform.
///
/// Every domain is served from the same host with the same credentials; the
/// families differ only in the prefix used for failure messages and the
/// media type they speak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiDomain {
    Accounting,
    Documents,
    Identity,
    Orders,
}

impl ApiDomain {
    /// Leading text of every error raised for a failed request.
    pub fn error_prefix(self) -> &'static str {
        match self {
            Self::Accounting => "Accounting API request failed",
            Self::Documents => "Document Management API request failed",
            Self::Identity => "Identity API request failed",
            Self::Orders => "Order Management API request failed",
        }
    }

    pub fn media_type(self) -> &'static str {
        match self {
            Self::Identity => SCIM_MEDIA_TYPE,
            Self::Accounting | Self::Documents | Self::Orders => JSON_MEDIA_TYPE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Accounting => "accounting",
            Self::Documents => "documents",
            Self::Identity => "identity",
            Self::Orders => "orders",
        }
    }
}

impl fmt::Display for ApiDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One request against a domain: built by a handler, consumed by a sender.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SendRequest {
    pub path: String,
    pub method: HttpMethod,
    /// Query entries in emission order. Null and empty-string values are
    /// dropped when the URL is built.
    pub query: Vec<(String, Value)>,
    pub body: Option<Value>,
}

impl SendRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self { path: path.into(), method, query: Vec::new(), body: None }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Append a query entry; `None` is recorded as null and later omitted.
    pub fn query<V: Into<Value>>(mut self, key: &str, value: Option<V>) -> Self {
        self.query.push((key.to_string(), value.map_or(Value::Null, Into::into)));
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// What a sender hands back after a successful exchange.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiReply {
    pub status: u16,
    /// Decoded body; `None` for empty, no-content or undecodable bodies.
    pub body: Option<Value>,
    /// Target of a `Location` (or `Link`) header, if the response carried one.
    pub location: Option<String>,
}

impl ApiReply {
    /// Body of the reply, ignoring the location header.
    pub fn into_body(self) -> Option<Value> {
        self.body.filter(|body| !body.is_null())
    }

    /// Body of the reply, or a minimal record pointing at the created
    /// resource when the server answered with a bare `Location` header.
    pub fn into_created(self) -> Option<Value> {
        match (self.body, self.location) {
            (Some(body), _) if !body.is_null() => Some(body),
            (_, Some(location)) => Some(json!({ "success": true, "location": location })),
            _ => None,
        }
    }
}
