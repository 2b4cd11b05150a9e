//! Fetch-style response over an already materialized body.
//!
//! Transports that do not hand back a byte stream (the host primitive, or a
//! body that was read eagerly) wrap their result in a [`SyntheticResponse`].
//! Consumers read it exactly like a network response: `ok`, case-insensitive
//! headers, and memoized `json()`/`text()`.

use ledgerlink_core::{HeaderPairs, RawBody};
use ledgerlink_domain::{LedgerLinkError, Result};
use once_cell::sync::OnceCell;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct SyntheticResponse {
    status: u16,
    status_text: String,
    headers: HeaderMap,
    body: RawBody,
    json: OnceCell<std::result::Result<Option<Value>, String>>,
    text: OnceCell<String>,
}

impl SyntheticResponse {
    pub fn new(
        body: RawBody,
        status: u16,
        status_text: impl Into<String>,
        headers: HeaderMap,
    ) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            headers,
            body,
            json: OnceCell::new(),
            text: OnceCell::new(),
        }
    }

    /// Build from loose header pairs; pairs that are not valid HTTP headers
    /// are dropped.
    pub fn from_pairs(
        body: RawBody,
        status: u16,
        status_text: impl Into<String>,
        headers: &HeaderPairs,
    ) -> Self {
        Self::new(body, status, status_text, header_map(headers))
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    /// True for 2xx statuses.
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// True when the transport already delivered a decoded JSON body.
    pub fn has_structured_body(&self) -> bool {
        matches!(self.body, RawBody::Json(_))
    }

    /// Body as JSON. Text is parsed once, and a parse failure is remembered
    /// too; structured bodies are returned as they are. `None` when there is
    /// no body at all.
    pub fn json(&self) -> Result<Option<&Value>> {
        let parsed = self.json.get_or_init(|| match &self.body {
            RawBody::Absent => Ok(None),
            RawBody::Json(value) => Ok(Some(value.clone())),
            RawBody::Text(text) => serde_json::from_str(text).map(Some).map_err(|err| err.to_string()),
        });
        match parsed {
            Ok(value) => Ok(value.as_ref()),
            Err(detail) => {
                Err(LedgerLinkError::Internal(format!("response body is not valid JSON: {detail}")))
            }
        }
    }

    /// Body as text; structured bodies are serialized. Empty when absent.
    pub fn text(&self) -> &str {
        self.text.get_or_init(|| match &self.body {
            RawBody::Absent => String::new(),
            RawBody::Text(text) => text.clone(),
            RawBody::Json(value) => value.to_string(),
        })
    }

    pub fn array_buffer(&self) -> Result<Vec<u8>> {
        Err(unsupported_body_reader("array_buffer"))
    }

    pub fn blob(&self) -> Result<Vec<u8>> {
        Err(unsupported_body_reader("blob"))
    }

    pub fn form_data(&self) -> Result<Vec<(String, String)>> {
        Err(unsupported_body_reader("form_data"))
    }
}

fn unsupported_body_reader(reader: &str) -> LedgerLinkError {
    LedgerLinkError::NotImplemented(format!("{reader}() is not available on synthetic responses"))
}

pub(crate) fn header_map(pairs: &HeaderPairs) -> HeaderMap {
    let mut map = HeaderMap::with_capacity(pairs.len());
    for (name, value) in pairs {
        match (HeaderName::try_from(name.as_str()), HeaderValue::try_from(value.as_str())) {
            (Ok(name), Ok(value)) => {
                map.append(name, value);
            }
            _ => debug!(header = %name, "dropping invalid response header"),
        }
    }
    map
}
