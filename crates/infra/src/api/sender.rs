//! Per-domain REST sender over a fetch transport
//!
//! One implementation serves every API domain; domains differ only in the
//! error prefix and media type. Each call makes exactly one attempt.

use std::sync::Arc;

use async_trait::async_trait;
use ledgerlink_core::{ApiSender, AuthContext};
use ledgerlink_domain::{
    ApiDomain, ApiReply, HttpConfig, LedgerLinkError, Result, SendRequest,
};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, LINK, LOCATION};
use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};
use url::Url;

use crate::errors::InfraError;
use crate::http::{fetch_from_callback, DirectFetch, Fetch, FetchRequest, SyntheticResponse, Transport};

/// [`ApiSender`] that talks HTTP through the transport picked per call.
pub struct HttpApiSender {
    config: HttpConfig,
    direct: Option<Arc<dyn Fetch>>,
    platform: DirectFetch,
}

impl HttpApiSender {
    pub fn new(config: HttpConfig) -> Result<Self> {
        let platform = DirectFetch::new(&config)?;
        Ok(Self { config, direct: None, platform })
    }

    /// Use `fetch` whenever the auth context carries no host primitive.
    pub fn with_fetch(mut self, fetch: Arc<dyn Fetch>) -> Self {
        self.direct = Some(fetch);
        self
    }

    async fn execute(&self, auth: &AuthContext, request: FetchRequest) -> Result<SyntheticResponse> {
        let transport = Transport::resolve(auth, self.direct.as_ref());
        debug!(transport = transport.name(), "dispatching request");

        match transport {
            Transport::Primitive(primitive) => fetch_from_callback(primitive).fetch(request).await,
            Transport::Direct(fetch) => fetch.fetch(request).await,
            Transport::Platform => self.platform.fetch(request).await,
        }
    }

    fn headers(&self, auth: &AuthContext, domain: ApiDomain, has_body: bool) -> Vec<(String, String)> {
        let mut headers = vec![
            (AUTHORIZATION.as_str().to_string(), format!("Bearer {}", auth.token)),
            (self.config.tenant_header.clone(), auth.tenant_id.clone()),
            (ACCEPT.as_str().to_string(), domain.media_type().to_string()),
        ];
        if has_body {
            headers.push((CONTENT_TYPE.as_str().to_string(), domain.media_type().to_string()));
        }
        headers
    }
}

#[async_trait]
impl ApiSender for HttpApiSender {
    #[instrument(skip(self, auth, request), fields(method = %request.method, path = %request.path))]
    async fn send(
        &self,
        auth: &AuthContext,
        domain: ApiDomain,
        request: SendRequest,
    ) -> Result<ApiReply> {
        let url = build_url(&auth.host, &request.path, &request.query)?;
        let body = request
            .body
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|err| LedgerLinkError::Internal(format!("failed to serialize body: {err}")))?;

        let mut fetch_request = FetchRequest::new(url)
            .method(request.method)
            .headers(self.headers(auth, domain, body.is_some()));
        if let Some(body) = body {
            fetch_request = fetch_request.body(body);
        }

        let response = self
            .execute(auth, fetch_request)
            .await
            .map_err(|err| transport_failure(domain, err))?;
        let status = response.status();
        let decoded = decode_body(&response);

        if !response.ok() {
            let message = failure_message(domain, &response, decoded.as_ref());
            warn!(status, %message, "API request failed");
            return Err(LedgerLinkError::api(message, Some(status)));
        }

        debug!(status, has_body = decoded.is_some(), "API request succeeded");
        Ok(ApiReply { status, body: decoded, location: location(&response) })
    }
}

/// Absolute URL for `path` under `host`, with blank query entries dropped.
pub fn build_url(host: &str, path: &str, query: &[(String, Value)]) -> Result<Url> {
    let host = host.trim();
    if host.is_empty() {
        return Err(LedgerLinkError::operation("The API host is required"));
    }

    let base = Url::parse(&format!("{}/", host.trim_end_matches('/')))
        .map_err(|err| LedgerLinkError::from(InfraError::from(err)))?;
    let mut url = base
        .join(path.trim_start_matches('/'))
        .map_err(|err| LedgerLinkError::from(InfraError::from(err)))?;

    let pairs: Vec<(&str, String)> = query
        .iter()
        .filter_map(|(key, value)| query_value(value).map(|value| (key.as_str(), value)))
        .collect();
    if !pairs.is_empty() {
        url.query_pairs_mut().extend_pairs(pairs);
    }
    Ok(url)
}

fn query_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// Body of a response: nothing for 204/205 and empty text, parsed JSON for
/// JSON content (malformed JSON counts as nothing), text otherwise.
fn decode_body(response: &SyntheticResponse) -> Option<Value> {
    if matches!(response.status(), 204 | 205) {
        return None;
    }

    let is_json = response
        .header(CONTENT_TYPE.as_str())
        .is_some_and(|content_type| content_type.to_ascii_lowercase().contains("json"));
    if is_json || response.has_structured_body() {
        return match response.json() {
            Ok(value) => value.cloned(),
            Err(err) => {
                debug!(error = %err, "ignoring undecodable JSON body");
                None
            }
        };
    }

    let text = response.text();
    (!text.is_empty()).then(|| Value::String(text.to_string()))
}

/// Prefix a transport failure with the domain, keeping the transport's detail.
fn transport_failure(domain: ApiDomain, err: LedgerLinkError) -> LedgerLinkError {
    match err {
        LedgerLinkError::Network(detail) => {
            warn!(%detail, "API request could not be sent");
            LedgerLinkError::Network(format!("{} ({detail})", domain.error_prefix()))
        }
        other => other,
    }
}

fn failure_message(domain: ApiDomain, response: &SyntheticResponse, body: Option<&Value>) -> String {
    let status = format!("{} {}", response.status(), response.status_text());
    let head = format!("{} ({})", domain.error_prefix(), status.trim_end());
    match body.and_then(error_detail) {
        Some(detail) => format!("{head}: {detail}"),
        None => head,
    }
}

fn error_detail(body: &Value) -> Option<String> {
    match body {
        Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        Value::Object(map) => {
            let primary = ["message", "detail", "error"].iter().find_map(|key| text_field(map, key))?;
            Some(match text_field(map, "error_description") {
                Some(description) => format!("{primary}: {description}"),
                None => primary,
            })
        }
        _ => None,
    }
}

fn text_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).filter(|text| !text.trim().is_empty()).map(str::to_string)
}

/// Target of a `Location` header, else the URI of a `Link` header.
fn location(response: &SyntheticResponse) -> Option<String> {
    if let Some(location) = response.header(LOCATION.as_str()) {
        return Some(location.to_string());
    }

    let link = response.header(LINK.as_str())?;
    let target = match (link.find('<'), link.find('>')) {
        (Some(start), Some(end)) if start < end => &link[start + 1..end],
        _ => link,
    };
    Some(target.trim().to_string())
}

#[cfg(test)]
mod tests {
    use ledgerlink_core::RawBody;
    use reqwest::header::HeaderMap;
    use serde_json::json;

    use super::*;

    fn response(status: u16, status_text: &str, headers: &[(&str, &str)], body: RawBody) -> SyntheticResponse {
        let pairs = headers.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        SyntheticResponse::from_pairs(body, status, status_text, &pairs)
    }

    #[test]
    fn url_drops_blank_query_values_and_form_encodes() {
        let query = vec![
            ("filter".to_string(), json!("number eq 12345")),
            ("top".to_string(), json!(10)),
            ("skip".to_string(), Value::Null),
            ("select".to_string(), json!("")),
            ("active".to_string(), json!(false)),
        ];

        let url = build_url("https://erp.example.com/api", "/dms/v2/documents", &query).unwrap();

        assert_eq!(
            url.as_str(),
            "https://erp.example.com/api/dms/v2/documents?filter=number+eq+12345&top=10&active=false"
        );
    }

    #[test]
    fn url_without_query_has_no_question_mark() {
        let url = build_url("https://erp.example.com//", "accounting/v1/clients", &[]).unwrap();
        assert_eq!(url.as_str(), "https://erp.example.com/accounting/v1/clients");
    }

    #[test]
    fn blank_host_is_rejected() {
        let err = build_url("  ", "x", &[]).unwrap_err();
        assert!(err.is_user_facing());
    }

    #[test]
    fn no_content_statuses_have_no_body() {
        let reply = response(204, "No Content", &[], RawBody::Text("ignored".into()));
        assert_eq!(decode_body(&reply), None);
    }

    #[test]
    fn malformed_json_bodies_decode_to_nothing() {
        let reply = response(200, "OK", &[("Content-Type", "application/json; charset=utf-8")], RawBody::Text("{oops".into()));
        assert_eq!(decode_body(&reply), None);
    }

    #[test]
    fn non_json_bodies_are_text_and_empty_text_is_nothing() {
        let reply = response(200, "OK", &[("content-type", "text/plain")], RawBody::Text("pong".into()));
        assert_eq!(decode_body(&reply), Some(json!("pong")));

        let empty = response(200, "OK", &[], RawBody::Text(String::new()));
        assert_eq!(decode_body(&empty), None);
    }

    #[test]
    fn failure_message_prefers_message_then_detail_then_error() {
        let reply = response(400, "Bad Request", &[], RawBody::Absent);

        let with_message = json!({ "message": "m", "detail": "d" });
        assert_eq!(
            failure_message(ApiDomain::Documents, &reply, Some(&with_message)),
            "Document Management API request failed (400 Bad Request): m"
        );

        let oauth = json!({ "error": "invalid_grant", "error_description": "token expired" });
        assert_eq!(
            failure_message(ApiDomain::Identity, &reply, Some(&oauth)),
            "Identity API request failed (400 Bad Request): invalid_grant: token expired"
        );

        assert_eq!(
            failure_message(ApiDomain::Orders, &reply, Some(&json!({ "code": 7 }))),
            "Order Management API request failed (400 Bad Request)"
        );
        assert_eq!(
            failure_message(ApiDomain::Accounting, &reply, Some(&json!("plain text"))),
            "Accounting API request failed (400 Bad Request): plain text"
        );
    }

    #[test]
    fn failure_message_without_status_text_has_no_trailing_space() {
        let reply = SyntheticResponse::new(RawBody::Absent, 502, "", HeaderMap::new());
        assert_eq!(failure_message(ApiDomain::Orders, &reply, None), "Order Management API request failed (502)");
    }

    #[test]
    fn transport_failures_gain_the_domain_prefix() {
        let err = transport_failure(ApiDomain::Documents, LedgerLinkError::Network("offline".into()));
        assert_eq!(
            err,
            LedgerLinkError::Network("Document Management API request failed (offline)".into())
        );

        let config = LedgerLinkError::Config("invalid HTTP request".into());
        assert_eq!(transport_failure(ApiDomain::Documents, config.clone()), config);
    }

    #[test]
    fn location_falls_back_to_link_header() {
        let with_location = response(201, "Created", &[("Location", "/documents/1")], RawBody::Absent);
        assert_eq!(location(&with_location).as_deref(), Some("/documents/1"));

        let with_link = response(201, "Created", &[("Link", "</documents/2>; rel=\"self\"")], RawBody::Absent);
        assert_eq!(location(&with_link).as_deref(), Some("/documents/2"));

        let bare = response(201, "Created", &[], RawBody::Absent);
        assert_eq!(location(&bare), None);
    }
}
