//! # HTTP Transport
//!
//! The [`Transport`] capability performs `GET/POST/PATCH/DELETE` against a base URL and
//! returns the parsed JSON body, or a [`TransportError`] carrying the status and body.
//! [`HttpTransport`] is the reqwest-backed implementation; tests use
//! [`MockTransport`](crate::mock::MockTransport).

use crate::error::TransportError;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

pub use reqwest::{Method, Url};

/// Asynchronous access to the remote JSON API.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform one request. `path` is relative to the transport's base URL and may carry
    /// a query string.
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, TransportError>;

    async fn get(&self, path: &str) -> Result<Value, TransportError> {
        self.send(Method::GET, path, None).await
    }

    async fn post(&self, path: &str, body: Option<Value>) -> Result<Value, TransportError> {
        self.send(Method::POST, path, body).await
    }

    async fn patch(&self, path: &str, body: Option<Value>) -> Result<Value, TransportError> {
        self.send(Method::PATCH, path, body).await
    }

    async fn delete(&self, path: &str) -> Result<Value, TransportError> {
        self.send(Method::DELETE, path, None).await
    }
}

/// Supplies the bearer token for one request. `None` sends the request unauthenticated.
pub type TokenSource = Arc<dyn Fn() -> Option<String> + Send + Sync>;

/// Transport that talks to the API over HTTP with reqwest.
pub struct HttpTransport {
    client: Client,
    base_url: Url,
    token: Option<TokenSource>,
}

impl HttpTransport {
    /// Build a transport with an explicit request timeout.
    ///
    /// `base_url` may carry a path prefix (`https://host/v1`). Request paths are resolved
    /// beneath it, leading `/` or not.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: as_directory(base_url),
            token: None,
        })
    }

    /// Attach `Authorization: Bearer <token>` whenever `source` yields a token.
    ///
    /// The source is consulted on every request, so a session that changes after the
    /// transport was built is picked up immediately.
    pub fn with_token_source(
        mut self,
        source: impl Fn() -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.token = Some(Arc::new(source));
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, TransportError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| TransportError::InvalidUrl(format!("{path}: {e}")))
    }
}

/// `https://host/v1` and `https://host/v1/` both become the latter, so joins stay beneath it.
fn as_directory(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, body))]
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, TransportError> {
        let url = self.endpoint(path)?;

        let mut request = self.client.request(method, url);
        if let Some(token) = self.token.as_ref().and_then(|source| source()) {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        debug!(status = status.as_u16(), len = bytes.len(), "Response");

        if !status.is_success() {
            return Err(status_error(status, &bytes));
        }
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(|e| TransportError::Decode(e.to_string()))
    }
}

fn status_error(status: StatusCode, body: &[u8]) -> TransportError {
    TransportError::Status {
        status: status.as_u16(),
        body: serde_json::from_slice(body).ok(),
    }
}

/// Decode a list from a response body.
///
/// Tries each key in order (`{ "data": [...] }`, `{ "bookings": [...] }`), then the body
/// itself when it is already an array.
pub fn extract_list<T: DeserializeOwned>(
    body: Value,
    keys: &[&str],
) -> Result<Vec<T>, TransportError> {
    let list = match body {
        Value::Array(items) => Value::Array(items),
        Value::Object(mut map) => keys
            .iter()
            .find_map(|key| map.remove(*key).filter(Value::is_array))
            .ok_or_else(|| {
                TransportError::Decode(format!("no list under any of {keys:?}"))
            })?,
        other => {
            return Err(TransportError::Decode(format!(
                "expected a list, got {}",
                kind(&other)
            )))
        }
    };
    serde_json::from_value(list).map_err(|e| TransportError::Decode(e.to_string()))
}

/// Decode a single record from a response body.
///
/// Tries each key in order (`{ "booking": {...} }`, `{ "data": {...} }`), then the body
/// itself.
pub fn extract_record<T: DeserializeOwned>(body: Value, keys: &[&str]) -> Result<T, TransportError> {
    let record = match body {
        Value::Object(mut map) => {
            match keys
                .iter()
                .find_map(|key| map.remove(*key).filter(Value::is_object))
            {
                Some(inner) => inner,
                None => Value::Object(map),
            }
        }
        other => {
            return Err(TransportError::Decode(format!(
                "expected a record, got {}",
                kind(&other)
            )))
        }
    };
    serde_json::from_value(record).map_err(|e| TransportError::Decode(e.to_string()))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: String,
    }

    #[test]
    fn test_extract_list_tries_keys_in_order() {
        let body = json!({ "bookings": [{ "id": "B2" }], "data": [{ "id": "B1" }] });
        let items: Vec<Item> = extract_list(body, &["data", "bookings"]).unwrap();
        assert_eq!(items, vec![Item { id: "B1".into() }]);

        let body = json!({ "bookings": [{ "id": "B2" }] });
        let items: Vec<Item> = extract_list(body, &["data", "bookings"]).unwrap();
        assert_eq!(items, vec![Item { id: "B2".into() }]);
    }

    #[test]
    fn test_extract_list_accepts_bare_array_and_skips_non_arrays() {
        let items: Vec<Item> = extract_list(json!([{ "id": "A" }]), &["data"]).unwrap();
        assert_eq!(items.len(), 1);

        let body = json!({ "data": { "count": 2 }, "users": [{ "id": "U1" }] });
        let items: Vec<Item> = extract_list(body, &["data", "users"]).unwrap();
        assert_eq!(items, vec![Item { id: "U1".into() }]);
    }

    #[test]
    fn test_extract_list_reports_missing_list() {
        let result: Result<Vec<Item>, _> = extract_list(json!({ "ok": true }), &["data"]);
        assert!(matches!(result, Err(TransportError::Decode(_))));

        let result: Result<Vec<Item>, _> = extract_list(Value::Null, &["data"]);
        assert!(matches!(result, Err(TransportError::Decode(_))));
    }

    #[test]
    fn test_extract_record_unwraps_envelope_or_uses_body() {
        let wrapped: Item =
            extract_record(json!({ "booking": { "id": "B1" } }), &["booking", "data"]).unwrap();
        assert_eq!(wrapped.id, "B1");

        let bare: Item = extract_record(json!({ "id": "B2" }), &["booking", "data"]).unwrap();
        assert_eq!(bare.id, "B2");
    }

    #[test]
    fn test_paths_resolve_beneath_base_prefix() {
        let timeout = Duration::from_secs(1);
        let prefixed = HttpTransport::new(Url::parse("https://host/v1").unwrap(), timeout).unwrap();
        assert_eq!(
            prefixed.endpoint("/api/users?role=employee").unwrap().as_str(),
            "https://host/v1/api/users?role=employee"
        );
        assert_eq!(
            prefixed.endpoint("api/bookings").unwrap().as_str(),
            "https://host/v1/api/bookings"
        );

        let origin = HttpTransport::new(Url::parse("http://localhost:5000").unwrap(), timeout).unwrap();
        assert_eq!(
            origin.endpoint("/api/bookings/B1").unwrap().as_str(),
            "http://localhost:5000/api/bookings/B1"
        );
    }

    #[test]
    fn test_status_error_keeps_json_body() {
        let error = status_error(StatusCode::BAD_REQUEST, br#"{"message":"bad dates"}"#);
        assert_eq!(error.server_message(), Some("bad dates"));

        let error = status_error(StatusCode::BAD_GATEWAY, b"<html>oops</html>");
        assert_eq!(
            error,
            TransportError::Status {
                status: 502,
                body: None
            }
        );
    }
}
