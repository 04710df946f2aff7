//! Reqwest-backed implementation of the transport contract.

use crate::url::build_url;
use async_trait::async_trait;
use hrms_core::config::ApiConfig;
use hrms_core::error::{HrmsError, Result};
use hrms_core::session::storage::{SessionStorage, keys};
use hrms_core::transport::{HttpMethod, RequestBody, RequestOptions, Transport};
use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Talks HTTP to the HRMS backend.
///
/// Reads the access token and session id from the shared session storage on
/// every request, so the Authorization header always reflects the current
/// session without the transport holding credential state of its own.
#[derive(Clone)]
pub struct RestTransport {
    client: Client,
    config: ApiConfig,
    storage: Arc<dyn SessionStorage>,
}

impl RestTransport {
    /// Creates a transport with the configured base URL and timeout.
    pub fn new(config: ApiConfig, storage: Arc<dyn SessionStorage>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|err| HrmsError::internal(format!("failed to build HTTP client: {err}")))?;
        Ok(Self {
            client,
            config,
            storage,
        })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Synthesizes the Authorization header from storage:
    /// `Bearer <sessionId> <token>` when a session id is stored, else
    /// `Bearer <token>`, else no header.
    fn authorization_header(&self) -> Option<String> {
        let token = self.storage.get(&self.config.token_key)?;
        Some(match self.storage.get(keys::SESSION_ID) {
            Some(session_id) => format!("Bearer {session_id} {token}"),
            None => format!("Bearer {token}"),
        })
    }
}

#[async_trait]
impl Transport for RestTransport {
    async fn request(&self, endpoint: &str, options: RequestOptions) -> Result<Value> {
        let url = build_url(
            &self.config.url(endpoint),
            &options.path_params,
            &options.query,
        );

        let method = match options.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &url);

        if options.method.allows_body() {
            match &options.body {
                Some(RequestBody::Json(body)) => builder = builder.json(body),
                Some(RequestBody::Form(fields)) => builder = builder.form(fields),
                None => {}
            }
        }

        if let Some(auth) = self.authorization_header() {
            builder = builder.header(AUTHORIZATION, auth);
        }
        // Caller headers come last so an explicit Content-Type wins.
        for (name, value) in &options.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        tracing::debug!(method = options.method.as_str(), %url, "backend request");

        let response = builder
            .send()
            .await
            .map_err(|err| HrmsError::network(format!("request to {url} failed: {err}")))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| HrmsError::network(format!("failed to read response body: {err}")))?;
        let body = parse_body(&text);

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), %url, "backend request failed");
            return Err(HrmsError::transport(
                status.as_u16(),
                status.canonical_reason().unwrap_or("Request failed"),
                body,
            ));
        }

        Ok(body)
    }
}

/// Parses a response body: empty becomes `null`, invalid JSON is kept as the
/// raw text (some endpoints answer with plain strings).
fn parse_body(text: &str) -> Value {
    if text.is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::RwLock;

    #[derive(Default)]
    struct MapStorage(RwLock<HashMap<String, String>>);

    impl SessionStorage for MapStorage {
        fn get(&self, key: &str) -> Option<String> {
            self.0.read().unwrap().get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            self.0
                .write()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&self, key: &str) -> Result<()> {
            self.0.write().unwrap().remove(key);
            Ok(())
        }
    }

    fn transport_with(entries: &[(&str, &str)]) -> RestTransport {
        let storage = MapStorage::default();
        for (key, value) in entries {
            storage.set(key, value).unwrap();
        }
        RestTransport::new(ApiConfig::default(), Arc::new(storage)).unwrap()
    }

    #[test]
    fn test_no_token_no_header() {
        let transport = transport_with(&[]);
        assert_eq!(transport.authorization_header(), None);
    }

    #[test]
    fn test_bearer_token_only() {
        let transport = transport_with(&[(keys::TOKEN, "tok-1")]);
        assert_eq!(
            transport.authorization_header(),
            Some("Bearer tok-1".to_string())
        );
    }

    #[test]
    fn test_session_id_concatenated_into_header() {
        let transport = transport_with(&[(keys::TOKEN, "tok-1"), (keys::SESSION_ID, "sid-9")]);
        assert_eq!(
            transport.authorization_header(),
            Some("Bearer sid-9 tok-1".to_string())
        );
    }

    #[test]
    fn test_session_id_alone_is_not_enough() {
        let transport = transport_with(&[(keys::SESSION_ID, "sid-9")]);
        assert_eq!(transport.authorization_header(), None);
    }

    #[test]
    fn test_parse_body_shapes() {
        assert_eq!(parse_body(""), Value::Null);
        assert_eq!(parse_body("{\"a\":1}"), json!({"a": 1}));
        assert_eq!(parse_body("not json"), json!("not json"));
    }
}
