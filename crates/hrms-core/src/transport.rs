//! HTTP transport contract.
//!
//! Defines the interface the session layer uses to talk to the HRMS backend,
//! decoupling the core from any specific HTTP client. The concrete
//! reqwest-backed implementation lives in `hrms-transport`.

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// HTTP method for a backend request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// GET requests never carry a body, regardless of the options.
    pub fn allows_body(&self) -> bool {
        !matches!(self, HttpMethod::Get)
    }
}

/// Request payload.
///
/// JSON bodies are serialized with `Content-Type: application/json`; form
/// bodies are sent url-encoded as-is, the transport must not re-serialize
/// them.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(Value),
    Form(Vec<(String, String)>),
}

/// Options for a single backend request.
///
/// Built incrementally:
///
/// ```
/// use hrms_core::transport::{HttpMethod, RequestOptions};
/// use serde_json::json;
///
/// let opts = RequestOptions::new(HttpMethod::Get)
///     .with_path_param("id", "42")
///     .with_query("expand", json!(["address", "roles"]));
/// assert_eq!(opts.path_params.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: HttpMethod,
    /// Substituted into `:key` and `{key}` placeholders in the endpoint path.
    pub path_params: Vec<(String, String)>,
    /// Query parameters. `Null` values are skipped, arrays repeat the key,
    /// objects are JSON-stringified, scalars are stringified.
    pub query: Vec<(String, Value)>,
    /// Extra headers; a caller-supplied `Content-Type` wins over the default.
    pub headers: Vec<(String, String)>,
    pub body: Option<RequestBody>,
}

impl RequestOptions {
    pub fn new(method: HttpMethod) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn with_path_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_params.push((key.into(), value.into()));
        self
    }

    pub fn with_query(mut self, key: impl Into<String>, value: Value) -> Self {
        self.query.push((key.into(), value));
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_json_body(mut self, body: Value) -> Self {
        self.body = Some(RequestBody::Json(body));
        self
    }

    pub fn with_form_body(mut self, fields: Vec<(String, String)>) -> Self {
        self.body = Some(RequestBody::Form(fields));
        self
    }
}

/// Abstract HTTP transport to the HRMS backend.
///
/// Implementations are responsible for:
/// - URL assembly (path-parameter substitution, query-string construction)
/// - `Authorization: Bearer <sessionId> <token>` header synthesis when a
///   session id is stored, else `Bearer <token>`, else no header
/// - JSON body serialization and response parsing
/// - Mapping non-2xx responses to `HrmsError::Transport` carrying the HTTP
///   status and the parsed error body
///
/// A 2xx response with an empty body resolves to JSON `null`.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs a request against `endpoint` (a path relative to the
    /// configured base URL) and returns the parsed response body.
    async fn request(&self, endpoint: &str, options: RequestOptions) -> Result<Value>;

    async fn get(&self, endpoint: &str) -> Result<Value> {
        self.request(endpoint, RequestOptions::new(HttpMethod::Get))
            .await
    }

    async fn post(&self, endpoint: &str, body: Value) -> Result<Value> {
        self.request(
            endpoint,
            RequestOptions::new(HttpMethod::Post).with_json_body(body),
        )
        .await
    }

    async fn put(&self, endpoint: &str, body: Value) -> Result<Value> {
        self.request(
            endpoint,
            RequestOptions::new(HttpMethod::Put).with_json_body(body),
        )
        .await
    }

    async fn delete(&self, endpoint: &str) -> Result<Value> {
        self.request(endpoint, RequestOptions::new(HttpMethod::Delete))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_never_allows_body() {
        assert!(!HttpMethod::Get.allows_body());
        assert!(HttpMethod::Post.allows_body());
        assert!(HttpMethod::Put.allows_body());
        assert!(HttpMethod::Delete.allows_body());
    }

    #[test]
    fn test_builder_accumulates() {
        let opts = RequestOptions::new(HttpMethod::Post)
            .with_path_param("id", "7")
            .with_query("page", json!(2))
            .with_header("X-Trace", "abc")
            .with_json_body(json!({"name": "Ann"}));

        assert_eq!(opts.method, HttpMethod::Post);
        assert_eq!(opts.path_params, vec![("id".to_string(), "7".to_string())]);
        assert_eq!(opts.query, vec![("page".to_string(), json!(2))]);
        assert_eq!(opts.body, Some(RequestBody::Json(json!({"name": "Ann"}))));
    }
}
