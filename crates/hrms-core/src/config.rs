//! Backend API configuration.
//!
//! Mirrors the deployment-specific settings a screen layer needs to reach the
//! HRMS backend: base URL, endpoint catalogue, the storage key under which
//! the access token lives, and the request timeout.

use serde::{Deserialize, Serialize};

/// Top-level API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the HRMS backend, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Storage key under which the access token is persisted.
    #[serde(default = "default_token_key")]
    pub token_key: String,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default)]
    pub endpoints: Endpoints,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token_key: default_token_key(),
            timeout_ms: default_timeout_ms(),
            endpoints: Endpoints::default(),
        }
    }
}

impl ApiConfig {
    /// Joins the base URL with an endpoint path.
    pub fn url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }
}

/// Backend endpoint catalogue.
///
/// Entity-specific list/get/create/update endpoints are opaque to the core;
/// only the ones the session layer itself consumes are named here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Endpoints {
    #[serde(default = "default_login")]
    pub login: String,
    #[serde(default = "default_logout")]
    pub logout: String,
    /// Permission-scope listing for the authenticated user.
    #[serde(default = "default_scopes")]
    pub scopes: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            login: default_login(),
            logout: default_logout(),
            scopes: default_scopes(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8082/bt-hrms/api/v1".to_string()
}

fn default_token_key() -> String {
    "accessToken".to_string()
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_login() -> String {
    "/auth/login".to_string()
}

fn default_logout() -> String {
    "/auth/logout".to_string()
}

fn default_scopes() -> String {
    "/roles/scope".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let config = ApiConfig::default();
        assert_eq!(
            config.url("/auth/login"),
            "http://localhost:8082/bt-hrms/api/v1/auth/login"
        );
        assert_eq!(
            config.url("auth/login"),
            "http://localhost:8082/bt-hrms/api/v1/auth/login"
        );
    }

    #[test]
    fn test_defaults_survive_partial_toml() {
        let config: ApiConfig = toml::from_str("base_url = \"https://hr.example.com/api\"").unwrap();
        assert_eq!(config.base_url, "https://hr.example.com/api");
        assert_eq!(config.token_key, "accessToken");
        assert_eq!(config.endpoints.scopes, "/roles/scope");
        assert_eq!(config.timeout_ms, 30_000);
    }
}
