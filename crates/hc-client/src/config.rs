//! Per-run client configuration.
//!
//! A `ClientConfig` is fixed once the client is built. Credentials belong to
//! the config, never to shared state, so concurrent runs each carry their own.

use serde::{Deserialize, Serialize};

/// Connection settings for the resource API.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Use https instead of http.
    #[serde(default)]
    pub secure: bool,
    /// API host.
    #[serde(default = "default_host")]
    pub host: String,
    /// API port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Path prefix of the read API, with leading and trailing slash.
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
    /// Per-request timeout. `None` keeps the transport default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Bearer token attached to every request when set.
    #[serde(default, skip_serializing)]
    pub bearer_token: Option<String>,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    9090
}

fn default_api_prefix() -> String {
    "/api/v1/".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            secure: false,
            host: default_host(),
            port: default_port(),
            api_prefix: default_api_prefix(),
            timeout_secs: None,
            bearer_token: None,
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("secure", &self.secure)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("api_prefix", &self.api_prefix)
            .field("timeout_secs", &self.timeout_secs)
            .field(
                "bearer_token",
                &self.bearer_token.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

impl ClientConfig {
    /// Create a configuration with defaults (`http://localhost:9090/api/v1/`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set host and port.
    pub fn with_endpoint(mut self, host: impl Into<String>, port: u16) -> Self {
        self.host = host.into();
        self.port = port;
        self
    }

    /// Switch between http and https.
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Set the request timeout in seconds.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Attach a bearer token. Empty tokens are treated as absent.
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.bearer_token = if token.is_empty() { None } else { Some(token) };
        self
    }

    /// URL scheme for the configured transport.
    pub fn scheme(&self) -> &'static str {
        if self.secure {
            "https"
        } else {
            "http"
        }
    }

    /// Base URL all request paths are appended to.
    pub fn base_url(&self) -> String {
        let prefix = self.api_prefix.trim_matches('/');
        if prefix.is_empty() {
            format!("{}://{}:{}/", self.scheme(), self.host, self.port)
        } else {
            format!("{}://{}:{}/{}/", self.scheme(), self.host, self.port, prefix)
        }
    }

    /// Full URL for a path relative to the API prefix.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url(), "http://localhost:9090/api/v1/");
        assert_eq!(config.url_for("pod/default"), "http://localhost:9090/api/v1/pod/default");
    }

    #[test]
    fn test_secure_endpoint() {
        let config = ClientConfig::new()
            .with_endpoint("dashboard.local", 8443)
            .with_secure(true);
        assert_eq!(config.url_for("/node"), "https://dashboard.local:8443/api/v1/node");
    }

    #[test]
    fn test_empty_token_is_absent() {
        let config = ClientConfig::new().with_bearer_token("");
        assert!(config.bearer_token.is_none());
        let config = config.with_bearer_token("abc");
        assert_eq!(config.bearer_token.as_deref(), Some("abc"));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ClientConfig::new().with_bearer_token("super-secret");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_token_not_serialized() {
        let config = ClientConfig::new().with_bearer_token("super-secret");
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("super-secret"));
    }
}
