//! HTTP implementation of [`ResourceSource`].

use crate::config::ClientConfig;
use crate::error::{FetchError, Result};
use crate::request::ResourceRequest;
use crate::source::ResourceSource;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Blocking client for the dashboard read API.
///
/// Holds an immutable [`ClientConfig`]; build one client per report run (or
/// per credential) rather than mutating a shared one.
#[derive(Debug, Clone)]
pub struct HttpResourceClient {
    config: ClientConfig,
    agent: ureq::Agent,
}

impl HttpResourceClient {
    /// Build a client for `config`.
    pub fn new(config: ClientConfig) -> Self {
        let mut builder = ureq::AgentBuilder::new();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Self {
            config,
            agent: builder.build(),
        }
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// A client sharing this one's connection pool but carrying `token`.
    pub fn with_bearer_token(&self, token: impl Into<String>) -> Self {
        Self {
            config: self.config.clone().with_bearer_token(token),
            agent: self.agent.clone(),
        }
    }

    fn get_body(&self, url: &str) -> Result<String> {
        let mut request = self.agent.get(url);
        if let Some(token) = &self.config.bearer_token {
            request = request.set("Authorization", &format!("Bearer {}", token));
        }

        let response = match request.call() {
            Ok(response) => response,
            Err(ureq::Error::Status(status, _)) => {
                warn!(url = %url, status, "resource request rejected");
                return Err(FetchError::Status {
                    url: url.to_string(),
                    status,
                });
            }
            Err(ureq::Error::Transport(transport)) => {
                warn!(url = %url, error = %transport, "resource request failed");
                return Err(FetchError::Transport {
                    url: url.to_string(),
                    message: transport.to_string(),
                });
            }
        };

        response.into_string().map_err(|source| {
            warn!(url = %url, error = %source, "failed to read response body");
            FetchError::Body {
                url: url.to_string(),
                source,
            }
        })
    }
}

impl ResourceSource for HttpResourceClient {
    fn fetch<T: DeserializeOwned>(&self, request: &ResourceRequest) -> Result<T> {
        let url = self.config.url_for(&request.path());
        debug!(url = %url, kind = %request.kind, "fetching resource");

        let body = self.get_body(&url)?;
        serde_json::from_str(&body).map_err(|source| {
            warn!(url = %url, error = %source, "failed to decode resource response");
            FetchError::Decode { url, source }
        })
    }
}
