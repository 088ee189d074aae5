//! Read-only client for the dashboard resource API.
//!
//! Each call performs exactly one GET against `<scheme>://<host>:<port>/api/v1/...`
//! and decodes the JSON body. There is no retry, pagination, or caching; a
//! failed call returns a [`FetchError`] and the caller decides how to degrade.
//!
//! # Example
//!
//! ```no_run
//! use hc_client::{ClientConfig, HttpResourceClient, ResourceSource};
//!
//! let config = ClientConfig::default().with_bearer_token("token");
//! let client = HttpResourceClient::new(config);
//! let pods = client.pods("default").unwrap_or_default();
//! println!("{} pods", pods.pods.len());
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod request;
pub mod source;

pub use config::ClientConfig;
pub use error::{FetchError, Result};
pub use http::HttpResourceClient;
pub use request::{CollectionKind, ResourceRequest};
pub use source::ResourceSource;
