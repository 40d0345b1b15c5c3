//! REST client for the Meili Admin dashboard API.
//!
//! [`AdminClient`] owns one connection pool and hands out borrowed endpoint
//! groups, one per backend resource:
//!
//! - [`ProjectApi`] -- projects, connection tests, instance statistics
//! - [`IndexApi`] -- indexes, documents, search, settings
//! - [`TaskApi`] -- asynchronous task records
//! - [`KeyApi`] -- API keys
//!
//! Every call maps to exactly one HTTP request. There are no retries and no
//! response caching; callers that want a mirror use the store crate.

pub mod config;
pub mod error;
mod http;
pub mod indexes;
pub mod keys;
pub mod projects;
pub mod tasks;

pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::ClientError;
pub use indexes::IndexApi;
pub use keys::KeyApi;
pub use projects::ProjectApi;
pub use tasks::TaskApi;

use http::Http;
use tracing::info;

/// Entry point for the dashboard API.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct AdminClient {
    http: Http,
}

impl AdminClient {
    /// Build a client for `config.base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] when the base URL does not parse
    /// or cannot carry a path, and [`ClientError::Transport`] when the HTTP
    /// client cannot be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let http = Http::new(config)?;
        info!(
            base_url = %http.base(),
            timeout_ms = config.timeout.as_millis(),
            "Dashboard client ready"
        );
        Ok(Self { http })
    }

    /// The base URL every request is built from.
    pub fn base_url(&self) -> &str {
        self.http.base().as_str()
    }

    /// Project endpoints.
    pub const fn projects(&self) -> ProjectApi<'_> {
        ProjectApi::new(&self.http)
    }

    /// Index, document, search and settings endpoints.
    pub const fn indexes(&self) -> IndexApi<'_> {
        IndexApi::new(&self.http)
    }

    /// Task endpoints.
    pub const fn tasks(&self) -> TaskApi<'_> {
        TaskApi::new(&self.http)
    }

    /// API key endpoints.
    pub const fn keys(&self) -> KeyApi<'_> {
        KeyApi::new(&self.http)
    }
}
