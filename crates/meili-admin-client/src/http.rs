//! Request plumbing shared by the endpoint groups.
//!
//! Paths are given as segment lists and appended to the base URL one
//! segment at a time, so user data (index uids, document ids, keys) is
//! percent-encoded and can never introduce extra path components or
//! remove existing ones.

use meili_admin_types::ApiResponse;
use reqwest::{Method, RequestBuilder, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::ClientError;

/// Query-string pairs.
pub(crate) type Query = [(&'static str, String)];

/// Thin wrapper over [`reqwest::Client`] bound to the dashboard API base.
#[derive(Debug, Clone)]
pub(crate) struct Http {
    client: reqwest::Client,
    base: Url,
}

impl Http {
    pub(crate) fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let base = Url::parse(&config.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {e}", config.base_url)))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(format!(
                "{} cannot be used as a base URL",
                config.base_url
            )));
        }
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::Transport(format!("client build failed: {e}")))?;
        Ok(Self { client, base })
    }

    pub(crate) const fn base(&self) -> &Url {
        &self.base
    }

    /// Base URL with `segments` appended, each one percent-encoded.
    ///
    /// Empty, `.` and `..` segments are rejected: the URL parser would drop
    /// or collapse them and the request would reach a broader endpoint.
    pub(crate) fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        if let Some(bad) = segments
            .iter()
            .copied()
            .find(|s| matches!(*s, "" | "." | ".."))
        {
            return Err(ClientError::InvalidUrl(format!(
                "path segment {bad:?} is not allowed"
            )));
        }
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidUrl(format!("{} cannot be a base", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, ClientError> {
        let url = self.url(segments)?;
        debug!(%method, %url, "Dashboard API request");
        Ok(self.client.request(method, url))
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &Query,
    ) -> Result<ApiResponse<T>, ClientError> {
        let builder = self.request(Method::GET, segments)?.query(query);
        execute(builder).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<ApiResponse<T>, ClientError> {
        let builder = self.request(Method::POST, segments)?.json(body);
        execute(builder).await
    }

    /// `POST` whose response is a bare object instead of an envelope.
    pub(crate) async fn post_raw<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T, ClientError> {
        let builder = self.request(Method::POST, segments)?.json(body);
        execute(builder).await
    }

    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        form: reqwest::multipart::Form,
    ) -> Result<ApiResponse<T>, ClientError> {
        let builder = self.request(Method::POST, segments)?.multipart(form);
        execute(builder).await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<ApiResponse<T>, ClientError> {
        let builder = self.request(Method::PUT, segments)?.json(body);
        execute(builder).await
    }

    pub(crate) async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<ApiResponse<T>, ClientError> {
        let builder = self.request(Method::PATCH, segments)?.json(body);
        execute(builder).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &Query,
    ) -> Result<ApiResponse<T>, ClientError> {
        let builder = self.request(Method::DELETE, segments)?.query(query);
        execute(builder).await
    }

    /// `DELETE` carrying a JSON body (task and batch document deletion).
    pub(crate) async fn delete_with_body<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<ApiResponse<T>, ClientError> {
        let builder = self.request(Method::DELETE, segments)?.json(body);
        execute(builder).await
    }
}

/// Send the request and decode the body as `T`.
///
/// Non-success statuses become [`ClientError::Api`], using the envelope's
/// `error` text when the body has one.
async fn execute<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, ClientError> {
    let response = builder
        .send()
        .await
        .map_err(|e| ClientError::Transport(format!("request failed: {e}")))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ClientError::Transport(format!("reading response body failed: {e}")))?;

    if !status.is_success() {
        let message = error_message(&body);
        warn!(status = status.as_u16(), %message, "Dashboard API returned an error");
        return Err(ClientError::Api {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str(&body)
        .map_err(|e| ClientError::Decode(format!("{e} (status {status})")))
}

/// Extract the envelope's `error` text, falling back to the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ApiResponse<serde_json::Value>>(body)
        .ok()
        .and_then(|envelope| envelope.error)
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "empty response body".to_owned()
            } else {
                trimmed.to_owned()
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(base: &str) -> Option<Http> {
        Http::new(&ClientConfig::new(base)).ok()
    }

    #[test]
    fn url_appends_segments() {
        let url = http("http://localhost:5000/api")
            .and_then(|h| h.url(&["projects", "3", "indexes"]).ok())
            .map(String::from);
        assert_eq!(
            url.as_deref(),
            Some("http://localhost:5000/api/projects/3/indexes")
        );
    }

    #[test]
    fn url_tolerates_trailing_slash_on_base() {
        let url = http("http://localhost:5000/api/")
            .and_then(|h| h.url(&["projects"]).ok())
            .map(String::from);
        assert_eq!(url.as_deref(), Some("http://localhost:5000/api/projects"));
    }

    #[test]
    fn url_encodes_user_segments() {
        let url = http("http://localhost:5000/api")
            .and_then(|h| h.url(&["projects", "1", "indexes", "a/b c?"]).ok())
            .map(String::from);
        assert_eq!(
            url.as_deref(),
            Some("http://localhost:5000/api/projects/1/indexes/a%2Fb%20c%3F")
        );
    }

    #[test]
    fn url_rejects_dot_and_empty_segments() {
        let h = http("http://localhost:5000/api");
        for bad in ["..", ".", ""] {
            let rejected = h.as_ref().map(|h| {
                matches!(
                    h.url(&["projects", "1", "indexes", "movies", "documents", bad]),
                    Err(ClientError::InvalidUrl(_))
                )
            });
            assert_eq!(rejected, Some(true), "{bad:?}");
        }
        let dotted = h
            .and_then(|h| h.url(&["projects", "1", "indexes", "..movies"]).ok())
            .map(String::from);
        assert_eq!(
            dotted.as_deref(),
            Some("http://localhost:5000/api/projects/1/indexes/..movies")
        );
    }

    #[test]
    fn rejects_unusable_base() {
        assert!(Http::new(&ClientConfig::new("not a url")).is_err());
        assert!(Http::new(&ClientConfig::new("mailto:admin@example.com")).is_err());
    }

    #[test]
    fn error_message_prefers_envelope() {
        assert_eq!(
            error_message(r#"{"success": false, "error": "Project not found"}"#),
            "Project not found"
        );
        assert_eq!(error_message("Bad Gateway\n"), "Bad Gateway");
        assert_eq!(error_message(""), "empty response body");
    }
}
