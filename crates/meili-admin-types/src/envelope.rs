//! The JSON envelope every dashboard API endpoint answers with.
//!
//! ```json
//! { "success": true, "data": { ... } }
//! { "success": false, "error": "Project not found" }
//! { "success": true, "message": "Project deleted" }
//! ```
//!
//! File and URL imports additionally report a document `count`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Response envelope wrapping an endpoint payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ApiResponse<T> {
    /// Whether the backend reports the operation as successful.
    #[serde(default)]
    pub success: bool,
    /// The payload, absent on failures and on message-only replies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Failure description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Informational message (e.g. "Key deleted").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Number of documents submitted by an upload or URL import.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}

/// Error returned by [`ApiResponse::into_data`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvelopeError {
    /// The backend reported a failure.
    #[error("request failed: {0}")]
    Failed(String),
    /// The backend reported success but sent no payload.
    #[error("response carried no data")]
    MissingData,
}

impl<T> ApiResponse<T> {
    /// Build a successful envelope around `data`.
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
            count: None,
        }
    }

    /// Build a failed envelope carrying `error`.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            message: None,
            count: None,
        }
    }

    /// Unwrap the payload of a successful response.
    ///
    /// # Errors
    ///
    /// [`EnvelopeError::Failed`] when `success` is false, carrying the
    /// backend's error text (or a generic one), and
    /// [`EnvelopeError::MissingData`] when a successful response has no
    /// payload.
    pub fn into_data(self) -> Result<T, EnvelopeError> {
        if !self.success {
            return Err(EnvelopeError::Failed(
                self.error.unwrap_or_else(|| "unknown error".to_owned()),
            ));
        }
        self.data.ok_or(EnvelopeError::MissingData)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::Project;

    #[test]
    fn decodes_message_only_reply() {
        let raw = r#"{"success": true, "message": "Project deleted"}"#;
        let resp: ApiResponse<serde_json::Value> =
            serde_json::from_str(raw).unwrap_or_else(|_| ApiResponse::failed("bad"));
        assert!(resp.success);
        assert!(resp.data.is_none());
        assert_eq!(resp.message.as_deref(), Some("Project deleted"));
    }

    #[test]
    fn into_data_surfaces_backend_error() {
        let resp: ApiResponse<u32> = ApiResponse::failed("Project not found");
        assert_eq!(
            resp.into_data(),
            Err(EnvelopeError::Failed("Project not found".to_owned()))
        );
    }

    #[test]
    fn into_data_requires_payload() {
        let resp: ApiResponse<u32> = ApiResponse {
            success: true,
            data: None,
            error: None,
            message: None,
            count: None,
        };
        assert_eq!(resp.into_data(), Err(EnvelopeError::MissingData));
    }

    #[test]
    fn decodes_failure_without_payload_for_any_entity() {
        let raw = r#"{"success": false, "error": "Project not found"}"#;
        let resp = serde_json::from_str::<ApiResponse<Project>>(raw).ok();
        assert_eq!(resp.as_ref().map(|r| r.success), Some(false));
        assert_eq!(resp.as_ref().map(|r| r.data.is_none()), Some(true));
        assert_eq!(
            resp.map(ApiResponse::into_data),
            Some(Err(EnvelopeError::Failed("Project not found".to_owned())))
        );
    }
}
