//! Error types for the dashboard API client.
//!
//! Transport failures, non-success HTTP statuses and undecodable bodies are
//! kept apart so callers can tell "the backend said no" from "the backend
//! could not be reached".

use meili_admin_types::EnvelopeError;

/// Errors returned by every client call.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The configured base URL (or a URL derived from it) is unusable.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The request could not be sent or the response could not be read.
    #[error("transport error: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    ///
    /// `message` is the envelope's `error` text when the body carried one,
    /// otherwise the raw body.
    #[error("API returned {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Backend error description.
        message: String,
    },

    /// A success response did not match the expected shape.
    #[error("response decode error: {0}")]
    Decode(String),

    /// A success status carried a failed or empty envelope.
    #[error(transparent)]
    Envelope(#[from] EnvelopeError),
}

impl ClientError {
    /// HTTP status for [`ClientError::Api`], `None` otherwise.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the backend reported the addressed resource as missing.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }
}
