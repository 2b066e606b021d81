#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use thiserror::Error;

/// Errors raised while fetching results from the portal.
#[derive(Error, Debug)]
pub enum SmartschoolError {
    /// The portal returned no response, or a response without a body, where a
    /// JSON payload was expected.
    #[error("{0}")]
    Download(String),

    /// The identifier cannot name a single result (empty, `.` or `..`).
    #[error("Not a valid result identifier: {0:?}")]
    InvalidResultId(String),

    /// The response body could not be decoded.
    #[error("Could not decode the JSON returned by the portal")]
    Json(#[from] serde_json::Error),

    /// Failure reported by the session layer, passed through as-is.
    #[error(transparent)]
    Session(#[from] anyhow::Error),
}

impl SmartschoolError {
    /// Builds a download error with the given message.
    pub fn download(message: impl Into<String>) -> Self {
        Self::Download(message.into())
    }

    /// Returns true for the "expected JSON, got nothing" condition.
    pub fn is_download(&self) -> bool {
        matches!(self, Self::Download(_))
    }
}

/// Result alias used throughout the library.
pub type Result<T, E = SmartschoolError> = std::result::Result<T, E>;
