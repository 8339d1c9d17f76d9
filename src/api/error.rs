//! Fetch failure taxonomy for the image search endpoint.

use thiserror::Error;

/// Longest response body excerpt carried in a [`FetchError::Status`].
const MAX_DETAIL_CHARS: usize = 200;

/// Reasons a page fetch did not produce a usable response.
///
/// HTTP status codes are not interpreted beyond success/failure: every non-2xx
/// response becomes [`FetchError::Status`] with the code and a body excerpt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The host could not complete the request (DNS, TLS, connection reset...).
    #[error("Network error: {0}")]
    Transport(String),

    /// The endpoint answered with a non-success status code.
    #[error("Request failed with status code {status}{}", detail_suffix(.detail))]
    Status {
        /// HTTP status code returned by the endpoint.
        status: u16,
        /// Trimmed excerpt of the response body.
        detail: String,
    },

    /// The response body was not the expected JSON document.
    #[error("Malformed search response: {0}")]
    Decode(String),

    /// The configured endpoint URL cannot be parsed.
    #[error("Invalid search endpoint: {0}")]
    InvalidEndpoint(String),

    /// No API key was configured for the endpoint.
    #[error("Pixabay API key is not configured.")]
    MissingApiKey,
}

impl FetchError {
    /// Builds a [`FetchError::Status`] from a raw body, keeping a short UTF-8 excerpt.
    #[must_use]
    pub fn status(status: u16, body: &[u8]) -> Self {
        let detail: String = String::from_utf8_lossy(body)
            .trim()
            .chars()
            .take(MAX_DETAIL_CHARS)
            .collect();
        Self::Status { status, detail }
    }
}

fn detail_suffix(detail: &str) -> String {
    if detail.is_empty() {
        String::new()
    } else {
        format!(": {detail}")
    }
}
