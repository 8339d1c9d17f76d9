//! Pixabay search endpoint: request construction and response normalization.
//!
//! The fetcher is stateless. [`SearchEndpoint::page_url`] turns `(query, page,
//! page_size)` into the GET URL, the Zellij host performs the request, and
//! [`parse_page`] turns the raw `(status, body)` pair back into a [`SearchPage`].
//! No timeout, retry, or caching is applied at this layer.

use crate::api::error::FetchError;
use crate::api::models::{RawSearchResponse, SearchPage};
use url::Url;

/// Number of results requested per page.
pub const PAGE_SIZE: u32 = 12;

/// Public Pixabay API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://pixabay.com/api/";

/// Filtering parameters sent with every request.
const FIXED_PARAMS: [(&str, &str); 3] = [
    ("image_type", "photo"),
    ("orientation", "horizontal"),
    ("safesearch", "true"),
];

/// Configured search endpoint: base URL plus API key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchEndpoint {
    base_url: String,
    api_key: Option<String>,
}

impl Default for SearchEndpoint {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT, None)
    }
}

impl SearchEndpoint {
    /// Creates an endpoint for `base_url`, authenticating with `api_key`.
    ///
    /// An empty or whitespace-only key is treated as missing.
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key
                .map(|key| key.trim().to_string())
                .filter(|key| !key.is_empty()),
        }
    }

    /// Returns `true` when an API key is configured.
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Builds the GET URL for one page of `query`.
    ///
    /// The query is form-encoded, so `"red fox"` is sent as `q=red+fox`.
    ///
    /// # Errors
    ///
    /// - [`FetchError::MissingApiKey`] if no key is configured
    /// - [`FetchError::InvalidEndpoint`] if the base URL does not parse
    ///
    /// # Example
    ///
    /// ```rust
    /// use pixgrid::api::SearchEndpoint;
    ///
    /// let endpoint = SearchEndpoint::new("https://pixabay.com/api/", Some("k".into()));
    /// let url = endpoint.page_url("cats", 1, 12)?;
    /// assert!(url.ends_with("&q=cats&page=1"));
    /// # Ok::<(), pixgrid::api::FetchError>(())
    /// ```
    pub fn page_url(&self, query: &str, page: u32, page_size: u32) -> Result<String, FetchError> {
        let key = self.api_key.as_deref().ok_or(FetchError::MissingApiKey)?;

        let mut url = Url::parse(&self.base_url)
            .map_err(|e| FetchError::InvalidEndpoint(format!("{}: {e}", self.base_url)))?;

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("key", key);
            for (name, value) in FIXED_PARAMS {
                pairs.append_pair(name, value);
            }
            pairs.append_pair("per_page", &page_size.to_string());
            pairs.append_pair("q", query);
            pairs.append_pair("page", &page.to_string());
        }

        tracing::debug!(query = %query, page = page, page_size = page_size, "built search url");

        Ok(url.into())
    }
}

/// Interprets a completed request as one page of results.
///
/// A status of `0` means the host never received a response and is reported as
/// [`FetchError::Transport`] with the body as the message. Any other status
/// outside `200..=299` becomes [`FetchError::Status`].
///
/// # Errors
///
/// Returns a [`FetchError`] for transport failures, non-success statuses, and
/// bodies that are not a valid search response.
pub fn parse_page(status: u16, body: &[u8]) -> Result<SearchPage, FetchError> {
    if status == 0 {
        let message = String::from_utf8_lossy(body).trim().to_string();
        return Err(FetchError::Transport(if message.is_empty() {
            "no response from server".to_string()
        } else {
            message
        }));
    }

    if !(200..=299).contains(&status) {
        return Err(FetchError::status(status, body));
    }

    let response: RawSearchResponse =
        serde_json::from_slice(body).map_err(|e| FetchError::Decode(e.to_string()))?;

    let page = SearchPage::from(response);
    tracing::debug!(
        records = page.records.len(),
        total_available = page.total_available,
        "search page parsed"
    );
    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint() -> SearchEndpoint {
        SearchEndpoint::new(DEFAULT_ENDPOINT, Some("secret".to_string()))
    }

    #[test]
    fn test_page_url_carries_fixed_and_caller_params() {
        let url = endpoint().page_url("cats", 3, PAGE_SIZE).unwrap();
        assert_eq!(
            url,
            "https://pixabay.com/api/?key=secret&image_type=photo&orientation=horizontal\
             &safesearch=true&per_page=12&q=cats&page=3"
        );
    }

    #[test]
    fn test_page_url_encodes_query() {
        let url = endpoint().page_url("red fox & owl", 1, PAGE_SIZE).unwrap();
        assert!(url.contains("&q=red+fox+%26+owl&"), "{url}");
    }

    #[test]
    fn test_page_url_requires_key() {
        let endpoint = SearchEndpoint::new(DEFAULT_ENDPOINT, Some("  ".to_string()));
        assert!(!endpoint.has_api_key());
        assert_eq!(endpoint.page_url("cats", 1, PAGE_SIZE), Err(FetchError::MissingApiKey));
    }

    #[test]
    fn test_page_url_rejects_bad_endpoint() {
        let endpoint = SearchEndpoint::new("not a url", Some("k".to_string()));
        assert!(matches!(
            endpoint.page_url("cats", 1, PAGE_SIZE),
            Err(FetchError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn test_parse_page_normalizes_hits() {
        let body = br#"{
            "total": 2, "totalHits": 2,
            "hits": [
                {"id": 1, "webformatURL": "w1", "largeImageURL": "l1", "tags": "cat",
                 "imageWidth": 640, "imageHeight": 480, "user": "ann", "likes": 3},
                {"id": 2, "webformatURL": "w2", "largeImageURL": "l2", "tags": "kitten"}
            ]
        }"#;

        let page = parse_page(200, body).unwrap();
        assert_eq!(page.total_available, 2);
        assert_eq!(page.records.len(), 2);
        assert_eq!(page.records[0].thumbnail_url, "w1");
        assert_eq!(page.records[0].full_size_url, "l1");
        assert_eq!(page.records[0].user, "ann");
        assert_eq!(page.records[1].id, 2);
        assert_eq!(page.records[1].width, 0);
    }

    #[test]
    fn test_parse_page_empty_hits() {
        let page = parse_page(200, br#"{"total": 0, "totalHits": 0, "hits": []}"#).unwrap();
        assert!(page.records.is_empty());
        assert_eq!(page.total_available, 0);
    }

    #[test]
    fn test_parse_page_failures() {
        assert!(matches!(parse_page(0, b""), Err(FetchError::Transport(_))));
        assert!(matches!(
            parse_page(429, b"rate limit"),
            Err(FetchError::Status { status: 429, .. })
        ));
        assert!(matches!(parse_page(200, b"<html>"), Err(FetchError::Decode(_))));
    }
}
