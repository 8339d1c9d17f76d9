//! Wire models for the Pixabay search response.
//!
//! These types mirror the JSON document returned by the endpoint and are kept
//! separate from the domain [`ImageRecord`] so that normalization happens in a
//! single place. Fields the gallery does not use are ignored by serde.

use crate::domain::ImageRecord;
use serde::Deserialize;

/// Top-level search response.
///
/// ```json
/// {
///   "total": 4692,
///   "totalHits": 500,
///   "hits": [
///     {
///       "id": 195893,
///       "webformatURL": "https://pixabay.com/get/35bbf209e13e39d2_640.jpg",
///       "largeImageURL": "https://pixabay.com/get/ed6a99fd0a76647_1280.jpg",
///       "tags": "blossom, bloom, flower",
///       "imageWidth": 4000,
///       "imageHeight": 2250,
///       "user": "Josch13"
///     }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawSearchResponse {
    /// Number of hits reachable through the API for this query.
    #[serde(rename = "totalHits", default)]
    pub total_hits: u32,

    /// Hits of the requested page.
    #[serde(default)]
    pub hits: Vec<RawHit>,
}

/// A single hit as returned by the endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawHit {
    pub id: u64,

    #[serde(rename = "webformatURL")]
    pub webformat_url: String,

    #[serde(rename = "largeImageURL")]
    pub large_image_url: String,

    #[serde(default)]
    pub tags: String,

    #[serde(rename = "imageWidth", default)]
    pub image_width: u32,

    #[serde(rename = "imageHeight", default)]
    pub image_height: u32,

    #[serde(default)]
    pub user: String,
}

impl From<RawHit> for ImageRecord {
    fn from(hit: RawHit) -> Self {
        Self {
            id: hit.id,
            thumbnail_url: hit.webformat_url,
            full_size_url: hit.large_image_url,
            tags: hit.tags,
            width: hit.image_width,
            height: hit.image_height,
            user: hit.user,
        }
    }
}

/// One normalized page of results.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchPage {
    /// Records of this page, in the order the endpoint returned them.
    pub records: Vec<ImageRecord>,

    /// Total matching items reported by the endpoint for the query.
    pub total_available: u32,
}

impl From<RawSearchResponse> for SearchPage {
    fn from(response: RawSearchResponse) -> Self {
        Self {
            records: response.hits.into_iter().map(ImageRecord::from).collect(),
            total_available: response.total_hits,
        }
    }
}
