//! Remote image search layer.
//!
//! This module is the result fetcher: it knows how to address the Pixabay
//! search endpoint and how to normalize its responses. The transport itself is
//! performed by the Zellij host (`web_request`), so everything here is pure and
//! synchronous.
//!
//! # Modules
//!
//! - `error`: Fetch failure taxonomy
//! - `models`: Wire types for the JSON response and the normalized page
//! - `pixabay`: Endpoint configuration, URL construction, response parsing

pub mod error;
pub mod models;
pub mod pixabay;

pub use error::FetchError;
pub use models::{RawHit, RawSearchResponse, SearchPage};
pub use pixabay::{parse_page, SearchEndpoint, DEFAULT_ENDPOINT, PAGE_SIZE};
