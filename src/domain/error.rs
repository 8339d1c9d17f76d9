//! Error types for the Pixgrid plugin.
//!
//! This module defines the centralized error type [`GalleryError`] and a type alias
//! [`Result`] for convenient error handling throughout the plugin. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.

use thiserror::Error;

/// The main error type for Pixgrid plugin operations.
///
/// Covers I/O, theme and configuration failures. Search failures never appear
/// here: they are [`FetchError`](crate::api::FetchError)s that the search
/// session turns into an error notification and a rejected request.
///
/// # Examples
///
/// ```
/// use pixgrid::domain::GalleryError;
///
/// fn validate_config() -> Result<(), GalleryError> {
///     Err(GalleryError::Config("Missing required field".to_string()))
/// }
/// ```
#[derive(Debug, Error)]
pub enum GalleryError {
    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically converts
    /// from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or application failed.
    ///
    /// Occurs when a theme file cannot be read or its TOML cannot be parsed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid or missing.
    ///
    /// Occurs when required configuration values are missing or malformed.
    /// The string describes the specific configuration problem.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for Pixgrid operations.
///
/// This is a type alias for `std::result::Result<T, GalleryError>` that simplifies
/// function signatures throughout the codebase.
pub type Result<T> = std::result::Result<T, GalleryError>;
