//! Domain layer for the Pixgrid plugin.
//!
//! This module contains the core domain types for the plugin, independent of
//! Zellij-specific APIs or the remote search endpoint's wire format.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`image`]: Normalized image record model

pub mod error;
pub mod image;

pub use error::{GalleryError, Result};
pub use image::ImageRecord;
