//! Image record domain model.
//!
//! An [`ImageRecord`] is the normalized, immutable form of one search hit. Records
//! are produced only by the fetcher's normalization step and are never mutated
//! afterwards; the whole result list is discarded when a new query starts.

/// One image returned by the search endpoint, reduced to the fields the gallery uses.
///
/// # Fields
///
/// - `id`: Remote identifier of the image
/// - `thumbnail_url`: Web-sized preview URL shown for grid tiles
/// - `full_size_url`: Large image URL shown in the modal overlay
/// - `tags`: Comma-separated descriptive text, used as the accessible label
/// - `width`, `height`: Original image dimensions in pixels (0 when unknown)
/// - `user`: Name of the uploading author (empty when unknown)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    pub id: u64,
    pub thumbnail_url: String,
    pub full_size_url: String,
    pub tags: String,
    pub width: u32,
    pub height: u32,
    pub user: String,
}

impl ImageRecord {
    /// Returns the tile caption: the tags, or a placeholder when the image has none.
    ///
    /// # Examples
    ///
    /// ```
    /// use pixgrid::domain::ImageRecord;
    ///
    /// let record = ImageRecord {
    ///     id: 7,
    ///     thumbnail_url: String::new(),
    ///     full_size_url: String::new(),
    ///     tags: String::new(),
    ///     width: 0,
    ///     height: 0,
    ///     user: String::new(),
    /// };
    /// assert_eq!(record.caption(), "image #7");
    /// ```
    #[must_use]
    pub fn caption(&self) -> String {
        if self.tags.trim().is_empty() {
            format!("image #{}", self.id)
        } else {
            self.tags.clone()
        }
    }

    /// Formats the original dimensions as `WIDTHxHEIGHT`, or `None` when unknown.
    #[must_use]
    pub fn dimensions(&self) -> Option<String> {
        if self.width == 0 || self.height == 0 {
            None
        } else {
            Some(format!("{}x{}", self.width, self.height))
        }
    }
}
