//! View model types representing renderable UI state.
//!
//! This module defines immutable view models computed from application state.
//! View models are optimized for rendering and contain pre-computed display
//! information like truncated captions, highlight ranges, and selection state.
//!
//! # Architecture
//!
//! View models are created via `AppState::compute_viewmodel()` and consumed by
//! the renderer. They contain no business logic, only display-ready data.

use crate::app::NotificationKind;

/// Complete UI view model for rendering.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    /// Header information (title and result counter).
    pub header: HeaderInfo,

    /// Search bar state. Always shown; `focused` reflects the input mode.
    pub search_bar: SearchBarInfo,

    /// Loader / pagination line below the search bar.
    pub status_line: StatusLine,

    /// Tiles of the visible grid window, row-major.
    pub tiles: Vec<TileItem>,

    /// Number of tile columns the tiles were laid out for.
    pub columns: usize,

    /// Footer information (keybindings, help text).
    pub footer: FooterInfo,

    /// Optional empty state message (when no tiles are available).
    pub empty_state: Option<EmptyState>,

    /// Mounted modal overlay, if any.
    pub modal: Option<ModalInfo>,

    /// Toasts to draw on top of everything else, oldest first.
    pub toasts: Vec<ToastItem>,
}

/// One grid tile.
#[derive(Debug, Clone)]
pub struct TileItem {
    /// Tags (or placeholder), truncated to the tile's inner width.
    pub caption: String,

    /// Secondary line: image id and dimensions.
    pub meta: String,

    /// Whether this tile holds the selection cursor.
    pub is_selected: bool,

    /// Character ranges of `caption` matching the query.
    ///
    /// Each tuple is `(start_index, end_index)` in UTF-8 character indices.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Header display information.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    /// Title text to display in the header.
    pub title: String,
}

/// Footer display information.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// Keybinding help text.
    pub keybindings: String,
}

/// Empty state message display information.
#[derive(Debug, Clone)]
pub struct EmptyState {
    /// Primary message (e.g., "Search Pixabay").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}

/// Search bar display information.
#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    /// Draft query text.
    pub query: String,

    /// Whether keystrokes currently edit the query.
    pub focused: bool,
}

/// Line between the search bar and the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusLine {
    /// Nothing to report.
    Blank,
    /// A fetch is in flight.
    Loading,
    /// Results are shown; `can_load_more` enables the load-more hint.
    Summary {
        shown: usize,
        total: u32,
        can_load_more: bool,
    },
}

/// Full-size image details for the modal overlay.
#[derive(Debug, Clone)]
pub struct ModalInfo {
    /// Accessible label of the image (its tags).
    pub alt_text: String,

    /// URL of the full-size image.
    pub image_url: String,

    /// "by <author>" line, empty when the author is unknown.
    pub author: String,

    /// Dimensions line, empty when unknown.
    pub dimensions: String,
}

/// One toast notification.
#[derive(Debug, Clone)]
pub struct ToastItem {
    pub message: String,
    pub kind: NotificationKind,
}
