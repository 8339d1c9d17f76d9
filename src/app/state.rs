//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the central state container for the plugin,
//! along with methods for grid selection, modal management, and UI view model
//! generation. It is the single source of truth for all transient UI state.
//!
//! # State Components
//!
//! - **Session**: The search controller (query, pages, results, request status)
//! - **Search Input**: Draft query being typed in the search bar
//! - **Selection**: Cursor position within the result grid
//! - **Modal**: The mounted full-size image overlay, if any
//! - **Toasts**: Notifications sink and on-screen stack
//! - **Viewport**: Last rendered terminal size, used for grid navigation and hit-testing
//!
//! # Example
//!
//! ```rust
//! use pixgrid::app::AppState;
//! use pixgrid::ui::theme::Theme;
//!
//! let state = AppState::new(Default::default(), Theme::default());
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert!(viewmodel.tiles.is_empty());
//! ```

use super::modes::InputMode;
use super::notifications::Toasts;
use super::overlay::{KeyListeners, Modal};
use super::session::{RequestStatus, SearchSession};
use crate::api::SearchEndpoint;
use crate::domain::ImageRecord;
use crate::ui::layout;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    EmptyState, FooterInfo, HeaderInfo, ModalInfo, SearchBarInfo, StatusLine, TileItem, ToastItem,
    UIViewModel,
};
use fuzzy_matcher::skim::SkimMatcherV2;

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Search session controller.
    pub session: SearchSession,

    /// Remote endpoint used to build request URLs.
    pub endpoint: SearchEndpoint,

    /// Current input handling mode.
    pub input_mode: InputMode,

    /// Draft query in the search bar.
    ///
    /// Submitted to the session on Enter; restored to the active query when the
    /// user leaves the search bar with Esc.
    pub search_input: String,

    /// Zero-based index of the selected tile within `session.results()`.
    pub selected_index: usize,

    /// Mounted modal overlay.
    pub modal: Option<Modal>,

    /// Scoped key subscriptions (the modal's escape listener).
    pub key_listeners: KeyListeners,

    /// On-screen notifications; also the session's notification sink.
    pub toasts: Toasts,

    /// Whether a toast expiry tick is already scheduled.
    pub tick_scheduled: bool,

    /// Executable used to open full-size images on the host.
    pub open_command: String,

    /// Color scheme for UI rendering.
    pub theme: Theme,

    /// Last rendered terminal size as `(rows, cols)`.
    pub viewport: (usize, usize),
}

impl AppState {
    /// Creates a new application state for `endpoint` with the given theme.
    ///
    /// Starts in search mode with an empty session and default toast timeout.
    #[must_use]
    pub fn new(endpoint: SearchEndpoint, theme: Theme) -> Self {
        Self {
            session: SearchSession::new(),
            endpoint,
            input_mode: InputMode::Search,
            search_input: String::new(),
            selected_index: 0,
            modal: None,
            key_listeners: KeyListeners::default(),
            toasts: Toasts::default(),
            tick_scheduled: false,
            open_command: "xdg-open".to_string(),
            theme,
            viewport: (24, 80),
        }
    }

    /// Number of tile columns for the current viewport.
    #[must_use]
    pub const fn grid_columns(&self) -> usize {
        layout::grid_columns(self.viewport.1)
    }

    /// Returns the selected image, if any.
    #[must_use]
    pub fn selected_image(&self) -> Option<&ImageRecord> {
        self.session.results().get(self.selected_index)
    }

    /// Moves the selection by `(row_delta, col_delta)` grid cells.
    ///
    /// Horizontal moves wrap across rows; vertical moves stop at the edges.
    /// Returns `true` if the selection changed.
    pub fn move_selection(&mut self, row_delta: isize, col_delta: isize) -> bool {
        let len = self.session.results().len();
        if len == 0 {
            return false;
        }

        let columns = self.grid_columns().max(1) as isize;
        let current = self.selected_index as isize;
        let target = current + row_delta * columns + col_delta;

        if target < 0 || target >= len as isize {
            return false;
        }

        self.selected_index = target as usize;
        true
    }

    /// Clamps the selection after the result list changed.
    pub fn clamp_selection(&mut self) {
        let len = self.session.results().len();
        if len == 0 {
            self.selected_index = 0;
        } else {
            self.selected_index = self.selected_index.min(len - 1);
        }
    }

    /// Mounts the modal for `image`, replacing any modal already open.
    pub fn open_modal(&mut self, image: ImageRecord) {
        self.close_modal();
        tracing::debug!(image_id = image.id, "opening modal");
        self.modal = Some(Modal::mount(image, &mut self.key_listeners));
    }

    /// Unmounts the modal. Returns `false` if none was open.
    pub fn close_modal(&mut self) -> bool {
        match self.modal.take() {
            Some(modal) => {
                tracing::debug!(image_id = modal.image.id, "closing modal");
                modal.unmount(&mut self.key_listeners);
                true
            }
            None => false,
        }
    }

    /// Index of the first result shown in the grid window for `rows` terminal rows.
    ///
    /// The window scrolls by whole tile rows so the selected tile stays visible.
    #[must_use]
    pub fn window_start(&self, rows: usize, cols: usize) -> usize {
        let columns = layout::grid_columns(cols);
        let visible_rows = layout::visible_tile_rows(rows);
        let selected_row = self.selected_index / columns;
        let first_row = selected_row.saturating_sub(visible_rows - 1);
        first_row * columns
    }

    /// Computes a renderable UI view model from current state and terminal dimensions.
    ///
    /// # Windowing
    ///
    /// 1. Lay tiles out in `grid_columns(cols)` columns
    /// 2. Show `visible_tile_rows(rows)` rows of tiles
    /// 3. Scroll by whole rows so the selected tile is in the last visible row at most
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let _span = tracing::trace_span!("compute_viewmodel", rows = rows, cols = cols).entered();

        let columns = layout::grid_columns(cols);
        let results = self.session.results();

        let start = self.window_start(rows, cols).min(results.len());
        let end = (start + columns * layout::visible_tile_rows(rows)).min(results.len());

        let matcher = if self.session.query().is_empty() {
            None
        } else {
            Some(SkimMatcherV2::default())
        };

        let tiles = results[start..end]
            .iter()
            .enumerate()
            .map(|(offset, image)| self.compute_tile(image, start + offset, matcher.as_ref()))
            .collect::<Vec<_>>();

        let empty_state = if tiles.is_empty() {
            self.compute_empty_state()
        } else {
            None
        };

        UIViewModel {
            header: self.compute_header(),
            search_bar: SearchBarInfo {
                query: self.search_input.clone(),
                focused: self.input_mode == InputMode::Search,
            },
            status_line: self.compute_status_line(),
            tiles,
            columns,
            footer: self.compute_footer(),
            empty_state,
            modal: self.modal.as_ref().map(|modal| Self::compute_modal(&modal.image)),
            toasts: self
                .toasts
                .iter()
                .map(|toast| ToastItem {
                    message: toast.message.clone(),
                    kind: toast.kind,
                })
                .collect(),
        }
    }

    fn compute_tile(&self, image: &ImageRecord, index: usize, matcher: Option<&SkimMatcherV2>) -> TileItem {
        let inner_width = layout::TILE_WIDTH - 4;

        let caption = truncate(&image.caption(), inner_width);
        let meta = image.dimensions().map_or_else(
            || format!("#{}", image.id),
            |dims| format!("#{} {dims}", image.id),
        );

        let highlight_ranges =
            matcher.map_or_else(Vec::new, |m| self.compute_highlight_ranges(&caption, m));

        TileItem {
            caption,
            meta: truncate(&meta, inner_width),
            is_selected: index == self.selected_index,
            highlight_ranges,
        }
    }

    /// Computes character index ranges of `text` matching any query token.
    ///
    /// Each whitespace-separated token is fuzzy matched on its own; the matched
    /// indices are merged and coalesced into `(start, end)` ranges.
    fn compute_highlight_ranges(&self, text: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
        use fuzzy_matcher::FuzzyMatcher;

        let lowered = text.to_lowercase();
        let mut indices: Vec<usize> = self
            .session
            .query()
            .split_whitespace()
            .filter_map(|token| matcher.fuzzy_indices(&lowered, &token.to_lowercase()))
            .flat_map(|(_score, idx)| idx)
            .collect();
        indices.sort_unstable();
        indices.dedup();

        let mut ranges: Vec<(usize, usize)> = Vec::new();
        for idx in indices {
            match ranges.last_mut() {
                Some((_, end)) if *end == idx => *end = idx + 1,
                _ => ranges.push((idx, idx + 1)),
            }
        }
        ranges
    }

    fn compute_header(&self) -> HeaderInfo {
        let query = self.session.query();
        let title = if query.is_empty() {
            " Pixgrid ".to_string()
        } else {
            format!(
                " Pixgrid: {query} ({} of {}) ",
                self.session.results().len(),
                self.session.total_available()
            )
        };
        HeaderInfo { title }
    }

    fn compute_status_line(&self) -> StatusLine {
        match self.session.status() {
            RequestStatus::Pending => StatusLine::Loading,
            RequestStatus::Idle => StatusLine::Blank,
            RequestStatus::Resolved | RequestStatus::Rejected if self.session.results().is_empty() => {
                StatusLine::Blank
            }
            RequestStatus::Resolved | RequestStatus::Rejected => StatusLine::Summary {
                shown: self.session.results().len(),
                total: self.session.total_available(),
                can_load_more: self.session.can_load_more(),
            },
        }
    }

    fn compute_empty_state(&self) -> Option<EmptyState> {
        match self.session.status() {
            RequestStatus::Idle => Some(EmptyState {
                message: "Search Pixabay".to_string(),
                subtitle: "Type a query and press Enter".to_string(),
            }),
            RequestStatus::Rejected => Some(EmptyState {
                message: "No images to show".to_string(),
                subtitle: "Press / to try another search".to_string(),
            }),
            RequestStatus::Pending | RequestStatus::Resolved => None,
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = if self.modal.is_some() {
            "ESC: close  o: open full size  x: dismiss"
        } else {
            match self.input_mode {
                InputMode::Search => "Enter: search  ESC: back to grid  Type to edit query",
                InputMode::Normal if self.session.can_load_more() => {
                    "h/j/k/l: navigate  Enter: view  m: load more  /: search  x: dismiss  q: quit"
                }
                InputMode::Normal => "h/j/k/l: navigate  Enter: view  /: search  x: dismiss  q: quit",
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    fn compute_modal(image: &ImageRecord) -> ModalInfo {
        ModalInfo {
            alt_text: image.caption(),
            image_url: image.full_size_url.clone(),
            author: if image.user.is_empty() {
                String::new()
            } else {
                format!("by {}", image.user)
            },
            dimensions: image.dimensions().unwrap_or_default(),
        }
    }
}

/// Truncates `text` to `max` characters, marking the cut with `...`.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::SearchPage;

    fn image(id: u64, tags: &str) -> ImageRecord {
        ImageRecord {
            id,
            thumbnail_url: format!("https://cdn.example/{id}_640.jpg"),
            full_size_url: format!("https://cdn.example/{id}_1280.jpg"),
            tags: tags.to_string(),
            width: 1920,
            height: 1080,
            user: "ann".to_string(),
        }
    }

    fn state_with_results(count: u64, total: u32) -> AppState {
        let mut state = AppState::new(SearchEndpoint::default(), Theme::default());
        let request = state.session.submit_query("cat", &mut state.toasts).unwrap();
        let page = SearchPage {
            records: (0..count).map(|id| image(id, "cat, kitten")).collect(),
            total_available: total,
        };
        state.session.complete_fetch(request.request_id, Ok(page), &mut state.toasts);
        state
    }

    #[test]
    fn test_move_selection_in_grid() {
        let mut state = state_with_results(7, 7);
        state.viewport = (24, 80);

        assert!(state.move_selection(0, 1));
        assert_eq!(state.selected_index, 1);
        assert!(state.move_selection(1, 0));
        assert_eq!(state.selected_index, 4);
        assert!(!state.move_selection(1, 0), "row 2 has no column 1");
        assert!(!state.move_selection(-2, 0));
        assert_eq!(state.selected_index, 4);
    }

    #[test]
    fn test_open_and_close_modal() {
        let mut state = state_with_results(2, 2);
        state.open_modal(image(1, "cat"));
        state.open_modal(image(0, "cat"));
        assert_eq!(state.key_listeners.len(), 1);

        assert!(state.close_modal());
        assert!(!state.close_modal());
        assert!(state.key_listeners.is_empty());
    }

    #[test]
    fn test_viewmodel_windows_tiles() {
        let mut state = state_with_results(12, 30);
        state.selected_index = 11;

        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.columns, 3);
        assert_eq!(vm.tiles.len(), 9);
        assert!(vm.tiles.last().unwrap().is_selected);
        assert_eq!(
            vm.status_line,
            StatusLine::Summary { shown: 12, total: 30, can_load_more: true }
        );
        assert_eq!(vm.header.title, " Pixgrid: cat (12 of 30) ");
    }

    #[test]
    fn test_viewmodel_highlights_query() {
        let state = state_with_results(1, 1);
        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.tiles[0].caption, "cat, kitten");
        assert_eq!(vm.tiles[0].highlight_ranges.first(), Some(&(0, 3)));
        assert_eq!(vm.tiles[0].meta, "#0 1920x1080");
    }

    #[test]
    fn test_viewmodel_empty_states() {
        let state = AppState::new(SearchEndpoint::default(), Theme::default());
        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.empty_state.unwrap().message, "Search Pixabay");
        assert_eq!(vm.status_line, StatusLine::Blank);
        assert!(vm.search_bar.focused);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a much longer caption", 10), "a much ...");
    }
}
