//! Composable UI component renderers.
//!
//! This module provides specialized rendering components for different UI
//! elements, following a component-based architecture. Each component is
//! responsible for rendering a specific part of the interface.
//!
//! # Components
//!
//! - [`header`]: Title bar with the active query and counters
//! - [`search`]: Search input box (border, query text, cursor)
//! - [`status`]: Loader and pagination line
//! - [`grid`]: Image tiles
//! - [`empty`]: Empty state message in place of the grid
//! - [`footer`]: Help text and keybinding hints
//! - [`modal`]: Full-size image overlay
//! - [`toasts`]: Notification stack
//!
//! # Layout
//!
//! [`render_gallery`] draws the base layer; overlays are drawn over it by the
//! renderer afterwards.

mod empty;
mod footer;
mod grid;
mod header;
mod modal;
mod search;
mod status;
mod toasts;

pub use modal::render_modal;
pub use toasts::render_toasts;

use crate::ui::helpers::position_cursor;
use crate::ui::layout::GRID_TOP_ROW;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use empty::render_empty_state;
use footer::render_footer;
use grid::render_grid;
use header::render_header;
use search::render_search_bar;
use status::render_status_line;

/// Renders a horizontal border line at the specified row.
///
/// # Returns
///
/// The next available row position (row + 1)
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the gallery layout.
///
/// Layout structure:
/// ```text
/// [blank line]
/// [Header]
/// [Border]
/// [Search Bar - 3 lines]
/// [Status line]
/// [Tiles or empty state]
/// [Border]
/// [Footer]
/// ```
pub fn render_gallery(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2; // Start at row 2 (skip blank line at row 1)

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_search_bar(current_row, &vm.search_bar, theme, cols);
    let grid_row = render_status_line(current_row, &vm.status_line, theme, cols);
    debug_assert_eq!(grid_row, GRID_TOP_ROW);

    if let Some(empty) = &vm.empty_state {
        render_empty_state(grid_row, empty, theme, cols);
    } else {
        render_grid(&vm.tiles, vm.columns, theme);
    }

    let footer_row = rows;
    let border_row = footer_row.saturating_sub(1);

    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
}
