//! Placeholder drawn where the grid would be.
//!
//! Shown before the first search and after a search that produced no images.

use crate::ui::helpers::print_centered;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders the message and its dimmed subtitle one row below `row`.
///
/// ```text
/// [blank line]
///            Search Pixabay
///     Type a query and press Enter
/// ```
pub fn render_empty_state(row: usize, empty: &EmptyState, theme: &Theme, cols: usize) {
    print!("{}", Theme::fg(&theme.colors.empty_state_fg));
    print_centered(row + 1, &empty.message, cols);
    print!("{}", Theme::reset());

    print!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim));
    print_centered(row + 2, &empty.subtitle, cols);
    print!("{}", Theme::reset());
}
