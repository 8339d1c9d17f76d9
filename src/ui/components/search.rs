//! Search bar component renderer.
//!
//! This module renders the search input box with a bordered frame and query
//! text display.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 5;

/// Placeholder shown while the draft query is empty.
const PLACEHOLDER: &str = "Search images and photos";

/// Renders the search input box at the specified row.
///
/// # Returns
///
/// The next available row position (row + 3, since search box uses 3 lines)
///
/// # Layout
///
/// ```text
/// [margin] ┌─────────────┐ [margin]
/// [margin] │ Search: ... │ [margin]
/// [margin] └─────────────┘ [margin]
/// ```
///
/// The border uses `search_bar_focused_border` while typing and a block cursor
/// follows the query. An empty, unfocused bar shows a dimmed placeholder.
/// Long queries are cut from the left so the end of the text stays visible.
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = if search.focused {
        &theme.colors.search_bar_focused_border
    } else {
        &theme.colors.search_bar_border
    };

    position_cursor(row, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let prefix = " Search: ";
    let cursor = if search.focused { "█" } else { "" };
    let room = inner_width.saturating_sub(prefix.len() + cursor.chars().count());
    let query_len = search.query.chars().count();
    let visible_query: String = search
        .query
        .chars()
        .skip(query_len.saturating_sub(room))
        .collect();

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("│");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{prefix}");

    let used = if visible_query.is_empty() && !search.focused {
        let placeholder: String = PLACEHOLDER.chars().take(room).collect();
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("{placeholder}");
        prefix.len() + placeholder.chars().count()
    } else {
        print!("{visible_query}{cursor}");
        prefix.len() + visible_query.chars().count() + cursor.chars().count()
    };

    print!("{}", " ".repeat(inner_width.saturating_sub(used)));
    print!("{}", Theme::fg(border));
    print!("│");
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 3
}
