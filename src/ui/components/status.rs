//! Loader and pagination line between the search bar and the grid.

use crate::ui::helpers::print_centered;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::StatusLine;

/// Renders the status line at `row`.
///
/// Shows a loading indicator while a page is in flight, otherwise the number
/// of images shown and, when another page exists, the load-more hint.
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_status_line(row: usize, status: &StatusLine, theme: &Theme, cols: usize) -> usize {
    let (text, color) = match status {
        StatusLine::Blank => (String::new(), &theme.colors.text_dim),
        StatusLine::Loading => ("Loading images...".to_string(), &theme.colors.loader_fg),
        StatusLine::Summary {
            shown,
            total,
            can_load_more,
        } => {
            let mut text = format!("Showing {shown} of {total}");
            if *can_load_more {
                text.push_str("  ·  press m to load more");
            }
            (text, &theme.colors.text_dim)
        }
    };

    print!("{}", Theme::fg(color));
    if *status == StatusLine::Loading {
        print!("{}", Theme::bold());
    }
    print_centered(row, &text, cols);
    print!("{}", Theme::reset());
    row + 1
}
