//! Modal overlay renderer.
//!
//! Drawn after the grid so it covers it. The frame is filled with spaces to
//! hide the tiles underneath.

use crate::ui::helpers::position_cursor;
use crate::ui::layout::{self, Rect};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ModalInfo;

const HINT: &str = "o: open full size  ESC: close";

/// Renders the modal for the given viewport.
pub fn render_modal(modal: &ModalInfo, theme: &Theme, rows: usize, cols: usize) {
    let rect = layout::modal_rect(rows, cols);
    let inner_width = rect.width.saturating_sub(2);

    let normal = theme.colors.text_normal.as_str();
    let dim = theme.colors.text_dim.as_str();
    let lines: [(&str, &str, bool); 9] = [
        ("", normal, false),
        (modal.alt_text.as_str(), theme.colors.header_fg.as_str(), true),
        (modal.author.as_str(), dim, false),
        (modal.dimensions.as_str(), dim, false),
        ("", normal, false),
        ("Full size:", dim, false),
        (modal.image_url.as_str(), normal, false),
        ("", normal, false),
        (HINT, dim, false),
    ];

    draw_frame_edge(&rect, '┌', '┐', &theme.colors.modal_border);

    let body_rows = rect.height.saturating_sub(2);
    for (offset, (text, color, bold)) in lines.iter().take(body_rows).enumerate() {
        let text: String = text.chars().take(inner_width.saturating_sub(2)).collect();
        let text_len = text.chars().count();

        position_cursor(rect.row + 1 + offset, rect.col);
        print!("{}│{}", Theme::fg(&theme.colors.modal_border), Theme::reset());
        if *bold {
            print!("{}", Theme::bold());
        }
        print!("{}", Theme::fg(color));
        print!(" {text}");
        print!("{}", " ".repeat(inner_width.saturating_sub(text_len + 1)));
        print!("{}", Theme::reset());
        print!("{}│{}", Theme::fg(&theme.colors.modal_border), Theme::reset());
    }

    let bottom = Rect {
        row: rect.row + rect.height.saturating_sub(1),
        ..rect
    };
    draw_frame_edge(&bottom, '└', '┘', &theme.colors.modal_border);
}

fn draw_frame_edge(rect: &Rect, left: char, right: char, color: &str) {
    position_cursor(rect.row, rect.col);
    print!("{}", Theme::fg(color));
    print!("{left}{}{right}", "─".repeat(rect.width.saturating_sub(2)));
    print!("{}", Theme::reset());
}
