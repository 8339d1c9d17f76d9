//! Image grid component renderer.
//!
//! Tiles are framed boxes laid out row-major in `vm.columns` columns. Positions
//! come from [`layout::tile_rect`] so mouse hit-testing agrees with what is drawn.

use crate::ui::helpers::{self, position_cursor};
use crate::ui::layout;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::TileItem;

/// Renders the visible tiles.
pub fn render_grid(tiles: &[TileItem], columns: usize, theme: &Theme) {
    let columns = columns.max(1);
    for (index, tile) in tiles.iter().enumerate() {
        render_tile(index / columns, index % columns, tile, theme);
    }
}

/// Renders one tile.
///
/// ```text
/// ┌────────────────────────┐
/// │ cat, kitten, pet       │
/// │ #1234 1920x1080        │
/// └────────────────────────┘
/// ```
///
/// The selected tile gets selection colors on its frame and content lines.
/// Query matches in the caption are highlighted on unselected tiles.
fn render_tile(tile_row: usize, tile_col: usize, tile: &TileItem, theme: &Theme) {
    let rect = layout::tile_rect(tile_row, tile_col);
    let inner_width = rect.width.saturating_sub(2);
    let text_width = inner_width.saturating_sub(2);

    let frame = if tile.is_selected {
        &theme.colors.selection_bg
    } else {
        &theme.colors.tile_border
    };

    let content_style = || {
        if tile.is_selected {
            print!("{}", Theme::fg(&theme.colors.selection_fg));
            print!("{}", Theme::bg(&theme.colors.selection_bg));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_normal));
        }
    };

    position_cursor(rect.row, rect.col);
    print!("{}", Theme::fg(frame));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    position_cursor(rect.row + 1, rect.col);
    print!("{}│{}", Theme::fg(frame), Theme::reset());
    content_style();
    print!(" ");
    helpers::render_highlighted_text(&tile.caption, &tile.highlight_ranges, theme, tile.is_selected);
    print!("{}", " ".repeat(text_width.saturating_sub(tile.caption.chars().count()) + 1));
    print!("{}", Theme::reset());
    print!("{}│{}", Theme::fg(frame), Theme::reset());

    position_cursor(rect.row + 2, rect.col);
    print!("{}│{}", Theme::fg(frame), Theme::reset());
    content_style();
    if !tile.is_selected {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!(" {}", tile.meta);
    print!("{}", " ".repeat(text_width.saturating_sub(tile.meta.chars().count()) + 1));
    print!("{}", Theme::reset());
    print!("{}│{}", Theme::fg(frame), Theme::reset());

    position_cursor(rect.row + 3, rect.col);
    print!("{}", Theme::fg(frame));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());
}
