//! Screen geometry shared by the renderer and the event handler.
//!
//! The grid and the modal are drawn by the UI layer, but navigation and mouse
//! hit-testing happen in the event handler. Both sides compute positions from
//! the functions here so they always agree.
//!
//! All coordinates are 1-indexed terminal cells, matching
//! [`position_cursor`](crate::ui::helpers::position_cursor).

/// Width of one grid tile, borders included.
pub const TILE_WIDTH: usize = 26;

/// Height of one grid tile, borders included.
pub const TILE_HEIGHT: usize = 4;

/// First row of the tile area.
pub const GRID_TOP_ROW: usize = 8;

/// Rows used by chrome: blank, header, border, search bar (3), status line,
/// bottom border, footer.
pub const CHROME_ROWS: usize = 9;

/// Rows occupied by the modal overlay.
const MODAL_HEIGHT: usize = 11;

/// Widest the modal overlay grows.
const MODAL_MAX_WIDTH: usize = 76;

/// A rectangular screen region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub row: usize,
    pub col: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    /// Returns `true` if the 1-indexed cell `(row, col)` lies inside the region.
    #[must_use]
    pub const fn contains(&self, row: usize, col: usize) -> bool {
        row >= self.row
            && row < self.row + self.height
            && col >= self.col
            && col < self.col + self.width
    }
}

/// Number of tile columns that fit in `cols` terminal columns (at least one).
#[must_use]
pub const fn grid_columns(cols: usize) -> usize {
    let columns = cols / TILE_WIDTH;
    if columns == 0 {
        1
    } else {
        columns
    }
}

/// Number of tile rows that fit in `rows` terminal rows (at least one).
#[must_use]
pub const fn visible_tile_rows(rows: usize) -> usize {
    let tile_rows = rows.saturating_sub(CHROME_ROWS) / TILE_HEIGHT;
    if tile_rows == 0 {
        1
    } else {
        tile_rows
    }
}

/// Region covered by the modal overlay, centered in the viewport.
#[must_use]
pub fn modal_rect(rows: usize, cols: usize) -> Rect {
    let width = cols.saturating_sub(8).clamp(20, MODAL_MAX_WIDTH);
    let height = MODAL_HEIGHT.min(rows.max(1));
    Rect {
        row: rows.saturating_sub(height) / 2 + 1,
        col: cols.saturating_sub(width) / 2 + 1,
        width,
        height,
    }
}

/// Region of the tile at grid position `(tile_row, tile_col)` of the visible window.
#[must_use]
pub const fn tile_rect(tile_row: usize, tile_col: usize) -> Rect {
    Rect {
        row: GRID_TOP_ROW + tile_row * TILE_HEIGHT,
        col: 1 + tile_col * TILE_WIDTH,
        width: TILE_WIDTH,
        height: TILE_HEIGHT,
    }
}
