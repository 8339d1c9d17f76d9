//! Shared rendering utilities and helpers.
//!
//! Cursor placement, centered lines and query match highlighting used across
//! components.
//! Highlight ranges are UTF-8 character indices, never byte indices.

use crate::ui::theme::Theme;

/// Positions the cursor at a specific row and column.
///
/// Uses ANSI escape sequence `\u{1b}[{row};{col}H` to move the cursor.
/// Coordinates are 1-indexed (row 1 = first row, col 1 = first column).
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Prints `text` centered in a `cols`-wide line at `row`, cut to fit.
///
/// Styling is left to the caller; the whole line is overwritten.
pub fn print_centered(row: usize, text: &str, cols: usize) {
    let text: String = text.chars().take(cols).collect();
    let len = text.chars().count();
    let padding = cols.saturating_sub(len) / 2;

    position_cursor(row, 1);
    print!("{}{text}{}", " ".repeat(padding), " ".repeat(cols - padding - len));
}

/// Splits `text` into `(segment, highlighted)` runs following `ranges`.
///
/// Ranges are `(start, end)` character indices, sorted and non-overlapping.
/// Out-of-bounds ends are clamped to the text length.
#[must_use]
pub fn highlight_segments(text: &str, ranges: &[(usize, usize)]) -> Vec<(String, bool)> {
    let chars: Vec<char> = text.chars().collect();
    let mut segments = Vec::new();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len()).max(current_pos);
        let end = end.min(chars.len());
        if start >= end {
            continue;
        }
        if start > current_pos {
            segments.push((chars[current_pos..start].iter().collect(), false));
        }
        segments.push((chars[start..end].iter().collect(), true));
        current_pos = end;
    }

    if current_pos < chars.len() {
        segments.push((chars[current_pos..].iter().collect(), false));
    }
    segments
}

/// Renders text with highlighted character ranges for query matches.
///
/// When `is_selected` is `true`, match highlighting is disabled to avoid
/// conflicting with selection background colors. Unhighlighted runs are
/// printed in `text_normal`.
pub fn render_highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    for (segment, highlighted) in highlight_segments(text, ranges) {
        if highlighted {
            print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
            print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
            print!("{segment}");
            print!("{}", Theme::reset());
            print!("{}", Theme::fg(&theme.colors.text_normal));
        } else {
            print!("{segment}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_segments() {
        let segments = highlight_segments("red fox", &[(0, 3), (4, 5)]);
        assert_eq!(
            segments,
            vec![
                ("red".to_string(), true),
                (" ".to_string(), false),
                ("f".to_string(), true),
                ("ox".to_string(), false),
            ]
        );
    }

    #[test]
    fn test_highlight_segments_unicode_and_clamping() {
        let segments = highlight_segments("café au lait", &[(3, 4), (10, 40)]);
        assert_eq!(segments[0], ("caf".to_string(), false));
        assert_eq!(segments[1], ("é".to_string(), true));
        assert_eq!(segments.last(), Some(&("it".to_string(), true)));
    }

    #[test]
    fn test_highlight_segments_without_ranges() {
        assert_eq!(
            highlight_segments("owl", &[]),
            vec![("owl".to_string(), false)]
        );
    }
}
