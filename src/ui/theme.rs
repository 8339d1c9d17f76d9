//! Color schemes for the gallery.
//!
//! A [`Theme`] is a named palette of hex colors, one per UI role (tile frames,
//! toasts, the modal border...). Four Catppuccin flavours are compiled in; any
//! other palette can be supplied as a TOML file with the same shape as the
//! files under `themes/`:
//!
//! ```toml
//! name = "dusk"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! header_bg = "#181825"          # optional
//! selection_fg = "#1e1e2e"
//! selection_bg = "#f5c2e7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! search_bar_border = "#6c7086"
//! search_bar_focused_border = "#f5c2e7"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! empty_state_fg = "#89b4fa"
//! loader_fg = "#cba6f7"
//! tile_border = "#45475a"
//! modal_border = "#b4befe"
//! toast_info_fg = "#a6e3a1"
//! toast_error_fg = "#f38ba8"
//! ```
//!
//! Colors are emitted as 24-bit ANSI sequences:
//!
//! ```rust
//! use pixgrid::ui::theme::Theme;
//!
//! let theme = Theme::from_name("catppuccin-latte").unwrap();
//! print!("{}caption{}", Theme::fg(&theme.colors.text_normal), Theme::reset());
//! ```

use crate::domain::error::{GalleryError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the palette used when nothing else is configured.
pub const DEFAULT_THEME: &str = "catppuccin-mocha";

/// Compiled-in palettes, by name.
static BUILTIN_THEMES: [(&str, &str); 4] = [
    ("catppuccin-mocha", include_str!("../../themes/catppuccin-mocha.toml")),
    ("catppuccin-latte", include_str!("../../themes/catppuccin-latte.toml")),
    ("catppuccin-frappe", include_str!("../../themes/catppuccin-frappe.toml")),
    ("catppuccin-macchiato", include_str!("../../themes/catppuccin-macchiato.toml")),
];

/// Substituted for colors that are not `#rrggbb`.
const FALLBACK_RGB: (u8, u8, u8) = (255, 255, 255);

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// One hex color per UI role.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Text and frame of the selected tile.
    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Secondary text: tile metadata, footer, placeholders.
    pub text_dim: String,
    /// Horizontal separators.
    pub border: String,

    pub search_bar_border: String,
    /// Search bar frame while keystrokes edit the query.
    pub search_bar_focused_border: String,

    /// Caption characters matching the active query.
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub empty_state_fg: String,
    /// "Loading images..." line.
    pub loader_fg: String,
    pub tile_border: String,
    pub modal_border: String,

    /// Background of info and error toasts.
    pub toast_info_fg: String,
    pub toast_error_fg: String,
}

impl Theme {
    /// Names accepted by [`Theme::from_name`].
    pub fn builtin_names() -> impl Iterator<Item = &'static str> {
        BUILTIN_THEMES.iter().map(|(name, _)| *name)
    }

    /// Returns the compiled-in palette called `name`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        BUILTIN_THEMES
            .iter()
            .find(|(builtin, _)| *builtin == name)
            .and_then(|(_, source)| toml::from_str(source).ok())
    }

    /// Reads a palette from a TOML file.
    ///
    /// # Errors
    ///
    /// [`GalleryError::Theme`] when the file is unreadable or is missing a color.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            GalleryError::Theme(format!("Failed to read theme file {}: {e}", path.display()))
        })?;

        toml::from_str(&contents)
            .map_err(|e| GalleryError::Theme(format!("Failed to parse theme TOML: {e}")))
    }

    /// Parses `#rrggbb` (the `#` is optional).
    fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
        Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::parse_hex(hex).unwrap_or(FALLBACK_RGB);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::parse_hex(hex).unwrap_or(FALLBACK_RGB);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Clears every attribute set by the other helpers.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// # Panics
    ///
    /// Panics if the compiled-in default palette does not parse.
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).expect("built-in default theme must parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_themes_parse() {
        for name in Theme::builtin_names() {
            let theme = Theme::from_name(name).unwrap();
            assert_eq!(theme.name, name);
        }
        assert!(Theme::from_name("solarized").is_none());
    }

    #[test]
    fn test_fg_and_bg_sequences() {
        assert_eq!(Theme::fg("#ff0080"), "\u{1b}[38;2;255;0;128m");
        assert_eq!(Theme::bg("000000"), "\u{1b}[48;2;0;0;0m");
        assert_eq!(Theme::fg("#abc"), "\u{1b}[38;2;255;255;255m");
        assert_eq!(Theme::fg("#gg0000"), "\u{1b}[38;2;255;255;255m");
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let builtin = include_str!("../../themes/catppuccin-latte.toml");
        file.write_all(builtin.replace("catppuccin-latte", "custom").as_bytes())
            .unwrap();

        let theme = Theme::from_file(file.path()).unwrap();
        assert_eq!(theme.name, "custom");
        assert!(theme.colors.header_bg.is_none());
    }

    #[test]
    fn test_from_file_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"name = \"broken\"\n").unwrap();

        let err = Theme::from_file(file.path()).unwrap_err();
        assert!(matches!(err, GalleryError::Theme(msg) if msg.contains("parse")));

        let err = Theme::from_file("/nonexistent/theme.toml").unwrap_err();
        assert!(matches!(err, GalleryError::Theme(msg) if msg.contains("read")));
    }
}
