//! Input mode state type for the application.
//!
//! The plugin operates in one of two input modes:
//! - **Normal**: Grid navigation and commands
//! - **Search**: Keystrokes edit the search bar
//!
//! The modal overlay is not a mode: while it is mounted it owns `Escape`
//! through its key subscription and the remaining keys keep their mode meaning.

/// Current input handling mode.
///
/// Controls which keybindings are active and the footer hint text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Grid navigation mode.
    ///
    /// Available keybindings: h/j/k/l or arrows (navigate), Enter (open),
    /// / (search), m (load more), x (dismiss toast), q (quit).
    Normal,

    /// Typing into the search bar.
    ///
    /// Characters and Backspace edit the draft query, Enter submits it, Esc
    /// returns to the grid. This is the initial mode since nothing has been
    /// searched yet.
    #[default]
    Search,
}
