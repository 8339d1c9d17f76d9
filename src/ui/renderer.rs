//! Top-level rendering coordinator.
//!
//! This module provides the main rendering entry point, coordinating view model
//! computation and delegation to UI components.
//!
//! # Architecture
//!
//! The renderer follows a two-step process:
//!
//! 1. **View Model Computation**: Transform `AppState` into `UIViewModel`
//! 2. **Component Rendering**: Base layout first, then the modal, then toasts
//!
//! # Example
//!
//! ```rust
//! use pixgrid::app::AppState;
//! use pixgrid::ui::{render, Theme};
//!
//! let state = AppState::new(Default::default(), Theme::default());
//! render(&state, 24, 80); // Render to stdout
//! ```

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Renders the plugin UI to stdout.
///
/// Prints ANSI-styled output using `print!`. Does not clear the screen.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    render_viewmodel(&viewmodel, &state.theme, rows, cols);
}

/// Renders a view model in stacking order.
///
/// The modal covers the grid but not the toasts, so feedback for a fetch that
/// completes while the modal is open stays visible.
fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    components::render_gallery(vm, theme, cols, rows);

    if let Some(modal) = &vm.modal {
        components::render_modal(modal, theme, rows, cols);
    }

    if !vm.toasts.is_empty() {
        components::render_toasts(&vm.toasts, theme, rows.saturating_sub(1), cols);
    }
}
