//! Toast stack renderer.
//!
//! Toasts are right-aligned above the footer border, newest at the bottom.

use crate::app::NotificationKind;
use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ToastItem;

/// Renders `toasts` (oldest first) so the newest sits just above `bottom_row`.
pub fn render_toasts(toasts: &[ToastItem], theme: &Theme, bottom_row: usize, cols: usize) {
    let max_width = cols.saturating_sub(4);

    for (offset, toast) in toasts.iter().rev().enumerate() {
        let Some(row) = bottom_row.checked_sub(offset + 1) else {
            break;
        };
        if row == 0 {
            break;
        }

        let (icon, color) = match toast.kind {
            NotificationKind::Info => ("✔", &theme.colors.toast_info_fg),
            NotificationKind::Error => ("✖", &theme.colors.toast_error_fg),
        };

        let text: String = format!(" {icon} {} ", toast.message)
            .chars()
            .take(max_width)
            .collect();
        let col = cols.saturating_sub(text.chars().count() + 1).max(1);

        position_cursor(row, col);
        print!("{}", Theme::bold());
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(color));
        print!("{text}");
        print!("{}", Theme::reset());
    }
}
