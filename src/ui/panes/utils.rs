use crate::ui::theme::DEFAULT_THEME;
use ratatui::style::{Modifier, Style};

/// Border style for a pane, highlighted when it has focus
pub(crate) fn border_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    }
}

/// Clamp a scroll offset so that `total` items fill `visible` rows
pub(crate) fn clamp_scroll(offset: usize, total: usize, visible: usize) -> usize {
    if total > visible {
        offset.min(total - visible)
    } else {
        0
    }
}

/// First index of a `visible`-wide window that keeps `focus` on screen, centred when possible
pub(crate) fn window_start(focus: usize, total: usize, visible: usize) -> usize {
    if total <= visible {
        return 0;
    }
    focus.saturating_sub(visible / 2).min(total - visible)
}
