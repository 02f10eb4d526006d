//! Output pane rendering

use super::utils::{border_style, clamp_scroll};
use crate::snapshot::OutputLog;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

/// Render the output pane
pub fn render_terminal_pane(
    frame: &mut Frame,
    area: Rect,
    output: &OutputLog,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(" Output ")
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    if output.is_empty() {
        let paragraph = Paragraph::new("(no output)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
    } else {
        let block = block.padding(Padding::new(1, 0, 0, 0));

        // Calculate visible range for scrolling
        let total_items = output.len();
        let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders, min 1
        *scroll_offset = clamp_scroll(*scroll_offset, total_items, visible_height);

        let visible_items: Vec<ListItem> = output
            .lines
            .iter()
            .skip(*scroll_offset)
            .take(visible_height)
            .map(|line| {
                ListItem::new(Line::from(vec![
                    Span::styled(line.text.as_str(), Style::default().fg(DEFAULT_THEME.fg)),
                    Span::styled(
                        format!("  @{}", line.point),
                        Style::default().fg(DEFAULT_THEME.comment),
                    ),
                ]))
            })
            .collect();

        let list = List::new(visible_items).block(block);
        frame.render_widget(list, area);
    }
}
