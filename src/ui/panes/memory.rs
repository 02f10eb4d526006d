//! Memory pane rendering
//!
//! Lists every memory stack cell with its index and value. The cell under the
//! stack pointer carries an arrow, and the cell selected for editing is
//! highlighted while the pane has focus.

use super::utils::{border_style, window_start};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Data needed to render the memory pane
pub struct MemoryRenderData<'a> {
    pub stack: &'a [i32],
    pub stack_pointer: isize,
    pub selected: usize,
}

/// Render the memory pane
pub fn render_memory_pane(
    frame: &mut Frame,
    area: Rect,
    data: MemoryRenderData,
    is_focused: bool,
) {
    let pointer_note = if data.stack_pointer < 0 || data.stack_pointer as usize >= data.stack.len() {
        format!(" Memory (pointer {} out of range) ", data.stack_pointer)
    } else {
        " Memory ".to_string()
    };

    let block = Block::default()
        .title(pointer_note)
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    if data.stack.is_empty() {
        let list = List::new(vec![
            ListItem::new("(no memory)").style(Style::default().fg(DEFAULT_THEME.comment))
        ])
        .block(block);
        frame.render_widget(list, area);
        return;
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    let index_width = data.stack.len().saturating_sub(1).to_string().len();
    let first = window_start(data.selected, data.stack.len(), visible_height);

    let items: Vec<ListItem> = data
        .stack
        .iter()
        .enumerate()
        .skip(first)
        .take(visible_height)
        .map(|(i, value)| {
            let is_pointer = data.stack_pointer >= 0 && data.stack_pointer as usize == i;
            let marker = if is_pointer {
                Span::styled(
                    "▶ ",
                    Style::default()
                        .fg(DEFAULT_THEME.secondary)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::raw("  ")
            };

            let mut line = Line::from(vec![
                marker,
                Span::styled(
                    format!("[{:>width$}] ", i, width = index_width),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
                Span::styled(value.to_string(), Style::default().fg(DEFAULT_THEME.number)),
            ]);

            if is_focused && i == data.selected {
                line = line.style(Style::default().bg(DEFAULT_THEME.current_line_bg));
            }

            ListItem::new(line)
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}
