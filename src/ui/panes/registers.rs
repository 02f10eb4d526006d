//! Register pane rendering

use super::utils::border_style;
use crate::interpreter::engine::{Engine, HaltReason};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn row<'a>(label: &'a str, value: Span<'a>) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!(" {:<12}", label), Style::default().fg(DEFAULT_THEME.comment)),
        value,
    ])
}

/// Render the register pane
pub fn render_registers_pane(
    frame: &mut Frame,
    area: Rect,
    engine: &Engine<'_>,
    is_faulted: bool,
) {
    let block = Block::default()
        .title(" Registers ")
        .borders(Borders::ALL)
        .border_style(border_style(false));

    let flag_style = if engine.flag() {
        Style::default()
            .fg(DEFAULT_THEME.flag_set)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.comment)
    };

    let next = match engine.current_instruction() {
        Some(op) => Span::styled(op.to_string(), Style::default().fg(DEFAULT_THEME.fg)),
        None => Span::styled("(off grid)", Style::default().fg(DEFAULT_THEME.comment)),
    };

    let state = if is_faulted {
        Span::styled("faulted", Style::default().fg(DEFAULT_THEME.error))
    } else {
        match engine.halt_reason() {
            None => Span::styled("running", Style::default().fg(DEFAULT_THEME.success)),
            Some(HaltReason::Exit) => {
                Span::styled("exited", Style::default().fg(DEFAULT_THEME.secondary))
            }
            Some(HaltReason::OutOfBounds) => {
                Span::styled("out of bounds", Style::default().fg(DEFAULT_THEME.secondary))
            }
        }
    };

    let lines = vec![
        row(
            "cursor",
            Span::styled(engine.cursor().to_string(), Style::default().fg(DEFAULT_THEME.fg)),
        ),
        row(
            "facing",
            Span::styled(
                format!("{} {}", engine.facing().arrow(), engine.facing()),
                Style::default().fg(DEFAULT_THEME.movement),
            ),
        ),
        row(
            "accumulator",
            Span::styled(
                engine.accumulator().to_string(),
                Style::default()
                    .fg(DEFAULT_THEME.number)
                    .add_modifier(Modifier::BOLD),
            ),
        ),
        row("flag", Span::styled(engine.flag().to_string(), flag_style)),
        row(
            "pointer",
            Span::styled(
                engine.stack_pointer().to_string(),
                Style::default().fg(DEFAULT_THEME.number),
            ),
        ),
        row("next", next),
        row("state", state),
    ];

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
