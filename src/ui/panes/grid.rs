//! Grid pane rendering
//!
//! Draws the program grid one glyph per cell, with the goblin's cell
//! highlighted and breakpoints marked. Large grids scroll so the cursor stays
//! in view; when the cursor has left the grid the view stays where it was
//! nearest to the cursor.

use super::utils::{border_style, window_start};
use crate::language::{Direction, Instruction, Point};
use crate::program::Grid;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use rustc_hash::FxHashSet;

/// Terminal columns used by one cell (two glyph columns plus a gap)
const CELL_WIDTH: usize = 3;

/// Data needed to render the grid pane
pub struct GridRenderData<'a> {
    pub grid: &'a Grid,
    pub cursor: Point,
    pub facing: Direction,
    pub breakpoints: &'a FxHashSet<Point>,
    /// Cell whose instruction faulted, if execution stopped on an error
    pub fault: Option<Point>,
}

fn cell_style(op: Instruction) -> Style {
    match op {
        Instruction::NoOperation => Style::default().fg(DEFAULT_THEME.comment),
        Instruction::Exit => Style::default()
            .fg(DEFAULT_THEME.error)
            .add_modifier(Modifier::BOLD),
        Instruction::Print => Style::default().fg(DEFAULT_THEME.success),
        op if op.is_movement() => Style::default().fg(DEFAULT_THEME.movement),
        _ => Style::default().fg(DEFAULT_THEME.fg),
    }
}

/// Clamp a possibly off-grid coordinate onto `0..len`
fn nearest(coord: i32, len: usize) -> usize {
    if coord < 0 {
        0
    } else {
        (coord as usize).min(len.saturating_sub(1))
    }
}

/// Render the grid pane
pub fn render_grid_pane(frame: &mut Frame, area: Rect, data: GridRenderData, is_focused: bool) {
    let grid = data.grid;
    let block = Block::default()
        .title(format!(
            " Grid {}x{} {} ",
            grid.width(),
            grid.height(),
            data.facing.arrow()
        ))
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    if grid.width() == 0 || grid.height() == 0 {
        let paragraph = Paragraph::new("(empty grid)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_cols = (area.width.saturating_sub(2) as usize / CELL_WIDTH).max(1);
    let visible_rows = area.height.saturating_sub(2).max(1) as usize;

    let first_col = window_start(nearest(data.cursor.x, grid.width()), grid.width(), visible_cols);
    let first_row = window_start(nearest(data.cursor.y, grid.height()), grid.height(), visible_rows);

    let lines: Vec<Line> = (first_row..grid.height())
        .take(visible_rows)
        .map(|y| {
            let spans: Vec<Span> = (first_col..grid.width())
                .take(visible_cols)
                .flat_map(|x| {
                    let point = Point::new(x as i32, y as i32);
                    let op = grid[point];
                    let mut style = cell_style(op);

                    if data.fault == Some(point) {
                        style = Style::default()
                            .bg(DEFAULT_THEME.error)
                            .fg(Color::Black)
                            .add_modifier(Modifier::BOLD);
                    } else if point == data.cursor {
                        style = style
                            .bg(DEFAULT_THEME.cursor_bg)
                            .fg(Color::Black)
                            .add_modifier(Modifier::BOLD);
                    }

                    let gap = if data.breakpoints.contains(&point) {
                        Span::styled("●", Style::default().fg(DEFAULT_THEME.breakpoint))
                    } else {
                        Span::raw(" ")
                    };

                    [Span::styled(op.glyph(), style), gap]
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
