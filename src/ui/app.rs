//! Main TUI application state and logic

use crate::interpreter::engine::{Engine, MachineState, Step};
use crate::interpreter::errors::RuntimeError;
use crate::language::{Instruction, Point};
use crate::snapshot::{OutputLog, Snapshot, SnapshotManager};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use rustc_hash::FxHashSet;
use std::io;
use std::time::{Duration, Instant};

/// Upper bound on steps taken by a single "run to end" keypress
pub const RUN_TO_END_LIMIT: u64 = 100_000;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Grid,
    Memory,
    Output,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: grid -> memory -> output)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Grid => FocusedPane::Memory,
            FocusedPane::Memory => FocusedPane::Output,
            FocusedPane::Output => FocusedPane::Grid,
        }
    }

    /// Move focus to the previous pane (counter-clockwise)
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Grid => FocusedPane::Output,
            FocusedPane::Memory => FocusedPane::Grid,
            FocusedPane::Output => FocusedPane::Memory,
        }
    }
}

/// Driver settings the TUI needs beyond the engine itself
#[derive(Debug, Clone, Copy)]
pub struct AppConfig {
    /// Pause between auto-play steps
    pub play_delay: Duration,
    /// Snapshots kept for stepping backward
    pub history_capacity: usize,
}

/// The main application state
pub struct App<'g> {
    /// The engine being driven
    pub engine: Engine<'g>,

    /// Registers to return to on reset, including memory edited before the first step
    initial_state: MachineState,

    /// Snapshots taken before every step
    pub history: SnapshotManager,

    /// Values emitted by `Print`
    pub output: OutputLog,

    /// Cells where auto-play pauses
    pub breakpoints: FxHashSet<Point>,

    /// Fault that stopped execution, cleared by stepping back or resetting
    pub fault: Option<RuntimeError>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Memory cell selected for editing
    pub selected_cell: usize,

    /// Scroll offset of the output pane
    pub output_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    pub play_delay: Duration,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl<'g> App<'g> {
    /// Create a new app around a freshly constructed engine
    pub fn new(engine: Engine<'g>, config: AppConfig) -> Self {
        App {
            initial_state: engine.state().clone(),
            engine,
            history: SnapshotManager::new(config.history_capacity),
            output: OutputLog::new(),
            breakpoints: FxHashSet::default(),
            fault: None,
            focused_pane: FocusedPane::Grid,
            selected_cell: 0,
            output_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
            is_playing: false,
            play_delay: config.play_delay,
            last_play_time: Instant::now(),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or(Instant::now()),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // The play flag is checked once per tick, so a pause lands within one delay
            if self.is_playing && self.last_play_time.elapsed() >= self.play_delay {
                self.play_tick();
                self.last_play_time = Instant::now();
            }

            // Use poll with timeout to allow auto-play to work
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes in 2 columns, plus status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let pane_area = main_chunks[0];
        let status_area = main_chunks[1];

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(pane_area);

        // Left column: Grid (top) | Output (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(columns[0]);

        // Right column: Registers (top) | Memory (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(9), Constraint::Min(0)])
            .split(columns[1]);

        let fault_point = self.fault.as_ref().and_then(RuntimeError::point);

        super::panes::render_grid_pane(
            frame,
            left_rows[0],
            super::panes::GridRenderData {
                grid: self.engine.grid(),
                cursor: self.engine.cursor(),
                facing: self.engine.facing(),
                breakpoints: &self.breakpoints,
                fault: fault_point,
            },
            self.focused_pane == FocusedPane::Grid,
        );

        super::panes::render_terminal_pane(
            frame,
            left_rows[1],
            &self.output,
            self.focused_pane == FocusedPane::Output,
            &mut self.output_scroll,
        );

        super::panes::render_registers_pane(
            frame,
            right_rows[0],
            &self.engine,
            self.fault.is_some(),
        );

        super::panes::render_memory_pane(
            frame,
            right_rows[1],
            super::panes::MemoryRenderData {
                stack: self.engine.stack(),
                stack_pointer: self.engine.stack_pointer(),
                selected: self.selected_cell,
            },
            self.focused_pane == FocusedPane::Memory,
        );

        super::panes::render_status_bar(
            frame,
            status_area,
            super::panes::StatusRenderData {
                message: &self.status_message,
                steps: self.engine.steps(),
                history_len: self.history.len(),
                history_dropped: self.history.dropped(),
                is_playing: self.is_playing,
                is_halted: self.engine.is_halted(),
                is_faulted: self.fault.is_some(),
            },
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                self.is_playing = false;
                let n = c.to_digit(10).unwrap_or(1);
                let mut stepped = 0;
                for _ in 0..n {
                    if !self.step_forward() {
                        break;
                    }
                    stepped += 1;
                }
                if self.fault.is_none() && !self.engine.is_halted() {
                    self.status_message = format!("Stepped forward {} step(s)", stepped);
                }
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Left => {
                self.is_playing = false;
                self.step_backward();
            }
            KeyCode::Right | KeyCode::Char('s') => {
                self.is_playing = false;
                self.step_forward();
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Memory => {
                    self.selected_cell = self.selected_cell.saturating_sub(1);
                }
                FocusedPane::Output => {
                    self.output_scroll = self.output_scroll.saturating_sub(1);
                }
                FocusedPane::Grid => {}
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Memory => {
                    let last = self.engine.stack().len().saturating_sub(1);
                    self.selected_cell = (self.selected_cell + 1).min(last);
                }
                FocusedPane::Output => {
                    self.output_scroll = self.output_scroll.saturating_add(1);
                }
                FocusedPane::Grid => {}
            },
            KeyCode::Char('+') | KeyCode::Char('=') => self.edit_selected_cell(1),
            KeyCode::Char('-') => self.edit_selected_cell(-1),
            KeyCode::Char('0') => self.set_selected_cell(0),
            KeyCode::Char('b') => self.toggle_breakpoint(),
            KeyCode::Char(' ') => {
                // Toggle auto-play mode (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.toggle_play();
                }
            }
            KeyCode::Enter => {
                self.is_playing = false;
                self.run_to_end();
            }
            KeyCode::Backspace | KeyCode::Char('r') => {
                self.reset();
            }
            _ => {}
        }
    }

    /// Start or pause auto-play
    pub fn toggle_play(&mut self) {
        if self.is_playing {
            self.is_playing = false;
            self.status_message = "Paused".to_string();
            return;
        }

        if let Some(e) = &self.fault {
            self.status_message = format!("Cannot play: {}", e);
        } else if let Some(reason) = self.engine.halt_reason() {
            self.status_message = format!("Cannot play: {}", reason.describe());
        } else {
            self.is_playing = true;
            self.last_play_time = Instant::now()
                .checked_sub(self.play_delay)
                .unwrap_or(Instant::now());
            self.status_message = "Playing...".to_string();
        }
    }

    /// One auto-play step; pauses on halts, faults and breakpoints
    pub fn play_tick(&mut self) {
        if !self.step_forward() {
            self.is_playing = false;
            return;
        }
        let cursor = self.engine.cursor();
        if self.breakpoints.contains(&cursor) {
            self.is_playing = false;
            self.status_message = format!("Breakpoint at {}", cursor);
        } else {
            self.status_message = "Playing...".to_string();
        }
    }

    /// Execute one instruction, recording history and output.
    ///
    /// Returns whether execution can continue afterwards.
    pub fn step_forward(&mut self) -> bool {
        if let Some(e) = &self.fault {
            self.status_message = format!("Stopped by fault: {}", e);
            return false;
        }

        let snapshot = Snapshot {
            state: self.engine.state().clone(),
            output_len: self.output.len(),
        };
        let at = snapshot.state.cursor;

        match self.engine.step() {
            Ok(Step::Continued(instruction)) => {
                self.history.push(snapshot);
                if instruction == Instruction::Print {
                    self.output
                        .print(self.engine.accumulator(), at, self.engine.steps());
                    // Auto-scroll output to bottom
                    self.output_scroll = usize::MAX;
                }
                self.status_message = format!("Executed {} at {}", instruction, at);
                true
            }
            Ok(Step::Halted(reason)) => {
                // Only the Exit step changes state; running off the grid changes nothing
                if snapshot.state != *self.engine.state() {
                    self.history.push(snapshot);
                }
                self.is_playing = false;
                self.status_message = format!("Execution {}", reason.describe());
                false
            }
            Err(e) => {
                self.is_playing = false;
                self.status_message = format!("Runtime error: {}", e);
                self.fault = Some(e);
                false
            }
        }
    }

    /// Undo the most recent step
    pub fn step_backward(&mut self) {
        match self.history.pop() {
            Some(snapshot) => {
                self.output.truncate(snapshot.output_len);
                self.engine.restore(snapshot.state);
                self.fault = None;
                self.status_message = "Stepped backward".to_string();
                self.output_scroll = usize::MAX;
            }
            None if self.fault.is_some() => {
                self.fault = None;
                self.status_message = "Cleared fault".to_string();
            }
            None => {
                self.status_message = "Cannot step backward: no history".to_string();
            }
        }
    }

    /// Step until the program halts, faults, reaches a breakpoint or the step limit
    pub fn run_to_end(&mut self) {
        let mut stepped = 0;
        while stepped < RUN_TO_END_LIMIT {
            if !self.step_forward() {
                return;
            }
            stepped += 1;
            let cursor = self.engine.cursor();
            if self.breakpoints.contains(&cursor) {
                self.status_message = format!("Breakpoint at {} after {} step(s)", cursor, stepped);
                return;
            }
        }
        self.status_message = format!("Still running after {} steps", RUN_TO_END_LIMIT);
    }

    /// Return to the registers the app started with
    pub fn reset(&mut self) {
        self.is_playing = false;
        self.engine.restore(self.initial_state.clone());
        self.history.clear();
        self.output.clear();
        self.fault = None;
        self.output_scroll = 0;
        self.status_message = "Reset to start".to_string();
    }

    pub fn toggle_breakpoint(&mut self) {
        let cursor = self.engine.cursor();
        if !self.engine.grid().is_valid_point(cursor) {
            self.status_message = "Cursor is off the grid".to_string();
        } else if self.breakpoints.remove(&cursor) {
            self.status_message = format!("Removed breakpoint at {}", cursor);
        } else {
            self.breakpoints.insert(cursor);
            self.status_message = format!("Breakpoint set at {}", cursor);
        }
    }

    fn edit_selected_cell(&mut self, delta: i32) {
        let Some(&value) = self.engine.stack().get(self.selected_cell) else {
            self.status_message = "No memory cell selected".to_string();
            return;
        };
        self.set_selected_cell(value.wrapping_add(delta));
    }

    /// Overwrite the selected memory cell; only allowed while stopped
    fn set_selected_cell(&mut self, value: i32) {
        if self.is_playing {
            self.status_message = "Pause before editing memory".to_string();
            return;
        }
        if self.focused_pane != FocusedPane::Memory {
            self.status_message = "Focus the memory pane (Tab) to edit cells".to_string();
            return;
        }

        match self.engine.set_stack_value(self.selected_cell, value) {
            Ok(()) => {
                // Faults depend only on machine state, so the next step re-checks
                self.fault = None;
                // Edits before the first step become part of the starting memory
                if self.engine.steps() == 0 && self.history.is_empty() {
                    self.initial_state = self.engine.state().clone();
                }
                self.status_message = format!("Memory[{}] = {}", self.selected_cell, value);
            }
            Err(e) => {
                self.status_message = format!("Error: {}", e);
            }
        }
    }
}
