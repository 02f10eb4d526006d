//! TUI pane rendering modules
//!
//! Each pane module exports a stateless `render_*` function plus the small
//! data struct it draws from.
//!
//! - [`grid`]: the program grid with the goblin and breakpoints
//! - [`registers`]: cursor, facing, accumulator, flag and stack pointer
//! - [`memory`]: the memory stack cells
//! - [`terminal`]: values emitted by `Print`
//! - [`status`]: status bar with keybindings and execution state
//! - `utils`: border and scroll helpers shared by the panes

mod utils;

pub mod grid;
pub mod memory;
pub mod registers;
pub mod status;
pub mod terminal;

// Re-export render functions for convenience
pub use grid::{render_grid_pane, GridRenderData};
pub use memory::{render_memory_pane, MemoryRenderData};
pub use registers::render_registers_pane;
pub use status::{render_status_bar, StatusRenderData};
pub use terminal::render_terminal_pane;
