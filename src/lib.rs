//! # Introduction
//!
//! mapgoblin runs programs written on a two-dimensional grid. Every cell holds one
//! instruction; a cursor (the "goblin") walks the grid one cell per step,
//! executing what it lands on and turning when told to. Programs are stepped
//! forward and backward through a terminal UI built with
//! [ratatui](https://docs.rs/ratatui), or run headless from the command line.
//!
//! ## Execution pipeline
//!
//! ```text
//! Program file → Grid → Engine (step) → Snapshots/Output → TUI
//! ```
//!
//! 1. [`language`]: the instruction set with its frozen opcode bytes, and the
//!    [`language::Point`]/[`language::Direction`] geometry.
//! 2. [`program`]: the [`program::Grid`] and the binary program file format.
//! 3. [`interpreter`]: the [`interpreter::Engine`] state machine and the timed
//!    [`interpreter::AutoRun`] loop with its cancellation token.
//! 4. [`snapshot`]: bounded step-back history and the captured `Print` output.
//! 5. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! ## Machine
//!
//! Registers: cursor, facing direction (initially down), a 32-bit accumulator,
//! a comparison flag, and a fixed-size memory stack addressed by a stack pointer.
//! A step executes the instruction under the cursor and then advances one cell;
//! walking off the grid or executing `Exit` halts.

pub mod interpreter;
pub mod language;
pub mod program;
pub mod snapshot;
pub mod ui;
