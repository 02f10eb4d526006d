//! Grid interpreter execution engine
//!
//! This module provides the core execution logic:
//! - [`engine`]: the cursor ("goblin") and its registers, one instruction per step
//! - [`runner`]: the timed auto-run loop and its cancellation token
//! - [`errors`]: runtime fault types
//! - [`constants`]: defaults shared with the drivers
//!
//! # Execution Model
//!
//! Each [`engine::Engine::step`] reads the cell under the cursor, applies the
//! instruction to the registers, then moves the cursor one cell in the facing
//! direction. Movement instructions therefore take effect on the *next* advance.
//! Running off the grid or executing `Exit` halts; division by zero and stack
//! accesses outside the memory stack fault.

pub mod constants;
pub mod engine;
pub mod errors;
pub mod runner;

pub use engine::{Engine, HaltReason, MachineState, Step};
pub use errors::RuntimeError;
pub use runner::{AutoRun, CancelToken, RunEnd, RunSummary};
