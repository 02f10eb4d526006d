//! Runtime error types for the grid interpreter
//!
//! This module defines [`RuntimeError`], the faults that stop execution. Running
//! off the grid and hitting `Exit` are normal halts and are reported through
//! [`Step`](super::engine::Step) instead.
//!
//! All runtime errors are fatal: the engine does not advance past the faulting
//! cell and registers are left as they were before the step.

use thiserror::Error;

use crate::language::Point;

/// Faults raised by [`Engine::step`](super::engine::Engine::step)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// `Div` with a zero stack cell
    #[error("division by zero at {point}")]
    DivisionByZero { point: Point },

    /// `i32::MIN / -1` does not fit in the accumulator
    #[error("division overflow ({accumulator} / -1) at {point}")]
    DivisionOverflow { accumulator: i32, point: Point },

    /// The stack pointer was walked off the memory stack and then used
    #[error("stack pointer {pointer} is outside the {len}-cell stack at {point}")]
    StackPointerOutOfRange {
        pointer: isize,
        len: usize,
        point: Point,
    },

    /// A driver tried to edit a memory cell that does not exist
    #[error("memory cell {index} does not exist (stack has {len} cells)")]
    MemoryIndexOutOfRange { index: usize, len: usize },
}

impl RuntimeError {
    /// Grid cell whose instruction faulted, if the error came from a step
    pub fn point(&self) -> Option<Point> {
        match self {
            RuntimeError::DivisionByZero { point } => Some(*point),
            RuntimeError::DivisionOverflow { point, .. } => Some(*point),
            RuntimeError::StackPointerOutOfRange { point, .. } => Some(*point),
            RuntimeError::MemoryIndexOutOfRange { .. } => None,
        }
    }
}
