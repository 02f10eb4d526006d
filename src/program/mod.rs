//! Program grids and the program file format
//!
//! - [`grid`]: the [`Grid`] of instructions the engine walks
//! - [`file`]: binary encode/decode plus load/save helpers
//! - [`errors`]: [`DecodeError`] and [`ProgramError`]

pub mod errors;
pub mod file;
pub mod grid;

pub use errors::{DecodeError, ProgramError};
pub use file::Program;
pub use grid::Grid;
