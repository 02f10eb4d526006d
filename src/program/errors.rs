//! Error types for program grids and program files
//!
//! [`DecodeError`] covers malformed bytes; [`ProgramError`] adds the file system
//! and editing failures a driver can run into. A failed decode never yields a
//! partially filled grid.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::language::Point;

/// Malformed program bytes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Fewer than the 16 header bytes
    #[error("program header is truncated: expected 16 bytes, got {len}")]
    TruncatedHeader { len: usize },

    #[error("program dimensions must not be negative (width {width}, height {height})")]
    NegativeDimension { width: i32, height: i32 },

    #[error("program dimensions {width}x{height} are too large")]
    DimensionOverflow { width: usize, height: usize },

    #[error("cell data is truncated: expected {expected} bytes, got {actual}")]
    TruncatedCells { expected: usize, actual: usize },

    #[error("unknown opcode {byte} in cell ({x}, {y})")]
    UnknownOpcode { byte: u8, x: usize, y: usize },
}

/// Failures while loading, saving or editing a program
#[derive(Debug, Error)]
pub enum ProgramError {
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is not a valid program: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },

    /// The file header stores dimensions as `i32`
    #[error("a {width}x{height} grid is too large to save (limit {} per side)", i32::MAX)]
    TooLarge { width: usize, height: usize },

    #[error("point {point} is outside the {width}x{height} grid")]
    OutOfGrid {
        point: Point,
        width: usize,
        height: usize,
    },
}
