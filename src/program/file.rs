//! Program file format
//!
//! ```text
//! offset 0   i32 LE  width
//! offset 4   i32 LE  height
//! offset 8   i32 LE  start x
//! offset 12  i32 LE  start y
//! offset 16  width * height opcode bytes, for x in 0..width, for y in 0..height
//! ```
//!
//! Files written by older tools always carry a start of `(0, 0)`.

use std::fs;
use std::path::Path;

use tracing::info;

use super::errors::{DecodeError, ProgramError};
use super::grid::Grid;
use crate::language::Point;

/// Size of the fixed header in bytes
pub const HEADER_LEN: usize = 16;

/// A decoded program file: the grid plus the start point stored with it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub grid: Grid,
    pub start: Point,
}

impl Program {
    pub fn new(grid: Grid) -> Self {
        Program {
            grid,
            start: Point::ZERO,
        }
    }
}

fn read_i32(bytes: &[u8], offset: usize) -> i32 {
    let mut word = [0u8; 4];
    word.copy_from_slice(&bytes[offset..offset + 4]);
    i32::from_le_bytes(word)
}

/// Encode a grid and start point into the file layout.
///
/// Dimensions are written as `i32`; callers check [`fits_header`] first, as
/// [`save`] does.
pub fn encode(grid: &Grid, start: Point) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(HEADER_LEN + grid.width() * grid.height());
    bytes.extend_from_slice(&(grid.width() as i32).to_le_bytes());
    bytes.extend_from_slice(&(grid.height() as i32).to_le_bytes());
    bytes.extend_from_slice(&start.x.to_le_bytes());
    bytes.extend_from_slice(&start.y.to_le_bytes());
    bytes.extend(grid.opcodes());
    bytes
}

/// Decode a complete program file
pub fn decode(bytes: &[u8]) -> Result<Program, DecodeError> {
    if bytes.len() < HEADER_LEN {
        return Err(DecodeError::TruncatedHeader { len: bytes.len() });
    }

    let width = read_i32(bytes, 0);
    let height = read_i32(bytes, 4);
    let start = Point::new(read_i32(bytes, 8), read_i32(bytes, 12));

    if width < 0 || height < 0 {
        return Err(DecodeError::NegativeDimension { width, height });
    }

    let grid = Grid::from_bytes(&bytes[HEADER_LEN..], width as usize, height as usize)?;
    Ok(Program { grid, start })
}

/// Read and decode a program file
pub fn load(path: impl AsRef<Path>) -> Result<Program, ProgramError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| ProgramError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let program = decode(&bytes).map_err(|source| ProgramError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        path = %path.display(),
        width = program.grid.width(),
        height = program.grid.height(),
        start = %program.start,
        "loaded program"
    );
    Ok(program)
}

/// Whether both dimensions of `grid` fit the header's `i32` fields
pub fn fits_header(grid: &Grid) -> bool {
    i32::try_from(grid.width()).is_ok() && i32::try_from(grid.height()).is_ok()
}

/// Encode and write a program file, replacing any existing file
pub fn save(path: impl AsRef<Path>, grid: &Grid, start: Point) -> Result<(), ProgramError> {
    let path = path.as_ref();
    if !fits_header(grid) {
        return Err(ProgramError::TooLarge {
            width: grid.width(),
            height: grid.height(),
        });
    }
    fs::write(path, encode(grid, start)).map_err(|source| ProgramError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        path = %path.display(),
        width = grid.width(),
        height = grid.height(),
        "saved program"
    );
    Ok(())
}
