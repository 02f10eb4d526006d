//! The program grid
//!
//! Cells are stored flat in file order: column by column, so the cell at
//! `(x, y)` lives at `x * height + y`. Keeping the in-memory layout identical to
//! the on-disk layout makes encoding a straight copy.

use std::ops::{Index, IndexMut};

use super::errors::{DecodeError, ProgramError};
use super::file;
use crate::language::{Instruction, Point};

/// A rectangular field of instructions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Instruction>,
}

impl Grid {
    /// Create a grid filled with [`Instruction::NoOperation`].
    ///
    /// A zero-sized grid is allowed; every point in it is invalid, so an engine
    /// running it halts on the first step.
    pub fn new(width: usize, height: usize) -> Self {
        Grid {
            width,
            height,
            cells: vec![Instruction::NoOperation; width * height],
        }
    }

    /// Decode `width * height` opcode bytes in file order.
    ///
    /// Bytes past the cell region are ignored.
    pub fn from_bytes(bytes: &[u8], width: usize, height: usize) -> Result<Self, DecodeError> {
        let expected = width
            .checked_mul(height)
            .ok_or(DecodeError::DimensionOverflow { width, height })?;

        if bytes.len() < expected {
            return Err(DecodeError::TruncatedCells {
                expected,
                actual: bytes.len(),
            });
        }

        let cells = bytes[..expected]
            .iter()
            .enumerate()
            .map(|(i, &byte)| {
                Instruction::try_from(byte).map_err(|_| DecodeError::UnknownOpcode {
                    byte,
                    x: i / height,
                    y: i % height,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Grid {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Check if a point has a cell underneath
    pub fn is_valid_point(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.width
            && (point.y as usize) < self.height
    }

    fn index_of(&self, point: Point) -> Option<usize> {
        if self.is_valid_point(point) {
            Some(point.x as usize * self.height + point.y as usize)
        } else {
            None
        }
    }

    /// Instruction at `point`, or `None` outside the grid
    pub fn get(&self, point: Point) -> Option<Instruction> {
        self.index_of(point).map(|i| self.cells[i])
    }

    /// Overwrite one cell, returning the instruction it held before
    pub fn set(&mut self, point: Point, instruction: Instruction) -> Result<Instruction, ProgramError> {
        let index = self.index_of(point).ok_or(ProgramError::OutOfGrid {
            point,
            width: self.width,
            height: self.height,
        })?;
        Ok(std::mem::replace(&mut self.cells[index], instruction))
    }

    /// All cells with their coordinates, in file order
    pub fn cells(&self) -> impl Iterator<Item = (Point, Instruction)> + '_ {
        let height = self.height.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &op)| (Point::new((i / height) as i32, (i % height) as i32), op))
    }

    /// Raw opcode bytes in file order
    pub fn opcodes(&self) -> impl Iterator<Item = u8> + '_ {
        self.cells.iter().map(|op| op.opcode())
    }

    /// Encode as a complete program file with a start point of `(0, 0)`
    pub fn serialize(&self) -> Vec<u8> {
        file::encode(self, Point::ZERO)
    }
}

impl Index<Point> for Grid {
    type Output = Instruction;

    /// Panics if `point` is outside the grid; check [`Grid::is_valid_point`] first.
    fn index(&self, point: Point) -> &Instruction {
        match self.index_of(point) {
            Some(i) => &self.cells[i],
            None => panic!(
                "point {} is outside the {}x{} grid",
                point, self.width, self.height
            ),
        }
    }
}

impl IndexMut<Point> for Grid {
    fn index_mut(&mut self, point: Point) -> &mut Instruction {
        match self.index_of(point) {
            Some(i) => &mut self.cells[i],
            None => panic!(
                "point {} is outside the {}x{} grid",
                point, self.width, self.height
            ),
        }
    }
}
