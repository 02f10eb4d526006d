//! Language primitives shared by the grid and the engine
//!
//! - [`instruction`]: the closed opcode set and its frozen byte encoding
//! - [`point`]: grid coordinates and the four facing directions

pub mod instruction;
pub mod point;

pub use instruction::Instruction;
pub use point::{Direction, Point};
