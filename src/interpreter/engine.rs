// Execution engine for the grid interpreter

use tracing::{debug, info, warn};

use crate::interpreter::errors::RuntimeError;
use crate::language::{Direction, Instruction, Point};
use crate::program::Grid;

/// Why the engine stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HaltReason {
    /// The cursor walked off the grid
    OutOfBounds,
    /// An `Exit` instruction was executed
    Exit,
}

impl HaltReason {
    /// Human readable wording used by the drivers
    pub fn describe(self) -> &'static str {
        match self {
            HaltReason::OutOfBounds => "finished by running out of bounds",
            HaltReason::Exit => "finished by reaching exit",
        }
    }
}

/// Outcome of a single [`Engine::step`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The instruction was executed and the cursor advanced
    Continued(Instruction),
    /// Execution is over; further steps return the same outcome
    Halted(HaltReason),
}

/// Every register of the machine.
///
/// Cloning this is how the TUI records history for stepping backward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineState {
    pub cursor: Point,
    pub facing: Direction,
    pub accumulator: i32,
    pub flag: bool,
    /// Signed so that walking above the first cell is representable
    pub stack_pointer: isize,
    pub stack: Vec<i32>,
    /// Set once `Exit` has run
    pub exited: bool,
    /// Instructions executed so far
    pub steps: u64,
}

impl MachineState {
    pub fn new(stack_size: usize, start: Point) -> Self {
        MachineState {
            cursor: start,
            facing: Direction::Down,
            accumulator: 0,
            flag: false,
            stack_pointer: 0,
            stack: vec![0; stack_size],
            exited: false,
            steps: 0,
        }
    }
}

/// Walks a borrowed [`Grid`] one cell per step
#[derive(Debug, Clone)]
pub struct Engine<'g> {
    grid: &'g Grid,
    state: MachineState,
}

impl<'g> Engine<'g> {
    /// Create an engine at `start`, facing down, with `stack_size` zeroed memory cells
    pub fn new(grid: &'g Grid, stack_size: usize, start: Point) -> Self {
        Engine {
            grid,
            state: MachineState::new(stack_size, start),
        }
    }

    pub fn grid(&self) -> &'g Grid {
        self.grid
    }

    pub fn cursor(&self) -> Point {
        self.state.cursor
    }

    pub fn facing(&self) -> Direction {
        self.state.facing
    }

    pub fn accumulator(&self) -> i32 {
        self.state.accumulator
    }

    pub fn flag(&self) -> bool {
        self.state.flag
    }

    pub fn stack_pointer(&self) -> isize {
        self.state.stack_pointer
    }

    pub fn stack(&self) -> &[i32] {
        &self.state.stack
    }

    pub fn steps(&self) -> u64 {
        self.state.steps
    }

    /// Whether the next [`Engine::step`] would report a halt
    pub fn is_halted(&self) -> bool {
        self.halt_reason().is_some()
    }

    pub fn halt_reason(&self) -> Option<HaltReason> {
        if self.state.exited {
            Some(HaltReason::Exit)
        } else if !self.grid.is_valid_point(self.state.cursor) {
            Some(HaltReason::OutOfBounds)
        } else {
            None
        }
    }

    /// The instruction the next step will execute
    pub fn current_instruction(&self) -> Option<Instruction> {
        self.grid.get(self.state.cursor)
    }

    /// Overwrite one memory cell between steps
    pub fn set_stack_value(&mut self, index: usize, value: i32) -> Result<(), RuntimeError> {
        let len = self.state.stack.len();
        let cell = self
            .state
            .stack
            .get_mut(index)
            .ok_or(RuntimeError::MemoryIndexOutOfRange { index, len })?;
        *cell = value;
        Ok(())
    }

    pub fn state(&self) -> &MachineState {
        &self.state
    }

    /// Replace every register, e.g. with a state captured earlier by [`Engine::state`]
    pub fn restore(&mut self, state: MachineState) {
        self.state = state;
    }

    /// Execute the instruction under the cursor and advance one cell.
    ///
    /// Faults leave every register untouched and do not move the cursor.
    pub fn step(&mut self) -> Result<Step, RuntimeError> {
        if self.state.exited {
            return Ok(Step::Halted(HaltReason::Exit));
        }

        let at = self.state.cursor;
        let Some(instruction) = self.grid.get(at) else {
            debug!(cursor = %at, steps = self.state.steps, "cursor is off the grid");
            return Ok(Step::Halted(HaltReason::OutOfBounds));
        };

        debug!(cursor = %at, %instruction, "step");

        if let Err(e) = self.execute(instruction, at) {
            warn!(cursor = %at, %instruction, error = %e, "runtime fault");
            return Err(e);
        }

        self.state.steps += 1;

        if instruction == Instruction::Exit {
            self.state.exited = true;
            info!(cursor = %at, steps = self.state.steps, "exit reached");
            return Ok(Step::Halted(HaltReason::Exit));
        }

        self.state.cursor += self.state.facing.offset();
        Ok(Step::Continued(instruction))
    }

    /// Index of the cell under the stack pointer
    fn slot(&self, at: Point) -> Result<usize, RuntimeError> {
        let pointer = self.state.stack_pointer;
        let len = self.state.stack.len();
        match usize::try_from(pointer) {
            Ok(index) if index < len => Ok(index),
            _ => Err(RuntimeError::StackPointerOutOfRange {
                pointer,
                len,
                point: at,
            }),
        }
    }

    fn operand(&self, at: Point) -> Result<i32, RuntimeError> {
        Ok(self.state.stack[self.slot(at)?])
    }

    fn face_if(&mut self, condition: bool, direction: Direction) {
        if condition {
            self.state.facing = direction;
        }
    }

    fn execute(&mut self, instruction: Instruction, at: Point) -> Result<(), RuntimeError> {
        let acc = self.state.accumulator;
        let flag = self.state.flag;

        match instruction {
            Instruction::NoOperation | Instruction::Print | Instruction::Exit => {}

            Instruction::MoveLeft => self.face_if(true, Direction::Left),
            Instruction::MoveRight => self.face_if(true, Direction::Right),
            Instruction::MoveUp => self.face_if(true, Direction::Up),
            Instruction::MoveDown => self.face_if(true, Direction::Down),
            Instruction::MoveLeftIfTrue => self.face_if(flag, Direction::Left),
            Instruction::MoveRightIfTrue => self.face_if(flag, Direction::Right),
            Instruction::MoveUpIfTrue => self.face_if(flag, Direction::Up),
            Instruction::MoveDownIfTrue => self.face_if(flag, Direction::Down),

            Instruction::Add => self.state.accumulator = acc.wrapping_add(self.operand(at)?),
            Instruction::Sub => self.state.accumulator = acc.wrapping_sub(self.operand(at)?),
            Instruction::Mul => self.state.accumulator = acc.wrapping_mul(self.operand(at)?),
            Instruction::Div => {
                let divisor = self.operand(at)?;
                if divisor == 0 {
                    return Err(RuntimeError::DivisionByZero { point: at });
                }
                self.state.accumulator = acc
                    .checked_div(divisor)
                    .ok_or(RuntimeError::DivisionOverflow {
                        accumulator: acc,
                        point: at,
                    })?;
            }
            Instruction::Increment => self.state.accumulator = acc.wrapping_add(1),
            Instruction::Decrement => self.state.accumulator = acc.wrapping_sub(1),

            Instruction::IsLess => self.state.flag = acc < self.operand(at)?,
            Instruction::IsMore => self.state.flag = acc > self.operand(at)?,
            Instruction::IsLessOrEqual => self.state.flag = acc <= self.operand(at)?,
            Instruction::IsMoreOrEqual => self.state.flag = acc >= self.operand(at)?,
            Instruction::IsEqual => self.state.flag = acc == self.operand(at)?,
            Instruction::IsNotEqual => self.state.flag = acc != self.operand(at)?,
            Instruction::IsZero => self.state.flag = acc == 0,

            Instruction::MoveStackDown => {
                self.state.stack_pointer = self.state.stack_pointer.wrapping_add(1)
            }
            Instruction::MoveStackUp => {
                self.state.stack_pointer = self.state.stack_pointer.wrapping_sub(1)
            }
            Instruction::WriteFromAccumulator => {
                let index = self.slot(at)?;
                self.state.stack[index] = acc;
            }
            Instruction::ReadToAccumulator => self.state.accumulator = self.operand(at)?,
        }

        Ok(())
    }
}
