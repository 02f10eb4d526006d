//! The instruction set
//!
//! Every grid cell holds exactly one [`Instruction`]. The numeric value of each
//! variant is what gets written to program files, so the discriminants below are
//! frozen: new instructions may only be appended.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A single grid instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Instruction {
    /// Do nothing
    #[default]
    NoOperation = 0,
    MoveLeft = 1,
    MoveRight = 2,
    MoveUp = 3,
    MoveDown = 4,
    Add = 5,
    Sub = 6,
    Mul = 7,
    Div = 8,
    Increment = 9,
    Decrement = 10,
    IsLess = 11,
    IsMore = 12,
    MoveLeftIfTrue = 13,
    MoveRightIfTrue = 14,
    MoveUpIfTrue = 15,
    MoveDownIfTrue = 16,
    IsLessOrEqual = 17,
    IsMoreOrEqual = 18,
    IsEqual = 19,
    IsNotEqual = 20,
    MoveStackDown = 21,
    MoveStackUp = 22,
    WriteFromAccumulator = 23,
    ReadToAccumulator = 24,
    /// Emit the accumulator to the output
    Print = 25,
    /// End execution
    Exit = 26,
    IsZero = 27,
}

/// Byte that does not name any instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown opcode {0}")]
pub struct UnknownOpcode(pub u8);

/// Text that does not name any instruction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown instruction name '{0}'")]
pub struct UnknownInstructionName(pub String);

impl Instruction {
    /// Every instruction, ordered by opcode
    pub const ALL: [Instruction; 28] = [
        Instruction::NoOperation,
        Instruction::MoveLeft,
        Instruction::MoveRight,
        Instruction::MoveUp,
        Instruction::MoveDown,
        Instruction::Add,
        Instruction::Sub,
        Instruction::Mul,
        Instruction::Div,
        Instruction::Increment,
        Instruction::Decrement,
        Instruction::IsLess,
        Instruction::IsMore,
        Instruction::MoveLeftIfTrue,
        Instruction::MoveRightIfTrue,
        Instruction::MoveUpIfTrue,
        Instruction::MoveDownIfTrue,
        Instruction::IsLessOrEqual,
        Instruction::IsMoreOrEqual,
        Instruction::IsEqual,
        Instruction::IsNotEqual,
        Instruction::MoveStackDown,
        Instruction::MoveStackUp,
        Instruction::WriteFromAccumulator,
        Instruction::ReadToAccumulator,
        Instruction::Print,
        Instruction::Exit,
        Instruction::IsZero,
    ];

    /// The persisted opcode byte
    #[inline]
    pub fn opcode(self) -> u8 {
        self as u8
    }

    /// Variant name, also accepted by [`FromStr`]
    pub fn name(self) -> &'static str {
        match self {
            Instruction::NoOperation => "NoOperation",
            Instruction::MoveLeft => "MoveLeft",
            Instruction::MoveRight => "MoveRight",
            Instruction::MoveUp => "MoveUp",
            Instruction::MoveDown => "MoveDown",
            Instruction::Add => "Add",
            Instruction::Sub => "Sub",
            Instruction::Mul => "Mul",
            Instruction::Div => "Div",
            Instruction::Increment => "Increment",
            Instruction::Decrement => "Decrement",
            Instruction::IsLess => "IsLess",
            Instruction::IsMore => "IsMore",
            Instruction::MoveLeftIfTrue => "MoveLeftIfTrue",
            Instruction::MoveRightIfTrue => "MoveRightIfTrue",
            Instruction::MoveUpIfTrue => "MoveUpIfTrue",
            Instruction::MoveDownIfTrue => "MoveDownIfTrue",
            Instruction::IsLessOrEqual => "IsLessOrEqual",
            Instruction::IsMoreOrEqual => "IsMoreOrEqual",
            Instruction::IsEqual => "IsEqual",
            Instruction::IsNotEqual => "IsNotEqual",
            Instruction::MoveStackDown => "MoveStackDown",
            Instruction::MoveStackUp => "MoveStackUp",
            Instruction::WriteFromAccumulator => "WriteFromAccumulator",
            Instruction::ReadToAccumulator => "ReadToAccumulator",
            Instruction::Print => "Print",
            Instruction::Exit => "Exit",
            Instruction::IsZero => "IsZero",
        }
    }

    /// Two-column glyph used when drawing the grid in a terminal
    pub fn glyph(self) -> &'static str {
        match self {
            Instruction::NoOperation => "··",
            Instruction::MoveLeft => "← ",
            Instruction::MoveRight => "→ ",
            Instruction::MoveUp => "↑ ",
            Instruction::MoveDown => "↓ ",
            Instruction::Add => "+ ",
            Instruction::Sub => "- ",
            Instruction::Mul => "* ",
            Instruction::Div => "/ ",
            Instruction::Increment => "++",
            Instruction::Decrement => "--",
            Instruction::IsLess => "< ",
            Instruction::IsMore => "> ",
            Instruction::MoveLeftIfTrue => "←?",
            Instruction::MoveRightIfTrue => "→?",
            Instruction::MoveUpIfTrue => "↑?",
            Instruction::MoveDownIfTrue => "↓?",
            Instruction::IsLessOrEqual => "<=",
            Instruction::IsMoreOrEqual => ">=",
            Instruction::IsEqual => "==",
            Instruction::IsNotEqual => "!=",
            Instruction::MoveStackDown => "v$",
            Instruction::MoveStackUp => "^$",
            Instruction::WriteFromAccumulator => "W ",
            Instruction::ReadToAccumulator => "R ",
            Instruction::Print => "P ",
            Instruction::Exit => "X ",
            Instruction::IsZero => "=0",
        }
    }

    /// Whether this instruction can change the facing direction
    pub fn is_movement(self) -> bool {
        matches!(
            self,
            Instruction::MoveLeft
                | Instruction::MoveRight
                | Instruction::MoveUp
                | Instruction::MoveDown
                | Instruction::MoveLeftIfTrue
                | Instruction::MoveRightIfTrue
                | Instruction::MoveUpIfTrue
                | Instruction::MoveDownIfTrue
        )
    }
}

impl TryFrom<u8> for Instruction {
    type Error = UnknownOpcode;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        Instruction::ALL
            .get(byte as usize)
            .copied()
            .ok_or(UnknownOpcode(byte))
    }
}

impl FromStr for Instruction {
    type Err = UnknownInstructionName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Instruction::ALL
            .iter()
            .copied()
            .find(|i| i.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownInstructionName(wanted.to_string()))
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
