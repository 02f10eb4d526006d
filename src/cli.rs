// Command-line arguments

use std::path::PathBuf;
use std::str::FromStr;

use clap::builder::RangedU64ValueParser;
use clap::{Args, Parser, Subcommand};

use mapgoblin::interpreter::constants::{
    DEFAULT_HISTORY_CAPACITY, DEFAULT_NEW_HEIGHT, DEFAULT_NEW_WIDTH, DEFAULT_STACK_SIZE,
    DEFAULT_STEP_DELAY_MS,
};
use mapgoblin::interpreter::{Engine, RuntimeError};
use mapgoblin::language::{Instruction, Point};
use mapgoblin::program::Program;

#[derive(Parser, Debug)]
#[command(name = "mapgoblin", version)]
#[command(about = "Run and step through grid programs walked by a goblin")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create an empty program filled with NoOperation
    New {
        file: PathBuf,
        #[arg(long, default_value_t = DEFAULT_NEW_WIDTH, value_parser = grid_side())]
        width: usize,
        #[arg(long, default_value_t = DEFAULT_NEW_HEIGHT, value_parser = grid_side())]
        height: usize,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Overwrite one cell of a program
    Paint {
        file: PathBuf,
        x: i32,
        y: i32,
        /// Instruction name, e.g. MoveRight or print
        instruction: Instruction,
    },

    /// Print a program's size, start point and cells
    Show { file: PathBuf },

    /// List every instruction with its opcode and glyph
    Opcodes,

    /// Run a program without the UI, printing each Print value on its own line
    Run {
        file: PathBuf,
        #[command(flatten)]
        machine: MachineArgs,
        /// Pause between steps
        #[arg(long, default_value_t = DEFAULT_STEP_DELAY_MS)]
        delay_ms: u64,
        /// Stop after this many instructions
        #[arg(long)]
        max_steps: Option<u64>,
    },

    /// Step through a program in the terminal UI
    Tui {
        file: PathBuf,
        #[command(flatten)]
        machine: MachineArgs,
        /// Pause between auto-play steps
        #[arg(long, default_value_t = DEFAULT_STEP_DELAY_MS)]
        delay_ms: u64,
        /// Steps remembered for stepping backward
        #[arg(long, default_value_t = DEFAULT_HISTORY_CAPACITY)]
        history: usize,
        /// Write logs here (the terminal is taken by the UI)
        #[arg(long)]
        log_file: Option<PathBuf>,
    },
}

/// Grid sides are stored as `i32` in the file header
fn grid_side() -> RangedU64ValueParser<usize> {
    RangedU64ValueParser::new().range(0..=i32::MAX as u64)
}

/// Engine settings shared by `run` and `tui`
#[derive(Args, Debug, Clone)]
pub struct MachineArgs {
    /// Number of memory stack cells
    #[arg(long, default_value_t = DEFAULT_STACK_SIZE)]
    pub stack_size: usize,

    /// Start point as X,Y (defaults to the one stored in the file)
    #[arg(long, value_name = "X,Y")]
    pub start: Option<Point>,

    /// Preload a memory cell; may be repeated
    #[arg(long = "set", value_name = "INDEX=VALUE")]
    pub presets: Vec<MemoryPreset>,
}

impl MachineArgs {
    /// Build an engine over `program`'s grid with these settings applied
    pub fn engine<'g>(&self, program: &'g Program) -> Result<Engine<'g>, RuntimeError> {
        let start = self.start.unwrap_or(program.start);
        let mut engine = Engine::new(&program.grid, self.stack_size, start);
        for preset in &self.presets {
            engine.set_stack_value(preset.index, preset.value)?;
        }
        Ok(engine)
    }
}

/// `INDEX=VALUE` memory initialisation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryPreset {
    pub index: usize,
    pub value: i32,
}

impl FromStr for MemoryPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (index, value) = s
            .split_once('=')
            .ok_or_else(|| format!("expected INDEX=VALUE but got '{}'", s))?;
        let index = index
            .trim()
            .parse()
            .map_err(|e| format!("invalid memory index '{}': {}", index.trim(), e))?;
        let value = value
            .trim()
            .parse()
            .map_err(|e| format!("invalid memory value '{}': {}", value.trim(), e))?;
        Ok(MemoryPreset { index, value })
    }
}
