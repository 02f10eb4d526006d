// mapgoblin: grid esolang interpreter with a step-through terminal UI

mod cli;

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::{Cli, Command, MachineArgs};
use mapgoblin::interpreter::{AutoRun, CancelToken, Engine, RunEnd, RunSummary, RuntimeError};
use mapgoblin::language::{Instruction, Point};
use mapgoblin::program::{file, Grid};
use mapgoblin::ui::{App, AppConfig};

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| "mapgoblin=warn".into())
}

/// Log to stderr for the headless commands
fn init_stderr_logging() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}

/// Log to a file while the TUI owns the terminal
fn init_file_logging(path: &Path) -> io::Result<()> {
    let log = File::create(path)?;
    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_writer(Mutex::new(log)).with_ansi(false))
        .init();
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match &cli.command {
        Command::Tui {
            log_file: Some(path),
            ..
        } => init_file_logging(path)?,
        Command::Tui { .. } => {}
        _ => init_stderr_logging(),
    }

    run_command(cli.command)
}

fn run_command(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::New {
            file: path,
            width,
            height,
            force,
        } => {
            if path.exists() && !force {
                eprintln!(
                    "Error: '{}' already exists (use --force to overwrite)",
                    path.display()
                );
                std::process::exit(1);
            }
            file::save(&path, &Grid::new(width, height), Point::ZERO)?;
            println!("Created {}x{} program {}", width, height, path.display());
        }

        Command::Paint {
            file: path,
            x,
            y,
            instruction,
        } => {
            let mut program = file::load(&path)?;
            let point = Point::new(x, y);
            let previous = program.grid.set(point, instruction)?;
            file::save(&path, &program.grid, program.start)?;
            println!("{}: {} -> {}", point, previous, instruction);
        }

        Command::Show { file: path } => {
            let program = file::load(&path)?;
            print_program(&program.grid, program.start)?;
        }

        Command::Opcodes => {
            for instruction in Instruction::ALL {
                println!(
                    "{:>3}  {}  {}",
                    instruction.opcode(),
                    instruction.glyph(),
                    instruction
                );
            }
        }

        Command::Run {
            file: path,
            machine,
            delay_ms,
            max_steps,
        } => {
            let program = file::load(&path)?;
            let mut engine = machine.engine(&program)?;
            let runner = AutoRun::new(Duration::from_millis(delay_ms)).with_max_steps(max_steps);
            let cancel = CancelToken::new();

            info!(path = %path.display(), start = %engine.cursor(), "running program");

            let result = run_headless(&mut engine, &runner, &cancel, &mut io::stdout());

            match result {
                Ok(summary) => match summary.end {
                    RunEnd::Halted(reason) => {
                        eprintln!("Execution {} after {} step(s)", reason.describe(), summary.steps);
                    }
                    RunEnd::StepLimit => {
                        eprintln!("Stopped after {} step(s): step limit reached", summary.steps);
                    }
                    RunEnd::Cancelled => {
                        eprintln!("Cancelled after {} step(s)", summary.steps);
                    }
                },
                Err(e) => {
                    error!(error = %e, "program faulted");
                    eprintln!("Runtime error: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Command::Tui {
            file: path,
            machine,
            delay_ms,
            history,
            ..
        } => run_tui(&path, &machine, delay_ms, history)?,
    }

    Ok(())
}

/// Auto-run `engine`, writing each `Print` value to `out`.
///
/// A failed write (e.g. a closed pipe) cancels the run.
fn run_headless<W: Write>(
    engine: &mut Engine<'_>,
    runner: &AutoRun,
    cancel: &CancelToken,
    out: &mut W,
) -> Result<RunSummary, RuntimeError> {
    runner.run(engine, cancel, |engine, instruction| {
        if instruction == Instruction::Print {
            if let Err(e) = writeln!(out, "{}", engine.accumulator()) {
                error!(error = %e, "cannot write output, stopping");
                cancel.cancel();
            }
        }
    })
}

fn print_program(grid: &Grid, start: Point) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(
        stdout,
        "{}x{} program, start {}",
        grid.width(),
        grid.height(),
        start
    )?;
    for y in 0..grid.height() {
        let row: String = (0..grid.width())
            .map(|x| grid[Point::new(x as i32, y as i32)].glyph())
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(stdout, "{}", row)?;
    }
    Ok(())
}

fn run_tui(
    path: &Path,
    machine: &MachineArgs,
    delay_ms: u64,
    history: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let program = match file::load(path) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let engine = machine.engine(&program)?;
    let config = AppConfig {
        play_delay: Duration::from_millis(delay_ms),
        history_capacity: history,
    };

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(engine, config);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Accepts `room` lines, then fails like a closed pipe
    struct ClosingPipe {
        written: Vec<u8>,
        room: usize,
    }

    impl Write for ClosingPipe {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.written.iter().filter(|&&b| b == b'\n').count() >= self.room {
                return Err(io::Error::from(io::ErrorKind::BrokenPipe));
            }
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn printing_loop() -> Grid {
        // Increment going down column 0, Print coming back up column 1, forever
        let mut grid = Grid::new(2, 3);
        grid[Point::new(0, 0)] = Instruction::MoveDown;
        grid[Point::new(0, 1)] = Instruction::Increment;
        grid[Point::new(0, 2)] = Instruction::MoveRight;
        grid[Point::new(1, 2)] = Instruction::MoveUp;
        grid[Point::new(1, 1)] = Instruction::Print;
        grid[Point::new(1, 0)] = Instruction::MoveLeft;
        grid
    }

    #[test]
    fn test_headless_run_writes_prints() {
        let grid = printing_loop();
        let mut engine = Engine::new(&grid, 1, Point::ZERO);
        let runner = AutoRun::new(Duration::ZERO).with_max_steps(Some(12));
        let mut out = Vec::new();

        let summary = run_headless(&mut engine, &runner, &CancelToken::new(), &mut out).unwrap();

        assert_eq!(summary.end, RunEnd::StepLimit);
        assert_eq!(String::from_utf8(out).unwrap(), "1\n2\n");
    }

    #[test]
    fn test_write_failure_cancels_the_run() {
        let grid = printing_loop();
        let mut engine = Engine::new(&grid, 1, Point::ZERO);
        let runner = AutoRun::new(Duration::ZERO);
        let cancel = CancelToken::new();
        let mut pipe = ClosingPipe {
            written: Vec::new(),
            room: 2,
        };

        let summary = run_headless(&mut engine, &runner, &cancel, &mut pipe).unwrap();

        assert_eq!(summary.end, RunEnd::Cancelled);
        assert!(cancel.is_cancelled());
        assert_eq!(pipe.written, b"1\n2\n");
        assert_eq!(engine.accumulator(), 3);
    }
}
