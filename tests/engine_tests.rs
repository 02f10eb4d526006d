use mapgoblin::interpreter::{Engine, HaltReason, MachineState, RuntimeError, Step};
use mapgoblin::language::{Direction, Instruction, Point};
use mapgoblin::program::Grid;

/// Build a grid from rows of instructions (`rows[y][x]`)
fn grid_from_rows(rows: &[&[Instruction]]) -> Grid {
    let height = rows.len();
    let width = rows.first().map_or(0, |row| row.len());
    let mut grid = Grid::new(width, height);
    for (y, row) in rows.iter().enumerate() {
        for (x, op) in row.iter().enumerate() {
            grid[Point::new(x as i32, y as i32)] = *op;
        }
    }
    grid
}

/// Execute `op` once on a 1x1 grid with the given accumulator and first memory cell
fn exec_once(op: Instruction, accumulator: i32, cell: i32) -> Result<MachineState, RuntimeError> {
    let grid = grid_from_rows(&[&[op]]);
    let mut engine = Engine::new(&grid, 2, Point::ZERO);
    let mut state = engine.state().clone();
    state.accumulator = accumulator;
    state.stack[0] = cell;
    engine.restore(state);
    engine.step()?;
    Ok(engine.state().clone())
}

#[test]
fn test_movement_changes_facing_then_advances() {
    let grid = grid_from_rows(&[&[Instruction::MoveRight, Instruction::NoOperation]]);
    let mut engine = Engine::new(&grid, 4, Point::ZERO);

    assert_eq!(engine.step(), Ok(Step::Continued(Instruction::MoveRight)));
    assert_eq!(engine.facing(), Direction::Right);
    assert_eq!(engine.cursor(), Point::new(1, 0));
    assert_eq!(engine.steps(), 1);
}

#[test]
fn test_arithmetic_sequence() {
    let grid = grid_from_rows(&[
        &[Instruction::WriteFromAccumulator],
        &[Instruction::Increment],
        &[Instruction::Add],
    ]);
    let mut engine = Engine::new(&grid, 4, Point::ZERO);
    engine.set_stack_value(0, 5).unwrap();

    for _ in 0..3 {
        engine.step().unwrap();
    }

    // Write stored A=0 over the preset, so Add contributes nothing
    assert_eq!(engine.accumulator(), 1);
    assert_eq!(engine.stack()[0], 0);
    assert_eq!(engine.cursor(), Point::new(0, 3));
}

#[test]
fn test_walking_off_the_grid_halts_without_changes() {
    let grid = grid_from_rows(&[&[Instruction::MoveDown]]);
    let mut engine = Engine::new(&grid, 4, Point::ZERO);

    assert_eq!(engine.step(), Ok(Step::Continued(Instruction::MoveDown)));
    assert_eq!(engine.cursor(), Point::new(0, 1));
    assert!(engine.is_halted());

    let before = engine.state().clone();
    assert_eq!(engine.step(), Ok(Step::Halted(HaltReason::OutOfBounds)));
    assert_eq!(engine.step(), Ok(Step::Halted(HaltReason::OutOfBounds)));
    assert_eq!(engine.state(), &before);
}

#[test]
fn test_walking_off_every_edge() {
    for (op, expected) in [
        (Instruction::MoveLeft, Point::new(-1, 0)),
        (Instruction::MoveUp, Point::new(0, -1)),
        (Instruction::MoveRight, Point::new(1, 0)),
        (Instruction::MoveDown, Point::new(0, 1)),
    ] {
        let grid = grid_from_rows(&[&[op]]);
        let mut engine = Engine::new(&grid, 1, Point::ZERO);
        engine.step().unwrap();
        assert_eq!(engine.cursor(), expected, "after {}", op);
        assert_eq!(engine.halt_reason(), Some(HaltReason::OutOfBounds));
    }
}

#[test]
fn test_division_by_zero_faults_in_place() {
    let grid = grid_from_rows(&[&[Instruction::Div]]);
    let mut engine = Engine::new(&grid, 4, Point::ZERO);
    let mut state = engine.state().clone();
    state.accumulator = 7;
    engine.restore(state);

    let expected = RuntimeError::DivisionByZero { point: Point::ZERO };
    assert_eq!(engine.step(), Err(expected.clone()));
    assert_eq!(engine.accumulator(), 7);
    assert_eq!(engine.cursor(), Point::ZERO);
    assert_eq!(engine.steps(), 0);

    // The fault repeats until something changes the machine
    assert_eq!(engine.step(), Err(expected));
    assert_eq!(
        engine.step().unwrap_err().to_string(),
        "division by zero at (0, 0)"
    );
}

#[test]
fn test_conditional_move_follows_flag() {
    let grid = grid_from_rows(&[
        &[Instruction::MoveRightIfTrue],
        &[Instruction::IsEqual],
        &[Instruction::MoveRightIfTrue],
    ]);
    let mut engine = Engine::new(&grid, 4, Point::ZERO);

    engine.step().unwrap();
    assert_eq!(engine.facing(), Direction::Down);
    assert_eq!(engine.cursor(), Point::new(0, 1));

    engine.step().unwrap();
    assert!(engine.flag());

    engine.step().unwrap();
    assert_eq!(engine.facing(), Direction::Right);
    assert_eq!(engine.cursor(), Point::new(1, 2));
}

#[test]
fn test_conditional_moves_all_directions() {
    for (op, direction) in [
        (Instruction::MoveLeftIfTrue, Direction::Left),
        (Instruction::MoveRightIfTrue, Direction::Right),
        (Instruction::MoveUpIfTrue, Direction::Up),
        (Instruction::MoveDownIfTrue, Direction::Down),
    ] {
        let grid = grid_from_rows(&[&[op]]);

        let mut engine = Engine::new(&grid, 1, Point::ZERO);
        let mut state = engine.state().clone();
        state.facing = Direction::Left;
        state.flag = false;
        engine.restore(state.clone());
        engine.step().unwrap();
        assert_eq!(engine.facing(), Direction::Left, "{} with flag unset", op);

        state.flag = true;
        engine.restore(state);
        engine.step().unwrap();
        assert_eq!(engine.facing(), direction, "{} with flag set", op);
    }
}

#[test]
fn test_arithmetic_instructions() {
    let acc = |op, a, s| exec_once(op, a, s).unwrap().accumulator;

    assert_eq!(acc(Instruction::Add, 3, 4), 7);
    assert_eq!(acc(Instruction::Sub, 3, 4), -1);
    assert_eq!(acc(Instruction::Mul, -3, 4), -12);
    assert_eq!(acc(Instruction::Div, 7, 2), 3);
    assert_eq!(acc(Instruction::Div, -7, 2), -3);
    assert_eq!(acc(Instruction::Increment, 41, 0), 42);
    assert_eq!(acc(Instruction::Decrement, 0, 0), -1);
    assert_eq!(acc(Instruction::ReadToAccumulator, 1, 99), 99);
}

#[test]
fn test_arithmetic_wraps() {
    let acc = |op, a, s| exec_once(op, a, s).unwrap().accumulator;

    assert_eq!(acc(Instruction::Increment, i32::MAX, 0), i32::MIN);
    assert_eq!(acc(Instruction::Decrement, i32::MIN, 0), i32::MAX);
    assert_eq!(acc(Instruction::Add, i32::MAX, 1), i32::MIN);
    assert_eq!(acc(Instruction::Mul, i32::MAX, 2), -2);

    assert_eq!(
        exec_once(Instruction::Div, i32::MIN, -1),
        Err(RuntimeError::DivisionOverflow {
            accumulator: i32::MIN,
            point: Point::ZERO
        })
    );
}

#[test]
fn test_comparisons_set_flag() {
    let flag = |op, a, s| exec_once(op, a, s).unwrap().flag;

    let cases = [
        (Instruction::IsLess, [(1, 2, true), (2, 2, false), (3, 2, false)]),
        (Instruction::IsMore, [(1, 2, false), (2, 2, false), (3, 2, true)]),
        (
            Instruction::IsLessOrEqual,
            [(1, 2, true), (2, 2, true), (3, 2, false)],
        ),
        (
            Instruction::IsMoreOrEqual,
            [(1, 2, false), (2, 2, true), (3, 2, true)],
        ),
        (Instruction::IsEqual, [(1, 2, false), (2, 2, true), (3, 2, false)]),
        (
            Instruction::IsNotEqual,
            [(1, 2, true), (2, 2, false), (3, 2, true)],
        ),
    ];

    for (op, checks) in cases {
        for (a, s, expected) in checks {
            assert_eq!(flag(op, a, s), expected, "{} with A={} S={}", op, a, s);
        }
    }

    assert!(flag(Instruction::IsZero, 0, 5));
    assert!(!flag(Instruction::IsZero, -1, 0));
}

#[test]
fn test_comparison_overwrites_flag() {
    let grid = grid_from_rows(&[&[Instruction::IsEqual], &[Instruction::IsMore]]);
    let mut engine = Engine::new(&grid, 1, Point::ZERO);

    engine.step().unwrap();
    assert!(engine.flag());
    engine.step().unwrap();
    assert!(!engine.flag());
}

#[test]
fn test_print_and_noop_leave_registers() {
    for op in [Instruction::Print, Instruction::NoOperation] {
        let state = exec_once(op, 12, 3).unwrap();
        assert_eq!(state.accumulator, 12);
        assert_eq!(state.stack[0], 3);
        assert!(!state.flag);
        assert_eq!(state.cursor, Point::new(0, 1));
    }
}

#[test]
fn test_stack_pointer_moves_between_cells() {
    let grid = grid_from_rows(&[
        &[Instruction::Increment],
        &[Instruction::MoveStackDown],
        &[Instruction::WriteFromAccumulator],
        &[Instruction::MoveStackUp],
        &[Instruction::ReadToAccumulator],
    ]);
    let mut engine = Engine::new(&grid, 3, Point::ZERO);

    for _ in 0..5 {
        engine.step().unwrap();
    }

    assert_eq!(engine.stack(), &[0, 1, 0]);
    assert_eq!(engine.stack_pointer(), 0);
    assert_eq!(engine.accumulator(), 0);
}

#[test]
fn test_stack_pointer_past_the_end_faults_on_access() {
    let grid = grid_from_rows(&[
        &[Instruction::MoveStackDown],
        &[Instruction::WriteFromAccumulator],
    ]);
    let mut engine = Engine::new(&grid, 1, Point::ZERO);

    engine.step().unwrap();
    assert_eq!(engine.stack_pointer(), 1);

    let err = engine.step().unwrap_err();
    assert_eq!(
        err,
        RuntimeError::StackPointerOutOfRange {
            pointer: 1,
            len: 1,
            point: Point::new(0, 1)
        }
    );
    assert_eq!(err.point(), Some(Point::new(0, 1)));
    assert_eq!(engine.stack(), &[0]);
}

#[test]
fn test_empty_stack_faults_on_first_access() {
    let grid = grid_from_rows(&[&[Instruction::Add]]);
    let mut engine = Engine::new(&grid, 0, Point::ZERO);
    assert!(matches!(
        engine.step(),
        Err(RuntimeError::StackPointerOutOfRange { len: 0, .. })
    ));
}

#[test]
fn test_exit_halts_before_advancing() {
    let grid = grid_from_rows(&[&[Instruction::Increment], &[Instruction::Exit]]);
    let mut engine = Engine::new(&grid, 1, Point::ZERO);

    assert_eq!(engine.step(), Ok(Step::Continued(Instruction::Increment)));
    assert_eq!(engine.step(), Ok(Step::Halted(HaltReason::Exit)));
    assert_eq!(engine.cursor(), Point::new(0, 1));
    assert_eq!(engine.steps(), 2);
    assert_eq!(engine.accumulator(), 1);
}

#[test]
fn test_start_outside_the_grid_halts_immediately() {
    let grid = Grid::new(2, 2);
    let mut engine = Engine::new(&grid, 1, Point::new(5, 5));
    assert_eq!(engine.step(), Ok(Step::Halted(HaltReason::OutOfBounds)));
    assert_eq!(engine.steps(), 0);

    let empty = Grid::new(0, 0);
    let mut engine = Engine::new(&empty, 1, Point::ZERO);
    assert_eq!(engine.step(), Ok(Step::Halted(HaltReason::OutOfBounds)));
}

#[test]
fn test_restore_rewinds_a_step() {
    let grid = grid_from_rows(&[&[Instruction::MoveRight, Instruction::Increment]]);
    let mut engine = Engine::new(&grid, 1, Point::ZERO);
    let start = engine.state().clone();

    engine.step().unwrap();
    engine.step().unwrap();
    assert_ne!(engine.state(), &start);

    engine.restore(start.clone());
    assert_eq!(engine.state(), &start);
    assert_eq!(engine.current_instruction(), Some(Instruction::MoveRight));
}
