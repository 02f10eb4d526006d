use mapgoblin::language::{Instruction, Point};
use mapgoblin::program::{file, DecodeError, Grid, ProgramError};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use tempfile::tempdir;

#[test]
fn test_two_by_three_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cells.map");

    let mut grid = Grid::new(2, 3);
    grid[Point::new(0, 0)] = Instruction::MoveRight;
    grid[Point::new(1, 0)] = Instruction::Print;
    grid[Point::new(0, 2)] = Instruction::IsZero;
    grid[Point::new(1, 2)] = Instruction::Exit;

    file::save(&path, &grid, Point::new(1, 2)).unwrap();

    // Column-major cell order: (0,0) (0,1) (0,2) (1,0) (1,1) (1,2)
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(bytes.len(), file::HEADER_LEN + 6);
    assert_eq!(&bytes[file::HEADER_LEN..], &[2, 0, 27, 25, 0, 26]);

    let program = file::load(&path).unwrap();
    assert_eq!(program.grid, grid);
    assert_eq!(program.start, Point::new(1, 2));
    assert_eq!(program.grid.get(Point::new(1, 2)), Some(Instruction::Exit));
}

#[test]
fn test_paint_and_save_keeps_start() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("paint.map");
    file::save(&path, &Grid::new(3, 3), Point::new(2, 1)).unwrap();

    let mut program = file::load(&path).unwrap();
    let previous = program
        .grid
        .set(Point::new(2, 2), Instruction::MoveUpIfTrue)
        .unwrap();
    assert_eq!(previous, Instruction::NoOperation);
    file::save(&path, &program.grid, program.start).unwrap();

    let reloaded = file::load(&path).unwrap();
    assert_eq!(reloaded, program);
}

#[test]
fn test_paint_outside_the_grid_is_rejected() {
    let mut grid = Grid::new(2, 2);
    let err = grid.set(Point::new(2, 0), Instruction::Exit).unwrap_err();
    assert!(matches!(err, ProgramError::OutOfGrid { width: 2, height: 2, .. }));
    assert_eq!(grid, Grid::new(2, 2));
}

#[test]
fn test_oversized_grid_is_not_saved() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("wide.map");
    let wide = Grid::new(i32::MAX as usize + 1, 0);

    assert!(!file::fits_header(&wide));
    let err = file::save(&path, &wide, Point::ZERO).unwrap_err();
    assert!(matches!(err, ProgramError::TooLarge { height: 0, .. }));
    assert!(!path.exists());

    let widest = Grid::new(i32::MAX as usize, 0);
    assert!(file::fits_header(&widest));
    file::save(&path, &widest, Point::ZERO).unwrap();
    assert_eq!(file::load(&path).unwrap().grid.width(), i32::MAX as usize);
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = tempdir().unwrap();
    let err = file::load(dir.path().join("absent.map")).unwrap_err();
    assert!(matches!(err, ProgramError::Io { .. }));
}

#[test]
fn test_unknown_opcode_reports_its_cell() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.map");

    let mut bytes = Grid::new(2, 2).serialize();
    // Fourth cell in file order is (1, 1)
    bytes[file::HEADER_LEN + 3] = 200;
    std::fs::write(&path, &bytes).unwrap();

    match file::load(&path).unwrap_err() {
        ProgramError::Decode { source, .. } => assert_eq!(
            source,
            DecodeError::UnknownOpcode {
                byte: 200,
                x: 1,
                y: 1
            }
        ),
        other => panic!("expected a decode error, got {other}"),
    }
}

#[test]
fn test_trailing_bytes_are_ignored() {
    let mut bytes = Grid::new(1, 2).serialize();
    bytes.extend_from_slice(&[99, 99, 99]);
    let program = file::decode(&bytes).unwrap();
    assert_eq!(program.grid, Grid::new(1, 2));
}

#[test]
fn test_zero_sized_program() {
    let bytes = Grid::new(0, 4).serialize();
    assert_eq!(bytes.len(), file::HEADER_LEN);
    let program = file::decode(&bytes).unwrap();
    assert_eq!(program.grid.width(), 0);
    assert!(!program.grid.is_valid_point(Point::ZERO));
}

fn arb_grid() -> impl Strategy<Value = Grid> {
    (0usize..6, 0usize..6).prop_flat_map(|(width, height)| {
        prop::collection::vec(0u8..28, width * height).prop_map(move |bytes| {
            Grid::from_bytes(&bytes, width, height).expect("opcodes are in range")
        })
    })
}

proptest! {
    #[test]
    fn prop_encode_decode_round_trip(grid in arb_grid(), x in -3i32..8, y in -3i32..8) {
        let start = Point::new(x, y);
        let program = file::decode(&file::encode(&grid, start)).unwrap();
        prop_assert_eq!(program.grid, grid);
        prop_assert_eq!(program.start, start);
    }

    #[test]
    fn prop_decode_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let _ = file::decode(&bytes);
    }
}
