//! Maze rendering through a TestBackend terminal

use mazewalk::grid::{Coordinate, Grid};
use mazewalk::replay::{ReplayEngine, ReplaySnapshot, ReplayTiming, VirtualScheduler};
use mazewalk::solver::{Algorithm, SolveResult};
use mazewalk::ui::components::{CELL_END_BG, CELL_EXPANDED_BG, CELL_PATH_BG, CELL_START_BG};

use super::common::terminal::{buffer_to_string, cell_center, char_at, render_maze};

fn c(row: i64, col: i64) -> Coordinate {
    Coordinate::new(row, col)
}

#[test]
fn test_idle_maze_text() {
    let grid = Grid::default_maze();
    let buffer = render_maze(&grid, &ReplaySnapshot::default());

    let text = buffer_to_string(&buffer);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 8);
    assert!(lines[0].ends_with(" B "));
    assert!(lines[7].starts_with(" A "));

    let (x, y) = cell_center(7, 0);
    assert_eq!(buffer.cell((x, y)).unwrap().bg, CELL_START_BG);
    let (x, y) = cell_center(0, 11);
    assert_eq!(buffer.cell((x, y)).unwrap().bg, CELL_END_BG);
}

#[test]
fn test_replay_layers() {
    let mut engine = ReplayEngine::new(
        Grid::default_maze(),
        ReplayTiming::default(),
        VirtualScheduler::new(),
    );
    let ticket = engine.start_replay(Algorithm::Bfs);
    let result = SolveResult::new(
        vec![c(7, 0), c(6, 0), c(7, 1), c(7, 2)],
        vec![c(7, 0), c(7, 1), c(7, 2), c(7, 3)],
    );
    engine.on_solve_result(ticket, Ok(result)).unwrap();
    engine.run_until_settled();

    let buffer = render_maze(engine.grid(), &engine.snapshot());

    // Agent finished on the labeled cell (7, 3)
    let (x, y) = cell_center(7, 3);
    assert_eq!(char_at(&buffer, x, y), Some("@"));
    // Start marker wins over path
    let (x, y) = cell_center(7, 0);
    assert_eq!(char_at(&buffer, x, y), Some("A"));
    // Path wins over expansion
    let (x, y) = cell_center(7, 1);
    assert_eq!(buffer.cell((x, y)).unwrap().bg, CELL_PATH_BG);
    // Expanded but off the path
    let (x, y) = cell_center(6, 0);
    assert_eq!(buffer.cell((x, y)).unwrap().bg, CELL_EXPANDED_BG);
}
