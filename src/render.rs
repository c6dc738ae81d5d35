//! Projection of grid + replay state onto display categories.
//!
//! Pure functions only; the TUI widget in `ui::components::MazeView` paints
//! whatever these return.

use crate::grid::{CellKind, Coordinate, Grid};
use crate::replay::ReplaySnapshot;

/// What a cell should look like right now
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellDisplay {
    Agent,
    Start,
    End,
    Path,
    Expanded,
    Wall,
    Label(String),
    Open,
}

/// Classify one cell.
///
/// Priority, highest first: agent, start/end, revealed path, revealed
/// expansion, wall, then the cell's own label or plain floor. Coordinates
/// outside the grid render as open floor.
pub fn classify(grid: &Grid, snapshot: &ReplaySnapshot, coord: Coordinate) -> CellDisplay {
    if snapshot.agent_position() == Some(coord) {
        return CellDisplay::Agent;
    }

    match grid.get(coord) {
        Some(CellKind::Start) => return CellDisplay::Start,
        Some(CellKind::End) => return CellDisplay::End,
        _ => {}
    }

    if snapshot.is_path_cell(coord) {
        return CellDisplay::Path;
    }
    if snapshot.is_expanded_cell(coord) {
        return CellDisplay::Expanded;
    }

    match grid.get(coord) {
        Some(CellKind::Wall) => CellDisplay::Wall,
        Some(CellKind::Labeled(label)) => CellDisplay::Label(label.clone()),
        _ => CellDisplay::Open,
    }
}

/// Classify every cell, row-major
pub fn project(grid: &Grid, snapshot: &ReplaySnapshot) -> Vec<Vec<CellDisplay>> {
    (0..grid.rows())
        .map(|row| {
            (0..grid.cols())
                .map(|col| classify(grid, snapshot, Coordinate::new(row as i64, col as i64)))
                .collect()
        })
        .collect()
}
