//! Static maze model: coordinates, cell kinds and the immutable grid.

mod coordinate;
mod maze;

pub use coordinate::Coordinate;
pub use maze::{CellKind, Grid, GridError, DEFAULT_END, DEFAULT_MAZE, DEFAULT_START};
