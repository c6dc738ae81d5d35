pub mod config;
pub mod grid;
pub mod render;
pub mod replay;
pub mod solver;
pub mod ui;
pub mod util;

pub use config::Config;
pub use grid::{CellKind, Coordinate, Grid, GridError};
pub use replay::{
    ReplayEngine, ReplayError, ReplayPhase, ReplaySnapshot, ReplayTiming, SolveTicket,
};
pub use solver::{Algorithm, HttpSolverClient, SolveResult, SolverClient, SolverError};
pub use ui::App;
