mod settings;

pub use settings::{Config, MazeConfig, SolverConfig, EXAMPLE_CONFIG};
