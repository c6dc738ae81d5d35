use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::grid::{Coordinate, Grid, GridError, DEFAULT_END, DEFAULT_MAZE, DEFAULT_START};
use crate::replay::ReplayTiming;
use crate::util::paths::config_path;

/// Example configuration file contents (bundled with the binary)
pub const EXAMPLE_CONFIG: &str = include_str!("config.toml.example");

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Where solve requests go
    pub solver: SolverConfig,
    /// Replay cadence
    pub timing: ReplayTiming,
    /// Maze layout
    pub maze: MazeConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverConfig {
    pub base_url: String,
    pub request_timeout_ms: u64,
}

impl SolverConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeConfig {
    pub cells: Vec<Vec<String>>,
    pub start: Coordinate,
    pub end: Coordinate,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            cells: DEFAULT_MAZE
                .iter()
                .map(|row| row.iter().map(|label| label.to_string()).collect())
                .collect(),
            start: DEFAULT_START,
            end: DEFAULT_END,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            solver: SolverConfig {
                base_url: "http://127.0.0.1:10000".to_string(),
                request_timeout_ms: 10_000,
            },
            timing: ReplayTiming::default(),
            maze: MazeConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlSolverConfig {
    pub base_url: Option<String>,
    pub request_timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlReplayConfig {
    pub expansion_tick_ms: Option<u64>,
    pub path_settle_delay_ms: Option<u64>,
    pub traversal_tick_ms: Option<u64>,
}

/// A custom maze must be given in full
#[derive(Debug, Clone, Deserialize)]
pub struct TomlMazeConfig {
    pub cells: Vec<Vec<String>>,
    pub start: Coordinate,
    pub end: Coordinate,
}

/// TOML representation of the config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub solver: Option<TomlSolverConfig>,
    pub replay: Option<TomlReplayConfig>,
    pub maze: Option<TomlMazeConfig>,
}

impl Config {
    /// Load configuration from the data directory, merging with defaults
    pub fn load() -> Self {
        let config_file = config_path();

        // Create example config on first run
        if !config_file.exists() {
            Self::create_default_config(&config_file);
        }

        Self::load_from(&config_file)
    }

    /// Load configuration from `path`. A missing or unparsable file yields
    /// the defaults.
    pub fn load_from(path: &Path) -> Self {
        let mut config = Config::default();

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "No config file, using defaults");
                return config;
            }
        };

        let toml_config = match toml::from_str::<TomlConfig>(&contents) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring invalid config file");
                return config;
            }
        };

        if let Some(solver) = toml_config.solver {
            if let Some(base_url) = solver.base_url {
                config.solver.base_url = base_url;
            }
            if let Some(timeout) = solver.request_timeout_ms {
                config.solver.request_timeout_ms = timeout;
            }
        }

        if let Some(replay) = toml_config.replay {
            if let Some(ms) = replay.expansion_tick_ms {
                config.timing.expansion_tick = Duration::from_millis(ms);
            }
            if let Some(ms) = replay.path_settle_delay_ms {
                config.timing.path_settle_delay = Duration::from_millis(ms);
            }
            if let Some(ms) = replay.traversal_tick_ms {
                config.timing.traversal_tick = Duration::from_millis(ms);
            }
        }

        if let Some(maze) = toml_config.maze {
            config.maze = MazeConfig {
                cells: maze.cells,
                start: maze.start,
                end: maze.end,
            };
        }

        config
    }

    /// Create the default config file from the bundled example
    fn create_default_config(path: &PathBuf) {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                if let Err(e) = fs::create_dir_all(parent) {
                    tracing::warn!(error = %e, "Failed to create config directory");
                    return;
                }
            }
        }

        if let Err(e) = fs::write(path, EXAMPLE_CONFIG) {
            tracing::warn!(error = %e, "Failed to write default config");
        }
    }

    pub fn with_solver_url(mut self, base_url: impl Into<String>) -> Self {
        self.solver.base_url = base_url.into();
        self
    }

    pub fn with_timing(mut self, timing: ReplayTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Build the configured maze
    pub fn grid(&self) -> Result<Grid, GridError> {
        Grid::from_labels(&self.maze.cells, self.maze.start, self.maze.end)
    }
}
