use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::grid::Coordinate;

/// Search algorithm offered by the solver service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    Bfs,
    Dfs,
    AStar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Bfs, Algorithm::Dfs, Algorithm::AStar];

    /// Identifier used in the `/solve/{algorithm}` route
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Bfs => "bfs",
            Algorithm::Dfs => "dfs",
            Algorithm::AStar => "a_star",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "bfs" => Some(Algorithm::Bfs),
            "dfs" => Some(Algorithm::Dfs),
            "a_star" | "astar" | "a*" => Some(Algorithm::AStar),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Algorithm::Bfs => "BFS",
            Algorithm::Dfs => "DFS",
            Algorithm::AStar => "A*",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::parse(s).ok_or_else(|| format!("unknown algorithm '{s}' (expected bfs, dfs or a_star)"))
    }
}

/// Solver output for one request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveResult {
    /// Cells in the order the algorithm visited them; duplicates are kept.
    pub expanded_nodes: Vec<Coordinate>,
    /// Start-to-end path, empty when the maze has no solution.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub path: Vec<Coordinate>,
    #[serde(default)]
    pub explanation: String,
}

impl SolveResult {
    pub fn new(expanded_nodes: Vec<Coordinate>, path: Vec<Coordinate>) -> Self {
        Self {
            expanded_nodes,
            path,
            explanation: String::new(),
        }
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = explanation.into();
        self
    }
}

// The service answers `"path": null` when no path exists.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Coordinate>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Coordinate>>::deserialize(deserializer)?.unwrap_or_default())
}
