//! Actions that can be triggered by keybindings

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::solver::Algorithm;

/// All mappable UI actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Request a solve and replay it
    Solve(Algorithm),
    /// Replay the last algorithm again
    Replay,
    /// Freeze the running replay
    Cancel,
    /// Quit the application
    Quit,
}

impl Action {
    /// Map a key press to an action. Releases and repeats are ignored.
    pub fn from_key(key: KeyEvent) -> Option<Action> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => Some(Action::Quit),
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char('1') | KeyCode::Char('b') => Some(Action::Solve(Algorithm::Bfs)),
            KeyCode::Char('2') | KeyCode::Char('d') => Some(Action::Solve(Algorithm::Dfs)),
            KeyCode::Char('3') | KeyCode::Char('a') => Some(Action::Solve(Algorithm::AStar)),
            KeyCode::Char('r') => Some(Action::Replay),
            KeyCode::Char('c') => Some(Action::Cancel),
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            _ => None,
        }
    }

    /// Get a human-readable description of the action
    pub fn description(&self) -> &'static str {
        match self {
            Action::Solve(Algorithm::Bfs) => "Breadth-first search",
            Action::Solve(Algorithm::Dfs) => "Depth-first search",
            Action::Solve(Algorithm::AStar) => "A* search",
            Action::Replay => "Replay",
            Action::Cancel => "Cancel replay",
            Action::Quit => "Quit",
        }
    }
}

/// Footer hints, in display order
pub const KEY_HINTS: &[(&str, &str)] = &[
    ("1", "BFS"),
    ("2", "DFS"),
    ("3", "A*"),
    ("r", "replay"),
    ("c", "cancel"),
    ("q", "quit"),
];
