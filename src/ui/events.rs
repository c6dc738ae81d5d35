use crate::replay::SolveTicket;
use crate::solver::{SolveResult, SolverError};

/// Application-level events
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Terminal input event
    Input(crossterm::event::Event),

    /// A solve request spawned for `ticket` finished
    SolveCompleted {
        ticket: SolveTicket,
        result: Result<SolveResult, SolverError>,
    },

    /// Request to quit the application
    Quit,

    /// Error occurred
    Error(String),
}
