//! Replay session state

use crate::grid::Coordinate;
use crate::solver::Algorithm;

/// Where a session is in its lifecycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReplayPhase {
    /// Waiting for the solver to answer
    #[default]
    Idle,
    /// Revealing expanded nodes one tick at a time
    Expanding,
    /// Path shown in full, agent parked on its first cell
    PathRevealed,
    /// Agent walking the path
    Traversing,
    /// Replay finished
    Done,
    /// Solver request failed; nothing will be animated
    Failed,
}

impl ReplayPhase {
    /// Whether the session still has timed work ahead of it
    pub fn is_animating(&self) -> bool {
        matches!(
            self,
            ReplayPhase::Expanding | ReplayPhase::PathRevealed | ReplayPhase::Traversing
        )
    }

    /// Terminal for the session; only a new replay moves past it
    pub fn is_terminal(&self) -> bool {
        matches!(self, ReplayPhase::Done | ReplayPhase::Failed)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReplayPhase::Idle => "idle",
            ReplayPhase::Expanding => "expanding",
            ReplayPhase::PathRevealed => "path revealed",
            ReplayPhase::Traversing => "traversing",
            ReplayPhase::Done => "done",
            ReplayPhase::Failed => "failed",
        }
    }
}

/// Mutable state of the single live replay.
///
/// Only the engine mutates a session. Everyone else sees clones
/// ([`ReplaySnapshot`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaySession {
    generation: u64,
    algorithm: Option<Algorithm>,
    phase: ReplayPhase,
    revealed_expanded: Vec<Coordinate>,
    expanded_total: usize,
    revealed_path: Vec<Coordinate>,
    agent_position: Option<Coordinate>,
    explanation: Option<String>,
    error: Option<String>,
    skipped_coordinates: usize,
}

/// Immutable copy of a session as published to subscribers
pub type ReplaySnapshot = ReplaySession;

impl ReplaySession {
    pub(crate) fn new(generation: u64, algorithm: Algorithm) -> Self {
        Self {
            generation,
            algorithm: Some(algorithm),
            ..Self::default()
        }
    }

    /// Token identifying this session; bumped by every new replay
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn algorithm(&self) -> Option<Algorithm> {
        self.algorithm
    }

    pub fn phase(&self) -> ReplayPhase {
        self.phase
    }

    /// Prefix of the expanded nodes revealed so far
    pub fn revealed_expanded(&self) -> &[Coordinate] {
        &self.revealed_expanded
    }

    /// Number of expanded nodes the replay will reveal in total
    pub fn expanded_total(&self) -> usize {
        self.expanded_total
    }

    /// Full path once revealed, empty before
    pub fn revealed_path(&self) -> &[Coordinate] {
        &self.revealed_path
    }

    pub fn agent_position(&self) -> Option<Coordinate> {
        self.agent_position
    }

    /// Solver explanation, present once the request succeeded
    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    /// Failure text when the phase is [`ReplayPhase::Failed`]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Out-of-bounds coordinates dropped from this session's solver result
    pub fn skipped_coordinates(&self) -> usize {
        self.skipped_coordinates
    }

    pub fn is_path_cell(&self, coord: Coordinate) -> bool {
        self.revealed_path.contains(&coord)
    }

    pub fn is_expanded_cell(&self, coord: Coordinate) -> bool {
        self.revealed_expanded.contains(&coord)
    }

    pub(crate) fn begin_expanding(&mut self, explanation: String, expanded_total: usize, skipped: usize) {
        self.explanation = Some(explanation);
        self.expanded_total = expanded_total;
        self.skipped_coordinates = skipped;
        self.phase = ReplayPhase::Expanding;
    }

    // Append-only: the revealed prefix never shrinks within a session.
    pub(crate) fn reveal_expanded(&mut self, coord: Coordinate) {
        self.revealed_expanded.push(coord);
    }

    pub(crate) fn reveal_path(&mut self, path: Vec<Coordinate>) {
        self.agent_position = path.first().copied();
        self.revealed_path = path;
        self.phase = ReplayPhase::PathRevealed;
    }

    pub(crate) fn begin_traversal(&mut self) {
        self.phase = ReplayPhase::Traversing;
    }

    pub(crate) fn move_agent(&mut self, coord: Coordinate) {
        self.agent_position = Some(coord);
    }

    pub(crate) fn finish(&mut self) {
        self.phase = ReplayPhase::Done;
    }

    pub(crate) fn fail(&mut self, error: String) {
        self.error = Some(error);
        self.phase = ReplayPhase::Failed;
    }
}
