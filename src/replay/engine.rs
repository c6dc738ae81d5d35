//! The replay state machine.
//!
//! ```text
//! Idle ──ok──▶ Expanding ──settle──▶ PathRevealed ──▶ Traversing ──▶ Done
//!   │                                     │
//!   └──err──▶ Failed                      └──(empty path)──▶ Done
//! ```
//!
//! Any state is abandoned by `start_replay`, which cancels outstanding timers
//! and bumps the session generation. Ticks carry the generation they were
//! scheduled under, so one that slips past cancellation is still inert.

use std::time::Duration;

use thiserror::Error;
use tokio::sync::mpsc;

use super::scheduler::{ReplayTick, Scheduler, TickKind, VirtualScheduler};
use super::state::{ReplayPhase, ReplaySession, ReplaySnapshot};
use super::timing::ReplayTiming;
use crate::grid::Grid;
use crate::solver::{Algorithm, SolveResult, SolverError};

/// Errors surfaced to whoever drives the engine
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReplayError {
    #[error("{algorithm} replay failed: {source}")]
    Request {
        algorithm: Algorithm,
        #[source]
        source: SolverError,
    },
}

/// Receipt for a pending solve request.
///
/// Hand it back with the solver's answer; answers for superseded tickets are
/// dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolveTicket {
    pub generation: u64,
    pub algorithm: Algorithm,
}

/// Whether a tick changed anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Applied,
    /// Tick belonged to a superseded or cancelled session, or arrived in a
    /// phase it does not apply to
    Stale,
}

/// Owns the single live replay session and sequences its phases
pub struct ReplayEngine<S: Scheduler> {
    grid: Grid,
    timing: ReplayTiming,
    scheduler: S,
    session: ReplaySession,
    /// Bounds-checked solver output for the live session
    result: Option<SolveResult>,
    /// Index of the agent's cell within the path
    path_index: usize,
    cancelled: bool,
    subscribers: Vec<mpsc::UnboundedSender<ReplaySnapshot>>,
}

impl<S: Scheduler> ReplayEngine<S> {
    pub fn new(grid: Grid, timing: ReplayTiming, scheduler: S) -> Self {
        Self {
            grid,
            timing,
            scheduler,
            session: ReplaySession::default(),
            result: None,
            path_index: 0,
            cancelled: false,
            subscribers: Vec::new(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn timing(&self) -> ReplayTiming {
        self.timing
    }

    pub fn session(&self) -> &ReplaySession {
        &self.session
    }

    /// Copy of the current session state
    pub fn snapshot(&self) -> ReplaySnapshot {
        self.session.clone()
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Whether `cancel` froze the live session
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Receive every snapshot the engine emits from now on
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<ReplaySnapshot> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    /// Abandon whatever is running and begin a fresh session for `algorithm`.
    ///
    /// The caller fetches the solver result and hands it back through
    /// [`on_solve_result`](Self::on_solve_result) with the returned ticket.
    pub fn start_replay(&mut self, algorithm: Algorithm) -> SolveTicket {
        // Old timers must be gone before the new session exists
        self.scheduler.cancel_all();

        let generation = self.session.generation() + 1;
        self.session = ReplaySession::new(generation, algorithm);
        self.result = None;
        self.path_index = 0;
        self.cancelled = false;

        tracing::info!(generation, algorithm = %algorithm, "Starting replay");
        self.emit();

        SolveTicket {
            generation,
            algorithm,
        }
    }

    /// Stop all scheduled ticks and freeze the session in its current phase.
    pub fn cancel(&mut self) {
        self.scheduler.cancel_all();
        if !self.cancelled {
            tracing::debug!(
                generation = self.session.generation(),
                phase = self.session.phase().label(),
                "Replay cancelled"
            );
        }
        self.cancelled = true;
    }

    /// Feed the solver's answer for `ticket` into the engine.
    ///
    /// Answers for superseded or cancelled sessions are ignored. A failed
    /// request parks the session in [`ReplayPhase::Failed`] and is returned
    /// as an error for the caller to surface.
    pub fn on_solve_result(
        &mut self,
        ticket: SolveTicket,
        outcome: Result<SolveResult, SolverError>,
    ) -> Result<(), ReplayError> {
        if ticket.generation != self.session.generation()
            || self.cancelled
            || self.session.phase() != ReplayPhase::Idle
        {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.session.generation(),
                "Ignoring solve result for inactive session"
            );
            return Ok(());
        }

        let result = match outcome {
            Ok(result) => result,
            Err(source) => {
                tracing::error!(
                    generation = ticket.generation,
                    algorithm = %ticket.algorithm,
                    error = %source,
                    "Solver request failed"
                );
                self.session.fail(source.to_string());
                self.emit();
                return Err(ReplayError::Request {
                    algorithm: ticket.algorithm,
                    source,
                });
            }
        };

        let (result, skipped) = self.retain_in_bounds(result);
        if skipped > 0 {
            tracing::warn!(
                generation = ticket.generation,
                skipped,
                rows = self.grid.rows(),
                cols = self.grid.cols(),
                "Dropped out-of-bounds coordinates from solver result"
            );
        }

        tracing::info!(
            generation = ticket.generation,
            expanded = result.expanded_nodes.len(),
            path = result.path.len(),
            "Solver result accepted"
        );

        let expanded_total = result.expanded_nodes.len();
        self.session
            .begin_expanding(result.explanation.clone(), expanded_total, skipped);
        self.result = Some(result);
        self.emit();

        if expanded_total == 0 {
            self.schedule(self.timing.path_settle_delay, TickKind::Settle);
        } else {
            self.schedule(self.timing.expansion_tick, TickKind::Expand);
        }
        Ok(())
    }

    /// Apply a scheduled tick.
    pub fn on_tick(&mut self, tick: ReplayTick) -> TickOutcome {
        if tick.generation != self.session.generation() || self.cancelled {
            tracing::trace!(
                tick = tick.generation,
                current = self.session.generation(),
                "Dropping tick from inactive session"
            );
            return TickOutcome::Stale;
        }

        match (tick.kind, self.session.phase()) {
            (TickKind::Expand, ReplayPhase::Expanding) => self.reveal_next_expanded(),
            (TickKind::Settle, ReplayPhase::Expanding) if self.expansion_complete() => {
                self.reveal_path()
            }
            (TickKind::Traverse, ReplayPhase::Traversing) => self.advance_agent(),
            (kind, phase) => {
                tracing::trace!(?kind, phase = phase.label(), "Tick does not apply to phase");
                return TickOutcome::Stale;
            }
        }
        TickOutcome::Applied
    }

    fn schedule(&mut self, delay: Duration, kind: TickKind) {
        self.scheduler.schedule(
            delay,
            ReplayTick {
                generation: self.session.generation(),
                kind,
            },
        );
    }

    fn emit(&mut self) {
        if self.subscribers.is_empty() {
            return;
        }
        let snapshot = self.session.clone();
        self.subscribers.retain(|tx| tx.send(snapshot.clone()).is_ok());
    }

    /// Drop coordinates the grid cannot address. Returns the survivors and
    /// how many were removed.
    fn retain_in_bounds(&self, mut result: SolveResult) -> (SolveResult, usize) {
        let before = result.expanded_nodes.len() + result.path.len();
        result.expanded_nodes.retain(|c| self.grid.contains(*c));
        result.path.retain(|c| self.grid.contains(*c));
        let after = result.expanded_nodes.len() + result.path.len();
        (result, before - after)
    }

    fn expansion_complete(&self) -> bool {
        self.session.revealed_expanded().len() >= self.session.expanded_total()
    }

    fn reveal_next_expanded(&mut self) {
        let index = self.session.revealed_expanded().len();
        let next = self
            .result
            .as_ref()
            .and_then(|r| r.expanded_nodes.get(index).copied());

        if let Some(coord) = next {
            self.session.reveal_expanded(coord);
            tracing::trace!(index, %coord, "Revealed expanded node");
            self.emit();
        }

        if self.expansion_complete() {
            self.schedule(self.timing.path_settle_delay, TickKind::Settle);
        } else {
            self.schedule(self.timing.expansion_tick, TickKind::Expand);
        }
    }

    fn reveal_path(&mut self) {
        let path = self
            .result
            .as_ref()
            .map(|r| r.path.clone())
            .unwrap_or_default();
        let has_path = !path.is_empty();

        self.path_index = 0;
        self.session.reveal_path(path);
        self.emit();

        if has_path {
            self.session.begin_traversal();
            self.emit();
            self.schedule(self.timing.traversal_tick, TickKind::Traverse);
        } else {
            tracing::info!(
                generation = self.session.generation(),
                "No path to traverse, replay done"
            );
            self.session.finish();
            self.emit();
        }
    }

    fn advance_agent(&mut self) {
        let path_len = self.session.revealed_path().len();
        let next = self.path_index + 1;

        if let Some(coord) = self.session.revealed_path().get(next).copied() {
            self.path_index = next;
            self.session.move_agent(coord);
            tracing::trace!(index = next, %coord, "Agent moved");
            self.emit();
        }

        if self.path_index + 1 >= path_len {
            tracing::info!(
                generation = self.session.generation(),
                steps = path_len,
                "Replay done"
            );
            self.session.finish();
            self.emit();
        } else {
            self.schedule(self.timing.traversal_tick, TickKind::Traverse);
        }
    }
}

impl ReplayEngine<VirtualScheduler> {
    /// Move the virtual clock forward by `by`, applying every tick that
    /// comes due along the way. Returns how many ticks were applied.
    pub fn advance(&mut self, by: Duration) -> usize {
        let deadline = self.scheduler.now() + by;
        let mut applied = 0;
        while let Some(tick) = self.scheduler.pop_due(deadline) {
            if self.on_tick(tick) == TickOutcome::Applied {
                applied += 1;
            }
        }
        self.scheduler.set_now(deadline);
        applied
    }

    /// Fire ticks until nothing is scheduled. Returns how many were applied.
    pub fn run_until_settled(&mut self) -> usize {
        let mut applied = 0;
        while let Some(due) = self.scheduler.next_due() {
            let now = self.scheduler.now();
            applied += self.advance(due.saturating_sub(now));
        }
        applied
    }
}
