//! Replay engine: turns one solver result into a timed two-phase animation.
//!
//! The engine is a plain state machine driven by [`ReplayTick`]s. Timers live
//! behind the [`Scheduler`] trait so the same engine runs against tokio in the
//! app and against a virtual clock in tests.

mod engine;
mod scheduler;
mod state;
mod timing;

pub use engine::{ReplayEngine, ReplayError, SolveTicket, TickOutcome};
pub use scheduler::{ReplayTick, Scheduler, TickKind, TokioScheduler, VirtualScheduler};
pub use state::{ReplayPhase, ReplaySession, ReplaySnapshot};
pub use timing::ReplayTiming;
