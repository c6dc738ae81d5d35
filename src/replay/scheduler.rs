//! Timer plumbing for the replay engine.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::AbortHandle;

/// Which step of the replay a tick advances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickKind {
    /// Reveal the next expanded node
    Expand,
    /// Settle delay elapsed, show the path
    Settle,
    /// Move the agent one cell along the path
    Traverse,
}

/// A deferred step, stamped with the generation of the session that
/// scheduled it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReplayTick {
    pub generation: u64,
    pub kind: TickKind,
}

/// Deferred delivery of replay ticks
pub trait Scheduler {
    /// Deliver `tick` back to the engine after `delay`
    fn schedule(&mut self, delay: Duration, tick: ReplayTick);

    /// Drop every tick that has not been delivered yet
    fn cancel_all(&mut self);
}

/// Scheduler backed by tokio timers.
///
/// Each tick is a spawned task that sleeps and then sends the tick over an
/// unbounded channel; the app loop feeds received ticks into the engine.
pub struct TokioScheduler {
    tx: mpsc::UnboundedSender<ReplayTick>,
    handles: Vec<AbortHandle>,
}

impl TokioScheduler {
    pub fn new(tx: mpsc::UnboundedSender<ReplayTick>) -> Self {
        Self {
            tx,
            handles: Vec::new(),
        }
    }

    /// Scheduler plus the receiving end of its tick channel
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ReplayTick>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    /// Number of timer tasks that have not fired yet
    pub fn outstanding(&self) -> usize {
        self.handles.iter().filter(|h| !h.is_finished()).count()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&mut self, delay: Duration, tick: ReplayTick) {
        self.handles.retain(|h| !h.is_finished());

        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the app is shutting down
            let _ = tx.send(tick);
        });
        self.handles.push(handle.abort_handle());
    }

    fn cancel_all(&mut self) {
        for handle in self.handles.drain(..) {
            handle.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[derive(Debug, Clone, Copy)]
struct PendingTick {
    due: Duration,
    seq: u64,
    tick: ReplayTick,
}

/// Deterministic scheduler driven by a virtual clock.
///
/// Nothing fires on its own: the owner advances time and collects the ticks
/// that became due (see `ReplayEngine::advance`).
#[derive(Debug, Default)]
pub struct VirtualScheduler {
    now: Duration,
    seq: u64,
    pending: Vec<PendingTick>,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Undelivered ticks in firing order
    pub fn pending(&self) -> Vec<ReplayTick> {
        let mut pending = self.pending.clone();
        pending.sort_by_key(|p| (p.due, p.seq));
        pending.into_iter().map(|p| p.tick).collect()
    }

    /// Due time of the next tick, if any
    pub fn next_due(&self) -> Option<Duration> {
        self.pending.iter().map(|p| p.due).min()
    }

    /// Remove and return the earliest tick due at or before `deadline`,
    /// moving the clock to its due time.
    pub fn pop_due(&mut self, deadline: Duration) -> Option<ReplayTick> {
        let (index, _) = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= deadline)
            .min_by_key(|(_, p)| (p.due, p.seq))?;
        let pending = self.pending.remove(index);
        self.now = self.now.max(pending.due);
        Some(pending.tick)
    }

    /// Move the clock forward without firing anything
    pub fn set_now(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }
}

impl Scheduler for VirtualScheduler {
    fn schedule(&mut self, delay: Duration, tick: ReplayTick) {
        self.seq += 1;
        self.pending.push(PendingTick {
            due: self.now + delay,
            seq: self.seq,
            tick,
        });
    }

    fn cancel_all(&mut self) {
        self.pending.clear();
    }
}
