use std::time::Duration;

/// Cadence of the two replay phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayTiming {
    /// Delay between revealing consecutive expanded nodes
    pub expansion_tick: Duration,
    /// Pause between the last expansion reveal and showing the path
    pub path_settle_delay: Duration,
    /// Delay between agent moves along the path
    pub traversal_tick: Duration,
}

impl ReplayTiming {
    pub fn from_millis(expansion_tick_ms: u64, path_settle_delay_ms: u64, traversal_tick_ms: u64) -> Self {
        Self {
            expansion_tick: Duration::from_millis(expansion_tick_ms),
            path_settle_delay: Duration::from_millis(path_settle_delay_ms),
            traversal_tick: Duration::from_millis(traversal_tick_ms),
        }
    }
}

impl Default for ReplayTiming {
    fn default() -> Self {
        Self::from_millis(100, 500, 500)
    }
}
