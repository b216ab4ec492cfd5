//! Search limits and time management.
//!
//! Handles:
//! - The per-move time ceiling (fixed or proportional to the clock)
//! - The budget polled by every search node
//! - The slightly shorter ceiling of the quiescence search

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Share of the main ceiling that quiescence nodes may use, in percent
const QUIESCENCE_SHARE_PERCENT: u32 = 90;

/// Clock of the side that is thinking.
pub trait Timer {
    /// Milliseconds left on the clock
    fn millis_remaining(&self) -> u64;
}

impl Timer for u64 {
    #[inline]
    fn millis_remaining(&self) -> u64 {
        *self
    }
}

impl Timer for Duration {
    #[inline]
    fn millis_remaining(&self) -> u64 {
        self.as_millis().min(u64::MAX as u128) as u64
    }
}

/// How much wall-clock time a single move may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimeCeiling {
    /// Same ceiling for every move
    Fixed { millis: u64 },
    /// Interpolated between `min_millis` and `max_millis` by the fraction of
    /// the clock left, relative to the clock seen on the first move
    Proportional { min_millis: u64, max_millis: u64 },
}

impl Default for TimeCeiling {
    fn default() -> Self {
        TimeCeiling::Fixed { millis: 400 }
    }
}

/// Time manager for search
#[derive(Debug, Clone, Default)]
pub struct TimeManager {
    /// Clock observed on the first allocation
    initial_millis: Option<u64>,
}

impl TimeManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clock anchor used by the proportional ceiling, once known
    pub fn initial_millis(&self) -> Option<u64> {
        self.initial_millis
    }

    /// Forget the clock anchor (new game)
    pub fn reset(&mut self) {
        self.initial_millis = None;
    }

    /// Compute the ceiling for the next move
    pub fn allocate(&mut self, ceiling: TimeCeiling, timer: &impl Timer) -> Duration {
        let remaining = timer.millis_remaining();
        let initial = *self.initial_millis.get_or_insert(remaining);

        let millis = match ceiling {
            TimeCeiling::Fixed { millis } => millis,
            TimeCeiling::Proportional {
                min_millis,
                max_millis,
            } => {
                let span = max_millis.saturating_sub(min_millis) as u128;
                let scaled = if initial == 0 {
                    0
                } else {
                    span * remaining.min(initial) as u128 / initial as u128
                };
                min_millis + scaled as u64
            }
        };

        Duration::from_millis(millis)
    }
}

/// Deadline of one `think` call, polled cooperatively by the search.
#[derive(Debug, Clone, Copy)]
pub struct TimeBudget {
    start: Instant,
    limit: Option<Duration>,
}

impl TimeBudget {
    /// Start a budget of `limit` from now
    pub fn new(limit: Duration) -> Self {
        Self {
            start: Instant::now(),
            limit: Some(limit),
        }
    }

    /// A budget that never runs out
    pub fn unlimited() -> Self {
        Self {
            start: Instant::now(),
            limit: None,
        }
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Check if main search nodes must stop
    #[inline]
    pub fn expired(&self) -> bool {
        match self.limit {
            Some(limit) => self.elapsed() >= limit,
            None => false,
        }
    }

    /// Check if quiescence nodes must stop
    #[inline]
    pub fn captures_expired(&self) -> bool {
        match self.limit {
            Some(limit) => self.elapsed() >= limit * QUIESCENCE_SHARE_PERCENT / 100,
            None => false,
        }
    }
}
