//! Score type for search.
//!
//! Handles centipawn scores plus the handful of sentinels the search relies
//! on: the checkmate score, the window bounds and the draw-avoidance penalty.
//! Mate scores are not ply-adjusted, so every forced mate scores the same.

use std::fmt;
use std::ops::Neg;

/// Magnitude of a checkmate score.
pub const SCORE_MATE: i32 = 10_000_000;
/// Window bound, strictly outside every reachable score.
pub const SCORE_INFINITY: i32 = SCORE_MATE + 1;
/// Penalty given to drawn nodes when draws are treated as losses.
pub const SCORE_DRAW_AVOID: i32 = 1_000_000;
pub const SCORE_DRAW: i32 = 0;
/// Lower window bound used at the root of every iteration.
pub const ROOT_ALPHA: i32 = -100_000;

/// A search score in centipawns, relative to the side to move.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Score(pub i32);

impl Score {
    /// Create a new score from centipawns
    #[inline]
    pub const fn cp(centipawns: i32) -> Self {
        Score(centipawns)
    }

    /// Score of a side that has been checkmated
    #[inline]
    pub const fn mated() -> Self {
        Score(-SCORE_MATE)
    }

    /// Score of a side that delivers checkmate
    #[inline]
    pub const fn mate() -> Self {
        Score(SCORE_MATE)
    }

    /// Draw score
    #[inline]
    pub const fn draw() -> Self {
        Score(SCORE_DRAW)
    }

    /// Draw score when draws are treated as losses
    #[inline]
    pub const fn draw_avoided() -> Self {
        Score(-SCORE_DRAW_AVOID)
    }

    /// Infinity (for alpha-beta bounds)
    #[inline]
    pub const fn infinity() -> Self {
        Score(SCORE_INFINITY)
    }

    /// Negative infinity
    #[inline]
    pub const fn neg_infinity() -> Self {
        Score(-SCORE_INFINITY)
    }

    /// Initial alpha of a root search
    #[inline]
    pub const fn root_alpha() -> Self {
        Score(ROOT_ALPHA)
    }

    /// Get the raw value
    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Check if this is a mate score (winning)
    #[inline]
    pub const fn is_mate(self) -> bool {
        self.0 >= SCORE_MATE
    }

    /// Check if this is a mated score (losing)
    #[inline]
    pub const fn is_mated(self) -> bool {
        self.0 <= -SCORE_MATE
    }

    /// Check if this is any kind of mate score
    #[inline]
    pub const fn is_mate_score(self) -> bool {
        self.is_mate() || self.is_mated()
    }
}

impl Neg for Score {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Score(-self.0)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_mate() {
            write!(f, "mate")
        } else if self.is_mated() {
            write!(f, "mated")
        } else {
            write!(f, "cp {}", self.0)
        }
    }
}

impl fmt::Debug for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Score({})", self)
    }
}
