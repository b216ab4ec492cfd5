//! Transposition table for caching search results.
//!
//! Maps a position fingerprint to the score it was last searched to, so that
//! transposed positions are not searched twice within one root search.
//!
//! # Design
//! - 8-byte entries packed into `AtomicU64`, so the table is `Sync` and every
//!   slot is read and written as a unit
//! - Entries remember the depth they were searched to and whether the score
//!   is exact, a lower bound or an upper bound
//! - Clearing is a generation bump; entries from another generation are
//!   never returned

use crate::types::{Depth, Hash, Score};
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};

/// Generations live in the 6 high bits of `bound_and_age`
const GENERATION_MASK: u8 = 0x3F;

/// Type of bound stored in TT entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum BoundType {
    /// No bound (empty entry)
    None = 0,
    /// Exact score (alpha < score < beta)
    Exact = 1,
    /// Lower bound (fail-high, score >= beta)
    LowerBound = 2,
    /// Upper bound (fail-low, score <= alpha)
    UpperBound = 3,
}

impl From<u8> for BoundType {
    fn from(v: u8) -> Self {
        match v & 0x03 {
            1 => BoundType::Exact,
            2 => BoundType::LowerBound,
            3 => BoundType::UpperBound,
            _ => BoundType::None,
        }
    }
}

/// A single entry in the transposition table.
///
/// Packed into 64 bits:
/// - key: 16 bits (upper bits of hash for verification)
/// - score: 32 bits
/// - depth: 8 bits
/// - bound_and_age: 8 bits (bound type in low 2 bits, generation in high 6 bits)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TTEntry {
    key: u16,
    score: i32,
    depth: i8,
    bound_and_age: u8,
}

impl TTEntry {
    pub fn new(hash: Hash, score: Score, depth: Depth, bound: BoundType, generation: u8) -> Self {
        Self {
            key: (hash >> 48) as u16,
            score: score.raw(),
            depth: depth.raw().clamp(i8::MIN as i32, i8::MAX as i32) as i8,
            bound_and_age: (bound as u8) | ((generation & GENERATION_MASK) << 2),
        }
    }

    /// Layout: key(16) | score(32) | depth(8) | bound_and_age(8)
    #[inline]
    pub fn to_u64(&self) -> u64 {
        ((self.key as u64) << 48)
            | ((self.score as u32 as u64) << 16)
            | ((self.depth as u8 as u64) << 8)
            | (self.bound_and_age as u64)
    }

    #[inline]
    pub fn from_u64(raw: u64) -> Self {
        Self {
            key: (raw >> 48) as u16,
            score: (raw >> 16) as u32 as i32,
            depth: (raw >> 8) as u8 as i8,
            bound_and_age: raw as u8,
        }
    }

    /// Check if entry matches the given hash
    #[inline]
    pub fn matches(&self, hash: Hash) -> bool {
        self.key == (hash >> 48) as u16
    }

    #[inline]
    pub fn bound(&self) -> BoundType {
        BoundType::from(self.bound_and_age)
    }

    #[inline]
    pub fn generation(&self) -> u8 {
        self.bound_and_age >> 2
    }

    #[inline]
    pub fn score(&self) -> Score {
        Score::cp(self.score)
    }

    #[inline]
    pub fn depth(&self) -> Depth {
        Depth::new(self.depth as i32)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bound() == BoundType::None
    }

    /// Score usable for a `depth` search with window `(alpha, beta)`, if the
    /// stored bound proves one
    pub fn cutoff(&self, depth: Depth, alpha: Score, beta: Score) -> Option<Score> {
        if self.depth() < depth {
            return None;
        }
        let score = self.score();
        match self.bound() {
            BoundType::Exact => Some(score.clamp(alpha, beta)),
            BoundType::LowerBound if score >= beta => Some(beta),
            BoundType::UpperBound if score <= alpha => Some(alpha),
            _ => None,
        }
    }
}

/// Lock-free transposition table
pub struct TranspositionTable {
    entries: Vec<AtomicU64>,
    /// Current generation, bumped by every clear
    generation: AtomicU8,
}

impl TranspositionTable {
    /// Create a new TT with given size in MB
    pub fn new(size_mb: usize) -> Self {
        let num_entries = ((size_mb * 1024 * 1024) / 8).max(1024);
        // Round down to a power of 2 for fast modulo
        let num_entries = if num_entries.is_power_of_two() {
            num_entries
        } else {
            num_entries.next_power_of_two() / 2
        };

        let entries = (0..num_entries).map(|_| AtomicU64::new(0)).collect();

        Self {
            entries,
            generation: AtomicU8::new(0),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn generation(&self) -> u8 {
        self.generation.load(Ordering::Relaxed)
    }

    /// Invalidate every entry. Cheap: only the generation moves, except when
    /// it wraps and stale generations could resurface.
    pub fn new_search(&self) {
        let next = self.generation().wrapping_add(1) & GENERATION_MASK;
        if next == 0 {
            self.clear();
        } else {
            self.generation.store(next, Ordering::Relaxed);
        }
    }

    #[inline]
    fn index(&self, hash: Hash) -> usize {
        (hash as usize) & (self.entries.len() - 1)
    }

    /// Probe the TT for an entry of the current generation
    #[inline]
    pub fn probe(&self, hash: Hash) -> Option<TTEntry> {
        let raw = self.entries[self.index(hash)].load(Ordering::Relaxed);
        if raw == 0 {
            return None;
        }

        let entry = TTEntry::from_u64(raw);
        if entry.matches(hash) && !entry.is_empty() && entry.generation() == self.generation() {
            Some(entry)
        } else {
            None
        }
    }

    /// Store an entry, preferring deeper results within a generation
    pub fn store(&self, hash: Hash, score: Score, depth: Depth, bound: BoundType) {
        let idx = self.index(hash);
        let existing = TTEntry::from_u64(self.entries[idx].load(Ordering::Relaxed));
        let gen = self.generation();

        let should_replace = existing.is_empty()
            || existing.generation() != gen
            || depth >= existing.depth();

        if should_replace {
            let new_entry = TTEntry::new(hash, score, depth, bound, gen);
            self.entries[idx].store(new_entry.to_u64(), Ordering::Relaxed);
        }
    }

    /// Wipe every slot and restart generations
    pub fn clear(&self) {
        for entry in &self.entries {
            entry.store(0, Ordering::Relaxed);
        }
        self.generation.store(0, Ordering::Relaxed);
    }
}
