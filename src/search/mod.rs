//! Search module for the engine.
//!
//! # Architecture
//! - `Searcher`: iterative deepening driver with search state
//! - `negamax`: alpha-beta search in the negamax framework
//! - `qsearch`: capture-only search at the horizon
//! - `ordering`: move ordering heuristics (MVV-LVA, pawn-attack penalty)
//! - `tt`: transposition table
//! - `limits`: time ceilings and the per-move budget

mod limits;
mod negamax;
mod ordering;
mod qsearch;
mod tt;

pub use limits::{TimeBudget, TimeCeiling, TimeManager, Timer};
pub use negamax::Aborted;
pub use ordering::{order_moves, score_move, MovePicker};
pub use tt::{BoundType, TTEntry, TranspositionTable};

use crate::config::SearchConfig;
use crate::error::{SearchError, SearchResult};
use crate::position::Position;
use crate::types::{Depth, NodeCount, Ply, Score};
use std::time::Duration;

/// Search statistics collected during search
#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    pub nodes: NodeCount,
    /// Nodes visited inside quiescence search
    pub qnodes: NodeCount,
    /// Cache probes that found an entry
    pub tt_hits: u64,
    /// Cache hits that ended the node
    pub tt_cuts: u64,
    /// Deepest fully completed iteration
    pub depth: Depth,
    pub seldepth: Ply,
    pub elapsed: Duration,
}

impl SearchStats {
    pub fn nps(&self) -> u64 {
        let ms = self.elapsed.as_millis() as u64;
        if ms > 0 {
            self.nodes * 1000 / ms
        } else {
            0
        }
    }
}

/// Root move list carried across iterations.
#[derive(Debug, Clone)]
pub struct RootMoves<M> {
    /// Search order for the next iteration, best first
    pub ordering: Vec<M>,
    /// Best move of the last completed iteration
    pub best_move: Option<M>,
}

impl<M> RootMoves<M> {
    pub fn new(ordering: Vec<M>) -> Self {
        Self {
            ordering,
            best_move: None,
        }
    }
}

/// Outcome of a fixed-depth search
#[derive(Debug, Clone)]
pub struct RootReport<M> {
    /// `None` when no root move beat the initial root alpha
    pub best_move: Option<M>,
    pub score: Score,
    /// Root moves ordered by their score, best first
    pub ordering: Vec<M>,
    pub stats: SearchStats,
}

/// Main search controller
pub struct Searcher {
    config: SearchConfig,
    /// Present only when the configuration enables the cache
    tt: Option<TranspositionTable>,
    time_manager: TimeManager,
    budget: TimeBudget,
    stats: SearchStats,
    /// Root score of the last completed iteration
    last_score: Option<Score>,
}

impl Searcher {
    pub fn new(config: SearchConfig) -> Self {
        let tt = config
            .transposition
            .then(|| TranspositionTable::new(config.tt_size_mb));

        Self {
            config,
            tt,
            time_manager: TimeManager::new(),
            budget: TimeBudget::unlimited(),
            stats: SearchStats::default(),
            last_score: None,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Get current statistics
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Root score of the last completed iteration of the last search
    pub fn last_score(&self) -> Option<Score> {
        self.last_score
    }

    pub fn tt(&self) -> Option<&TranspositionTable> {
        self.tt.as_ref()
    }

    /// Forget the clock anchor and cached positions before a new game
    pub fn new_game(&mut self) {
        self.time_manager.reset();
        if let Some(tt) = &self.tt {
            tt.clear();
        }
    }

    /// Pick a move within the time ceiling.
    ///
    /// Deepens one ply at a time and answers with the best move of the last
    /// completed iteration, or the first legal move if none completed. Stops
    /// early once a forced mate score appears.
    pub fn think<P: Position>(&mut self, position: &mut P, timer: &impl Timer) -> SearchResult<P::Move> {
        let legal = position.legal_moves(false);
        let fallback = *legal.first().ok_or(SearchError::NoLegalMoves)?;

        let limit = self.time_manager.allocate(self.config.time, timer);
        let max_depth = self.config.max_depth;
        self.begin(TimeBudget::new(limit));

        let mut root = RootMoves::new(legal);
        let best_move = self.deepen(position, &mut root, max_depth).unwrap_or(fallback);

        log::info!(
            "bestmove {:?} depth {} score {} nodes {} nps {} time {}ms (limit {}ms)",
            best_move,
            self.stats.depth.raw(),
            self.last_score.unwrap_or_default(),
            self.stats.nodes,
            self.stats.nps(),
            self.stats.elapsed.as_millis(),
            limit.as_millis()
        );

        Ok(best_move)
    }

    /// Search to exactly `depth` plies without a time limit.
    pub fn search_depth<P: Position>(
        &mut self,
        position: &mut P,
        depth: i32,
    ) -> SearchResult<RootReport<P::Move>> {
        if depth < 1 {
            return Err(SearchError::InvalidDepth(depth));
        }
        let legal = position.legal_moves(false);
        if legal.is_empty() {
            return Err(SearchError::NoLegalMoves);
        }

        self.begin(TimeBudget::unlimited());
        let mut root = RootMoves::new(legal);
        let best_move = self.deepen(position, &mut root, depth);

        Ok(RootReport {
            best_move,
            score: self.last_score.unwrap_or(Score::root_alpha()),
            ordering: root.ordering,
            stats: self.stats.clone(),
        })
    }

    /// Reset per-search state and start the clock
    fn begin(&mut self, budget: TimeBudget) {
        self.budget = budget;
        self.stats = SearchStats::default();
        self.last_score = None;
        if let Some(tt) = &self.tt {
            tt.new_search();
        }
    }

    /// Iterative deepening loop shared by `think` and `search_depth`
    fn deepen<P: Position>(
        &mut self,
        position: &mut P,
        root: &mut RootMoves<P::Move>,
        max_depth: i32,
    ) -> Option<P::Move> {
        let mut best_move = None;

        for depth in 1..=max_depth {
            if let Some(tt) = &self.tt {
                tt.new_search();
                log::trace!("cache cleared for depth {}", depth);
            }

            let result = negamax::search_root(
                self,
                position,
                Depth::new(depth),
                Score::root_alpha(),
                Score::infinity(),
                root,
            );

            match result {
                Ok(score) => {
                    if root.best_move.is_some() {
                        best_move = root.best_move;
                    }
                    self.last_score = Some(score);
                    self.stats.depth = Depth::new(depth);
                    self.stats.elapsed = self.budget.elapsed();

                    log::debug!(
                        "depth {} seldepth {} score {} nodes {} qnodes {} tt_hits {} time {}ms",
                        depth,
                        self.stats.seldepth.raw(),
                        score,
                        self.stats.nodes,
                        self.stats.qnodes,
                        self.stats.tt_hits,
                        self.stats.elapsed.as_millis()
                    );

                    if score.is_mate_score() {
                        break;
                    }
                }
                Err(Aborted) => {
                    log::debug!("depth {} aborted, keeping depth {}", depth, self.stats.depth.raw());
                    break;
                }
            }
        }

        self.stats.elapsed = self.budget.elapsed();
        best_move
    }

    /// Increment node counter
    #[inline]
    pub(crate) fn inc_nodes(&mut self) {
        self.stats.nodes += 1;
    }

    #[inline]
    pub(crate) fn inc_qnodes(&mut self) {
        self.stats.qnodes += 1;
    }

    /// Update selective depth
    #[inline]
    pub(crate) fn update_seldepth(&mut self, ply: Ply) {
        if ply > self.stats.seldepth {
            self.stats.seldepth = ply;
        }
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}
