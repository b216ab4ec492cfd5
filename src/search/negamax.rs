//! Negamax alpha-beta search implementation.
//!
//! This is the core search algorithm with:
//! - Fail-hard alpha-beta pruning
//! - Transposition table probing and storing
//! - Quiescence search or a clamped static evaluation at the horizon
//!
//! Running out of time is reported as `Err(Aborted)` and unwinds the whole
//! tree through `?`; the move guards undo every move on the way up.

use super::tt::BoundType;
use super::{qsearch, MovePicker, RootMoves, Searcher};
use crate::config::{DrawPolicy, LeafPolicy};
use crate::eval;
use crate::position::Position;
use crate::types::{Depth, Ply, Score};

/// The time budget ran out before the search finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aborted;

/// Search the root moves of one iteration.
///
/// Terminal checks and the cache are skipped here: the root always yields a
/// move. After the last move the root ordering is rebuilt from the scores
/// seen, best first, for the next iteration. An aborted or cut-off root keeps
/// the previous ordering.
pub(super) fn search_root<P: Position>(
    searcher: &mut Searcher,
    position: &mut P,
    depth: Depth,
    mut alpha: Score,
    beta: Score,
    root: &mut RootMoves<P::Move>,
) -> Result<Score, Aborted> {
    if searcher.budget.expired() {
        return Err(Aborted);
    }
    searcher.inc_nodes();

    let picker = MovePicker::new(position, root.ordering.clone());
    let mut scored: Vec<(P::Move, Score)> = Vec::with_capacity(picker.remaining());
    let mut best_move = None;

    for mv in picker {
        let score = {
            let mut child = position.play(mv);
            search(searcher, &mut *child, depth - 1, Ply::ZERO.next(), -beta, -alpha)
        };
        let score = -score?;
        scored.push((mv, score));

        if score >= beta {
            root.best_move = Some(mv);
            return Ok(beta);
        }

        if score > alpha {
            alpha = score;
            best_move = Some(mv);
        }
    }

    // Stable: equal scores keep this iteration's search order
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    root.ordering = scored.into_iter().map(|(m, _)| m).collect();
    root.best_move = best_move;

    Ok(alpha)
}

/// Interior node of the negamax search with a fail-hard window.
pub(super) fn search<P: Position>(
    searcher: &mut Searcher,
    position: &mut P,
    depth: Depth,
    ply: Ply,
    mut alpha: Score,
    beta: Score,
) -> Result<Score, Aborted> {
    if searcher.budget.expired() {
        return Err(Aborted);
    }
    searcher.inc_nodes();
    searcher.update_seldepth(ply);

    if position.is_checkmate() {
        return Ok(Score::mated());
    }
    if position.is_draw() {
        return Ok(match searcher.config.draw_policy {
            DrawPolicy::Zero => Score::draw(),
            DrawPolicy::Avoid => Score::draw_avoided(),
        });
    }

    if depth.is_horizon() {
        return match searcher.config.leaf {
            LeafPolicy::Captures => qsearch::quiescence(searcher, position, ply, alpha, beta),
            LeafPolicy::StaticClamp => Ok(eval::evaluate(position).clamp(alpha, beta)),
        };
    }

    // === TT Probe ===
    let hash = position.fingerprint();
    let entry = searcher.tt.as_ref().and_then(|tt| tt.probe(hash));
    if let Some(entry) = entry {
        searcher.stats.tt_hits += 1;
        if let Some(score) = entry.cutoff(depth, alpha, beta) {
            searcher.stats.tt_cuts += 1;
            return Ok(score);
        }
    }

    let orig_alpha = alpha;
    let picker = MovePicker::new(position, position.legal_moves(false));

    for mv in picker {
        let score = {
            let mut child = position.play(mv);
            -search(searcher, &mut *child, depth - 1, ply.next(), -beta, -alpha)?
        };

        if score >= beta {
            if let Some(tt) = &searcher.tt {
                tt.store(hash, beta, depth, BoundType::LowerBound);
            }
            return Ok(beta);
        }

        if score > alpha {
            alpha = score;
        }
    }

    // === TT Store ===
    if let Some(tt) = &searcher.tt {
        let bound = if alpha > orig_alpha {
            BoundType::Exact
        } else {
            BoundType::UpperBound
        };
        tt.store(hash, alpha, depth, bound);
    }

    Ok(alpha)
}
