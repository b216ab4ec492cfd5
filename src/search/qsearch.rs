//! Quiescence search - search captures only to avoid horizon effect.
//!
//! When the main search reaches depth 0, we continue searching captures
//! to ensure we don't stop in the middle of a tactical sequence.
//!
//! Quiescence nodes poll a slightly shorter time ceiling than the main
//! search, see [`TimeBudget::captures_expired`](super::TimeBudget::captures_expired).

use super::{Aborted, MovePicker, Searcher};
use crate::eval;
use crate::position::Position;
use crate::types::{Ply, Score};

/// Capture-only search from a horizon node, fail-hard.
pub(super) fn quiescence<P: Position>(
    searcher: &mut Searcher,
    position: &mut P,
    ply: Ply,
    mut alpha: Score,
    beta: Score,
) -> Result<Score, Aborted> {
    if searcher.budget.captures_expired() {
        return Err(Aborted);
    }
    searcher.inc_qnodes();
    searcher.update_seldepth(ply);

    let stand_pat = eval::evaluate(position);
    if stand_pat >= beta {
        return Ok(beta);
    }
    if stand_pat > alpha {
        alpha = stand_pat;
    }

    let picker = MovePicker::new(position, position.legal_moves(true));

    for mv in picker {
        let score = {
            let mut child = position.play(mv);
            -quiescence(searcher, &mut *child, ply.next(), -beta, -alpha)?
        };

        if score >= beta {
            return Ok(beta);
        }
        if score > alpha {
            alpha = score;
        }
    }

    Ok(alpha)
}
