//! Move ordering heuristics.
//!
//! Good move ordering is critical for alpha-beta pruning efficiency.
//! Scores favour winning captures (MVV-LVA style) and avoid squares an enemy
//! pawn can take on. Uses lazy selection sort to avoid full sort overhead.

use crate::position::{Position, SearchMove};
use crate::types::{piece_value, BitBoard, EMPTY};

/// Weight of the captured piece in the capture bonus
const VICTIM_WEIGHT: i32 = 40;

/// Penalty for moving onto a square attacked by an enemy pawn
const PAWN_ATTACK_PENALTY: i32 = 1400;

/// Score a move for ordering (higher = search first).
///
/// `base` is the move's list-position credit, so earlier-listed moves win
/// ties between otherwise equal moves.
#[inline]
pub fn score_move<M: SearchMove>(m: M, base: i32, enemy_pawn_attacks: BitBoard) -> i32 {
    let mut score = base;

    if let Some(victim) = m.captured_piece() {
        score += VICTIM_WEIGHT * piece_value(victim) - piece_value(m.moving_piece());
    }

    if enemy_pawn_attacks & BitBoard::from_square(m.target()) != EMPTY {
        score -= PAWN_ATTACK_PENALTY;
    }

    score
}

/// Move picker for lazy move ordering.
///
/// Uses selection sort: only finds the next best move when asked, which pays
/// off whenever a cutoff ends the node early.
pub struct MovePicker<M> {
    scored: Vec<(M, i32)>,
    current: usize,
}

impl<M: SearchMove> MovePicker<M> {
    /// Score every move of `position` in `moves`
    pub fn new<P>(position: &P, moves: Vec<M>) -> Self
    where
        P: Position<Move = M>,
    {
        let enemy_pawn_attacks = position.pawn_attacks(!position.side_to_move());
        let count = moves.len() as i32;

        let scored = moves
            .into_iter()
            .enumerate()
            .map(|(i, m)| (m, score_move(m, count - i as i32, enemy_pawn_attacks)))
            .collect();

        MovePicker { scored, current: 0 }
    }

    /// Number of moves not yet picked
    #[inline]
    pub fn remaining(&self) -> usize {
        self.scored.len() - self.current
    }
}

impl<M: SearchMove> Iterator for MovePicker<M> {
    type Item = M;

    /// Get next best move using selection sort (find max, swap to front)
    #[inline]
    fn next(&mut self) -> Option<M> {
        if self.current >= self.scored.len() {
            return None;
        }

        let mut best_idx = self.current;
        let mut best_score = self.scored[self.current].1;

        for i in (self.current + 1)..self.scored.len() {
            if self.scored[i].1 > best_score {
                best_score = self.scored[i].1;
                best_idx = i;
            }
        }

        self.scored.swap(self.current, best_idx);

        let mv = self.scored[self.current].0;
        self.current += 1;
        Some(mv)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining(), Some(self.remaining()))
    }
}

/// Fully order `moves` for `position`, best first
pub fn order_moves<P: Position>(position: &P, moves: Vec<P::Move>) -> Vec<P::Move> {
    MovePicker::new(position, moves).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::ChessPosition;
    use crate::types::Color;

    #[test]
    fn test_free_queen_capture_is_first() {
        let position = ChessPosition::from_fen("4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1").unwrap();
        let moves = position.legal_moves(false);
        let ordered = order_moves(&position, moves.clone());

        assert_eq!(ordered.len(), moves.len());
        assert_eq!(ordered[0].to_string(), "d2d5");
        assert!(ordered[0].is_capture());
        assert!(ordered[1..].iter().all(|m| !m.is_capture()));
    }

    #[test]
    fn test_capture_bonus_is_mvv_lva() {
        let position = ChessPosition::from_fen("4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1").unwrap();
        let capture = position.find_move("d2d5").unwrap();
        assert_eq!(score_move(capture, 0, EMPTY), 40 * 900 - 500);
    }

    #[test]
    fn test_pawn_defended_square_is_penalized() {
        // b4 and d4 are covered by the c5 pawn, d3 is not
        let position = ChessPosition::from_fen("4k3/8/8/2p5/8/8/3Q4/4K3 w - - 0 1").unwrap();
        let attacks = position.pawn_attacks(Color::Black);
        let onto_pawn = position.find_move("d2d4").unwrap();
        let quiet = position.find_move("d2d3").unwrap();

        assert_eq!(score_move(onto_pawn, 10, attacks), 10 - 1400);
        assert_eq!(score_move(quiet, 10, attacks), 10);

        let ordered = order_moves(&position, position.legal_moves(false));
        let (safe, attacked) = ordered.split_at(ordered.len() - 2);
        assert!(attacked.contains(&onto_pawn));
        assert!(safe.iter().all(|m| attacks & BitBoard::from_square(m.target()) == EMPTY));
    }

    #[test]
    fn test_list_position_breaks_ties() {
        let position = ChessPosition::default();
        let moves = position.legal_moves(false);
        let ordered = order_moves(&position, moves.clone());
        // No captures and no enemy pawn attacks reach rank 3/4, so input order holds
        assert_eq!(ordered, moves);
    }

    #[test]
    fn test_picker_is_lazy() {
        let position = ChessPosition::default();
        let mut picker = MovePicker::new(&position, position.legal_moves(false));
        assert_eq!(picker.remaining(), 20);
        picker.next();
        assert_eq!(picker.remaining(), 19);
        assert_eq!(picker.count(), 19);
    }
}
