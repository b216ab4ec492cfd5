//! The position contract consumed by the search.
//!
//! The search never generates moves or hashes boards itself. Everything it
//! needs from the game lives behind [`Position`]: legal move generation,
//! make/undo in strict LIFO order, terminal-state queries, a 64-bit
//! fingerprint and the piece sets used by the evaluator and move orderer.
//!
//! [`ChessPosition`] implements the contract on top of the `chess` crate.

mod chess_board;

pub use chess_board::{ChessPosition, TaggedMove};

use crate::types::{BitBoard, Color, Hash, Piece, Square};
use std::fmt::Debug;
use std::hash::Hash as StdHash;
use std::ops::{Deref, DerefMut};

/// What the move orderer needs to know about a move.
pub trait SearchMove: Copy + Eq + StdHash + Debug {
    /// Kind of the piece being moved
    fn moving_piece(&self) -> Piece;

    /// Kind of the piece being captured, if any (en passant included)
    fn captured_piece(&self) -> Option<Piece>;

    /// Destination square
    fn target(&self) -> Square;

    #[inline]
    fn is_capture(&self) -> bool {
        self.captured_piece().is_some()
    }
}

/// Mutable game state driven by the search.
pub trait Position {
    type Move: SearchMove;

    /// Legal moves in the current position, or only the capturing ones
    fn legal_moves(&self, captures_only: bool) -> Vec<Self::Move>;

    /// Apply a legal move
    fn make_move(&mut self, mv: Self::Move);

    /// Revert the most recently made move. Calls must nest with `make_move`.
    fn undo_move(&mut self, mv: Self::Move);

    fn is_checkmate(&self) -> bool;

    fn is_draw(&self) -> bool;

    fn is_in_check(&self) -> bool;

    /// Stable 64-bit position hash
    fn fingerprint(&self) -> Hash;

    fn side_to_move(&self) -> Color;

    /// Squares holding pieces of the given kind and colour
    fn pieces(&self, piece: Piece, color: Color) -> BitBoard;

    /// Every square attacked by a pawn of `by`
    fn pawn_attacks(&self, by: Color) -> BitBoard;

    /// Make `mv` and return a guard that undoes it when dropped.
    #[inline]
    fn play(&mut self, mv: Self::Move) -> Played<'_, Self>
    where
        Self: Sized,
    {
        self.make_move(mv);
        Played { position: self, mv }
    }
}

/// A move that is undone when the guard goes out of scope.
///
/// Early returns out of a search node (cutoffs, time aborts via `?`) drop the
/// guard, so the position always unwinds in LIFO order.
pub struct Played<'a, P: Position> {
    position: &'a mut P,
    mv: P::Move,
}

impl<P: Position> Played<'_, P> {
    /// The move this guard will undo
    #[inline]
    pub fn mv(&self) -> P::Move {
        self.mv
    }
}

impl<P: Position> Deref for Played<'_, P> {
    type Target = P;

    #[inline]
    fn deref(&self) -> &P {
        self.position
    }
}

impl<P: Position> DerefMut for Played<'_, P> {
    #[inline]
    fn deref_mut(&mut self) -> &mut P {
        self.position
    }
}

impl<P: Position> Drop for Played<'_, P> {
    #[inline]
    fn drop(&mut self) {
        self.position.undo_move(self.mv);
    }
}
