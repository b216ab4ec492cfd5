//! Core types for the search engine.
//!
//! Board-level vocabulary (squares, pieces, colours, bitboards) comes straight
//! from the `chess` crate so that the position adapter and the search agree on
//! a single source of truth. Search-specific types (`Score`, `Depth`, `Ply`)
//! are defined here.

mod depth;
mod score;

pub use depth::{Depth, Ply, MAX_DEPTH};
pub use score::{Score, ROOT_ALPHA, SCORE_DRAW, SCORE_DRAW_AVOID, SCORE_INFINITY, SCORE_MATE};

// Re-export chess crate types as canonical types
pub use chess::{
    BitBoard, Board, BoardStatus, ChessMove, Color, MoveGen, Piece, Square, ALL_COLORS,
    ALL_PIECES, EMPTY,
};

/// Position fingerprint type (used for the transposition cache)
pub type Hash = u64;

/// Node count type
pub type NodeCount = u64;

/// Centipawn value type (for piece values, etc.)
pub type Value = i32;

// Piece values in centipawns
pub const PAWN_VALUE: Value = 100;
pub const KNIGHT_VALUE: Value = 300;
pub const BISHOP_VALUE: Value = 300;
pub const ROOK_VALUE: Value = 500;
pub const QUEEN_VALUE: Value = 900;
pub const KING_VALUE: Value = 10000;

/// Get the material value of a piece in centipawns
#[inline]
pub const fn piece_value(piece: Piece) -> Value {
    match piece {
        Piece::Pawn => PAWN_VALUE,
        Piece::Knight => KNIGHT_VALUE,
        Piece::Bishop => BISHOP_VALUE,
        Piece::Rook => ROOK_VALUE,
        Piece::Queen => QUEEN_VALUE,
        Piece::King => KING_VALUE,
    }
}
