//! Static evaluation.
//!
//! Material balance from the side to move's point of view plus a pawn
//! placement table. Terminal positions short-circuit: checkmate scores as the
//! mated sentinel and any draw as exactly zero.

use crate::position::Position;
use crate::types::{piece_value, Color, Piece, Score, Value, ALL_COLORS, ALL_PIECES};

// Pawn placement bonus, indexed by square (a1 = 0) for white pawns and by
// `63 - square` for black pawns.
#[rustfmt::skip]
const PAWN_TABLE: [Value; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
    50, 50, 50, 50, 50, 50, 50, 50,
    10, 10, 20, 30, 30, 20, 10, 10,
     5,  5, 10, 25, 25, 10,  5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5, -5,-10,  0,  0,-10, -5,  5,
     5, 10, 10,-20,-20, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

/// Pawn placement bonus for a pawn of `color` on `square`
#[inline]
fn pawn_bonus(square: usize, color: Color) -> Value {
    match color {
        Color::White => PAWN_TABLE[square],
        Color::Black => PAWN_TABLE[63 - square],
    }
}

/// Evaluate the position for the side to move.
pub fn evaluate<P: Position>(position: &P) -> Score {
    if position.is_checkmate() {
        return Score::mated();
    }
    if position.is_draw() {
        return Score::draw();
    }
    Score::cp(material_and_placement(position))
}

/// Material (signed by side) plus pawn placement.
///
/// The placement bonus is credited to the mover whatever the pawn's colour.
fn material_and_placement<P: Position>(position: &P) -> Value {
    let us = position.side_to_move();
    let mut total: Value = 0;

    for &color in ALL_COLORS.iter() {
        for &piece in ALL_PIECES.iter() {
            let value = if color == us {
                piece_value(piece)
            } else {
                -piece_value(piece)
            };

            for square in position.pieces(piece, color) {
                total += value;
                if piece == Piece::Pawn {
                    total += pawn_bonus(square.to_index(), color);
                }
            }
        }
    }

    total
}
