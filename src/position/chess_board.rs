//! [`Position`] adapter over the `chess` crate.
//!
//! `chess::Board` is a copy-make board, so undo is a stack of previous boards.
//! The crate has no notion of game history, so the adapter also tracks the
//! halfmove clock and uses the board stack for repetition detection.

use super::{Position, SearchMove};
use crate::error::PositionError;
use crate::types::{BitBoard, Board, BoardStatus, ChessMove, Color, Hash, MoveGen, Piece, Square, EMPTY};
use std::fmt;
use std::str::FromStr;

/// Halfmove clock value at which the fifty-move rule applies
const FIFTY_MOVE_PLIES: u32 = 100;

/// A legal move annotated with the piece kinds it involves.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TaggedMove {
    mv: ChessMove,
    moving: Piece,
    captured: Option<Piece>,
}

impl TaggedMove {
    /// The underlying `chess` crate move
    #[inline]
    pub fn chess_move(&self) -> ChessMove {
        self.mv
    }
}

impl SearchMove for TaggedMove {
    #[inline]
    fn moving_piece(&self) -> Piece {
        self.moving
    }

    #[inline]
    fn captured_piece(&self) -> Option<Piece> {
        self.captured
    }

    #[inline]
    fn target(&self) -> Square {
        self.mv.get_dest()
    }
}

impl fmt::Display for TaggedMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mv)
    }
}

#[derive(Clone, Debug)]
struct Snapshot {
    board: Board,
    halfmove_clock: u32,
    mv: TaggedMove,
}

/// A chess game position with undo support.
#[derive(Clone, Debug)]
pub struct ChessPosition {
    board: Board,
    halfmove_clock: u32,
    history: Vec<Snapshot>,
}

impl ChessPosition {
    /// Wrap an existing board with a fresh history
    pub fn new(board: Board) -> Self {
        Self {
            board,
            halfmove_clock: 0,
            history: Vec::new(),
        }
    }

    /// Parse a FEN string. The halfmove clock field is honoured when present.
    pub fn from_fen(fen: &str) -> Result<Self, PositionError> {
        let board = Board::from_str(fen).map_err(|e| PositionError::InvalidFen {
            fen: fen.to_string(),
            reason: format!("{:?}", e),
        })?;
        let halfmove_clock = fen
            .split_whitespace()
            .nth(4)
            .and_then(|field| field.parse().ok())
            .unwrap_or(0);

        Ok(Self {
            board,
            halfmove_clock,
            history: Vec::new(),
        })
    }

    /// Current board
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Number of moves made through this adapter and not yet undone
    #[inline]
    pub fn ply_count(&self) -> usize {
        self.history.len()
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Annotate a move of the current position, `None` if no piece stands on its source
    pub fn tag(&self, mv: ChessMove) -> Option<TaggedMove> {
        let moving = self.board.piece_on(mv.get_source())?;
        let captured = self.board.piece_on(mv.get_dest()).or_else(|| {
            // A pawn changing file onto an empty square is an en passant capture
            let diagonal = mv.get_source().get_file() != mv.get_dest().get_file();
            (moving == Piece::Pawn && diagonal).then_some(Piece::Pawn)
        });

        Some(TaggedMove {
            mv,
            moving,
            captured,
        })
    }

    /// Find the legal move matching a UCI string such as `e2e4` or `e7e8q`
    pub fn find_move(&self, uci: &str) -> Option<TaggedMove> {
        self.legal_moves(false)
            .into_iter()
            .find(|m| m.chess_move().to_string() == uci.trim())
    }

    fn is_repetition(&self) -> bool {
        let hash = self.board.get_hash();
        self.history
            .iter()
            .rev()
            .take(self.halfmove_clock as usize)
            .any(|snapshot| snapshot.board.get_hash() == hash)
    }

    fn is_insufficient_material(&self) -> bool {
        let board = &self.board;
        let heavy = *board.pieces(Piece::Pawn) | *board.pieces(Piece::Rook) | *board.pieces(Piece::Queen);
        if heavy != EMPTY {
            return false;
        }

        let knights = *board.pieces(Piece::Knight);
        let bishops = *board.pieces(Piece::Bishop);
        if (knights | bishops).popcnt() <= 1 {
            return true;
        }

        // KB vs KB with both bishops on the same square colour
        let white_bishops = bishops & *board.color_combined(Color::White);
        if knights != EMPTY || bishops.popcnt() != 2 || white_bishops.popcnt() != 1 {
            return false;
        }
        let mut shades = bishops.map(|sq| (sq.get_rank().to_index() + sq.get_file().to_index()) % 2);
        shades.next() == shades.next()
    }
}

impl Default for ChessPosition {
    fn default() -> Self {
        Self::new(Board::default())
    }
}

impl Position for ChessPosition {
    type Move = TaggedMove;

    fn legal_moves(&self, captures_only: bool) -> Vec<TaggedMove> {
        MoveGen::new_legal(&self.board)
            .filter_map(|mv| self.tag(mv))
            .filter(|m| !captures_only || m.is_capture())
            .collect()
    }

    fn make_move(&mut self, mv: TaggedMove) {
        let next = self.board.make_move_new(mv.chess_move());
        let previous = std::mem::replace(&mut self.board, next);
        self.history.push(Snapshot {
            board: previous,
            halfmove_clock: self.halfmove_clock,
            mv,
        });

        if mv.moving_piece() == Piece::Pawn || mv.is_capture() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
    }

    fn undo_move(&mut self, mv: TaggedMove) {
        match self.history.pop() {
            Some(snapshot) => {
                debug_assert_eq!(snapshot.mv, mv, "undo must mirror the last made move");
                self.board = snapshot.board;
                self.halfmove_clock = snapshot.halfmove_clock;
            }
            None => log::warn!("undo of {} with an empty move history ignored", mv),
        }
    }

    #[inline]
    fn is_checkmate(&self) -> bool {
        self.board.status() == BoardStatus::Checkmate
    }

    fn is_draw(&self) -> bool {
        self.board.status() == BoardStatus::Stalemate
            || self.halfmove_clock >= FIFTY_MOVE_PLIES
            || self.is_insufficient_material()
            || self.is_repetition()
    }

    #[inline]
    fn is_in_check(&self) -> bool {
        *self.board.checkers() != EMPTY
    }

    #[inline]
    fn fingerprint(&self) -> Hash {
        self.board.get_hash()
    }

    #[inline]
    fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    #[inline]
    fn pieces(&self, piece: Piece, color: Color) -> BitBoard {
        *self.board.pieces(piece) & *self.board.color_combined(color)
    }

    fn pawn_attacks(&self, by: Color) -> BitBoard {
        self.pieces(Piece::Pawn, by)
            .fold(EMPTY, |acc, sq| acc | chess::get_pawn_attacks(sq, by, !EMPTY))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play_uci(position: &mut ChessPosition, moves: &[&str]) {
        for uci in moves {
            let mv = position.find_move(uci).expect("legal move");
            position.make_move(mv);
        }
    }

    #[test]
    fn test_start_position_has_twenty_moves() {
        let position = ChessPosition::default();
        assert_eq!(position.legal_moves(false).len(), 20);
        assert!(position.legal_moves(true).is_empty());
        assert_eq!(position.side_to_move(), Color::White);
    }

    #[test]
    fn test_invalid_fen_is_rejected() {
        let err = ChessPosition::from_fen("not a fen").unwrap_err();
        assert!(matches!(err, PositionError::InvalidFen { .. }));
    }

    #[test]
    fn test_undo_restores_fingerprint_for_every_move() {
        let mut position =
            ChessPosition::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
                .unwrap();
        let before = position.fingerprint();
        for mv in position.legal_moves(false) {
            position.make_move(mv);
            position.undo_move(mv);
            assert_eq!(position.fingerprint(), before, "{}", mv);
        }
        assert_eq!(position.ply_count(), 0);
    }

    #[test]
    fn test_en_passant_is_a_capture() {
        let position = ChessPosition::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").unwrap();
        let captures = position.legal_moves(true);
        assert_eq!(captures.len(), 1);
        assert_eq!(captures[0].captured_piece(), Some(Piece::Pawn));
        assert_eq!(captures[0].to_string(), "e5d6");
    }

    #[test]
    fn test_capture_tags_pieces() {
        let position = ChessPosition::from_fen("4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1").unwrap();
        let capture = position.find_move("d2d5").unwrap();
        assert_eq!(capture.moving_piece(), Piece::Rook);
        assert_eq!(capture.captured_piece(), Some(Piece::Queen));
        assert_eq!(capture.target(), Square::D5);
    }

    #[test]
    fn test_checkmate_and_check() {
        // Fool's mate
        let mut position = ChessPosition::default();
        play_uci(&mut position, &["f2f3", "e7e5", "g2g4", "d8h4"]);
        assert!(position.is_checkmate());
        assert!(position.is_in_check());
        assert!(!position.is_draw());
    }

    #[test]
    fn test_stalemate_is_draw() {
        let position = ChessPosition::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(!position.is_checkmate());
        assert!(position.is_draw());
    }

    #[test]
    fn test_repetition_is_draw() {
        let mut position = ChessPosition::default();
        assert!(!position.is_draw());
        play_uci(&mut position, &["g1f3", "g8f6", "f3g1", "f6g8"]);
        assert!(position.is_draw());
    }

    #[test]
    fn test_fifty_move_rule() {
        let position = ChessPosition::from_fen("4k3/8/8/8/8/8/4P3/R3K3 w - - 100 80").unwrap();
        assert_eq!(position.halfmove_clock(), 100);
        assert!(position.is_draw());
    }

    #[test]
    fn test_insufficient_material() {
        let bare_kings = ChessPosition::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert!(bare_kings.is_draw());

        let lone_knight = ChessPosition::from_fen("4k3/8/8/8/8/8/8/4KN2 w - - 0 1").unwrap();
        assert!(lone_knight.is_draw());

        // c1 and f8 are both dark squares
        let same_bishops = ChessPosition::from_fen("5b1k/8/8/8/8/8/8/2B4K w - - 0 1").unwrap();
        assert!(same_bishops.is_draw());

        let opposite_bishops = ChessPosition::from_fen("4kb2/8/8/8/8/8/8/4KB2 w - - 0 1").unwrap();
        assert!(!opposite_bishops.is_draw());

        let rook = ChessPosition::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        assert!(!rook.is_draw());
    }

    #[test]
    fn test_pawn_attacks() {
        let position = ChessPosition::from_fen("4k3/8/8/3p4/8/8/8/4K3 w - - 0 1").unwrap();
        let attacks = position.pawn_attacks(Color::Black);
        assert_eq!(attacks.popcnt(), 2);
        assert_ne!(attacks & BitBoard::from_square(Square::C4), EMPTY);
        assert_ne!(attacks & BitBoard::from_square(Square::E4), EMPTY);
        assert_eq!(position.pawn_attacks(Color::White), EMPTY);
    }
}
