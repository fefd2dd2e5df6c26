//! Single-ply move values.
//!
//! A `Move` snapshots the moving and captured pieces at construction time so
//! that `GameState::undo_move` can restore the board without any extra record.

use crate::board::{Board, Piece, Square};
use crate::error::MoveError;
use std::fmt;
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone, Copy)]
pub struct Move {
    pub start: Square,
    pub end: Square,
    pub piece_moved: Piece,
    pub piece_captured: Option<Piece>,
}

impl Move {
    /// Build a move from the current board contents.
    ///
    /// The captured piece is sampled now, so this must be called before the
    /// move is applied.
    pub fn new(start: Square, end: Square, board: &Board) -> Result<Move, MoveError> {
        let piece_moved = board
            .get(start)
            .ok_or_else(|| MoveError::EmptyOrigin(start.to_string()))?;
        Ok(Move::with_piece(start, end, piece_moved, board))
    }

    pub(crate) fn with_piece(start: Square, end: Square, piece_moved: Piece, board: &Board) -> Move {
        Move {
            start,
            end,
            piece_moved,
            piece_captured: board.get(end),
        }
    }

    /// Geometric identity: start row, start col, end row, end col as decimal digits.
    ///
    /// Two moves over the same squares compare equal even if the pieces differ.
    pub fn id(&self) -> u16 {
        (self.start.row * 1000 + self.start.col * 100 + self.end.row * 10 + self.end.col) as u16
    }

    pub fn is_capture(&self) -> bool {
        self.piece_captured.is_some()
    }

    /// "e2e4" style coordinate notation.
    pub fn notation(&self) -> String {
        format!("{}{}", self.start, self.end)
    }
}

/// Split "e2e4" into its two squares.
pub fn parse_squares(notation: &str) -> Result<(Square, Square), MoveError> {
    let bad = || MoveError::BadNotation(notation.to_string());
    let trimmed = notation.trim();
    if trimmed.len() != 4 || !trimmed.is_ascii() {
        return Err(bad());
    }
    let start = Square::from_notation(&trimmed[0..2]).ok_or_else(bad)?;
    let end = Square::from_notation(&trimmed[2..4]).ok_or_else(bad)?;
    Ok((start, end))
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.start, self.end)
    }
}
