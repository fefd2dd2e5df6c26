//! Error types for position loading and move handling.

use crate::board::Color;

/// Errors raised while parsing a FEN string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    #[error("missing {0} field")]
    MissingField(&'static str),

    #[error("invalid piece char '{0}'")]
    InvalidPiece(char),

    #[error("rank {rank} does not describe exactly 8 files")]
    BadRank { rank: usize },

    #[error("expected 8 ranks, found {0}")]
    RankCount(usize),

    #[error("invalid side char '{0}'")]
    InvalidSide(String),

    #[error("expected exactly one {color:?} king, found {found}")]
    KingCount { color: Color, found: usize },

    #[error("{0:?} is in check but not to move")]
    OppositeCheck(Color),

    #[error("invalid move clock '{0}'")]
    InvalidClock(String),

    #[error("unexpected trailing field '{0}'")]
    TrailingField(String),
}

/// Errors raised while building or applying a move.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("invalid move notation '{0}'")]
    BadNotation(String),

    #[error("no piece on origin square {0}")]
    EmptyOrigin(String),

    #[error("illegal move {0}")]
    Illegal(String),
}
