pub mod attacks;
pub mod board;
pub mod error;
pub mod game;
pub mod movegen;
pub mod moves;

pub use board::{Board, Color, Piece, PieceKind, Square, START_FEN};
pub use error::{FenError, MoveError};
pub use game::{GameState, GameStatus};
pub use moves::Move;
