//! Game state: board, side to move, king cache and move history.
//!
//! `make_move` and `undo_move` never check legality. Callers that accept
//! moves from outside should go through `try_make_move` (or validate against
//! `valid_moves` themselves).

use crate::attacks::{scan_king, KingScan};
use crate::board::{Board, Color, PieceKind, Square};
use crate::error::{FenError, MoveError};
use crate::movegen::legal_moves;
use crate::moves::{parse_squares, Move};
use log::{debug, trace, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Checkmate { winner: Color },
    Stalemate,
}

#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    side_to_move: Color,
    history: Vec<Move>,
    king_squares: [Square; 2],
    // clocks as loaded, before any move in `history`
    start_halfmove: u32,
    start_fullmove: u32,
    start_side: Color,
}

impl GameState {
    /// Standard starting position, white to move.
    pub fn new() -> Self {
        Self {
            board: Board::starting(),
            side_to_move: Color::White,
            history: Vec::with_capacity(256),
            king_squares: [Square::new(7, 4), Square::new(0, 4)],
            start_halfmove: 0,
            start_fullmove: 1,
            start_side: Color::White,
        }
    }

    /// Load a position from FEN. Castling and en-passant fields are accepted
    /// and ignored, the move clocks are optional.
    ///
    /// Rejects positions where the side not to move is in check: its king
    /// could be captured, and the board would lose a king.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let mut parts = fen.split_whitespace();
        let placement = parts.next().ok_or(FenError::MissingField("piece placement"))?;
        let side_part = parts.next().ok_or(FenError::MissingField("side to move"))?;
        let _castling = parts.next();
        let _en_passant = parts.next();
        let start_halfmove = parse_clock(parts.next(), 0)?;
        let start_fullmove = parse_clock(parts.next(), 1)?;
        if let Some(extra) = parts.next() {
            return Err(FenError::TrailingField(extra.to_string()));
        }
        if start_fullmove == 0 {
            return Err(FenError::InvalidClock("0".to_string()));
        }

        let board = Board::from_fen_placement(placement)?;
        let side_to_move = match side_part {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidSide(other.to_string())),
        };

        let mut king_squares = [Square::new(0, 0); 2];
        for color in [Color::White, Color::Black] {
            let kings = board.find_kings(color);
            if kings.len() != 1 {
                return Err(FenError::KingCount {
                    color,
                    found: kings.len(),
                });
            }
            king_squares[color as usize] = kings[0];
        }

        let waiting = side_to_move.opponent();
        if scan_king(&board, waiting, king_squares[waiting as usize]).in_check() {
            return Err(FenError::OppositeCheck(waiting));
        }

        Ok(Self {
            board,
            side_to_move,
            history: Vec::with_capacity(256),
            king_squares,
            start_halfmove,
            start_fullmove,
            start_side: side_to_move,
        })
    }

    /// FEN of the current position; castling and en passant are always "-".
    pub fn fen(&self) -> String {
        let side = match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        };
        format!(
            "{} {} - - {} {}",
            self.board.fen_placement(),
            side,
            self.halfmove_clock(),
            self.fullmove_number()
        )
    }

    /// Plies since the last pawn move or capture, counting the loaded clock.
    pub fn halfmove_clock(&self) -> u32 {
        let reset = self
            .history
            .iter()
            .rposition(|m| m.piece_moved.kind == PieceKind::Pawn || m.is_capture());
        match reset {
            Some(idx) => (self.history.len() - 1 - idx) as u32,
            None => self.start_halfmove + self.history.len() as u32,
        }
    }

    /// Move number, incremented after every black move.
    pub fn fullmove_number(&self) -> u32 {
        let offset = match self.start_side {
            Color::White => 0,
            Color::Black => 1,
        };
        self.start_fullmove + ((self.history.len() + offset) / 2) as u32
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn king_square(&self, color: Color) -> Square {
        self.king_squares[color as usize]
    }

    /// Apply `mv` without any legality check.
    pub fn make_move(&mut self, mv: Move) {
        trace!("make {} ({:?})", mv, mv.piece_moved);
        self.board.set(mv.start, None);
        self.board.set(mv.end, Some(mv.piece_moved));
        if mv.piece_moved.kind == PieceKind::King {
            self.king_squares[mv.piece_moved.color as usize] = mv.end;
        }
        self.side_to_move = self.side_to_move.opponent();
        self.history.push(mv);
    }

    /// Revert the last move. Returns None (and does nothing) on an empty history.
    pub fn undo_move(&mut self) -> Option<Move> {
        let mv = self.history.pop()?;
        trace!("undo {}", mv);
        self.board.set(mv.start, Some(mv.piece_moved));
        self.board.set(mv.end, mv.piece_captured);
        if mv.piece_moved.kind == PieceKind::King {
            self.king_squares[mv.piece_moved.color as usize] = mv.start;
        }
        self.side_to_move = self.side_to_move.opponent();
        Some(mv)
    }

    /// Checks against and pins on the side to move's king.
    pub fn scan(&self) -> KingScan {
        scan_king(
            &self.board,
            self.side_to_move,
            self.king_square(self.side_to_move),
        )
    }

    pub fn in_check(&self) -> bool {
        self.scan().in_check()
    }

    /// All legal moves for the side to move.
    pub fn valid_moves(&self) -> Vec<Move> {
        let scan = self.scan();
        let king_sq = self.king_square(self.side_to_move);
        let moves = legal_moves(&self.board, self.side_to_move, king_sq, &scan);
        debug!(
            "{:?} to move: {} checks, {} pins, {} legal moves",
            self.side_to_move,
            scan.checks.len(),
            scan.pins.len(),
            moves.len()
        );
        moves
    }

    pub fn status(&self) -> GameStatus {
        let scan = self.scan();
        let king_sq = self.king_square(self.side_to_move);
        if !legal_moves(&self.board, self.side_to_move, king_sq, &scan).is_empty() {
            return GameStatus::Ongoing;
        }
        if scan.in_check() {
            GameStatus::Checkmate {
                winner: self.side_to_move.opponent(),
            }
        } else {
            GameStatus::Stalemate
        }
    }

    /// Resolve "e2e4" notation against the current legal moves.
    pub fn parse_move(&self, notation: &str) -> Result<Move, MoveError> {
        let (start, end) = parse_squares(notation)?;
        self.valid_moves()
            .into_iter()
            .find(|m| m.start == start && m.end == end)
            .ok_or_else(|| MoveError::Illegal(notation.trim().to_string()))
    }

    /// Apply `mv` only if it is among the current legal moves.
    pub fn try_make_move(&mut self, mv: Move) -> Result<(), MoveError> {
        match self.valid_moves().into_iter().find(|m| *m == mv) {
            Some(legal) => {
                // use the generator's snapshot, not the caller's
                self.make_move(legal);
                Ok(())
            }
            None => {
                warn!("rejected illegal move {} in {}", mv, self.fen());
                Err(MoveError::Illegal(mv.notation()))
            }
        }
    }

    /// Count leaf nodes of the legal move tree to `depth`.
    pub fn perft(&mut self, depth: u8) -> u64 {
        if depth == 0 {
            return 1;
        }
        let moves = self.valid_moves();
        if depth == 1 {
            return moves.len() as u64;
        }
        let mut nodes = 0;
        for mv in moves {
            self.make_move(mv);
            nodes += self.perft(depth - 1);
            self.undo_move();
        }
        nodes
    }

    /// Per-move perft counts at the root, in generation order.
    ///
    /// Empty at depth 0, where there is no root move to attribute the single
    /// node to; use `perft(0)` for that count.
    pub fn perft_divide(&mut self, depth: u8) -> Vec<(Move, u64)> {
        let mut out = Vec::new();
        if depth == 0 {
            return out;
        }
        for mv in self.valid_moves() {
            self.make_move(mv);
            let nodes = self.perft(depth - 1);
            self.undo_move();
            out.push((mv, nodes));
        }
        out
    }
}

fn parse_clock(field: Option<&str>, default: u32) -> Result<u32, FenError> {
    match field {
        None => Ok(default),
        Some(s) => s
            .parse()
            .map_err(|_| FenError::InvalidClock(s.to_string())),
    }
}

impl Default for GameState {
    fn default() -> Self {
        GameState::new()
    }
}
