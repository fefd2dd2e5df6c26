// Board model: row 0 is the black back rank (rank 8), row 7 the white back rank (rank 1).
// Column 0 is file a, column 7 is file h.

use crate::error::FenError;
use std::fmt;
use std::ops::Index;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    pub fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta of a single pawn step for this color.
    pub fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Row from which this color's pawns may advance two squares.
    pub fn pawn_start_row(self) -> usize {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    pub fn from_fen_char(ch: char) -> Option<Piece> {
        let color = if ch.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = match ch.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        Some(Piece { color, kind })
    }

    pub fn fen_char(self) -> char {
        let ch = match self.kind {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match self.color {
            Color::White => ch.to_ascii_uppercase(),
            Color::Black => ch,
        }
    }
}

/// Step vector as (row delta, col delta).
pub type Offset = (i8, i8);

pub const ORTHOGONAL: [Offset; 4] = [(-1, 0), (0, -1), (1, 0), (0, 1)];
pub const DIAGONAL: [Offset; 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
pub const KNIGHT_OFFSETS: [Offset; 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];
pub const KING_OFFSETS: [Offset; 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

pub fn is_orthogonal(dir: Offset) -> bool {
    (dir.0 == 0) != (dir.1 == 0)
}

pub fn is_diagonal(dir: Offset) -> bool {
    dir.0 != 0 && dir.0.abs() == dir.1.abs()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    pub row: usize,
    pub col: usize,
}

impl Square {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Square `steps` times `dir` away, or None when it falls off the board.
    pub fn offset(self, dir: Offset, steps: i8) -> Option<Square> {
        let row = self.row as i8 + dir.0 * steps;
        let col = self.col as i8 + dir.1 * steps;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Square::new(row as usize, col as usize))
        } else {
            None
        }
    }

    /// Parse "e2" style coordinates.
    pub fn from_notation(s: &str) -> Option<Square> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let (file, rank) = (bytes[0], bytes[1]);
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return None;
        }
        Some(Square::new(7 - (rank - b'1') as usize, (file - b'a') as usize))
    }

    pub fn file_char(self) -> char {
        (b'a' + self.col as u8) as char
    }

    pub fn rank_char(self) -> char {
        (b'8' - self.row as u8) as char
    }

    /// Iterate all 64 squares row by row from a8 to h1.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8).flat_map(|row| (0..8).map(move |col| Square::new(row, col)))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1";

/// 8x8 grid of occupants. Indexing out of range panics.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Piece>; 8]; 8],
}

impl Board {
    pub fn empty() -> Self {
        Self {
            cells: [[None; 8]; 8],
        }
    }

    pub fn starting() -> Self {
        const BACK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        let mut board = Board::empty();
        for (col, &kind) in BACK.iter().enumerate() {
            board.cells[0][col] = Some(Piece::new(Color::Black, kind));
            board.cells[1][col] = Some(Piece::new(Color::Black, PieceKind::Pawn));
            board.cells[6][col] = Some(Piece::new(Color::White, PieceKind::Pawn));
            board.cells[7][col] = Some(Piece::new(Color::White, kind));
        }
        board
    }

    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.cells[sq.row][sq.col]
    }

    pub fn set(&mut self, sq: Square, occupant: Option<Piece>) {
        self.cells[sq.row][sq.col] = occupant;
    }

    pub fn color_at(&self, sq: Square) -> Option<Color> {
        self.get(sq).map(|p| p.color)
    }

    /// All occupied squares with their pieces, a8 first.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.get(sq).map(|p| (sq, p)))
    }

    pub fn find_kings(&self, color: Color) -> Vec<Square> {
        self.occupied()
            .filter(|(_, p)| p.color == color && p.kind == PieceKind::King)
            .map(|(sq, _)| sq)
            .collect()
    }

    /// Parse the piece-placement field of a FEN string.
    pub fn from_fen_placement(placement: &str) -> Result<Board, FenError> {
        let mut board = Board::empty();
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::RankCount(ranks.len()));
        }
        // FEN lists rank 8 first, which is row 0 here
        for (row, rank_part) in ranks.iter().enumerate() {
            let mut col = 0usize;
            for ch in rank_part.chars() {
                if let Some(skip) = ch.to_digit(10) {
                    if skip == 0 {
                        return Err(FenError::BadRank { rank: 8 - row });
                    }
                    col += skip as usize;
                } else {
                    let piece = Piece::from_fen_char(ch).ok_or(FenError::InvalidPiece(ch))?;
                    if col >= 8 {
                        return Err(FenError::BadRank { rank: 8 - row });
                    }
                    board.cells[row][col] = Some(piece);
                    col += 1;
                }
            }
            if col != 8 {
                return Err(FenError::BadRank { rank: 8 - row });
            }
        }
        Ok(board)
    }

    pub fn fen_placement(&self) -> String {
        let mut out = String::with_capacity(72);
        for row in 0..8 {
            let mut empty = 0;
            for col in 0..8 {
                match self.cells[row][col] {
                    Some(p) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(p.fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
            if row < 7 {
                out.push('/');
            }
        }
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::starting()
    }
}

impl Index<Square> for Board {
    type Output = Option<Piece>;

    fn index(&self, sq: Square) -> &Self::Output {
        &self.cells[sq.row][sq.col]
    }
}

// Griglia testuale, rank 8 in alto
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8 {
            for col in 0..8 {
                match self.cells[row][col] {
                    Some(p) => write!(f, "{} ", p.fen_char())?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self.fen_placement())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_board_matches_start_fen() {
        let parsed = Board::from_fen_placement(START_FEN.split(' ').next().unwrap()).unwrap();
        assert_eq!(parsed, Board::starting());
        assert_eq!(
            parsed[Square::new(7, 4)],
            Some(Piece::new(Color::White, PieceKind::King))
        );
        assert_eq!(parsed[Square::new(4, 4)], None);
        assert_eq!(
            Board::starting().fen_placement(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"
        );
    }

    #[test]
    fn square_notation_uses_row_zero_as_rank_eight() {
        assert_eq!(Square::from_notation("a8"), Some(Square::new(0, 0)));
        assert_eq!(Square::from_notation("h1"), Some(Square::new(7, 7)));
        assert_eq!(Square::from_notation("e2"), Some(Square::new(6, 4)));
        assert_eq!(Square::new(4, 4).to_string(), "e4");
        assert_eq!(Square::from_notation("i1"), None);
        assert_eq!(Square::from_notation("a9"), None);
    }

    #[test]
    fn offset_stays_on_board() {
        let corner = Square::new(0, 0);
        assert_eq!(corner.offset((-1, 0), 1), None);
        assert_eq!(corner.offset((1, 1), 7), Some(Square::new(7, 7)));
        assert_eq!(corner.offset((1, 1), 8), None);
    }

    #[test]
    fn rejects_malformed_placement() {
        assert_eq!(
            Board::from_fen_placement("8/8/8/8/8/8/8"),
            Err(FenError::RankCount(7))
        );
        assert_eq!(
            Board::from_fen_placement("9/8/8/8/8/8/8/8"),
            Err(FenError::BadRank { rank: 8 })
        );
        assert_eq!(
            Board::from_fen_placement("4k3/08/8/8/8/8/8/4K3"),
            Err(FenError::BadRank { rank: 7 })
        );
        assert_eq!(
            Board::from_fen_placement("8/8/8/8/8/8/8/7x"),
            Err(FenError::InvalidPiece('x'))
        );
    }

    #[test]
    #[should_panic]
    fn out_of_range_square_panics() {
        let board = Board::empty();
        let _ = board.get(Square::new(8, 0));
    }

    #[test]
    fn ray_classification() {
        assert!(ORTHOGONAL.iter().all(|&d| is_orthogonal(d) && !is_diagonal(d)));
        assert!(DIAGONAL.iter().all(|&d| is_diagonal(d) && !is_orthogonal(d)));
        assert!(KNIGHT_OFFSETS.iter().all(|&d| !is_diagonal(d) && !is_orthogonal(d)));
    }
}
