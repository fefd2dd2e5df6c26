//! Ray-cast check and pin detection around a king square.
//!
//! The scan walks the 8 ray directions outward from the king and probes the 8
//! knight offsets. The ally king is treated as an empty square during the walk,
//! which lets the same routine answer "would the king be attacked on this
//! square" for king moves without touching the board.

use crate::board::{
    is_diagonal, is_orthogonal, Board, Color, Offset, Piece, PieceKind, Square, DIAGONAL,
    KNIGHT_OFFSETS, ORTHOGONAL,
};

/// A friendly piece that may only move along `direction` (or its opposite).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pin {
    pub square: Square,
    /// Unit step from the king through the pinned piece toward the pinner.
    pub direction: Offset,
}

/// An enemy piece giving check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Check {
    pub square: Square,
    /// Unit step from the king toward a slider, or the knight offset for knight checks.
    pub direction: Offset,
}

/// Result of one detector run; recomputed for every generation call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KingScan {
    pub pins: Vec<Pin>,
    pub checks: Vec<Check>,
}

impl KingScan {
    pub fn in_check(&self) -> bool {
        !self.checks.is_empty()
    }

    pub fn pin_on(&self, sq: Square) -> Option<Offset> {
        self.pins.iter().find(|p| p.square == sq).map(|p| p.direction)
    }
}

/// Whether `attacker`, the first enemy piece `distance` steps along `dir` from
/// the king, attacks back along that ray.
fn attacks_along_ray(attacker: Piece, dir: Offset, distance: i8) -> bool {
    match attacker.kind {
        PieceKind::Rook => is_orthogonal(dir),
        PieceKind::Bishop => is_diagonal(dir),
        PieceKind::Queen => true,
        PieceKind::King => distance == 1,
        // the pawn stands one step diagonally "behind" its own forward direction
        PieceKind::Pawn => distance == 1 && is_diagonal(dir) && dir.0 == -attacker.color.forward(),
        PieceKind::Knight => false,
    }
}

/// Scan for checks against, and pins on, the `ally` king standing on `king_sq`.
pub fn scan_king(board: &Board, ally: Color, king_sq: Square) -> KingScan {
    let mut scan = KingScan::default();

    for dir in ORTHOGONAL.into_iter().chain(DIAGONAL) {
        let mut candidate: Option<Square> = None;
        for step in 1..8 {
            let Some(sq) = king_sq.offset(dir, step) else {
                break;
            };
            let Some(piece) = board.get(sq) else {
                continue;
            };
            if piece.color == ally {
                if piece.kind == PieceKind::King {
                    continue;
                }
                if candidate.is_some() {
                    // two friendly pieces shield the king
                    break;
                }
                candidate = Some(sq);
                continue;
            }
            if attacks_along_ray(piece, dir, step) {
                match candidate {
                    None => scan.checks.push(Check { square: sq, direction: dir }),
                    Some(pinned) => scan.pins.push(Pin {
                        square: pinned,
                        direction: dir,
                    }),
                }
            }
            break;
        }
    }

    for off in KNIGHT_OFFSETS {
        let Some(sq) = king_sq.offset(off, 1) else {
            continue;
        };
        if board.get(sq) == Some(Piece::new(ally.opponent(), PieceKind::Knight)) {
            scan.checks.push(Check {
                square: sq,
                direction: off,
            });
        }
    }

    scan
}

/// True when an `ally` king standing on `sq` would not be in check.
pub fn is_square_safe(board: &Board, ally: Color, sq: Square) -> bool {
    !scan_king(board, ally, sq).in_check()
}
