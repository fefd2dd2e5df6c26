// Per-piece move generation and check resolution.
//
// Non-king moves come out pseudo-legal apart from pin restriction; king moves
// are probed for safety as they are generated. `legal_moves` then narrows the
// list according to the number of checks reported by the scan.

use crate::attacks::{is_square_safe, Check, KingScan};
use crate::board::{
    Board, Color, Offset, Piece, PieceKind, Square, DIAGONAL, KING_OFFSETS, KNIGHT_OFFSETS,
    ORTHOGONAL,
};
use crate::moves::Move;

/// True when a step along `dir` keeps a piece on its pin axis.
fn along_pin(pin: Option<Offset>, dir: Offset) -> bool {
    match pin {
        None => true,
        Some(axis) => axis == dir || axis == (-dir.0, -dir.1),
    }
}

fn pawn_moves(board: &Board, from: Square, pawn: Piece, pin: Option<Offset>, out: &mut Vec<Move>) {
    let fwd = pawn.color.forward();
    let push = (fwd, 0);
    if along_pin(pin, push) {
        // a pawn on the last rank has nowhere to go (no promotion)
        if let Some(one) = from.offset(push, 1) {
            if board.get(one).is_none() {
                out.push(Move::with_piece(from, one, pawn, board));
                if from.row == pawn.color.pawn_start_row() {
                    if let Some(two) = from.offset(push, 2) {
                        if board.get(two).is_none() {
                            out.push(Move::with_piece(from, two, pawn, board));
                        }
                    }
                }
            }
        }
    }
    for dc in [-1, 1] {
        let dir = (fwd, dc);
        if !along_pin(pin, dir) {
            continue;
        }
        if let Some(to) = from.offset(dir, 1) {
            if board.color_at(to) == Some(pawn.color.opponent()) {
                out.push(Move::with_piece(from, to, pawn, board));
            }
        }
    }
}

fn knight_moves(board: &Board, from: Square, knight: Piece, pin: Option<Offset>, out: &mut Vec<Move>) {
    // no knight jump stays on a line through the king
    if pin.is_some() {
        return;
    }
    for off in KNIGHT_OFFSETS {
        if let Some(to) = from.offset(off, 1) {
            if board.color_at(to) != Some(knight.color) {
                out.push(Move::with_piece(from, to, knight, board));
            }
        }
    }
}

fn slider_moves(
    board: &Board,
    from: Square,
    piece: Piece,
    directions: &[Offset],
    pin: Option<Offset>,
    out: &mut Vec<Move>,
) {
    for &dir in directions {
        if !along_pin(pin, dir) {
            continue;
        }
        for step in 1..8 {
            let Some(to) = from.offset(dir, step) else {
                break;
            };
            match board.get(to) {
                None => out.push(Move::with_piece(from, to, piece, board)),
                Some(target) => {
                    if target.color != piece.color {
                        out.push(Move::with_piece(from, to, piece, board));
                    }
                    break;
                }
            }
        }
    }
}

fn king_moves(board: &Board, from: Square, king: Piece, out: &mut Vec<Move>) {
    for off in KING_OFFSETS {
        let Some(to) = from.offset(off, 1) else {
            continue;
        };
        if board.color_at(to) == Some(king.color) {
            continue;
        }
        if is_square_safe(board, king.color, to) {
            out.push(Move::with_piece(from, to, king, board));
        }
    }
}

/// Moves for the piece on `from`, restricted by any pin recorded in `scan`.
pub fn piece_moves(board: &Board, from: Square, piece: Piece, scan: &KingScan, out: &mut Vec<Move>) {
    let pin = scan.pin_on(from);
    match piece.kind {
        PieceKind::Pawn => pawn_moves(board, from, piece, pin, out),
        PieceKind::Knight => knight_moves(board, from, piece, pin, out),
        PieceKind::Bishop => slider_moves(board, from, piece, &DIAGONAL, pin, out),
        PieceKind::Rook => slider_moves(board, from, piece, &ORTHOGONAL, pin, out),
        PieceKind::Queen => {
            // both passes see the same pin record
            slider_moves(board, from, piece, &ORTHOGONAL, pin, out);
            slider_moves(board, from, piece, &DIAGONAL, pin, out);
        }
        PieceKind::King => king_moves(board, from, piece, out),
    }
}

/// Pin-restricted moves for every `side` piece; king moves are already safe.
pub fn pseudo_legal_moves(board: &Board, side: Color, scan: &KingScan) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    for (sq, piece) in board.occupied() {
        if piece.color == side {
            piece_moves(board, sq, piece, scan, &mut out);
        }
    }
    out
}

/// Squares a non-king piece may move to in order to resolve a single check.
pub fn resolving_squares(board: &Board, king_sq: Square, check: &Check) -> Vec<Square> {
    let knight_check = board
        .get(check.square)
        .is_some_and(|p| p.kind == PieceKind::Knight);
    if knight_check {
        return vec![check.square];
    }
    let mut squares = Vec::with_capacity(7);
    for step in 1..8 {
        let Some(sq) = king_sq.offset(check.direction, step) else {
            break;
        };
        squares.push(sq);
        if sq == check.square {
            break;
        }
    }
    squares
}

/// Legal moves for `side`, given the scan of its king on `king_sq`.
pub fn legal_moves(board: &Board, side: Color, king_sq: Square, scan: &KingScan) -> Vec<Move> {
    match scan.checks.as_slice() {
        [] => pseudo_legal_moves(board, side, scan),
        [check] => {
            let targets = resolving_squares(board, king_sq, check);
            let mut moves = pseudo_legal_moves(board, side, scan);
            moves.retain(|m| m.piece_moved.kind == PieceKind::King || targets.contains(&m.end));
            moves
        }
        _ => {
            let mut moves = Vec::with_capacity(8);
            if let Some(king) = board.get(king_sq) {
                king_moves(board, king_sq, king, &mut moves);
            }
            moves
        }
    }
}
