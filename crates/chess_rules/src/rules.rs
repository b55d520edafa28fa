//! Move legality for individual pieces.
//!
//! Everything here is a read-only predicate over a [`Board`]. Whether a move
//! leaves the mover's own king attacked is decided by [`crate::game::Game`],
//! not here, so attack detection can reuse [`is_valid_move`] directly.

use crate::{board::Board, types::*};

/// Is `from -> to` a geometrically legal move for the piece on `from`?
///
/// `last_move` is the move played just before, needed for en passant.
/// Returns false for an empty `from`, for `from == to` and for any rule
/// violation; never panics.
pub fn is_valid_move(
    board: &Board,
    last_move: Option<MoveRecord>,
    from: Square,
    to: Square,
) -> bool {
    let pc = match board.piece_at(from) {
        Some(p) => p,
        None => return false,
    };
    if from == to {
        return false;
    }
    if let Some(target) = board.piece_at(to)
        && target.color == pc.color
    {
        return false;
    }

    match pc.kind {
        PieceKind::Pawn => valid_pawn(board, last_move, pc.color, from, to),
        PieceKind::Rook => valid_rook(board, from, to),
        PieceKind::Knight => valid_knight(from, to),
        PieceKind::Bishop => valid_bishop(board, from, to),
        PieceKind::Queen => valid_rook(board, from, to) || valid_bishop(board, from, to),
        PieceKind::King => valid_king(from, to),
    }
}

/// True if every square strictly between `from` and `to` is empty.
///
/// Steps one square at a time along the row, column or diagonal joining the
/// two squares. Adjacent squares pass trivially. Callers only pass squares
/// that share a line.
pub fn is_path_clear(board: &Board, from: Square, to: Square) -> bool {
    let dr = (to.row as i8 - from.row as i8).signum();
    let dc = (to.col as i8 - from.col as i8).signum();
    let mut cur = from;
    loop {
        cur = match cur.offset(dr, dc) {
            Some(s) => s,
            None => return true,
        };
        if cur == to {
            return true;
        }
        if !board.is_empty(cur) {
            return false;
        }
    }
}

/// Every square the piece on `sq` may move to, row-major.
pub fn legal_destinations(
    board: &Board,
    last_move: Option<MoveRecord>,
    sq: Square,
) -> Vec<Square> {
    Square::all()
        .filter(|&to| is_valid_move(board, last_move, sq, to))
        .collect()
}

fn deltas(from: Square, to: Square) -> (i8, i8) {
    (
        to.row as i8 - from.row as i8,
        to.col as i8 - from.col as i8,
    )
}

fn valid_pawn(
    board: &Board,
    last_move: Option<MoveRecord>,
    color: Color,
    from: Square,
    to: Square,
) -> bool {
    let dir = color.pawn_dir();
    let (dr, dc) = deltas(from, to);

    // forward 1
    if dc == 0 && dr == dir {
        return board.is_empty(to);
    }

    // forward 2 from the home row
    if dc == 0 && dr == 2 * dir && from.row as i8 == color.pawn_home_row() {
        return match from.offset(dir, 0) {
            Some(mid) => board.is_empty(mid) && board.is_empty(to),
            None => false,
        };
    }

    if dr == dir && dc.abs() == 1 {
        // plain capture; same-color targets were already rejected
        if board.piece_at(to).is_some() {
            return true;
        }
        return is_en_passant(board, last_move, color, from, to);
    }

    false
}

/// The pawn that just advanced two rows must sit beside `from`, in the
/// column the capturing pawn moves into.
fn is_en_passant(
    board: &Board,
    last_move: Option<MoveRecord>,
    color: Color,
    from: Square,
    to: Square,
) -> bool {
    let lm = match last_move {
        Some(m) => m,
        None => return false,
    };
    let victim = Square::new(from.row, to.col);
    lm.piece.color != color
        && lm.is_double_pawn_push()
        && lm.to == victim
        && board.piece_at(victim) == Some(lm.piece)
}

fn valid_rook(board: &Board, from: Square, to: Square) -> bool {
    (from.row == to.row || from.col == to.col) && is_path_clear(board, from, to)
}

fn valid_knight(from: Square, to: Square) -> bool {
    let (dr, dc) = deltas(from, to);
    matches!((dr.abs(), dc.abs()), (2, 1) | (1, 2))
}

fn valid_bishop(board: &Board, from: Square, to: Square) -> bool {
    let (dr, dc) = deltas(from, to);
    dr != 0 && dr.abs() == dc.abs() && is_path_clear(board, from, to)
}

fn valid_king(from: Square, to: Square) -> bool {
    let (dr, dc) = deltas(from, to);
    dr.abs() <= 1 && dc.abs() <= 1
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod rules_tests;
