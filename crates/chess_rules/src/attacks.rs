//! Attack detection on top of move legality.
//!
//! A square counts as attacked when some enemy piece has a valid move onto
//! it. Pawns therefore only attack diagonal squares that are occupied: an
//! empty square diagonally in front of an enemy pawn is *not* attacked.
//! Self-check tests run after the king has moved, when the square is
//! occupied, so a king still cannot step there.

use crate::{board::Board, error::RulesError, rules::is_valid_move, types::*};

/// True if any piece of the side opposing `defending` can move onto `target`.
pub fn is_square_attacked(
    board: &Board,
    last_move: Option<MoveRecord>,
    target: Square,
    defending: Color,
) -> bool {
    board
        .squares_of(defending.other())
        .any(|(from, _)| is_valid_move(board, last_move, from, target))
}

pub fn find_king(board: &Board, color: Color) -> Result<Square, RulesError> {
    board.king_sq(color).ok_or(RulesError::KingNotFound(color))
}

/// Is the king of `color` attacked? Errors only if that king is missing.
pub fn is_king_attacked(
    board: &Board,
    last_move: Option<MoveRecord>,
    color: Color,
) -> Result<bool, RulesError> {
    let ksq = find_king(board, color)?;
    Ok(is_square_attacked(board, last_move, ksq, color))
}

#[cfg(test)]
#[path = "attacks_tests.rs"]
mod attacks_tests;
