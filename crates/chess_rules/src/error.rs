use thiserror::Error;

use crate::types::Color;

/// Programming and input errors. Illegal moves are not errors; see
/// [`crate::game::MoveResult`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("no {0} king on the board")]
    KingNotFound(Color),

    #[error("expected exactly one {color} king, found {count}")]
    KingCount { color: Color, count: usize },

    #[error("{0} king is in check but it is the other side to move")]
    OpponentInCheck(Color),

    #[error("square out of range: row {row}, col {col}")]
    SquareOutOfRange { row: u8, col: u8 },

    #[error("invalid square name: {0:?}")]
    InvalidSquare(String),

    #[error("invalid piece placement: {0}")]
    InvalidPlacement(String),
}
