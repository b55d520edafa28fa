//! Two-player chess rules engine.
//!
//! Holds the board, validates piece movement, detects check and checkmate,
//! tracks en-passant eligibility and records each move in algebraic form.
//! Castling, promotion and draw rules are not part of this engine.
//!
//! ```
//! use chess_rules::{Game, parse_square};
//!
//! let mut game = Game::new();
//! let result = game.apply_move(parse_square("e2").unwrap(), parse_square("e4").unwrap());
//! assert!(result.applied());
//! assert_eq!(game.move_history(), ["e2e4"]);
//! ```

pub mod attacks;
pub mod board;
pub mod error;
pub mod game;
pub mod notation;
pub mod rules;
pub mod types;

pub use attacks::*;
pub use board::*;
pub use error::RulesError;
pub use game::*;
pub use notation::{encode, parse_square, square_name};
pub use rules::*;
pub use types::*;
