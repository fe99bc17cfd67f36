//! Pure Seega game logic.
//!
//! Seega is played on a 5x5 board. Each player places twelve pieces (two per
//! turn, never on the central cell) and then moves them one orthogonal step at
//! a time, capturing enemy pieces by sandwiching them against a friendly piece.
//!
//! This crate holds the board model and the stateless rule engine. It has no
//! notion of turns or sessions; see the `seega` crate for the orchestrator.
//!
//! # Example
//!
//! ```
//! use seega_rules::{apply_captures, Board, Player, Position};
//!
//! let mut board = Board::new();
//! let at = |r, c| Position::new(r, c).unwrap();
//! board.place(at(0, 1), Player::One);
//! board.place(at(0, 2), Player::Two);
//! board.place(at(0, 3), Player::One);
//!
//! let captured = apply_captures(&mut board, at(0, 1), Player::One);
//! assert_eq!(captured, vec![at(0, 2)]);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
pub mod rules;

pub use board::{
    BOARD_SIZE, Board, CENTER, Cell, Direction, PIECES_PER_PLAYER, Player, Position, PositionError,
};
pub use rules::{
    apply_captures, can_continue_after_capture, has_mandatory_capture, has_won, is_cell_blocked,
    is_legal_move, is_player_blocked, legal_moves_from, simulate_move,
};
