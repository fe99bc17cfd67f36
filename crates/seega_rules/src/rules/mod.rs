//! Game rules for Seega.
//!
//! Pure functions over a [`Board`](crate::Board) snapshot. Nothing here keeps
//! state between calls; only [`apply_captures`] mutates, and only the board it
//! is handed.

pub mod blocking;
pub mod capture;
pub mod movement;
pub mod win;

pub use blocking::{is_cell_blocked, is_player_blocked};
pub use capture::{apply_captures, can_continue_after_capture, has_mandatory_capture, simulate_move};
pub use movement::{is_legal_move, legal_moves_from};
pub use win::has_won;
