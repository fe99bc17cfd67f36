//! Blocked-player and blocked-cell detection.

use crate::{Board, Player, Position};
use tracing::{debug, instrument};

/// Checks whether the piece at `pos` has no orthogonally adjacent empty cell.
#[instrument(skip(board))]
pub fn is_cell_blocked(board: &Board, pos: Position) -> bool {
    pos.neighbors().all(|n| !board.is_empty(n))
}

/// Checks whether none of `player`'s pieces can step anywhere.
///
/// A player with no pieces at all counts as blocked.
#[instrument(skip(board))]
pub fn is_player_blocked(board: &Board, player: Player) -> bool {
    let blocked = board
        .positions_of(player)
        .all(|pos| is_cell_blocked(board, pos));
    debug!(blocked, "Checked mobility");
    blocked
}
