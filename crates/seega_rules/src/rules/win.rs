//! Win detection.

use crate::{Board, Player};
use tracing::instrument;

/// Checks whether `player` has won, i.e. the opponent has no pieces left.
#[instrument(skip(board))]
pub fn has_won(board: &Board, player: Player) -> bool {
    board.count(player.opponent()) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;

    #[test]
    fn test_empty_board_counts_as_won() {
        assert!(has_won(&Board::new(), Player::One));
        assert!(has_won(&Board::new(), Player::Two));
    }

    #[test]
    fn test_one_opponent_piece_left() {
        let mut board = Board::new();
        board.place(Position::CENTER, Player::Two);
        assert!(!has_won(&board, Player::One));
        assert!(has_won(&board, Player::Two));
    }
}
