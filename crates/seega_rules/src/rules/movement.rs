//! Move legality.

use crate::{Board, Player, Position};
use tracing::instrument;

/// Checks whether `player` may move the piece at `from` onto `to`.
///
/// A legal move starts on one of `player`'s pieces, ends on an empty cell,
/// and covers exactly one orthogonal step. Diagonals and jumps are rejected.
#[instrument(skip(board))]
pub fn is_legal_move(board: &Board, from: Position, to: Position, player: Player) -> bool {
    board.get(from).is(player) && board.is_empty(to) && from.distance(to) == 1
}

/// Destinations reachable by a legal single step from `from`.
pub fn legal_moves_from(
    board: &Board,
    from: Position,
    player: Player,
) -> impl Iterator<Item = Position> + '_ {
    from.neighbors()
        .filter(move |&to| is_legal_move(board, from, to, player))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col).unwrap()
    }

    #[test]
    fn test_orthogonal_step_onto_empty() {
        let mut board = Board::new();
        board.place(pos(1, 1), Player::One);
        assert!(is_legal_move(&board, pos(1, 1), pos(0, 1), Player::One));
        assert!(is_legal_move(&board, pos(1, 1), pos(1, 2), Player::One));
    }

    #[test]
    fn test_diagonal_and_jump_rejected() {
        let mut board = Board::new();
        board.place(pos(1, 1), Player::One);
        assert!(!is_legal_move(&board, pos(1, 1), pos(2, 2), Player::One));
        assert!(!is_legal_move(&board, pos(1, 1), pos(1, 3), Player::One));
        assert!(!is_legal_move(&board, pos(1, 1), pos(1, 1), Player::One));
    }

    #[test]
    fn test_must_own_source() {
        let mut board = Board::new();
        board.place(pos(1, 1), Player::Two);
        assert!(!is_legal_move(&board, pos(1, 1), pos(1, 2), Player::One));
        assert!(!is_legal_move(&board, pos(0, 0), pos(0, 1), Player::One));
    }

    #[test]
    fn test_destination_must_be_empty() {
        let mut board = Board::new();
        board.place(pos(1, 1), Player::One);
        board.place(pos(1, 2), Player::Two);
        assert!(!is_legal_move(&board, pos(1, 1), pos(1, 2), Player::One));
    }

    #[test]
    fn test_legal_moves_from_corner() {
        let mut board = Board::new();
        board.place(pos(0, 0), Player::One);
        board.place(pos(0, 1), Player::Two);
        let moves: Vec<_> = legal_moves_from(&board, pos(0, 0), Player::One).collect();
        assert_eq!(moves, vec![pos(1, 0)]);
    }
}
