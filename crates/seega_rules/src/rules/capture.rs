//! Sandwich captures and mandatory-capture discovery.
//!
//! A piece is captured when an opponent lands next to it while the
//! opponent's own piece already sits directly beyond it on the same line.
//! The central cell is immune regardless of who occupies it.

use super::movement::{is_legal_move, legal_moves_from};
use crate::{Board, Direction, Player, Position};
use strum::IntoEnumIterator;
use tracing::{debug, instrument};

/// Removes every piece sandwiched by `player`'s piece that just landed on `landed_at`.
///
/// All four directions are checked, so one landing can capture several
/// pieces. Returns the captured cells; an empty vector means nothing was taken.
#[instrument(skip(board))]
pub fn apply_captures(board: &mut Board, landed_at: Position, player: Player) -> Vec<Position> {
    let opponent = player.opponent();
    let mut captured = Vec::new();

    for direction in Direction::iter() {
        let (Some(adjacent), Some(beyond)) = (
            landed_at.offset(direction, 1),
            landed_at.offset(direction, 2),
        ) else {
            continue;
        };

        if adjacent.is_central() {
            continue;
        }

        if board.get(adjacent).is(opponent) && board.get(beyond).is(player) {
            board.clear(adjacent);
            captured.push(adjacent);
        }
    }

    if !captured.is_empty() {
        debug!(?captured, "Pieces captured");
    }
    captured
}

/// Plays `from -> to` on a private copy of `board` and reports what it would capture.
///
/// Returns `None` when the move is illegal; the live board is never touched.
#[instrument(skip(board))]
pub fn simulate_move(
    board: &Board,
    from: Position,
    to: Position,
    player: Player,
) -> Option<Vec<Position>> {
    if !is_legal_move(board, from, to, player) {
        return None;
    }
    let mut copy = board.clone();
    copy.move_piece(from, to);
    Some(apply_captures(&mut copy, to, player))
}

/// Whether any move starting at `from` would capture.
fn captures_from(board: &Board, from: Position, player: Player) -> bool {
    legal_moves_from(board, from, player).any(|to| {
        simulate_move(board, from, to, player).is_some_and(|captured| !captured.is_empty())
    })
}

/// Checks whether `player` has at least one legal move that captures.
#[instrument(skip(board))]
pub fn has_mandatory_capture(board: &Board, player: Player) -> bool {
    let available = board
        .positions_of(player)
        .any(|from| captures_from(board, from, player));
    debug!(available, "Checked for mandatory capture");
    available
}

/// Checks whether the piece now on `landed_at` can capture again with its next step.
#[instrument(skip(board))]
pub fn can_continue_after_capture(board: &Board, landed_at: Position, player: Player) -> bool {
    captures_from(board, landed_at, player)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col).unwrap()
    }

    #[test]
    fn test_single_sandwich() {
        let mut board = Board::new();
        board.place(pos(0, 1), Player::One);
        board.place(pos(0, 2), Player::Two);
        board.place(pos(0, 3), Player::One);

        let captured = apply_captures(&mut board, pos(0, 1), Player::One);
        assert_eq!(captured, vec![pos(0, 2)]);
        assert!(board.is_empty(pos(0, 2)));
    }

    #[test]
    fn test_no_capture_without_anchor() {
        let mut board = Board::new();
        board.place(pos(0, 1), Player::One);
        board.place(pos(0, 2), Player::Two);

        assert!(apply_captures(&mut board, pos(0, 1), Player::One).is_empty());
        assert_eq!(board.get(pos(0, 2)), crate::Cell::Occupied(Player::Two));
    }

    #[test]
    fn test_own_piece_not_captured() {
        let mut board = Board::new();
        board.place(pos(0, 1), Player::One);
        board.place(pos(0, 2), Player::One);
        board.place(pos(0, 3), Player::One);

        assert!(apply_captures(&mut board, pos(0, 1), Player::One).is_empty());
        assert_eq!(board.count(Player::One), 3);
    }

    #[test]
    fn test_center_is_immune() {
        let mut board = Board::new();
        board.place(pos(2, 1), Player::One);
        board.place(Position::CENTER, Player::Two);
        board.place(pos(2, 3), Player::One);

        assert!(apply_captures(&mut board, pos(2, 1), Player::One).is_empty());
        assert!(board.get(Position::CENTER).is(Player::Two));
    }

    #[test]
    fn test_multiple_directions_at_once() {
        let mut board = Board::new();
        board.place(pos(2, 1), Player::One);
        board.place(pos(1, 1), Player::Two);
        board.place(pos(0, 1), Player::One);
        board.place(pos(3, 1), Player::Two);
        board.place(pos(4, 1), Player::One);
        board.place(pos(2, 0), Player::Two);

        let captured = apply_captures(&mut board, pos(2, 1), Player::One);
        assert_eq!(captured.len(), 2);
        assert!(captured.contains(&pos(1, 1)));
        assert!(captured.contains(&pos(3, 1)));
        // Edge piece has no cell beyond it.
        assert!(board.get(pos(2, 0)).is(Player::Two));
    }

    #[test]
    fn test_simulate_leaves_board_untouched() {
        let mut board = Board::new();
        board.place(pos(1, 1), Player::One);
        board.place(pos(0, 2), Player::Two);
        board.place(pos(0, 3), Player::One);
        let before = board.clone();

        let captured = simulate_move(&board, pos(1, 1), pos(0, 1), Player::One);
        assert_eq!(captured, Some(vec![pos(0, 2)]));
        assert_eq!(board, before);
        assert_eq!(simulate_move(&board, pos(1, 1), pos(2, 2), Player::One), None);
    }

    #[test]
    fn test_mandatory_capture_found() {
        let mut board = Board::new();
        board.place(pos(1, 1), Player::One);
        board.place(pos(0, 2), Player::Two);
        board.place(pos(0, 3), Player::One);

        assert!(has_mandatory_capture(&board, Player::One));
        assert!(!has_mandatory_capture(&board, Player::Two));
    }

    #[test]
    fn test_continue_only_from_landing_cell() {
        let mut board = Board::new();
        // Piece at (3, 0) could capture by stepping to (3, 1); piece at (1, 3) cannot.
        board.place(pos(3, 0), Player::One);
        board.place(pos(2, 1), Player::Two);
        board.place(pos(1, 1), Player::One);
        board.place(pos(1, 3), Player::One);

        assert!(can_continue_after_capture(&board, pos(3, 0), Player::One));
        assert!(!can_continue_after_capture(&board, pos(1, 3), Player::One));
    }
}
