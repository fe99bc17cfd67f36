//! Game session management for a single two-seat Seega match.
//!
//! [`GameSession`] owns the live board plus all match metadata behind one
//! mutex. Every command, including state reads, holds that lock for its whole
//! body, so the history of a match is strictly serialized. Throughput is
//! bounded by that one critical section; a match has two players.
//!
//! Commands never return errors to the caller. A rejected command returns
//! `false` and leaves one message in the caller's mailbox, which the next
//! [`GameSession::get_state`] call hands over and clears.

use derive_getters::Getters;
use derive_more::{Display, Error};
use seega_rules::{
    Board, Cell, PIECES_PER_PLAYER, Player, Position, apply_captures, can_continue_after_capture,
    has_mandatory_capture, has_won, is_cell_blocked, is_legal_move, is_player_blocked,
    simulate_move,
};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard, PoisonError};
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument, warn};

/// Consecutive completed turns on the center after which its piece must move.
pub const CENTRAL_STREAK_LIMIT: u32 = 3;

/// Phase of the match. A finished match is signalled by a winner, not a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Players take turns placing two pieces each.
    #[display("placement")]
    Placement,
    /// Players move pieces one step at a time.
    #[display("movement")]
    Movement,
}

/// Reason a command was rejected. The display text is what lands in the mailbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum CommandError {
    /// The match already has a winner.
    #[display("the game is over")]
    GameOver,
    /// Placement attempted outside the placement phase or out of turn.
    #[display("not your turn")]
    NotYourTurn,
    /// Placement coordinates are off the board.
    #[display("out of bounds")]
    OutOfBounds,
    /// Placement on the center or on an occupied cell.
    #[display("invalid position")]
    InvalidPosition,
    /// Move attempted outside the movement phase or out of turn.
    #[display("wait your turn")]
    WaitYourTurn,
    /// None of the player's pieces can move.
    #[display("you are blocked: remove an opponent piece")]
    Blocked,
    /// The central piece is due to move but is hemmed in.
    #[display("central piece blocked: remove an adjacent opponent piece")]
    CentralPieceBlocked,
    /// The central piece is due to move and another piece was chosen.
    #[display("3-turn rule: you must move the central piece")]
    MustMoveCentralPiece,
    /// A capture is available and the submitted move does not capture.
    #[display("a mandatory capture is available")]
    MandatoryCapture,
    /// The move is not a single orthogonal step from an own piece onto an empty cell.
    #[display("invalid move")]
    InvalidMove,
    /// Removal attempted without being blocked first.
    #[display("not in removal mode")]
    NotInRemovalMode,
    /// Removal target is not an opponent piece.
    #[display("select an opponent piece")]
    NotOpponentPiece,
}

/// Read-only view of the match for one player.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, derive_new::new)]
pub struct StateSnapshot {
    /// The board.
    board: Board,
    /// Current phase.
    phase: Phase,
    /// Player whose command is currently accepted.
    current_player: Player,
    /// Winner, once the match is over.
    winner: Option<Player>,
    /// Every chat line so far, oldest first.
    chat_log: Vec<String>,
    /// Whether it is the requesting player's turn.
    your_turn: bool,
    /// Pending rejection message for the requesting player.
    error: Option<String>,
    /// Whether the requesting player must remove an opponent piece.
    removal_mode: bool,
}

/// Mutable match state. Only reachable through the session lock.
#[derive(Debug, Clone)]
struct SessionState {
    board: Board,
    phase: Phase,
    current_player: Player,
    placed_count: [u32; 2],
    placement_pair_count: [u32; 2],
    last_placer: Option<Player>,
    winner: Option<Player>,
    chat_log: Vec<String>,
    error_mailbox: [Option<String>; 2],
    forced_removal: [bool; 2],
    central_streak_owner: Option<Player>,
    central_streak_count: u32,
    seats: [bool; 2],
}

impl SessionState {
    fn new() -> Self {
        Self {
            board: Board::new(),
            phase: Phase::Placement,
            current_player: Player::One,
            placed_count: [0; 2],
            placement_pair_count: [0; 2],
            last_placer: None,
            winner: None,
            chat_log: Vec::new(),
            error_mailbox: [None, None],
            forced_removal: [false; 2],
            central_streak_owner: None,
            central_streak_count: 0,
            seats: [false; 2],
        }
    }

    /// Turns a command outcome into the boolean the API returns.
    fn settle(&mut self, player: Player, outcome: Result<(), CommandError>) -> bool {
        match outcome {
            Ok(()) => true,
            Err(error) => {
                warn!(%player, %error, "Command rejected");
                self.error_mailbox[player.index()] = Some(error.to_string());
                false
            }
        }
    }

    fn ensure_running(&self) -> Result<(), CommandError> {
        match self.winner {
            Some(_) => Err(CommandError::GameOver),
            None => Ok(()),
        }
    }

    fn place_piece(&mut self, player: Player, row: usize, col: usize) -> Result<(), CommandError> {
        self.ensure_running()?;
        if self.phase != Phase::Placement || player != self.current_player {
            return Err(CommandError::NotYourTurn);
        }
        let pos = Position::new(row, col).ok_or(CommandError::OutOfBounds)?;
        if pos.is_central() || !self.board.is_empty(pos) {
            return Err(CommandError::InvalidPosition);
        }

        let seat = player.index();
        self.board.place(pos, player);
        self.placed_count[seat] += 1;
        self.placement_pair_count[seat] += 1;
        self.last_placer = Some(player);
        debug!(%player, %pos, placed = self.placed_count[seat], "Piece placed");

        if self.placement_pair_count[seat] == 2 {
            self.placement_pair_count[seat] = 0;
            if self.placed_count.iter().all(|&n| n >= PIECES_PER_PLAYER) {
                self.phase = Phase::Movement;
                self.current_player = self.last_placer.unwrap_or(player);
                info!(first = %self.current_player, "Placement complete, movement begins");
            } else {
                self.current_player = player.opponent();
            }
        }
        Ok(())
    }

    /// Whether `player` has held the center long enough that it must move.
    fn central_streak_applies(&self, player: Player) -> bool {
        self.board.get(Position::CENTER).is(player)
            && self.central_streak_owner == Some(player)
            && self.central_streak_count >= CENTRAL_STREAK_LIMIT
    }

    fn move_piece(
        &mut self,
        player: Player,
        src: (usize, usize),
        dst: (usize, usize),
    ) -> Result<(), CommandError> {
        self.ensure_running()?;
        if self.phase != Phase::Movement || player != self.current_player {
            return Err(CommandError::WaitYourTurn);
        }

        if is_player_blocked(&self.board, player) {
            self.forced_removal[player.index()] = true;
            return Err(CommandError::Blocked);
        }

        let from = Position::new(src.0, src.1);
        let to = Position::new(dst.0, dst.1);

        if self.central_streak_applies(player) {
            if is_cell_blocked(&self.board, Position::CENTER) {
                self.forced_removal[player.index()] = true;
                return Err(CommandError::CentralPieceBlocked);
            }
            if from != Some(Position::CENTER) {
                return Err(CommandError::MustMoveCentralPiece);
            }
        } else if has_mandatory_capture(&self.board, player) {
            let captures = from
                .zip(to)
                .and_then(|(from, to)| simulate_move(&self.board, from, to, player));
            if !captures.is_some_and(|captured| !captured.is_empty()) {
                return Err(CommandError::MandatoryCapture);
            }
        }

        let (Some(from), Some(to)) = (from, to) else {
            return Err(CommandError::InvalidMove);
        };
        if !is_legal_move(&self.board, from, to, player) {
            return Err(CommandError::InvalidMove);
        }

        self.board.move_piece(from, to);
        let captured = apply_captures(&mut self.board, to, player);
        info!(%player, %from, %to, captured = captured.len(), "Move executed");

        if has_won(&self.board, player) {
            info!(%player, "Opponent has no pieces left");
            self.winner = Some(player);
            return Ok(());
        }

        if !captured.is_empty() && can_continue_after_capture(&self.board, to, player) {
            debug!(%player, %to, "Further capture available, turn retained");
            return Ok(());
        }

        self.current_player = player.opponent();
        self.update_central_streak();
        Ok(())
    }

    /// Recomputes the center streak after a completed turn.
    fn update_central_streak(&mut self) {
        match self.board.get(Position::CENTER) {
            Cell::Empty => {
                self.central_streak_owner = None;
                self.central_streak_count = 0;
            }
            Cell::Occupied(occupant) if self.central_streak_owner == Some(occupant) => {
                self.central_streak_count += 1;
            }
            Cell::Occupied(occupant) => {
                self.central_streak_owner = Some(occupant);
                self.central_streak_count = 1;
            }
        }
        debug!(
            owner = ?self.central_streak_owner,
            count = self.central_streak_count,
            "Central streak updated"
        );
    }

    fn remove_piece(&mut self, player: Player, row: usize, col: usize) -> Result<(), CommandError> {
        self.ensure_running()?;
        if !self.forced_removal[player.index()] {
            return Err(CommandError::NotInRemovalMode);
        }
        let target = Position::new(row, col)
            .filter(|&pos| self.board.get(pos).is(player.opponent()))
            .ok_or(CommandError::NotOpponentPiece)?;

        self.board.clear(target);
        self.forced_removal[player.index()] = false;
        info!(%player, %target, "Opponent piece removed");
        Ok(())
    }
}

/// A single Seega match shared by two seated players.
///
/// Cheap to share as `Arc<GameSession>`; all methods take `&self`.
#[derive(Debug)]
pub struct GameSession {
    state: Mutex<SessionState>,
}

impl GameSession {
    /// Creates a fresh match in the placement phase with both seats free.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating new game session");
        Self {
            state: Mutex::new(SessionState::new()),
        }
    }

    /// Creates a match that starts directly in the movement phase from `board`.
    ///
    /// Placement counters are taken from the pieces on the board. Seats are
    /// still free and must be claimed with [`register`](Self::register).
    #[instrument(skip(board))]
    pub fn with_position(board: Board, to_move: Player) -> Self {
        info!(%to_move, "Creating game session from position\n{}", board.display());
        let mut state = SessionState::new();
        state.placed_count = [
            board.count(Player::One) as u32,
            board.count(Player::Two) as u32,
        ];
        state.board = board;
        state.phase = Phase::Movement;
        state.current_player = to_move;
        Self {
            state: Mutex::new(state),
        }
    }

    /// Acquires the session lock.
    ///
    /// Commands validate before they mutate, so state behind a poisoned lock
    /// is still consistent and is used as is.
    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Re-initializes the match: fresh board, zeroed counters, cleared
    /// mailboxes and chat, both seats free.
    #[instrument(skip(self))]
    pub fn reset(&self) {
        *self.lock() = SessionState::new();
        info!("Game session reset");
    }

    /// Claims the first free seat, player 1 before player 2.
    ///
    /// Returns `None` when both seats are taken.
    #[instrument(skip(self))]
    pub fn register(&self) -> Option<Player> {
        let mut state = self.lock();
        let Some(seat) = Player::iter().find(|p| !state.seats[p.index()]) else {
            warn!("Registration refused: session is full");
            return None;
        };
        state.seats[seat.index()] = true;
        info!(player = %seat, "Player registered");
        Some(seat)
    }

    /// Returns the match as seen by `player` and clears their pending error.
    #[instrument(skip(self))]
    pub fn get_state(&self, player: Player) -> StateSnapshot {
        let mut state = self.lock();
        let error = state.error_mailbox[player.index()].take();
        StateSnapshot::new(
            state.board.clone(),
            state.phase,
            state.current_player,
            state.winner,
            state.chat_log.clone(),
            state.current_player == player,
            error,
            state.forced_removal[player.index()],
        )
    }

    /// Appends a chat line tagged with the sender.
    #[instrument(skip(self, text))]
    pub fn send_chat(&self, player: Player, text: &str) -> bool {
        let mut state = self.lock();
        state.chat_log.push(format!("[{player}] {text}"));
        debug!(lines = state.chat_log.len(), "Chat message appended");
        true
    }

    /// Places one of `player`'s pieces during the placement phase.
    #[instrument(skip(self))]
    pub fn place_piece(&self, player: Player, row: usize, col: usize) -> bool {
        let mut state = self.lock();
        let outcome = state.place_piece(player, row, col);
        state.settle(player, outcome)
    }

    /// Moves one of `player`'s pieces during the movement phase.
    ///
    /// Checks run in a fixed order and the first that applies decides the
    /// outcome: turn, blocked player, central streak, mandatory capture, and
    /// finally plain legality.
    #[instrument(skip(self))]
    pub fn move_piece(
        &self,
        player: Player,
        src_row: usize,
        src_col: usize,
        dst_row: usize,
        dst_col: usize,
    ) -> bool {
        let mut state = self.lock();
        let outcome = state.move_piece(player, (src_row, src_col), (dst_row, dst_col));
        state.settle(player, outcome)
    }

    /// Removes an opponent piece while `player` is in forced-removal mode.
    #[instrument(skip(self))]
    pub fn remove_piece_when_blocked(&self, player: Player, row: usize, col: usize) -> bool {
        let mut state = self.lock();
        let outcome = state.remove_piece(player, row, col);
        state.settle(player, outcome)
    }

    /// Concedes the match to the opponent, whatever the phase or turn.
    #[instrument(skip(self))]
    pub fn surrender(&self, player: Player) -> bool {
        let mut state = self.lock();
        state.winner = Some(player.opponent());
        state.chat_log.push(format!("{player} surrendered."));
        info!(winner = %player.opponent(), "Match ended by surrender");
        true
    }

    /// Current center holder and how many completed turns they have held it.
    pub fn central_streak(&self) -> Option<(Player, u32)> {
        let state = self.lock();
        state
            .central_streak_owner
            .map(|owner| (owner, state.central_streak_count))
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col).unwrap()
    }

    #[test]
    fn test_register_two_seats_then_full() {
        let session = GameSession::new();
        assert_eq!(session.register(), Some(Player::One));
        assert_eq!(session.register(), Some(Player::Two));
        assert_eq!(session.register(), None);
    }

    #[test]
    fn test_error_mailbox_is_single_slot() {
        let session = GameSession::new();
        assert!(!session.place_piece(Player::Two, 0, 0));
        assert!(!session.place_piece(Player::One, 2, 2));

        let state = session.get_state(Player::One);
        assert_eq!(state.error().as_deref(), Some("invalid position"));
        assert_eq!(session.get_state(Player::One).error(), &None);
        assert_eq!(
            session.get_state(Player::Two).error().as_deref(),
            Some("not your turn")
        );
    }

    #[test]
    fn test_placement_checks_in_order() {
        let session = GameSession::new();
        assert!(!session.place_piece(Player::One, 7, 0));
        assert_eq!(
            session.get_state(Player::One).error().as_deref(),
            Some("out of bounds")
        );
        assert!(session.place_piece(Player::One, 0, 0));
        assert!(!session.place_piece(Player::One, 0, 0));
        assert_eq!(
            session.get_state(Player::One).error().as_deref(),
            Some("invalid position")
        );
    }

    #[test]
    fn test_streak_counts_completed_turns() {
        let mut board = Board::new();
        board.place(Position::CENTER, Player::One);
        board.place(pos(0, 0), Player::One);
        board.place(pos(4, 4), Player::Two);
        let session = GameSession::with_position(board, Player::One);

        assert!(session.move_piece(Player::One, 0, 0, 0, 1));
        assert_eq!(session.central_streak(), Some((Player::One, 1)));
        assert!(session.move_piece(Player::Two, 4, 4, 4, 3));
        assert_eq!(session.central_streak(), Some((Player::One, 2)));
        assert!(session.move_piece(Player::One, 2, 2, 2, 1));
        assert_eq!(session.central_streak(), None);
    }

    #[test]
    fn test_winner_stops_further_commands() {
        let session = GameSession::new();
        assert!(session.surrender(Player::One));
        assert!(!session.place_piece(Player::One, 0, 0));

        let state = session.get_state(Player::One);
        assert_eq!(state.winner(), &Some(Player::Two));
        assert_eq!(state.error().as_deref(), Some("the game is over"));
        assert_eq!(state.chat_log(), &vec!["Player 1 surrendered.".to_string()]);
    }

    #[test]
    fn test_reset_frees_seats_and_clears_chat() {
        let session = GameSession::new();
        session.register();
        session.register();
        session.send_chat(Player::One, "hi");
        session.place_piece(Player::One, 0, 0);

        session.reset();
        assert_eq!(session.register(), Some(Player::One));
        let state = session.get_state(Player::One);
        assert!(state.chat_log().is_empty());
        assert_eq!(state.board(), &Board::new());
        assert_eq!(state.phase(), &Phase::Placement);
    }
}
