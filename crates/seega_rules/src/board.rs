//! Core domain types for Seega: players, positions and the 5x5 board.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use strum::EnumIter;

/// Width and height of the board.
pub const BOARD_SIZE: usize = 5;

/// Row and column of the central cell.
pub const CENTER: usize = BOARD_SIZE / 2;

/// Pieces each player places before the movement phase.
pub const PIECES_PER_PLAYER: u32 = 12;

/// One of the two seated players.
///
/// On the wire a player is the integer `1` or `2`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize, EnumIter,
)]
#[serde(into = "u8", try_from = "u8")]
pub enum Player {
    /// First seat (wire id 1).
    #[display("Player 1")]
    One,
    /// Second seat (wire id 2).
    #[display("Player 2")]
    Two,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Wire id of this player.
    pub fn id(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    /// Zero-based seat index, for per-player tables.
    pub fn index(self) -> usize {
        usize::from(self.id() - 1)
    }
}

impl From<Player> for u8 {
    fn from(player: Player) -> Self {
        player.id()
    }
}

impl TryFrom<u8> for Player {
    type Error = PositionError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            1 => Ok(Player::One),
            2 => Ok(Player::Two),
            other => Err(PositionError::UnknownPlayer(other)),
        }
    }
}

/// Errors raised when raw wire values do not describe a board location or occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum PositionError {
    /// Coordinates fall outside the board.
    #[display("({_0}, {_1}) is outside the 5x5 board")]
    OutOfBounds(usize, usize),
    /// Integer is not a player id.
    #[display("{_0} is not a player id")]
    UnknownPlayer(#[error(not(source))] u8),
    /// Integer is not a cell value.
    #[display("{_0} is not a cell value")]
    UnknownCell(#[error(not(source))] u8),
}

/// One of the four orthogonal step directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Direction {
    /// Towards row 0.
    Up,
    /// Towards the last row.
    Down,
    /// Towards column 0.
    Left,
    /// Towards the last column.
    Right,
}

impl Direction {
    fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// A cell on the board, guaranteed to be in bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display("({row}, {col})")]
pub struct Position {
    row: usize,
    col: usize,
}

impl Position {
    /// The central cell.
    pub const CENTER: Position = Position {
        row: CENTER,
        col: CENTER,
    };

    /// Creates a position, returning `None` when off the board.
    pub fn new(row: usize, col: usize) -> Option<Self> {
        (row < BOARD_SIZE && col < BOARD_SIZE).then_some(Self { row, col })
    }

    /// Creates a position, reporting out-of-range coordinates as an error.
    pub fn try_new(row: usize, col: usize) -> Result<Self, PositionError> {
        Self::new(row, col).ok_or(PositionError::OutOfBounds(row, col))
    }

    /// Row index.
    pub fn row(self) -> usize {
        self.row
    }

    /// Column index.
    pub fn col(self) -> usize {
        self.col
    }

    /// Whether this is the central cell.
    pub fn is_central(self) -> bool {
        self == Self::CENTER
    }

    /// The cell `steps` cells away in `direction`, if still on the board.
    pub fn offset(self, direction: Direction, steps: isize) -> Option<Self> {
        let (dr, dc) = direction.delta();
        let row = self.row.checked_add_signed(dr * steps)?;
        let col = self.col.checked_add_signed(dc * steps)?;
        Self::new(row, col)
    }

    /// The adjacent cell in `direction`, if still on the board.
    pub fn neighbor(self, direction: Direction) -> Option<Self> {
        self.offset(direction, 1)
    }

    /// In-bounds orthogonal neighbours.
    pub fn neighbors(self) -> impl Iterator<Item = Position> {
        <Direction as strum::IntoEnumIterator>::iter().filter_map(move |d| self.neighbor(d))
    }

    /// Manhattan distance between two cells.
    pub fn distance(self, other: Position) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Every cell in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Position { row, col }))
    }
}

/// A cell on the board. Serialized as `0` (empty) or the occupant's player id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Cell {
    /// No piece.
    #[default]
    Empty,
    /// Cell occupied by a player's piece.
    Occupied(Player),
}

impl Cell {
    /// Whether the cell holds `player`'s piece.
    pub fn is(self, player: Player) -> bool {
        self == Cell::Occupied(player)
    }
}

impl From<Cell> for u8 {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Empty => 0,
            Cell::Occupied(player) => player.id(),
        }
    }
}

impl TryFrom<u8> for Cell {
    type Error = PositionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Cell::Empty),
            1 | 2 => Player::try_from(value).map(Cell::Occupied),
            other => Err(PositionError::UnknownCell(other)),
        }
    }
}

/// The 5x5 Seega board.
///
/// Serializes as a matrix of integers: `0` empty, `1`/`2` the players.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cell at `pos`.
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.row][pos.col]
    }

    /// Whether `pos` holds no piece.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Cell::Empty
    }

    /// Whether `pos` is the central cell.
    pub fn is_central(&self, pos: Position) -> bool {
        pos.is_central()
    }

    /// Puts `player`'s piece on `pos`, replacing whatever was there.
    pub fn place(&mut self, pos: Position, player: Player) {
        self.cells[pos.row][pos.col] = Cell::Occupied(player);
    }

    /// Empties `pos`.
    pub fn clear(&mut self, pos: Position) {
        self.cells[pos.row][pos.col] = Cell::Empty;
    }

    /// Moves the occupant of `from` to `to` and empties `from`.
    ///
    /// No validation is performed; check the move with
    /// [`is_legal_move`](crate::is_legal_move) first.
    pub fn move_piece(&mut self, from: Position, to: Position) {
        self.cells[to.row][to.col] = self.get(from);
        self.clear(from);
    }

    /// Cells currently holding `player`'s pieces, row-major.
    pub fn positions_of(&self, player: Player) -> impl Iterator<Item = Position> + '_ {
        Position::all().filter(move |&pos| self.get(pos).is(player))
    }

    /// Number of pieces `player` has on the board.
    pub fn count(&self, player: Player) -> usize {
        self.positions_of(player).count()
    }

    /// Rows of the grid.
    pub fn rows(&self) -> &[[Cell; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    /// Formats the board as a human-readable grid (`.` empty, `+` empty center).
    pub fn display(&self) -> String {
        let mut result = String::from("  0 1 2 3 4\n");
        for (row, cells) in self.cells.iter().enumerate() {
            result.push_str(&row.to_string());
            for (col, cell) in cells.iter().enumerate() {
                result.push(' ');
                result.push(match cell {
                    Cell::Occupied(player) => char::from(b'0' + player.id()),
                    Cell::Empty if row == CENTER && col == CENTER => '+',
                    Cell::Empty => '.',
                });
            }
            if row + 1 < BOARD_SIZE {
                result.push('\n');
            }
        }
        result
    }
}
