pub mod cell;
pub mod grid;

use std::{fmt, str::FromStr};

pub use cell::{Cell, CellKind};
pub use grid::Grid;

/// A 0-indexed coordinate into a [`Grid`].
///
/// Its text form `"row-col"` is the canonical key used in logs and when positions are exchanged
/// as strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: u16,
    pub col: u16,
}

impl Position {
    pub const fn new(row: u16, col: u16) -> Self {
        Position { row, col }
    }

    /// Grid position of the room at `(room_row, room_col)` in the logical lattice.
    pub const fn of_room(room_row: u16, room_col: u16) -> Self {
        Position::new(room_row * 2 + 1, room_col * 2 + 1)
    }

    pub fn manhattan_distance(self, other: Position) -> u32 {
        u32::from(self.row.abs_diff(other.row)) + u32::from(self.col.abs_diff(other.col))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.row, self.col)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid position key {0:?}, expected \"row-col\"")]
pub struct ParsePositionError(String);

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParsePositionError(s.to_string());
        let (row, col) = s.split_once('-').ok_or_else(invalid)?;
        let row = row.parse::<u16>().map_err(|_| invalid())?;
        let col = col.parse::<u16>().map_err(|_| invalid())?;
        Ok(Position::new(row, col))
    }
}

/// Compass directions between rooms of the logical lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// The room one step away in this direction, if it lies inside a `rows x cols` lattice.
    pub fn step(self, room: (u16, u16), rows: u16, cols: u16) -> Option<(u16, u16)> {
        let (r, c) = room;
        let next = match self {
            Direction::North => (r.checked_sub(1)?, c),
            Direction::South => (r + 1, c),
            Direction::East => (r, c + 1),
            Direction::West => (r, c.checked_sub(1)?),
        };
        (next.0 < rows && next.1 < cols).then_some(next)
    }
}

/// Grid position of the connector slot between two adjacent rooms.
pub fn connector_between(a: (u16, u16), b: (u16, u16)) -> Position {
    let from = Position::of_room(a.0, a.1);
    let to = Position::of_room(b.0, b.1);
    Position::new((from.row + to.row) / 2, (from.col + to.col) / 2)
}
