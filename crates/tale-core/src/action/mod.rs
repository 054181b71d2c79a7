//! Player action system
//!
//! Directions, movement, and the command slot table.

pub mod commands;
pub mod movement;

use serde::{Deserialize, Serialize};
use strum::EnumIter;

/// Movement directions
///
/// The discriminants are the numeric direction codes used by command
/// triggers; anything outside 1..=10 is not a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
#[repr(i32)]
pub enum Direction {
    North = 1,
    East = 2,
    South = 3,
    West = 4,
    NorthEast = 5,
    SouthEast = 6,
    SouthWest = 7,
    NorthWest = 8,
    Up = 9,
    Down = 10,
}

impl Direction {
    /// Get the (dx, dy, dz) unit delta for this direction
    pub const fn delta(&self) -> (i32, i32, i32) {
        match self {
            Direction::North => (0, 1, 0),
            Direction::East => (1, 0, 0),
            Direction::South => (0, -1, 0),
            Direction::West => (-1, 0, 0),
            Direction::NorthEast => (1, 1, 0),
            Direction::SouthEast => (1, -1, 0),
            Direction::SouthWest => (-1, -1, 0),
            Direction::NorthWest => (-1, 1, 0),
            Direction::Up => (0, 0, 1),
            Direction::Down => (0, 0, -1),
        }
    }

    /// Numeric direction code
    pub const fn code(&self) -> i32 {
        *self as i32
    }

    /// Direction for a numeric code
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Direction::North),
            2 => Some(Direction::East),
            3 => Some(Direction::South),
            4 => Some(Direction::West),
            5 => Some(Direction::NorthEast),
            6 => Some(Direction::SouthEast),
            7 => Some(Direction::SouthWest),
            8 => Some(Direction::NorthWest),
            9 => Some(Direction::Up),
            10 => Some(Direction::Down),
            _ => None,
        }
    }

    /// Get the direction name as a string
    pub const fn name(&self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
            Direction::NorthEast => "northeast",
            Direction::SouthEast => "southeast",
            Direction::SouthWest => "southwest",
            Direction::NorthWest => "northwest",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }

    /// Check if this is a vertical direction (up/down)
    pub const fn is_vertical(&self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    /// Check if this is a diagonal direction
    pub const fn is_diagonal(&self) -> bool {
        matches!(
            self,
            Direction::NorthEast
                | Direction::NorthWest
                | Direction::SouthEast
                | Direction::SouthWest
        )
    }

    /// Get the opposite direction
    pub const fn opposite(&self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::NorthEast => Direction::SouthWest,
            Direction::NorthWest => Direction::SouthEast,
            Direction::SouthEast => Direction::NorthWest,
            Direction::SouthWest => Direction::NorthEast,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

impl TryFrom<i32> for Direction {
    type Error = movement::MoveError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Direction::from_code(code).ok_or(movement::MoveError::InvalidDirection(code))
    }
}
