//! # Game Module
//!
//! Core puzzle state, level representation, and beam simulation.
//!
//! This module contains the fundamental building blocks of the Reflekt
//! engine:
//! - Level model and construction-time validation
//! - Mirror registry and placement legality
//! - Beam propagation with mirror reflection and cycle detection
//! - Target and illumination evaluators

pub mod level;
pub mod physics;
pub mod state;

pub use level::*;
pub use physics::*;
pub use state::*;

use serde::{Deserialize, Serialize};

/// Represents a 2D coordinate on the puzzle grid.
///
/// Positions are used as composite map keys throughout the engine, so the
/// type is `Copy + Eq + Hash`.
///
/// # Examples
///
/// ```
/// use reflekt::Position;
///
/// let pos = Position::new(4, 1);
/// assert_eq!(pos.x, 4);
/// assert_eq!(pos.y, 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Directions of beam travel and lamp/target orientation.
///
/// The enumeration is closed: there is no diagonal movement, and malformed
/// direction values are rejected at the serde boundary rather than at
/// simulation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Converts a direction to a one-cell position delta.
    ///
    /// North decreases y, South increases y, East increases x, West
    /// decreases x (screen coordinates, origin top-left).
    ///
    /// # Examples
    ///
    /// ```
    /// use reflekt::{Direction, Position};
    ///
    /// assert_eq!(Direction::North.delta(), Position::new(0, -1));
    /// assert_eq!(Direction::East.delta(), Position::new(1, 0));
    /// ```
    pub fn delta(self) -> Position {
        match self {
            Direction::North => Position::new(0, -1),
            Direction::South => Position::new(0, 1),
            Direction::East => Position::new(1, 0),
            Direction::West => Position::new(-1, 0),
        }
    }

    /// Returns the opposite direction (N↔S, E↔W).
    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Returns all four cardinal directions.
    pub fn cardinal() -> [Direction; 4] {
        [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
        ]
    }
}

/// Mirror orientations.
///
/// `Slash` is the `/` mirror, `Backslash` the `\` mirror. Each reflects an
/// incoming beam according to the fixed reflection table in
/// [`MirrorKind::reflect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MirrorKind {
    #[serde(rename = "/")]
    Slash,
    #[serde(rename = "\\")]
    Backslash,
}

impl MirrorKind {
    /// Looks up the outgoing direction for a beam entering a mirror cell.
    ///
    /// The table is a fixed contract:
    ///
    /// | mirror | N→ | S→ | E→ | W→ |
    /// |--------|----|----|----|----|
    /// | `/`    | E  | W  | N  | S  |
    /// | `\`    | W  | E  | S  | N  |
    ///
    /// # Examples
    ///
    /// ```
    /// use reflekt::{Direction, MirrorKind};
    ///
    /// assert_eq!(MirrorKind::Slash.reflect(Direction::East), Direction::North);
    /// assert_eq!(MirrorKind::Backslash.reflect(Direction::East), Direction::South);
    /// ```
    pub fn reflect(self, incoming: Direction) -> Direction {
        match (self, incoming) {
            (MirrorKind::Slash, Direction::North) => Direction::East,
            (MirrorKind::Slash, Direction::South) => Direction::West,
            (MirrorKind::Slash, Direction::East) => Direction::North,
            (MirrorKind::Slash, Direction::West) => Direction::South,
            (MirrorKind::Backslash, Direction::North) => Direction::West,
            (MirrorKind::Backslash, Direction::South) => Direction::East,
            (MirrorKind::Backslash, Direction::East) => Direction::South,
            (MirrorKind::Backslash, Direction::West) => Direction::North,
        }
    }

    /// Parses a mirror kind from its display character.
    pub fn from_char(c: char) -> Option<MirrorKind> {
        match c {
            '/' => Some(MirrorKind::Slash),
            '\\' => Some(MirrorKind::Backslash),
            _ => None,
        }
    }

    /// Returns the display character for this mirror kind.
    pub fn as_char(self) -> char {
        match self {
            MirrorKind::Slash => '/',
            MirrorKind::Backslash => '\\',
        }
    }
}
