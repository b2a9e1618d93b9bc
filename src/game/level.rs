//! # Level Model
//!
//! Immutable level representation with construction-time validation.
//!
//! A level is built once from raw [`LevelData`] supplied by a level content
//! source (hand-authored catalog, generator, file) and is read-only
//! thereafter. Validation fails loudly: malformed level data is an
//! authoring mistake that must not silently produce a broken simulation.

use crate::config::{MAX_HEIGHT, MAX_WIDTH, MIN_HEIGHT, MIN_WIDTH};
use crate::{Direction, Position, ReflektError, ReflektResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Kinds of cell stored in the level grid.
///
/// Only walls and empty floor live in the grid itself. The lamp and target
/// are level metadata, and mirrors belong to the mirror registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    Wall,
    Empty,
}

/// The beam source: a position and the direction the beam leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lamp {
    pub position: Position,
    pub direction: Direction,
}

/// The beam destination.
///
/// `direction` is the side the target expects the beam to arrive *from*: a
/// beam satisfies the target only when it travels in the exact opposite
/// direction as it enters the target cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub position: Position,
    pub direction: Direction,
}

/// Per-level descriptive metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelMetadata {
    /// Display name of the level
    pub name: String,
    /// Free-form difficulty label; the engine never interprets it
    pub difficulty: String,
    /// Maximum number of mirrors the player may place
    pub max_mirrors: usize,
}

/// Raw level shape as supplied by a level content source.
///
/// This is the serde wire format; it carries no invariants of its own and
/// is promoted to a [`Level`] by [`Level::new`], which validates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelData {
    pub width: i32,
    pub height: i32,
    pub grid: Vec<Vec<CellKind>>,
    pub lamp: Lamp,
    pub target: Target,
    pub metadata: LevelMetadata,
}

/// A validated, immutable puzzle level.
///
/// Invariants established at construction and never revisited:
/// - `MIN_WIDTH <= width <= MAX_WIDTH`, `MIN_HEIGHT <= height <= MAX_HEIGHT`
/// - the grid has exactly `height` rows of exactly `width` cells
/// - lamp and target positions are in bounds
///
/// # Examples
///
/// ```
/// use reflekt::{Level, Position};
///
/// let level = Level::new(reflekt::level_fixtures::bordered_10x8()).unwrap();
/// assert!(level.is_wall(Position::new(0, 0)));
/// assert!(level.is_empty_cell(Position::new(1, 1)));
/// assert!(!level.is_wall(Position::new(-1, 0)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LevelData", into = "LevelData")]
pub struct Level {
    width: i32,
    height: i32,
    grid: Vec<Vec<CellKind>>,
    lamp: Lamp,
    target: Target,
    metadata: LevelMetadata,
}

impl Level {
    /// Validates raw level data and constructs a level from it.
    ///
    /// Returns [`ReflektError::InvalidLevel`] when dimensions fall outside
    /// the configured bounds, the grid shape disagrees with the declared
    /// dimensions, or the lamp or target sits out of bounds. Direction
    /// validity is enforced by the [`Direction`] type itself.
    pub fn new(data: LevelData) -> ReflektResult<Level> {
        if data.width < MIN_WIDTH || data.width > MAX_WIDTH {
            return Err(ReflektError::InvalidLevel(format!(
                "width {} outside {}..={}",
                data.width, MIN_WIDTH, MAX_WIDTH
            )));
        }
        if data.height < MIN_HEIGHT || data.height > MAX_HEIGHT {
            return Err(ReflektError::InvalidLevel(format!(
                "height {} outside {}..={}",
                data.height, MIN_HEIGHT, MAX_HEIGHT
            )));
        }
        if data.grid.len() != data.height as usize {
            return Err(ReflektError::InvalidLevel(format!(
                "grid has {} rows, expected {}",
                data.grid.len(),
                data.height
            )));
        }
        for (y, row) in data.grid.iter().enumerate() {
            if row.len() != data.width as usize {
                return Err(ReflektError::InvalidLevel(format!(
                    "row {} has {} cells, expected {}",
                    y,
                    row.len(),
                    data.width
                )));
            }
        }

        let level = Level {
            width: data.width,
            height: data.height,
            grid: data.grid,
            lamp: data.lamp,
            target: data.target,
            metadata: data.metadata,
        };

        if !level.is_valid_position(level.lamp.position) {
            return Err(ReflektError::InvalidLevel(format!(
                "lamp at {} is out of bounds",
                level.lamp.position
            )));
        }
        if !level.is_valid_position(level.target.position) {
            return Err(ReflektError::InvalidLevel(format!(
                "target at {} is out of bounds",
                level.target.position
            )));
        }

        Ok(level)
    }

    /// Deserializes level data from a JSON string and validates it.
    pub fn from_json(json: &str) -> ReflektResult<Level> {
        let data: LevelData = serde_json::from_str(json)?;
        Level::new(data)
    }

    /// Loads and validates a level from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ReflektResult<Level> {
        let json = std::fs::read_to_string(path)?;
        Level::from_json(&json)
    }

    /// Checks whether a position lies inside the grid.
    pub fn is_valid_position(&self, position: Position) -> bool {
        position.x >= 0 && position.x < self.width && position.y >= 0 && position.y < self.height
    }

    /// Returns the cell kind at a position, or `None` out of bounds.
    pub fn cell(&self, position: Position) -> Option<CellKind> {
        if !self.is_valid_position(position) {
            return None;
        }
        Some(self.grid[position.y as usize][position.x as usize])
    }

    /// Checks whether a position is an in-bounds empty cell.
    ///
    /// Out of bounds is `false`: it is distinct from a wall, but both block
    /// mirror placement and beam propagation.
    pub fn is_empty_cell(&self, position: Position) -> bool {
        self.cell(position) == Some(CellKind::Empty)
    }

    /// Checks whether a position is an in-bounds wall cell.
    pub fn is_wall(&self, position: Position) -> bool {
        self.cell(position) == Some(CellKind::Wall)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn lamp(&self) -> Lamp {
        self.lamp
    }

    pub fn target(&self) -> Target {
        self.target
    }

    pub fn metadata(&self) -> &LevelMetadata {
        &self.metadata
    }
}

// Deserialization funnels through the same validation as Level::new, so a
// Level obtained from serde carries the same invariants.
impl TryFrom<LevelData> for Level {
    type Error = ReflektError;

    fn try_from(data: LevelData) -> ReflektResult<Level> {
        Level::new(data)
    }
}

impl From<Level> for LevelData {
    fn from(level: Level) -> LevelData {
        LevelData {
            width: level.width,
            height: level.height,
            grid: level.grid,
            lamp: level.lamp,
            target: level.target,
            metadata: level.metadata,
        }
    }
}

/// Ready-made level data used by doctests and the test suite.
pub mod level_fixtures {
    use super::*;

    /// A 10x8 level with a solid wall border and empty interior, lamp at
    /// (1, 1) facing east, target at (8, 1) expecting the beam from the
    /// west.
    pub fn bordered_10x8() -> LevelData {
        bordered(10, 8)
    }

    /// A bordered-empty level of the given dimensions with the same lamp
    /// and target placement as [`bordered_10x8`].
    pub fn bordered(width: i32, height: i32) -> LevelData {
        let grid = (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| {
                        if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                            CellKind::Wall
                        } else {
                            CellKind::Empty
                        }
                    })
                    .collect()
            })
            .collect();
        LevelData {
            width,
            height,
            grid,
            lamp: Lamp {
                position: Position::new(1, 1),
                direction: Direction::East,
            },
            target: Target {
                position: Position::new(width - 2, 1),
                direction: Direction::West,
            },
            metadata: LevelMetadata {
                name: "fixture".to_string(),
                difficulty: "easy".to_string(),
                max_mirrors: 3,
            },
        }
    }
}
