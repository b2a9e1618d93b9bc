//! # Reflekt
//!
//! A grid-based light-reflection puzzle engine.
//!
//! ## Architecture Overview
//!
//! A lamp emits a beam across a rectangular grid; the player places a
//! bounded number of mirrors to steer the beam so it reaches a target cell
//! from the direction the target expects. The engine is split into a few
//! focused pieces:
//!
//! - **Level Model**: Immutable, validated grid plus lamp/target metadata
//! - **Game State**: The mutable registry of player-placed mirrors
//! - **Beam Simulator**: Deterministic grid march with mirror reflection
//!   and cycle detection
//! - **Evaluators**: Target completion check and illuminated-cell set
//!
//! The engine is fully synchronous and performs no I/O of its own;
//! rendering, input handling, and level-catalog storage are external
//! collaborators that consume the plain data structures returned here.

pub mod game;

pub use game::*;

// Explicit re-exports for the commonly used types
pub use game::{
    calculate_beam_path, illuminated_cells, is_target_complete, propagate_beam, BeamCell,
    CellKind, Direction, GameState, Lamp, Level, LevelData, LevelMetadata, Mirror, MirrorKind,
    Position, Target,
};

/// Core error type for the Reflekt engine.
#[derive(thiserror::Error, Debug)]
pub enum ReflektError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Level data failed construction-time validation
    #[error("Invalid level: {0}")]
    InvalidLevel(String),
}

/// Result type used throughout the Reflekt codebase.
pub type ReflektResult<T> = Result<T, ReflektError>;

/// Version information for the engine.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine configuration constants.
pub mod config {
    /// Minimum level width in cells
    pub const MIN_WIDTH: i32 = 6;

    /// Maximum level width in cells
    pub const MAX_WIDTH: i32 = 30;

    /// Minimum level height in cells
    pub const MIN_HEIGHT: i32 = 4;

    /// Maximum level height in cells
    pub const MAX_HEIGHT: i32 = 16;

    /// Hard iteration cap bounding worst-case beam simulation cost
    pub const MAX_STEPS: usize = 1000;
}
