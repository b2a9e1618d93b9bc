//! # Game State Module
//!
//! The mirror registry: the one mutable piece of the engine.
//!
//! A [`GameState`] is bound to exactly one [`Level`] for its whole life and
//! owns the mapping from grid position to placed [`Mirror`], plus the
//! puzzle completion flag. Every mutation re-validates the placement
//! invariants, and mutations fail quietly with `false` rather than
//! erroring: illegal placements (clicking a wall, exceeding the budget)
//! are expected, frequent, and recoverable through normal interaction.

use crate::{calculate_beam_path, is_target_complete, BeamCell, Level, MirrorKind, Position};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A player-placed mirror.
///
/// Invariants, enforced by [`GameState::add_mirror`]: a mirror only exists
/// at an empty cell, at most one mirror occupies a cell, and the total
/// count never exceeds the level's mirror budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mirror {
    pub position: Position,
    pub kind: MirrorKind,
}

/// Central puzzle state: one level plus the player's mirrors.
///
/// # Examples
///
/// ```
/// use reflekt::{GameState, Level, MirrorKind, Position};
///
/// let level = Level::new(reflekt::level_fixtures::bordered_10x8()).unwrap();
/// let mut state = GameState::new(level);
/// assert!(state.add_mirror(Position::new(4, 1), MirrorKind::Slash));
/// assert_eq!(state.mirror_count(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// The level this registry is bound to
    level: Level,
    /// Placed mirrors, keyed by grid position
    mirrors: HashMap<Position, Mirror>,
    /// Whether the puzzle has been solved
    completed: bool,
}

impl GameState {
    /// Creates a registry bound to a level.
    ///
    /// A registry cannot exist without a level, and an invalid level
    /// cannot exist at all ([`Level::new`] already rejected it), so
    /// construction is infallible.
    pub fn new(level: Level) -> Self {
        Self {
            level,
            mirrors: HashMap::new(),
            completed: false,
        }
    }

    /// The level this state is bound to.
    pub fn level(&self) -> &Level {
        &self.level
    }

    /// Attempts to place a mirror, returning whether it was placed.
    ///
    /// This is an advisory API: callers probe legality interactively, so
    /// illegal placements return `false` instead of erroring. Placement is
    /// rejected when the position is out of bounds or not an empty cell,
    /// the cell already holds a mirror, or the budget is exhausted.
    pub fn add_mirror(&mut self, position: Position, kind: MirrorKind) -> bool {
        if !self.level.is_empty_cell(position) {
            debug!("rejected mirror at {position}: not an empty cell");
            return false;
        }
        if self.mirrors.contains_key(&position) {
            debug!("rejected mirror at {position}: cell already occupied");
            return false;
        }
        if self.mirrors.len() >= self.max_mirrors() {
            debug!("rejected mirror at {position}: budget exhausted");
            return false;
        }

        self.mirrors.insert(position, Mirror { position, kind });
        debug!(
            "placed '{}' mirror at {position} ({} remaining)",
            kind.as_char(),
            self.remaining_mirrors()
        );
        true
    }

    /// Removes the mirror at a position, returning whether one existed.
    pub fn remove_mirror(&mut self, position: Position) -> bool {
        let removed = self.mirrors.remove(&position).is_some();
        if removed {
            debug!("removed mirror at {position}");
        }
        removed
    }

    /// The mirror at a position, if any.
    pub fn get_mirror(&self, position: Position) -> Option<&Mirror> {
        self.mirrors.get(&position)
    }

    /// Number of mirrors currently placed.
    pub fn mirror_count(&self) -> usize {
        self.mirrors.len()
    }

    /// The level's mirror budget.
    pub fn max_mirrors(&self) -> usize {
        self.level.metadata().max_mirrors
    }

    /// Mirrors still available to place.
    pub fn remaining_mirrors(&self) -> usize {
        self.max_mirrors().saturating_sub(self.mirror_count())
    }

    /// Returns a defensive copy of the placed mirrors.
    ///
    /// The registry is the sole owner of mirror data; handed-out views are
    /// copies, never shared references, so callers cannot bypass placement
    /// validation by mutating the result.
    pub fn mirrors(&self) -> HashMap<Position, Mirror> {
        self.mirrors.clone()
    }

    /// Removes all mirrors, leaving the completion flag untouched.
    pub fn clear_mirrors(&mut self) {
        self.mirrors.clear();
    }

    /// Clears mirrors and the completion flag, keeping the level binding.
    pub fn reset(&mut self) {
        self.mirrors.clear();
        self.completed = false;
    }

    /// Whether the puzzle has been marked solved.
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Sets the completion flag.
    pub fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }

    /// Traces the beam for the current mirror configuration.
    pub fn beam_path(&self) -> Vec<BeamCell> {
        calculate_beam_path(&self.level, &self.mirrors)
    }

    /// Traces the beam, evaluates the target, and records the verdict.
    pub fn check_completion(&mut self) -> bool {
        let path = self.beam_path();
        let complete = is_target_complete(&path, self.level.target());
        self.completed = complete;
        complete
    }
}
