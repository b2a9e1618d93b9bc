//! # Beam Physics
//!
//! Deterministic beam propagation plus the target and illumination
//! evaluators built on top of it.
//!
//! The simulator is a discrete grid march: one cell per step, direction
//! changes only at mirrors, and two independent guards against runaway
//! beams (a visited-state cycle check and the [`MAX_STEPS`] budget). For a
//! valid level it is total: it always terminates and never errors, and a
//! beam that never reaches the target is a normal outcome rather than a
//! failure.
//!
//! [`MAX_STEPS`]: crate::config::MAX_STEPS

use crate::config::MAX_STEPS;
use crate::{Direction, Level, Mirror, Position, Target};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// One step of a traced beam.
///
/// `direction` is the direction of travel as the beam *enters* the cell;
/// when the cell holds a mirror, the reflected direction shows up on the
/// following cell, not this one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeamCell {
    pub position: Position,
    pub direction: Direction,
}

/// Traces a beam from an arbitrary start cell.
///
/// The start cell itself is never part of the returned path; the first
/// element is the cell after it. The march stops at walls, at the grid
/// boundary, when a (position, outgoing direction) state repeats, or after
/// [`MAX_STEPS`](crate::config::MAX_STEPS) iterations, whichever comes
/// first. The returned path is empty when the very first step is blocked.
///
/// # Examples
///
/// ```
/// use reflekt::{propagate_beam, Direction, Level, Position};
/// use std::collections::HashMap;
///
/// let level = Level::new(reflekt::level_fixtures::bordered_10x8()).unwrap();
/// let path = propagate_beam(
///     &level,
///     Position::new(1, 1),
///     Direction::East,
///     &HashMap::new(),
/// );
/// assert_eq!(path.first().unwrap().position, Position::new(2, 1));
/// assert_eq!(path.last().unwrap().position, Position::new(8, 1));
/// ```
pub fn propagate_beam(
    level: &Level,
    start: Position,
    direction: Direction,
    mirrors: &HashMap<Position, Mirror>,
) -> Vec<BeamCell> {
    let mut path = Vec::new();
    let mut visited: HashSet<(Position, Direction)> = HashSet::new();
    let mut position = start;
    let mut heading = direction;

    for _ in 0..MAX_STEPS {
        let next = position + heading.delta();
        if !level.is_valid_position(next) {
            trace!("beam left bounds at {next}, stopping");
            break;
        }
        if level.is_wall(next) {
            trace!("beam hit wall at {next}, stopping");
            break;
        }

        position = next;
        path.push(BeamCell {
            position,
            direction: heading,
        });

        if let Some(mirror) = mirrors.get(&position) {
            let outgoing = mirror.kind.reflect(heading);
            trace!(
                "beam reflected at {position}: {:?} -> {:?} via '{}'",
                heading,
                outgoing,
                mirror.kind.as_char()
            );
            heading = outgoing;
        }

        // Cycle guard: a repeated (position, outgoing direction) state
        // means the beam is in a closed reflector loop.
        if !visited.insert((position, heading)) {
            trace!("beam revisited ({position}, {heading:?}), stopping");
            break;
        }
    }

    debug!("beam from {start} {direction:?}: {} cells", path.len());
    path
}

/// Traces the beam from the level's lamp.
///
/// Convenience wrapper over [`propagate_beam`] using the lamp's position
/// and direction as the start state.
pub fn calculate_beam_path(level: &Level, mirrors: &HashMap<Position, Mirror>) -> Vec<BeamCell> {
    let lamp = level.lamp();
    propagate_beam(level, lamp.position, lamp.direction, mirrors)
}

/// Checks whether a beam path satisfies a target.
///
/// Only the **last** cell of the path counts: a beam that merely crosses
/// the target cell en route does not complete the puzzle. The final cell
/// must sit on the target's position and travel in the exact opposite of
/// the direction the target expects the beam from.
pub fn is_target_complete(beam_path: &[BeamCell], target: Target) -> bool {
    let Some(last) = beam_path.last() else {
        return false;
    };
    last.position == target.position && last.direction == target.direction.opposite()
}

/// Collects the set of lit cells for rendering.
///
/// The lamp's own cell is lit whenever a level is supplied, even for an
/// empty path. Path cells are deduplicated via set semantics; a beam path
/// should not self-intersect, but the set makes no assumption. With no
/// level, only the path's positions appear. Never fails.
pub fn illuminated_cells(level: Option<&Level>, beam_path: &[BeamCell]) -> HashSet<Position> {
    let mut lit = HashSet::new();
    if let Some(level) = level {
        lit.insert(level.lamp().position);
    }
    for cell in beam_path {
        lit.insert(cell.position);
    }
    lit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{level_fixtures, MirrorKind};

    fn level() -> Level {
        Level::new(level_fixtures::bordered_10x8()).unwrap()
    }

    fn mirrors(entries: &[(i32, i32, MirrorKind)]) -> HashMap<Position, Mirror> {
        entries
            .iter()
            .map(|&(x, y, kind)| {
                let position = Position::new(x, y);
                (position, Mirror { position, kind })
            })
            .collect()
    }

    #[test]
    fn test_straight_beam_to_target() {
        let level = level();
        let path = calculate_beam_path(&level, &HashMap::new());

        assert_eq!(
            path.first(),
            Some(&BeamCell {
                position: Position::new(2, 1),
                direction: Direction::East
            })
        );
        assert_eq!(
            path.last(),
            Some(&BeamCell {
                position: Position::new(8, 1),
                direction: Direction::East
            })
        );
        assert!(is_target_complete(&path, level.target()));
    }

    #[test]
    fn test_lamp_cell_not_in_path() {
        let level = level();
        let path = calculate_beam_path(&level, &HashMap::new());
        assert!(path
            .iter()
            .all(|cell| cell.position != level.lamp().position));
    }

    #[test]
    fn test_slash_mirror_redirects_north() {
        let level = level();
        let set = mirrors(&[(4, 1, MirrorKind::Slash)]);
        let path = calculate_beam_path(&level, &set);

        // The mirror cell itself records the incoming direction.
        assert!(path.contains(&BeamCell {
            position: Position::new(4, 1),
            direction: Direction::East
        }));
        // Redirected north: y=0 is wall, so the mirror cell ends the path.
        assert_eq!(path.last().unwrap().position, Position::new(4, 1));
        assert!(!is_target_complete(&path, level.target()));
    }

    #[test]
    fn test_two_mirror_dogleg() {
        let level = level();
        let set = mirrors(&[(4, 3, MirrorKind::Slash), (4, 2, MirrorKind::Backslash)]);
        let path = propagate_beam(&level, Position::new(1, 3), Direction::East, &set);

        assert!(path.contains(&BeamCell {
            position: Position::new(4, 3),
            direction: Direction::East
        }));
        assert!(path.contains(&BeamCell {
            position: Position::new(4, 2),
            direction: Direction::North
        }));
        assert!(path.contains(&BeamCell {
            position: Position::new(3, 2),
            direction: Direction::West
        }));
        assert_eq!(path.last().unwrap().position, Position::new(1, 2));
    }

    #[test]
    fn test_immediate_wall_gives_empty_path() {
        let level = level();
        let path = propagate_beam(&level, Position::new(1, 1), Direction::North, &HashMap::new());
        assert!(path.is_empty());
    }

    #[test]
    fn test_mirror_loop_terminates() {
        // Four mirrors forming a closed clockwise rectangle of reflections.
        let level = level();
        let set = mirrors(&[
            (2, 2, MirrorKind::Slash),
            (6, 2, MirrorKind::Backslash),
            (6, 5, MirrorKind::Slash),
            (2, 5, MirrorKind::Backslash),
        ]);
        let path = propagate_beam(&level, Position::new(2, 2), Direction::East, &set);

        // One full lap of the 14-cell perimeter, one overshoot cell, then
        // the cycle guard fires.
        assert_eq!(path.len(), 15);
        assert!(path.len() < MAX_STEPS);
        assert_eq!(
            path.last(),
            Some(&BeamCell {
                position: Position::new(3, 2),
                direction: Direction::East
            })
        );
    }

    #[test]
    fn test_consecutive_cells_differ() {
        let level = level();
        let set = mirrors(&[(4, 3, MirrorKind::Slash), (4, 2, MirrorKind::Backslash)]);
        let path = propagate_beam(&level, Position::new(1, 3), Direction::East, &set);
        for pair in path.windows(2) {
            assert_ne!(pair[0].position, pair[1].position);
        }
    }

    #[test]
    fn test_target_requires_final_cell() {
        let level = level();
        // Beam crosses (8, 1) and bends north there, ending elsewhere.
        let set = mirrors(&[(8, 1, MirrorKind::Backslash)]);
        let path = calculate_beam_path(&level, &set);
        assert!(path
            .iter()
            .any(|cell| cell.position == level.target().position));
        assert!(!is_target_complete(&path, level.target()));
    }

    #[test]
    fn test_target_requires_opposite_direction() {
        let target = Target {
            position: Position::new(8, 1),
            direction: Direction::West,
        };
        // Right position, wrong travel direction.
        let path = [BeamCell {
            position: Position::new(8, 1),
            direction: Direction::North,
        }];
        assert!(!is_target_complete(&path, target));

        let path = [BeamCell {
            position: Position::new(8, 1),
            direction: Direction::East,
        }];
        assert!(is_target_complete(&path, target));
    }

    #[test]
    fn test_empty_path_never_complete() {
        let level = level();
        assert!(!is_target_complete(&[], level.target()));
    }

    #[test]
    fn test_illuminated_cells_includes_lamp() {
        let level = level();
        let lit = illuminated_cells(Some(&level), &[]);
        assert_eq!(lit.len(), 1);
        assert!(lit.contains(&level.lamp().position));
    }

    #[test]
    fn test_illuminated_cells_counts_unique_path() {
        let level = level();
        let path = calculate_beam_path(&level, &HashMap::new());
        let lit = illuminated_cells(Some(&level), &path);
        assert_eq!(lit.len(), 1 + path.len());
    }

    #[test]
    fn test_illuminated_cells_without_level() {
        let path = [BeamCell {
            position: Position::new(3, 3),
            direction: Direction::East,
        }];
        let lit = illuminated_cells(None, &path);
        assert_eq!(lit.len(), 1);
        assert!(lit.contains(&Position::new(3, 3)));
    }
}
