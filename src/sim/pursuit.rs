//! Zombie pursuit
//!
//! Each tick a living zombie takes the one of its eight neighbouring steps
//! that ends closest to the player. No path planning, no obstacles.

use glam::Vec2;

use super::collision::distance;
use super::state::{AnimationKey, Direction, GameEvent, GameState};

/// Result of a single pursuit step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PursuitStep {
    pub pos: Vec2,
    /// `None` only when the step did not move the zombie at all
    pub facing: Option<Direction>,
}

/// Candidate offsets in evaluation order. Earlier entries win ties.
fn candidate_offsets(step: f32) -> [Vec2; 8] {
    [
        Vec2::new(-step, 0.0),
        Vec2::new(step, 0.0),
        Vec2::new(0.0, -step),
        Vec2::new(0.0, step),
        Vec2::new(-step, -step),
        Vec2::new(step, step),
        Vec2::new(-step, step),
        Vec2::new(step, -step),
    ]
}

/// Pick the next position for a zombie at `from` chasing `target`.
///
/// Facing comes from the sign of the chosen delta: horizontal first, then
/// vertical, so on a diagonal the vertical facing is the one reported.
pub fn pursuit_step(from: Vec2, target: Vec2, step: f32) -> PursuitStep {
    let mut best = from;
    let mut best_dist = f32::INFINITY;
    for offset in candidate_offsets(step) {
        let candidate = from + offset;
        let d = distance(target, candidate);
        if d < best_dist {
            best_dist = d;
            best = candidate;
        }
    }

    let mut facing = None;
    if best.x < from.x {
        facing = Some(Direction::Left);
    }
    if best.x > from.x {
        facing = Some(Direction::Right);
    }
    if best.y < from.y {
        facing = Some(Direction::Up);
    }
    if best.y > from.y {
        facing = Some(Direction::Down);
    }

    PursuitStep { pos: best, facing }
}

/// Sprite rotation for a walking zombie
fn walking_angle(facing: Direction) -> f32 {
    if facing == Direction::Up { 180.0 } else { 0.0 }
}

/// Move every living zombie one step toward the player
pub fn update_zombies(state: &mut GameState) {
    let target = state.player.pos;
    let step = state.settings.tuning.zombie_step;
    let mut events = Vec::new();

    for zombie in state.zombies.iter_mut().filter(|z| !z.is_dead) {
        let next = pursuit_step(zombie.pos, target, step);
        zombie.pos = next.pos;

        let Some(facing) = next.facing else {
            continue;
        };
        zombie.facing = facing;

        let angle = walking_angle(facing);
        if zombie.angle != angle {
            zombie.angle = angle;
            events.push(GameEvent::AngleChanged {
                id: zombie.id,
                degrees: angle,
            });
        }

        let key = AnimationKey::Zombie { facing };
        if zombie.animation != Some(key) {
            zombie.animation = Some(key);
            events.push(GameEvent::AnimationChanged { id: zombie.id, key });
        }
    }

    for event in events {
        state.emit(event);
    }
}
