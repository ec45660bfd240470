//! Collision-driven state changes
//!
//! Three passes, always all three, always in this order:
//! 1. bullets against living zombies
//! 2. every zombie against the player
//! 3. the gun against the player

use super::bullets;
use super::collision::rect_overlap;
use super::state::{EntityId, GameEvent, GameState};
use super::timer::TimerAction;

/// Zombie angle for the death pose
const DEAD_ZOMBIE_ANGLE: f32 = 90.0;

/// What happened during one resolve pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CombatOutcome {
    pub killed: Vec<EntityId>,
    /// First zombie found touching the player
    pub caught_by: Option<EntityId>,
    pub gun_picked_up: bool,
}

pub fn resolve(state: &mut GameState) -> CombatOutcome {
    let mut outcome = CombatOutcome {
        killed: resolve_bullet_hits(state),
        ..Default::default()
    };
    outcome.caught_by = find_catcher(state);
    outcome.gun_picked_up = resolve_gun_pickup(state);
    outcome
}

/// Pass 1. A bullet is spent on its first hit, and a zombie shot earlier is
/// no longer a target.
fn resolve_bullet_hits(state: &mut GameState) -> Vec<EntityId> {
    let mut spent = vec![false; state.bullets.len()];
    let mut killed = Vec::new();

    for zombie in state.zombies.iter_mut().filter(|z| !z.is_dead) {
        let zombie_box = zombie.bounds();
        let hit = state
            .bullets
            .iter()
            .enumerate()
            .find(|(i, b)| !spent[*i] && rect_overlap(&b.bounds(), &zombie_box))
            .map(|(i, _)| i);

        if let Some(i) = hit {
            spent[i] = true;
            zombie.is_dead = true;
            zombie.angle = DEAD_ZOMBIE_ANGLE;
            killed.push(zombie.id);
        }
    }

    let spent_ids: Vec<EntityId> = state
        .bullets
        .iter()
        .zip(&spent)
        .filter(|(_, s)| **s)
        .map(|(b, _)| b.id)
        .collect();
    for id in spent_ids {
        bullets::remove(state, id);
    }

    let linger = state.settings.tuning.dead_zombie_linger_ms;
    for &id in &killed {
        log::debug!("Zombie {id} shot");
        state.emit(GameEvent::ZombieKilled { id });
        state.emit(GameEvent::AngleChanged {
            id,
            degrees: DEAD_ZOMBIE_ANGLE,
        });
        state.emit(GameEvent::AnimationStopped { id });
        state
            .scheduler
            .schedule(state.clock_ms, linger, TimerAction::RemoveZombie(id));
    }

    killed
}

/// Pass 2. Zombies still lingering after death are included.
fn find_catcher(state: &GameState) -> Option<EntityId> {
    let player_box = state.player.bounds();
    state
        .zombies
        .iter()
        .find(|z| rect_overlap(&z.bounds(), &player_box))
        .map(|z| z.id)
}

/// Pass 3. The gun can only be picked up once per round.
fn resolve_gun_pickup(state: &mut GameState) -> bool {
    if state.gun.picked_up || !rect_overlap(&state.gun.bounds(), &state.player.bounds()) {
        return false;
    }

    state.gun.picked_up = true;
    state.gun.visible = false;
    state.player.has_gun = true;
    state.emit(GameEvent::GunPickedUp);
    state.emit(GameEvent::Hidden { id: state.gun.id });
    log::debug!("Gun picked up");
    true
}

/// Drop a zombie whose death pose has run its course
pub fn remove_zombie(state: &mut GameState, id: EntityId) -> bool {
    let Some(idx) = state.zombies.iter().position(|z| z.id == id) else {
        return false;
    };
    state.zombies.remove(idx);
    state.emit(GameEvent::VisualDestroyed { id });
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::bullets::fire;
    use crate::sim::state::Direction;
    use glam::Vec2;

    fn armed_state() -> GameState {
        let mut state = GameState::new(Settings::default(), 5);
        state.player.has_gun = true;
        state.gun.picked_up = true;
        state.gun.visible = false;
        state.drain_events();
        state
    }

    #[test]
    fn test_bullet_kills_zombie_and_is_spent() {
        let mut state = armed_state();
        let zombie = state.spawn_zombie(Vec2::new(320.0, 100.0));
        state.player.facing = Direction::Up;
        let bullet = fire(&mut state).unwrap();
        state.bullets[0].pos = Vec2::new(320.0, 100.0);

        let outcome = resolve(&mut state);

        assert_eq!(outcome.killed, vec![zombie]);
        assert!(state.bullets.is_empty());
        let z = state.zombie(zombie).unwrap();
        assert!(z.is_dead);
        assert_eq!(z.angle, 90.0);
        assert!(state.events().contains(&GameEvent::VisualDestroyed { id: bullet }));
        assert!(state.scheduler.is_scheduled(TimerAction::RemoveZombie(zombie)));
    }

    #[test]
    fn test_one_bullet_cannot_kill_two() {
        let mut state = armed_state();
        let first = state.spawn_zombie(Vec2::new(320.0, 90.0));
        let second = state.spawn_zombie(Vec2::new(320.0, 110.0));
        fire(&mut state);
        state.bullets[0].pos = Vec2::new(320.0, 100.0);

        let outcome = resolve(&mut state);

        assert_eq!(outcome.killed, vec![first]);
        assert!(!state.zombie(second).unwrap().is_dead);
    }

    #[test]
    fn test_two_bullets_two_kills() {
        let mut state = armed_state();
        let first = state.spawn_zombie(Vec2::new(320.0, 0.0));
        let second = state.spawn_zombie(Vec2::new(600.0, 0.0));
        fire(&mut state);
        fire(&mut state);
        state.bullets[0].pos = Vec2::new(600.0, 0.0);
        state.bullets[1].pos = Vec2::new(320.0, 0.0);

        let outcome = resolve(&mut state);

        assert_eq!(outcome.killed, vec![first, second]);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_dead_zombie_absorbs_no_second_bullet() {
        let mut state = armed_state();
        let zombie = state.spawn_zombie(Vec2::new(320.0, 0.0));
        fire(&mut state);
        state.bullets[0].pos = Vec2::new(320.0, 0.0);
        resolve(&mut state);
        state.drain_events();

        fire(&mut state);
        state.bullets[0].pos = Vec2::new(320.0, 0.0);
        let outcome = resolve(&mut state);

        assert!(outcome.killed.is_empty());
        assert_eq!(state.bullets.len(), 1);
        assert!(
            !state
                .events()
                .contains(&GameEvent::ZombieKilled { id: zombie })
        );
    }

    #[test]
    fn test_zombie_touching_player_is_caught() {
        let mut state = armed_state();
        let zombie = state.spawn_zombie(Vec2::new(340.0, 180.0));
        let outcome = resolve(&mut state);
        assert_eq!(outcome.caught_by, Some(zombie));
    }

    #[test]
    fn test_zombie_shot_while_touching_still_catches() {
        let mut state = armed_state();
        let zombie = state.spawn_zombie(Vec2::new(340.0, 180.0));
        fire(&mut state);
        state.bullets[0].pos = Vec2::new(340.0, 180.0);

        let outcome = resolve(&mut state);

        assert_eq!(outcome.killed, vec![zombie]);
        assert_eq!(outcome.caught_by, Some(zombie));
    }

    #[test]
    fn test_gun_pickup_once() {
        let mut state = GameState::new(Settings::default(), 5);
        state.player.pos = state.gun.pos;
        state.drain_events();

        let outcome = resolve(&mut state);
        assert!(outcome.gun_picked_up);
        assert!(state.player.has_gun);
        assert!(!state.gun.visible);
        assert!(state.events().contains(&GameEvent::GunPickedUp));
        state.drain_events();

        let outcome = resolve(&mut state);
        assert!(!outcome.gun_picked_up);
        assert!(state.events().is_empty());
        assert!(state.player.has_gun);
    }

    #[test]
    fn test_remove_zombie() {
        let mut state = armed_state();
        let id = state.spawn_zombie(Vec2::ZERO);
        assert!(remove_zombie(&mut state, id));
        assert!(state.zombies.is_empty());
        assert!(!remove_zombie(&mut state, id));
    }
}
