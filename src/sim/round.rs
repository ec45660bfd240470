//! Round lifecycle: Playing -> GameOver -> (restart) -> Playing
//!
//! GameOver is terminal for the round. The only way out is the restart timer
//! scheduled on entry, which rebuilds the whole state from settings.

use rand::Rng;

use super::state::{EntityId, GameEvent, GameState, RoundPhase};
use super::timer::TimerAction;
use crate::consts::GAME_OVER_TINT;

/// End the round. Returns false if it was already over.
pub fn enter_game_over(state: &mut GameState, caught_by: EntityId) -> bool {
    if state.phase == RoundPhase::GameOver {
        return false;
    }

    state.phase = RoundPhase::GameOver;
    state.player.alive = false;
    log::info!(
        "Round {} over after {} ticks (caught by zombie {caught_by})",
        state.round,
        state.time_ticks
    );

    state.emit(GameEvent::PlayerCaught { by: caught_by });
    state.emit(GameEvent::RoundOver);

    // Freeze the scene
    let player = state.player.id;
    state.emit(GameEvent::Tinted {
        id: player,
        rgb: GAME_OVER_TINT,
    });
    state.emit(GameEvent::AnimationStopped { id: player });
    let zombies: Vec<EntityId> = state.zombies.iter().map(|z| z.id).collect();
    for id in zombies {
        state.emit(GameEvent::AnimationStopped { id });
    }

    let delay = state.settings.tuning.restart_delay_ms;
    state
        .scheduler
        .schedule(state.clock_ms, delay, TimerAction::RestartRound);
    true
}

/// Replace the state with a fresh round.
///
/// Events the host has not drained yet are kept, followed by `SceneReset`
/// and the new round's visuals.
pub fn restart(state: &mut GameState) {
    let round = state.round + 1;
    let seed: u64 = state.rng.random();

    let mut pending = state.drain_events();
    pending.push(GameEvent::SceneReset { round });

    let mut next = GameState::for_round(state.settings.clone(), seed, round);
    pending.extend(next.drain_events());
    for event in pending {
        next.emit(event);
    }

    log::info!("Round {round} started (seed {seed})");
    *state = next;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use glam::Vec2;

    #[test]
    fn test_game_over_freezes_scene_once() {
        let mut state = GameState::new(Settings::default(), 9);
        let zombie = state.spawn_zombie(Vec2::new(320.0, 180.0));
        state.drain_events();

        assert!(enter_game_over(&mut state, zombie));
        assert_eq!(state.phase, RoundPhase::GameOver);
        assert!(!state.player.alive);
        assert!(state.events().contains(&GameEvent::Tinted {
            id: state.player.id,
            rgb: 0xff0000
        }));
        assert!(state.events().contains(&GameEvent::AnimationStopped { id: zombie }));
        assert!(state.scheduler.is_scheduled(TimerAction::RestartRound));

        let scheduled = state.scheduler.len();
        assert!(!enter_game_over(&mut state, zombie));
        assert_eq!(state.scheduler.len(), scheduled);
    }

    #[test]
    fn test_restart_builds_fresh_round() {
        let mut state = GameState::new(Settings::default(), 9);
        state.player.has_gun = true;
        state.spawn_zombie(Vec2::new(320.0, 180.0));
        enter_game_over(&mut state, 3);
        state.drain_events();

        restart(&mut state);

        assert_eq!(state.round, 2);
        assert_eq!(state.phase, RoundPhase::Playing);
        assert!(state.player.alive && !state.player.has_gun);
        assert!(state.zombies.is_empty());
        assert!(state.gun.visible);
        assert_eq!(state.clock_ms, 0);
        assert_eq!(state.events()[0], GameEvent::SceneReset { round: 2 });
        assert_eq!(state.events().len(), 3);
    }

    #[test]
    fn test_restart_seed_follows_previous_round() {
        let mut a = GameState::new(Settings::default(), 77);
        let mut b = GameState::new(Settings::default(), 77);
        restart(&mut a);
        restart(&mut b);
        assert_eq!(a.seed, b.seed);
        assert_ne!(a.seed, 77);
    }
}
