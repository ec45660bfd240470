//! Per-frame gameplay tick
//!
//! Order within a playing frame is fixed: timers, fire, bullets, zombies,
//! player, camera, combat, round check.

use super::bullets;
use super::combat;
use super::player::{self, HeldKeys};
use super::pursuit;
use super::round;
use super::state::{GameEvent, GameState, RoundPhase};
use super::timer::TimerAction;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub keys: HeldKeys,
    /// Fire released this frame (edge-triggered)
    pub fire: bool,
}

/// Advance the game by one frame that took `dt_ms` of wall time.
///
/// Movement is per-frame; `dt_ms` only drives the timer queue.
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: u32) {
    state.time_ticks += 1;
    state.clock_ms += u64::from(dt_ms);

    if run_timers(state) {
        // Fresh round; gameplay resumes next frame
        return;
    }

    if state.phase == RoundPhase::GameOver {
        return;
    }

    if input.fire {
        bullets::fire(state);
    }
    bullets::advance_all(state);
    pursuit::update_zombies(state);
    player::update_player(state, input.keys);

    if state.camera != state.player.pos {
        state.camera = state.player.pos;
        state.emit(GameEvent::CameraFollow { pos: state.camera });
    }
    bullets::cull_offscreen(state);

    let outcome = combat::resolve(state);
    if let Some(zombie) = outcome.caught_by {
        round::enter_game_over(state, zombie);
    }
}

/// Fire every due timer. Returns true if the round was restarted.
fn run_timers(state: &mut GameState) -> bool {
    while let Some(due) = state.scheduler.pop_due(state.clock_ms) {
        match due.action {
            TimerAction::RemoveZombie(id) => {
                combat::remove_zombie(state, id);
            }
            TimerAction::SpawnZombie => {
                // The spawner stops with the round
                if state.phase == RoundPhase::GameOver {
                    continue;
                }
                state.spawn_random_zombie();
                let interval = state.settings.tuning.zombie_spawn_interval_ms;
                state
                    .scheduler
                    .schedule(due.fire_at_ms, interval, TimerAction::SpawnZombie);
            }
            TimerAction::RestartRound => {
                round::restart(state);
                return true;
            }
        }
    }
    false
}
