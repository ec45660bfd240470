//! Bullet lifecycle: fire, advance, retire

use glam::Vec2;

use super::state::{Bullet, Direction, EntityId, EntityKind, GameEvent, GameState};

/// Position of a bullet after one tick of flight
#[inline]
pub fn advance(pos: Vec2, direction: Direction, speed: f32) -> Vec2 {
    pos + direction.unit() * speed
}

/// Fire a bullet in the player's facing direction.
///
/// Returns `None` without touching state when the player has no gun.
pub fn fire(state: &mut GameState) -> Option<EntityId> {
    if !state.player.has_gun {
        return None;
    }

    let direction = state.player.facing;
    let pos = state.player.pos + Vec2::new(0.0, state.settings.tuning.bullet_spawn_offset_y);
    let id = state.next_entity_id();
    state
        .bullets
        .push(Bullet::new(id, pos, direction, state.settings.tuning.bullet_size));

    state.emit(GameEvent::VisualCreated {
        id,
        kind: EntityKind::Bullet,
        pos,
    });
    let angle = direction.bullet_angle();
    if angle != 0.0 {
        state.emit(GameEvent::AngleChanged { id, degrees: angle });
    }
    Some(id)
}

/// Move every live bullet one step along its fixed direction
pub fn advance_all(state: &mut GameState) {
    let speed = state.settings.tuning.bullet_speed;
    for bullet in &mut state.bullets {
        bullet.pos = advance(bullet.pos, bullet.direction(), speed);
    }
}

/// Drop a bullet and release its visual. Unknown ids are ignored.
pub fn remove(state: &mut GameState, id: EntityId) -> bool {
    let Some(idx) = state.bullets.iter().position(|b| b.id == id) else {
        return false;
    };
    state.bullets.remove(idx);
    state.emit(GameEvent::VisualDestroyed { id });
    true
}

/// Remove bullets that have flown past the cull margin around the viewport
pub fn cull_offscreen(state: &mut GameState) {
    let Some(margin) = state.settings.tuning.bullet_cull_margin else {
        return;
    };
    let bounds = state.view_rect().expand(margin);

    let gone: Vec<EntityId> = state
        .bullets
        .iter()
        .filter(|b| !bounds.contains(b.pos))
        .map(|b| b.id)
        .collect();

    for id in gone {
        log::debug!("Bullet {id} left the play area");
        remove(state, id);
    }
}
