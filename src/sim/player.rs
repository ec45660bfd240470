//! Player movement from held keys

use super::state::{Direction, GameEvent, GameState};

/// Movement keys held this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl HeldKeys {
    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

/// Apply held keys to the player.
///
/// Keys are applied Down, Up, Right, Left; each one moves the player and
/// takes over the facing, so with several held the last in that order faces.
pub fn update_player(state: &mut GameState, keys: HeldKeys) {
    let player = &mut state.player;
    let speed = player.speed;

    if keys.down {
        player.pos.y += speed;
        player.facing = Direction::Down;
    }
    if keys.up {
        player.pos.y -= speed;
        player.facing = Direction::Up;
    }
    if keys.right {
        player.pos.x += speed;
        player.facing = Direction::Right;
    }
    if keys.left {
        player.pos.x -= speed;
        player.facing = Direction::Left;
    }
    player.moving = keys.any();

    sync_animation(state);
}

/// Report the player's animation if it differs from the last one sent
pub fn sync_animation(state: &mut GameState) {
    let key = state.player.current_animation();
    if state.player.animation == Some(key) {
        return;
    }
    state.player.animation = Some(key);
    state.emit(GameEvent::AnimationChanged {
        id: state.player.id,
        key,
    });
}
