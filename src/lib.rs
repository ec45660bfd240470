//! Zombie Assault - top-down arcade gameplay core
//!
//! Core modules:
//! - `sim`: Deterministic per-frame gameplay (pursuit, bullets, combat, round lifecycle)
//! - `settings`: Tuning values and the presentation block handed to the host
//! - `error`: Boundary and configuration errors
//!
//! Rendering, input polling, sprite animation and audio belong to the host
//! engine. The core only reports what changed through `sim::GameEvent`s.

pub mod error;
pub mod settings;
pub mod sim;

pub use error::{SettingsError, SimError};
pub use settings::{Presentation, Settings, Tuning};

/// Default gameplay constants
pub mod consts {
    /// Nominal frame length in milliseconds (60 fps host)
    pub const FRAME_MS: u32 = 16;

    /// Player displacement per tick, per held key
    pub const PLAYER_SPEED: f32 = 3.0;
    /// Zombie pursuit step per tick
    pub const ZOMBIE_STEP: f32 = 1.0;
    /// Bullet displacement per tick
    pub const BULLET_SPEED: f32 = 20.0;
    /// Bullets spawn this far below the player's origin
    pub const BULLET_SPAWN_OFFSET_Y: f32 = 5.0;

    /// Zombie spawner period
    pub const ZOMBIE_SPAWN_INTERVAL_MS: u64 = 1000;
    /// Spawn coordinates are drawn from [0, SPAWN_AREA) on each axis
    pub const ZOMBIE_SPAWN_AREA: f32 = 1000.0;
    /// How long a shot zombie stays on screen before removal
    pub const DEAD_ZOMBIE_LINGER_MS: u64 = 500;
    /// Delay between game over and the round restart
    pub const RESTART_DELAY_MS: u64 = 1000;

    /// Player start position
    pub const PLAYER_START: (f32, f32) = (320.0, 180.0);
    /// Gun pickup position
    pub const GUN_POSITION: (f32, f32) = (100.0, 100.0);

    /// Sprite frame sizes (pixels, before scale)
    pub const PLAYER_FRAME: f32 = 32.0;
    pub const ZOMBIE_FRAME: f32 = 32.0;
    pub const GUN_FRAME: f32 = 16.0;
    pub const BULLET_FRAME: f32 = 32.0;

    /// Sprite scales
    pub const PLAYER_SCALE: f32 = 1.1;
    pub const ZOMBIE_SCALE: f32 = 2.0;
    pub const GUN_SCALE: f32 = 1.0;
    pub const BULLET_SCALE: f32 = 0.3;

    /// Bullets further than this outside the viewport are culled
    pub const BULLET_CULL_MARGIN: f32 = 64.0;

    /// Viewport
    pub const VIEWPORT_WIDTH: u32 = 640;
    pub const VIEWPORT_HEIGHT: u32 = 360;

    /// Tint applied to the player on game over
    pub const GAME_OVER_TINT: u32 = 0xff0000;
}
