//! Deterministic gameplay module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One `tick` per rendered frame, no blocking
//! - Delays run on a virtual clock, never a wall-clock timer
//! - Seeded RNG only
//! - Stable iteration order (spawn order for zombies, fire order for bullets)
//! - No rendering or platform dependencies; the host reads `GameEvent`s

pub mod bullets;
pub mod collision;
pub mod combat;
pub mod player;
pub mod pursuit;
pub mod round;
pub mod state;
pub mod tick;
pub mod timer;

pub use collision::{Rect, distance, rect_overlap};
pub use combat::CombatOutcome;
pub use player::HeldKeys;
pub use pursuit::{PursuitStep, pursuit_step};
pub use state::{
    AnimationKey, Bullet, Direction, EntityId, EntityKind, GameEvent, GameState, Gun, Player,
    RoundPhase, Zombie,
};
pub use tick::{TickInput, tick};
pub use timer::{Scheduler, TimerAction};
