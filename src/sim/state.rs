//! Game state and core simulation types
//!
//! One `GameState` is built per round and owns every entity, the timer queue
//! and the outgoing event buffer. Nothing outside the tick mutates it.

use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::timer::{Scheduler, TimerAction};
use crate::error::SimError;
use crate::settings::Settings;

/// Stable handle for anything the host draws
pub type EntityId = u32;

/// Four-way facing, shared by the player, zombies and bullets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::Left => "Left",
            Direction::Right => "Right",
        }
    }

    /// Unit step in screen space (y grows downward)
    pub fn unit(&self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
        }
    }

    /// Sprite rotation for a bullet travelling this way (degrees)
    pub fn bullet_angle(&self) -> f32 {
        match self {
            Direction::Up => 0.0,
            Direction::Down => 180.0,
            Direction::Right => 90.0,
            Direction::Left => -90.0,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(SimError::InvalidDirection {
                found: s.to_string(),
            }),
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = SimError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Direction::ALL
            .get(code as usize)
            .copied()
            .ok_or_else(|| SimError::InvalidDirection {
                found: code.to_string(),
            })
    }
}

/// What kind of visual the host should create
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Zombie,
    Gun,
    Bullet,
}

/// Animation identifiers understood by the host's sprite sheets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimationKey {
    Player {
        moving: bool,
        with_gun: bool,
        facing: Direction,
    },
    Zombie {
        facing: Direction,
    },
}

impl fmt::Display for AnimationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnimationKey::Player {
                moving,
                with_gun,
                facing,
            } => {
                f.write_str(if *moving { "cowboy" } else { "idle" })?;
                if *with_gun {
                    f.write_str("WithGun")?;
                }
                f.write_str(facing.as_str())
            }
            AnimationKey::Zombie { facing } => write!(f, "zombie{facing}"),
        }
    }
}

/// The player character
#[derive(Debug, Clone)]
pub struct Player {
    pub id: EntityId,
    pub pos: Vec2,
    pub facing: Direction,
    pub speed: f32,
    pub has_gun: bool,
    pub alive: bool,
    /// Any movement key held this tick
    pub moving: bool,
    /// Last animation reported to the host
    pub animation: Option<AnimationKey>,
    pub size: Vec2,
}

impl Player {
    pub fn bounds(&self) -> Rect {
        Rect::centered(self.pos, self.size)
    }

    pub fn current_animation(&self) -> AnimationKey {
        AnimationKey::Player {
            moving: self.moving,
            with_gun: self.has_gun,
            facing: self.facing,
        }
    }
}

/// A zombie chasing the player
#[derive(Debug, Clone)]
pub struct Zombie {
    pub id: EntityId,
    pub pos: Vec2,
    pub facing: Direction,
    pub is_dead: bool,
    /// Sprite rotation in degrees
    pub angle: f32,
    pub animation: Option<AnimationKey>,
    pub size: Vec2,
}

impl Zombie {
    pub fn bounds(&self) -> Rect {
        Rect::centered(self.pos, self.size)
    }
}

/// A bullet in flight. Its direction is fixed at spawn.
#[derive(Debug, Clone)]
pub struct Bullet {
    pub id: EntityId,
    pub pos: Vec2,
    direction: Direction,
    pub size: Vec2,
}

impl Bullet {
    pub fn new(id: EntityId, pos: Vec2, direction: Direction, size: Vec2) -> Self {
        Self {
            id,
            pos,
            direction,
            size,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn bounds(&self) -> Rect {
        Rect::centered(self.pos, self.size)
    }
}

/// The one-shot gun pickup
#[derive(Debug, Clone)]
pub struct Gun {
    pub id: EntityId,
    pub pos: Vec2,
    pub visible: bool,
    pub picked_up: bool,
    pub size: Vec2,
}

impl Gun {
    pub fn bounds(&self) -> Rect {
        Rect::centered(self.pos, self.size)
    }
}

/// Round lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoundPhase {
    #[default]
    Playing,
    /// Frozen until the scheduled restart fires
    GameOver,
}

/// Visual directives for the host, drained after every tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    VisualCreated {
        id: EntityId,
        kind: EntityKind,
        pos: Vec2,
    },
    VisualDestroyed {
        id: EntityId,
    },
    AnimationChanged {
        id: EntityId,
        key: AnimationKey,
    },
    AnimationStopped {
        id: EntityId,
    },
    AngleChanged {
        id: EntityId,
        degrees: f32,
    },
    Tinted {
        id: EntityId,
        rgb: u32,
    },
    Hidden {
        id: EntityId,
    },
    CameraFollow {
        pos: Vec2,
    },
    ZombieKilled {
        id: EntityId,
    },
    PlayerCaught {
        by: EntityId,
    },
    GunPickedUp,
    RoundOver,
    /// The host must drop every visual from the previous round
    SceneReset {
        round: u32,
    },
}

/// Complete per-round game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    /// Seed this round was built from
    pub seed: u64,
    /// 1-based round counter, survives restarts
    pub round: u32,
    /// Spawn-position RNG
    pub rng: Pcg32,
    /// Virtual clock (ms since the round started)
    pub clock_ms: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: RoundPhase,
    pub player: Player,
    pub gun: Gun,
    /// Zombies in spawn order
    pub zombies: Vec<Zombie>,
    /// Live bullets in firing order
    pub bullets: Vec<Bullet>,
    pub scheduler: Scheduler,
    /// Camera target, follows the player
    pub camera: Vec2,
    events: Vec<GameEvent>,
    next_id: EntityId,
}

impl GameState {
    /// Build round 1
    pub fn new(settings: Settings, seed: u64) -> Self {
        Self::for_round(settings, seed, 1)
    }

    /// Build a fresh round from scratch
    pub fn for_round(settings: Settings, seed: u64, round: u32) -> Self {
        let tuning = &settings.tuning;
        let player = Player {
            id: 1,
            pos: tuning.player_start,
            facing: Direction::Down,
            speed: tuning.player_speed,
            has_gun: false,
            alive: true,
            moving: false,
            animation: None,
            size: tuning.player_size,
        };
        let gun = Gun {
            id: 2,
            pos: tuning.gun_position,
            visible: true,
            picked_up: false,
            size: tuning.gun_size,
        };

        let mut scheduler = Scheduler::default();
        scheduler.schedule(0, tuning.zombie_spawn_interval_ms, TimerAction::SpawnZombie);

        let mut state = Self {
            camera: player.pos,
            seed,
            round,
            rng: Pcg32::seed_from_u64(seed),
            clock_ms: 0,
            time_ticks: 0,
            phase: RoundPhase::Playing,
            player,
            gun,
            zombies: Vec::new(),
            bullets: Vec::new(),
            scheduler,
            events: Vec::new(),
            next_id: 3,
            settings,
        };

        state.emit(GameEvent::VisualCreated {
            id: state.player.id,
            kind: EntityKind::Player,
            pos: state.player.pos,
        });
        state.emit(GameEvent::VisualCreated {
            id: state.gun.id,
            kind: EntityKind::Gun,
            pos: state.gun.pos,
        });

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Pending events, oldest first
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Hand all pending events to the host
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Add a zombie at host-chosen coordinates
    pub fn spawn_zombie(&mut self, pos: Vec2) -> EntityId {
        let id = self.next_entity_id();
        self.zombies.push(Zombie {
            id,
            pos,
            facing: Direction::Down,
            is_dead: false,
            angle: 0.0,
            animation: None,
            size: self.settings.tuning.zombie_size,
        });
        self.emit(GameEvent::VisualCreated {
            id,
            kind: EntityKind::Zombie,
            pos,
        });
        log::debug!("Zombie {id} spawned at ({:.1}, {:.1})", pos.x, pos.y);
        id
    }

    /// Add a zombie somewhere in the configured spawn area
    pub fn spawn_random_zombie(&mut self) -> EntityId {
        let area = self.settings.tuning.zombie_spawn_area;
        let pos = Vec2::new(
            self.rng.random_range(0.0..area.x),
            self.rng.random_range(0.0..area.y),
        );
        self.spawn_zombie(pos)
    }

    pub fn zombie(&self, id: EntityId) -> Option<&Zombie> {
        self.zombies.iter().find(|z| z.id == id)
    }

    pub fn living_zombies(&self) -> usize {
        self.zombies.iter().filter(|z| !z.is_dead).count()
    }

    /// Viewport rectangle centred on the camera target
    pub fn view_rect(&self) -> Rect {
        Rect::centered(self.camera, self.settings.presentation.viewport())
    }
}
