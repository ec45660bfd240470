//! Zombie Assault headless driver
//!
//! Stands in for the presentation engine: feeds scripted input into the
//! gameplay core at a fixed frame rate and reports what the engine would draw.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;

use zombie_assault::Settings;
use zombie_assault::consts::FRAME_MS;
use zombie_assault::sim::{
    Direction, EntityKind, GameEvent, GameState, HeldKeys, TickInput, tick,
};

#[derive(Parser)]
#[command(name = "zombie-assault")]
#[command(about = "Run Zombie Assault headless with a scripted player")]
struct Cli {
    /// Settings JSON (missing file falls back to defaults)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// RNG seed for zombie spawns (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of frames to simulate
    #[arg(long, default_value_t = 3600)]
    frames: u32,

    /// Print every engine event as a JSON line
    #[arg(long)]
    events: bool,

    /// Print the effective settings as JSON and exit
    #[arg(long)]
    dump_settings: bool,
}

#[derive(Debug, Default)]
struct RunStats {
    rounds: u32,
    kills: u32,
    shots: u32,
    longest_round_ticks: u64,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let settings = match &cli.settings {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };

    if cli.dump_settings {
        println!("{}", settings.to_json()?);
        return Ok(());
    }

    let seed = cli.seed.unwrap_or_else(seed_from_clock);
    log::info!(
        "{} starting ({}x{}, seed {seed})",
        settings.presentation.title,
        settings.presentation.width,
        settings.presentation.height
    );

    let mut state = GameState::new(settings, seed);
    let mut stats = RunStats {
        rounds: 1,
        ..Default::default()
    };

    for frame in 0..cli.frames {
        let input = autopilot(&state, frame);
        let ticks_before = state.time_ticks;
        tick(&mut state, &input, FRAME_MS);

        for event in state.drain_events() {
            match &event {
                GameEvent::VisualCreated {
                    kind: EntityKind::Bullet,
                    ..
                } => stats.shots += 1,
                GameEvent::ZombieKilled { .. } => stats.kills += 1,
                GameEvent::SceneReset { .. } => {
                    stats.rounds += 1;
                    stats.longest_round_ticks = stats.longest_round_ticks.max(ticks_before + 1);
                }
                _ => {}
            }
            if cli.events {
                println!("{}", serde_json::to_string(&event)?);
            }
        }
    }
    stats.longest_round_ticks = stats.longest_round_ticks.max(state.time_ticks);

    log::info!(
        "Ran {} frames: {} rounds, {} shots, {} kills, longest round {} ticks",
        cli.frames,
        stats.rounds,
        stats.shots,
        stats.kills,
        stats.longest_round_ticks
    );
    Ok(())
}

fn seed_from_clock() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Scripted player: fetch the gun, then keep the nearest zombie at bay.
///
/// Fire is processed before movement within a tick, so even frames turn
/// toward the target and odd frames shoot while stepping back.
fn autopilot(state: &GameState, frame: u32) -> TickInput {
    let player = &state.player;

    if !player.has_gun {
        return TickInput {
            keys: keys_toward(player.pos, state.gun.pos, player.speed),
            fire: false,
        };
    }

    let nearest = state
        .zombies
        .iter()
        .filter(|z| !z.is_dead)
        .min_by(|a, b| {
            a.pos
                .distance_squared(player.pos)
                .total_cmp(&b.pos.distance_squared(player.pos))
        });
    let Some(target) = nearest else {
        return TickInput::default();
    };

    let toward = facing_toward(player.pos, target.pos);
    if frame % 2 == 0 {
        TickInput {
            keys: keys_for(toward),
            fire: false,
        }
    } else {
        TickInput {
            keys: keys_for(opposite(toward)),
            fire: true,
        }
    }
}

fn facing_toward(from: Vec2, to: Vec2) -> Direction {
    let delta = to - from;
    if delta.x.abs() > delta.y.abs() {
        if delta.x > 0.0 { Direction::Right } else { Direction::Left }
    } else if delta.y > 0.0 {
        Direction::Down
    } else {
        Direction::Up
    }
}

fn opposite(direction: Direction) -> Direction {
    match direction {
        Direction::Up => Direction::Down,
        Direction::Down => Direction::Up,
        Direction::Left => Direction::Right,
        Direction::Right => Direction::Left,
    }
}

fn keys_for(direction: Direction) -> HeldKeys {
    HeldKeys {
        up: direction == Direction::Up,
        down: direction == Direction::Down,
        left: direction == Direction::Left,
        right: direction == Direction::Right,
    }
}

fn keys_toward(from: Vec2, to: Vec2, speed: f32) -> HeldKeys {
    let delta = to - from;
    HeldKeys {
        up: delta.y < -speed,
        down: delta.y > speed,
        left: delta.x < -speed,
        right: delta.x > speed,
    }
}
