//! Hippo Hop - a one-button savanna flapper
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, game state)
//! - `game_loop`: Frame-driven scheduler around the simulation
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Host integration (end-of-game notification)
//! - `config`: Data-driven game tuning with validation

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod config;
pub mod error;
pub mod game_loop;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::GameConfig;
pub use error::ConfigError;
pub use game_loop::GameLoop;

/// Default tuning values (units are playfield pixels and simulation ticks)
pub mod consts {
    /// Downward acceleration added to the hippo's velocity every tick
    pub const GRAVITY: f32 = 0.45;
    /// Velocity set by a flap (negative is up)
    pub const IMPULSE_VELOCITY: f32 = -9.0;
    /// Horizontal scroll speed of the reeds, pixels per tick
    pub const OBSTACLE_SPEED: f32 = 3.0;
    /// One reed pair is spawned every this many ticks
    pub const SPAWN_PERIOD_TICKS: u64 = 100;

    /// Hippo sprite (square) and its fixed horizontal position
    pub const SPRITE_SIZE: f32 = 64.0;
    pub const SPRITE_X: f32 = 60.0;

    /// Gap between the upper and lower reed: max(MIN_GAP, height * fraction)
    pub const MIN_GAP: f32 = 140.0;
    pub const GAP_HEIGHT_FRACTION: f32 = 0.28;
    /// Reed width: max(MIN_OBSTACLE_WIDTH, width * fraction)
    pub const MIN_OBSTACLE_WIDTH: f32 = 60.0;
    pub const OBSTACLE_WIDTH_FRACTION: f32 = 0.09;
    /// Distance the gap keeps from the top and the bottom of the playfield
    pub const GAP_MARGIN: f32 = 40.0;
    /// Reeds are dropped once their trailing edge is this far left of x = 0
    pub const EVICTION_MARGIN: f32 = 50.0;

    /// Playfield used when the host does not report one (portrait phone)
    pub const DEFAULT_PLAYFIELD_WIDTH: f32 = 480.0;
    pub const DEFAULT_PLAYFIELD_HEIGHT: f32 = 800.0;

    /// Seed for the gap RNG when the config does not pin one
    pub const DEFAULT_SEED: u64 = 0x5EED_4177;

    /// Height of the painted ground strip (decoration only, not a collider)
    pub const GROUND_HEIGHT: f32 = 40.0;
}
