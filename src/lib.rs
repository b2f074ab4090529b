//! Pose Pop - a camera-driven party game
//!
//! Core modules:
//! - `geometry`: Small 2D line algebra used to synthesize landmarks
//! - `pose`: Keypoints, skeletons and landmark augmentation
//! - `sim`: Game world simulation (targets, players, collisions, events)
//! - `renderer`: Stroke model consumed by a hand-drawn canvas backend
//! - `scoreboard`, `sound`: Event consumers
//! - `settings`: Tuning values and user preferences

pub mod geometry;
pub mod pose;
pub mod renderer;
pub mod scoreboard;
pub mod settings;
pub mod sim;
pub mod sound;

#[cfg(not(target_arch = "wasm32"))]
pub mod logging;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use scoreboard::Scoreboard;
pub use settings::{ConfigError, GameConfig, Settings};
pub use sim::{GameWorld, WorldListener};

/// Game configuration constants
pub mod consts {
    /// Number of tracked bodies (pose detector returns at most this many)
    pub const MAX_PLAYERS: usize = 4;

    /// Default world size (camera resolution)
    pub const WORLD_WIDTH: f32 = 640.0;
    pub const WORLD_HEIGHT: f32 = 480.0;

    /// Average time between spawns once under the difficulty cap (ms)
    pub const SPAWN_INTERVAL_MS: f64 = 3_000.0;
    /// Fraction of the screen left empty on each edge when spawning
    pub const SPAWN_MARGIN_RATIO: f32 = 0.1;

    /// Targets older than this die naturally (ms)
    pub const MAX_TARGET_AGE_MS: f64 = 10_000.0;
    pub const TARGET_MIN_SIZE: f32 = 70.0;
    pub const TARGET_MAX_SIZE: f32 = 130.0;
    pub const TARGET_MIN_SIDES: u32 = 3;
    pub const TARGET_MAX_SIDES: u32 = 8;
    /// Radians per second, either direction
    pub const TARGET_MAX_ROTATION_SPEED: f32 = 1.5;
    /// Fill colors (0xRRGGBB)
    pub const TARGET_PALETTE: [u32; 6] = [0xBB0000, 0x3A86FF, 0x8338EC, 0xFF006E, 0xFB5607, 0xFFBE0B];

    /// Side of the square hot-spot around each wrist/ankle
    pub const COLLIDABLE_BOX_SIZE: f32 = 10.0;
    /// Keypoints below this score can't pop targets
    pub const MIN_COLLISION_SCORE: f32 = 0.3;
    /// A player stays happy this long after popping a target (ms)
    pub const HAPPY_WINDOW_MS: f64 = 1_000.0;
}
