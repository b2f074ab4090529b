//! Game world simulation
//!
//! Turns per-frame pose batches into a deterministic game state:
//! - No clock reads (the host passes timestamps)
//! - Injected randomness only
//! - Stable iteration order (slot, keypoint, spawn order)
//! - No rendering or platform dependencies

pub mod bounds;
pub mod difficulty;
pub mod events;
pub mod player;
pub mod rng;
pub mod snapshot;
pub mod target;
pub mod world;

pub use bounds::Bounds;
pub use difficulty::{DEFAULT_DIFFICULTY, DifficultyTier, tier_for};
pub use events::{DestroyedObject, EventLog, ListenerId, WorldEvent, WorldListener};
pub use player::{Destruction, PLAYER_TYPES, Player, PlayerId, PlayerType};
pub use rng::{RandomSource, ScriptedRandom, SeededRandom};
pub use snapshot::{PlayerSnapshot, TargetSnapshot, WorldSnapshot};
pub use target::{Target, WorldSize};
pub use world::GameWorld;
