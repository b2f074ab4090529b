//! Difficulty ramp
//!
//! The more targets the players have popped, the more targets may float at
//! once and the faster new ones drift.

use serde::{Deserialize, Serialize};

/// One step of the ramp, active once `min_destroyed` targets have been popped
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyTier {
    pub min_destroyed: usize,
    /// Maximum live targets
    pub max_targets: usize,
    /// Drift speed for new targets (units per update)
    pub speed: f32,
}

impl DifficultyTier {
    pub const fn new(min_destroyed: usize, max_targets: usize, speed: f32) -> Self {
        Self {
            min_destroyed,
            max_targets,
            speed,
        }
    }
}

/// Default ramp: a single static target to start, up to five drifting ones
pub const DEFAULT_DIFFICULTY: [DifficultyTier; 6] = [
    DifficultyTier::new(0, 1, 0.0),
    DifficultyTier::new(5, 2, 0.0),
    DifficultyTier::new(10, 2, 1.0),
    DifficultyTier::new(20, 3, 1.5),
    DifficultyTier::new(35, 4, 2.0),
    DifficultyTier::new(50, 5, 3.0),
];

/// Tier for a destroyed count (last tier whose threshold is reached)
///
/// Tables are validated to start at 0 and be non-decreasing; an empty table
/// falls back to the first default tier.
pub fn tier_for(tiers: &[DifficultyTier], destroyed: usize) -> DifficultyTier {
    tiers
        .iter()
        .take_while(|t| t.min_destroyed <= destroyed)
        .last()
        .or_else(|| tiers.first())
        .copied()
        .unwrap_or(DEFAULT_DIFFICULTY[0])
}

/// Whether a table is usable: non-empty, starts at 0, every column non-decreasing
pub fn is_monotonic(tiers: &[DifficultyTier]) -> bool {
    let Some(first) = tiers.first() else {
        return false;
    };
    first.min_destroyed == 0
        && tiers.windows(2).all(|w| {
            w[0].min_destroyed < w[1].min_destroyed
                && w[0].max_targets <= w[1].max_targets
                && w[0].speed <= w[1].speed
        })
}
