//! Injected randomness
//!
//! The world never touches a global RNG. Production code runs on a seeded
//! PCG stream; tests script the exact draws they need.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Source of uniform floats
pub trait RandomSource {
    /// Uniform float in `[min, max)`
    fn uniform(&mut self, min: f32, max: f32) -> f32;

    /// Uniform float in `[0, 1)`
    fn unit(&mut self) -> f32 {
        self.uniform(0.0, 1.0)
    }

    /// Uniform integer in `[min, max]`
    fn uniform_int(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        let span = (max - min + 1) as f32;
        min + (self.uniform(0.0, span) as u32).min(max - min)
    }

    /// Uniform index into a collection of `len` items (`len` > 0)
    fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        (self.uniform(0.0, len as f32) as usize).min(len - 1)
    }
}

/// Seeded PCG stream
#[derive(Debug, Clone)]
pub struct SeededRandom {
    seed: u64,
    rng: Pcg32,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    fn uniform(&mut self, min: f32, max: f32) -> f32 {
        if !(min < max) {
            return min;
        }
        self.rng.random_range(min..max)
    }
}

/// Replays a fixed list of unit draws, cycling when exhausted
///
/// Each value is a position in `[0, 1)` that gets mapped into the requested
/// range, so `ScriptedRandom::constant(0.0)` always yields `min`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScriptedRandom {
    values: Vec<f32>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values, cursor: 0 }
    }

    pub fn constant(value: f32) -> Self {
        Self::new(vec![value])
    }

    /// Number of draws made so far
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRandom {
    fn uniform(&mut self, min: f32, max: f32) -> f32 {
        let t = if self.values.is_empty() {
            0.0
        } else {
            self.values[self.cursor % self.values.len()]
        };
        self.cursor += 1;
        min + t * (max - min)
    }
}
