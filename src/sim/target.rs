//! Floating targets
//!
//! A target spawns at a caller-chosen position, spins, optionally drifts,
//! bounces off the screen edges, and dies after `max_age_ms` unless a player
//! pops it first.

use std::f32::consts::TAU;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bounds::Bounds;
use super::rng::RandomSource;
use crate::consts::*;

/// Screen size used for bouncing and spawn margins
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldSize {
    pub width: f32,
    pub height: f32,
}

impl WorldSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= 0.0 && pos.x <= self.width && pos.y >= 0.0 && pos.y <= self.height
    }
}

impl Default for WorldSize {
    fn default() -> Self {
        Self::new(WORLD_WIDTH, WORLD_HEIGHT)
    }
}

/// A target entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: u32,
    pub pos: Vec2,
    /// Circumradius of the polygon, and side of the collision square
    pub size: f32,
    pub sides: u32,
    /// Current rotation (radians)
    pub rotation: f32,
    /// Radians per second
    pub rotation_speed: f32,
    /// Fill color (0xRRGGBB)
    pub color: u32,
    /// Milliseconds since spawn
    pub age: f64,
    /// Lifetime (ms)
    pub max_age: f64,
    /// Unit drift direction
    pub direction: Vec2,
    /// Units per update (0 = static)
    pub speed: f32,
    pub world: WorldSize,
}

impl Target {
    /// Spawn a target with randomized shape, spin, color and heading
    pub fn spawn(
        id: u32,
        pos: Vec2,
        speed: f32,
        world: WorldSize,
        rng: &mut dyn RandomSource,
    ) -> Self {
        let size = rng.uniform(TARGET_MIN_SIZE, TARGET_MAX_SIZE);
        let sides = rng.uniform_int(TARGET_MIN_SIDES, TARGET_MAX_SIDES);
        let rotation_speed = rng.uniform(-TARGET_MAX_ROTATION_SPEED, TARGET_MAX_ROTATION_SPEED);
        let color = TARGET_PALETTE[rng.index(TARGET_PALETTE.len())];
        let heading = rng.uniform(0.0, TAU);

        Self {
            id,
            pos,
            size,
            sides,
            rotation: 0.0,
            rotation_speed,
            color,
            age: 0.0,
            max_age: MAX_TARGET_AGE_MS,
            direction: Vec2::from_angle(heading),
            speed,
            world,
        }
    }

    /// Advance age, spin and drift by `elapsed_ms`
    pub fn update(&mut self, elapsed_ms: f64) {
        self.age += elapsed_ms.max(0.0);
        self.rotation += self.rotation_speed * (elapsed_ms / 1000.0) as f32;

        if self.speed > 0.0 {
            self.pos += self.direction * self.speed;
            // Edge-agnostic bounce: head back the way we came
            if !self.world.contains(self.pos) {
                self.direction = -self.direction;
            }
        }
    }

    /// Polygon vertices (render shape)
    pub fn polygon(&self) -> Vec<Vec2> {
        let sides = self.sides.max(3);
        let step = TAU / sides as f32;
        (0..sides)
            .map(|i| {
                let theta = self.rotation + step * i as f32;
                crate::geometry::polar_offset(self.pos, self.size, theta)
            })
            .collect()
    }

    /// Collision box: unrotated square of side `size`
    pub fn bounds(&self) -> Bounds {
        Bounds::square(self.pos, self.size)
    }

    pub fn collides_with(&self, bounds: &Bounds) -> bool {
        self.bounds().collides(bounds)
    }

    pub fn is_too_old(&self) -> bool {
        self.age >= self.max_age
    }

    /// Remaining lifetime (ms), never negative
    pub fn time_to_die(&self) -> f64 {
        (self.max_age - self.age).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::{ScriptedRandom, SeededRandom};

    fn static_target() -> Target {
        let mut rng = ScriptedRandom::constant(0.0);
        Target::spawn(1, Vec2::new(100.0, 100.0), 0.0, WorldSize::default(), &mut rng)
    }

    #[test]
    fn test_spawn_draws_within_bounds() {
        let mut rng = SeededRandom::new(3);
        for id in 0..200 {
            let t = Target::spawn(id, Vec2::new(50.0, 50.0), 1.0, WorldSize::default(), &mut rng);
            assert!(t.size >= TARGET_MIN_SIZE && t.size < TARGET_MAX_SIZE);
            assert!((TARGET_MIN_SIDES..=TARGET_MAX_SIDES).contains(&t.sides));
            assert!(t.rotation_speed.abs() <= TARGET_MAX_ROTATION_SPEED);
            assert!(TARGET_PALETTE.contains(&t.color));
            assert!((t.direction.length() - 1.0).abs() < 1e-4);
            assert_eq!(t.age, 0.0);
        }
    }

    #[test]
    fn test_update_ages_and_rotates() {
        let mut t = static_target();
        t.rotation_speed = 2.0;
        t.update(500.0);
        assert_eq!(t.age, 500.0);
        assert!((t.rotation - 1.0).abs() < 1e-6);
        // Static targets stay put
        assert_eq!(t.pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_drift_and_bounce() {
        let mut t = static_target();
        t.speed = 10.0;
        t.direction = Vec2::X;
        t.pos = Vec2::new(WORLD_WIDTH - 5.0, 100.0);

        t.update(16.0);
        // Left the screen: direction reversed, position kept
        assert_eq!(t.pos.x, WORLD_WIDTH + 5.0);
        assert_eq!(t.direction, -Vec2::X);

        t.update(16.0);
        assert_eq!(t.pos.x, WORLD_WIDTH - 5.0);
        assert_eq!(t.direction, -Vec2::X);
    }

    #[test]
    fn test_polygon_vertices_on_circle() {
        let mut t = static_target();
        t.sides = 4;
        t.size = 10.0;
        let poly = t.polygon();
        assert_eq!(poly.len(), 4);
        for v in &poly {
            assert!(((*v - t.pos).length() - 10.0).abs() < 1e-4);
        }
        assert!((poly[0] - Vec2::new(110.0, 100.0)).length() < 1e-4);
        assert!((poly[1] - Vec2::new(100.0, 110.0)).length() < 1e-4);
    }

    #[test]
    fn test_bounds_ignore_rotation() {
        let mut t = static_target();
        t.size = 20.0;
        let before = t.bounds();
        t.rotation = 1.2;
        assert_eq!(t.bounds(), before);
        assert_eq!(before, Bounds::new(90.0, 110.0, 90.0, 110.0));
    }

    #[test]
    fn test_aging_out() {
        let mut t = static_target();
        t.update(MAX_TARGET_AGE_MS - 1.0);
        assert!(!t.is_too_old());
        assert_eq!(t.time_to_die(), 1.0);
        t.update(1.0);
        assert!(t.is_too_old());
        assert_eq!(t.time_to_die(), 0.0);
        t.update(500.0);
        assert_eq!(t.time_to_die(), 0.0);
    }
}
