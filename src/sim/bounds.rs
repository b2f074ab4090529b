//! Axis-aligned collision boxes
//!
//! Targets rotate visually, but collisions only ever use these boxes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x_min: f32,
    pub x_max: f32,
    pub y_min: f32,
    pub y_max: f32,
}

impl Bounds {
    pub fn new(x_min: f32, x_max: f32, y_min: f32, y_max: f32) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Square of side `size` centered on `center`
    pub fn square(center: Vec2, size: f32) -> Self {
        let half = size / 2.0;
        Self::new(center.x - half, center.x + half, center.y - half, center.y + half)
    }

    /// Open-interval overlap: boxes that only share an edge don't collide
    #[inline]
    pub fn collides(&self, other: &Bounds) -> bool {
        self.x_min < other.x_max
            && self.x_max > other.x_min
            && self.y_min < other.y_max
            && self.y_max > other.y_min
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_shared_edge_does_not_collide() {
        let a = Bounds::new(0.0, 10.0, 0.0, 10.0);
        let b = Bounds::new(10.0, 20.0, 0.0, 10.0);
        assert!(!a.collides(&b));
        assert!(!b.collides(&a));
    }

    #[test]
    fn test_overlap_collides() {
        let a = Bounds::new(0.0, 10.0, 0.0, 10.0);
        let b = Bounds::new(9.0, 19.0, 0.0, 10.0);
        assert!(a.collides(&b));
        assert!(b.collides(&a));
    }

    #[test]
    fn test_shared_corner_does_not_collide() {
        let a = Bounds::new(0.0, 10.0, 0.0, 10.0);
        let b = Bounds::new(10.0, 20.0, 10.0, 20.0);
        assert!(!a.collides(&b));
    }

    #[test]
    fn test_containment_collides() {
        let outer = Bounds::square(Vec2::new(50.0, 50.0), 100.0);
        let inner = Bounds::square(Vec2::new(50.0, 50.0), 10.0);
        assert!(outer.collides(&inner));
        assert!(inner.collides(&outer));
    }

    #[test]
    fn test_square() {
        let b = Bounds::square(Vec2::new(100.0, 40.0), 10.0);
        assert_eq!(b, Bounds::new(95.0, 105.0, 35.0, 45.0));
    }

    proptest! {
        #[test]
        fn prop_collision_is_symmetric(
            ax in -100.0f32..100.0, ay in -100.0f32..100.0, asize in 1.0f32..50.0,
            bx in -100.0f32..100.0, by in -100.0f32..100.0, bsize in 1.0f32..50.0,
        ) {
            let a = Bounds::square(Vec2::new(ax, ay), asize);
            let b = Bounds::square(Vec2::new(bx, by), bsize);
            prop_assert_eq!(a.collides(&b), b.collides(&a));
        }

        #[test]
        fn prop_adjacent_boxes_never_collide(x in -100.0f32..100.0, w in 1.0f32..50.0) {
            let a = Bounds::new(x, x + w, 0.0, 10.0);
            let b = Bounds::new(x + w, x + 2.0 * w, 0.0, 10.0);
            prop_assert!(!a.collides(&b));
        }
    }
}
