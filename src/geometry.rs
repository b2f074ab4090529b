//! 2D line algebra for landmark synthesis
//!
//! Lines are parametrized by their two defining points: `at(0.0)` is `p1`,
//! `at(1.0)` is `p2`, so offsets are measured in units of the segment length.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Rotate `point` by `angle` radians around `center`
#[inline]
pub fn rotate_about(point: Vec2, angle: f32, center: Vec2) -> Vec2 {
    center + Vec2::from_angle(angle).rotate(point - center)
}

/// Convert polar (r, theta) to cartesian, relative to `center`
#[inline]
pub fn polar_offset(center: Vec2, r: f32, theta: f32) -> Vec2 {
    center + Vec2::new(r * theta.cos(), r * theta.sin())
}

/// A line through two points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub p1: Vec2,
    pub p2: Vec2,
}

impl Line {
    pub fn new(p1: Vec2, p2: Vec2) -> Self {
        Self { p1, p2 }
    }

    /// Direction vector (not normalized, length = segment length)
    #[inline]
    pub fn direction(&self) -> Vec2 {
        self.p2 - self.p1
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.direction().length()
    }

    #[inline]
    pub fn midpoint(&self) -> Vec2 {
        self.at(0.5)
    }

    /// Point at parameter `t` (may lie outside the segment)
    #[inline]
    pub fn at(&self, t: f32) -> Vec2 {
        self.p1 + self.direction() * t
    }

    /// Line through the midpoint, direction rotated +90° with the same length
    ///
    /// In screen space (y down) a left-to-right line yields a bisector that
    /// points downward for positive parameters.
    pub fn perpendicular_bisector(&self) -> Line {
        let mid = self.midpoint();
        Line::new(mid, mid + self.direction().perp())
    }

    /// Same direction vector, starting at `through`
    pub fn parallel(&self, through: Vec2) -> Line {
        Line::new(through, through + self.direction())
    }

    /// Both endpoints rotated around `center`
    pub fn rotate(&self, angle: f32, center: Vec2) -> Line {
        Line::new(
            rotate_about(self.p1, angle, center),
            rotate_about(self.p2, angle, center),
        )
    }

    /// Same line, opposite parametrization
    pub fn reversed(&self) -> Line {
        Line::new(self.p2, self.p1)
    }

    /// Which side of the line a point lies on (positive = the side the
    /// bisector direction points to)
    pub fn side_of(&self, point: Vec2) -> f32 {
        self.direction().perp_dot(point - self.p1)
    }
}
