//! Pose detector output
//!
//! Keypoints arrive from the detector as named, optionally scored 2D points in
//! world (camera) pixels. Skeletons deserialize straight from the detector's
//! JSON shape.

pub mod augment;

use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

pub use augment::augment_keypoints;

// ============================================================================
// KEYPOINT NAMES
// ============================================================================

pub const NOSE: &str = "nose";
pub const LEFT_EYE: &str = "left_eye";
pub const RIGHT_EYE: &str = "right_eye";
pub const LEFT_SHOULDER: &str = "left_shoulder";
pub const RIGHT_SHOULDER: &str = "right_shoulder";
pub const LEFT_ELBOW: &str = "left_elbow";
pub const RIGHT_ELBOW: &str = "right_elbow";
pub const LEFT_WRIST: &str = "left_wrist";
pub const RIGHT_WRIST: &str = "right_wrist";
pub const LEFT_HIP: &str = "left_hip";
pub const RIGHT_HIP: &str = "right_hip";
pub const LEFT_KNEE: &str = "left_knee";
pub const RIGHT_KNEE: &str = "right_knee";
pub const LEFT_ANKLE: &str = "left_ankle";
pub const RIGHT_ANKLE: &str = "right_ankle";

// Synthesized by `augment_keypoints`
pub const MIDDLE_EYES: &str = "middle_eyes";
pub const CARTOON_LEFT_EYE: &str = "cartoon_left_eye";
pub const CARTOON_RIGHT_EYE: &str = "cartoon_right_eye";
pub const MOUTH_LEFT: &str = "mouth_left";
pub const MOUTH_RIGHT: &str = "mouth_right";
pub const TOP_HEAD: &str = "top_head";
pub const TOP_HEAD_TALL: &str = "top_head_tall";
pub const CHIN: &str = "chin";
pub const LEFT_HEAD: &str = "left_head";
pub const RIGHT_HEAD: &str = "right_head";

/// Keypoints that can pop targets
pub const COLLIDABLE_KEYPOINTS: [&str; 4] = [LEFT_WRIST, RIGHT_WRIST, RIGHT_ANKLE, LEFT_ANKLE];

/// A single detected (or synthesized) landmark
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    #[serde(default)]
    pub name: String,
    pub x: f32,
    pub y: f32,
    /// Detector confidence; missing means the detector didn't report one
    #[serde(default)]
    pub score: Option<f32>,
}

impl Keypoint {
    pub fn new(name: impl Into<String>, x: f32, y: f32, score: Option<f32>) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            score,
        }
    }

    pub fn at(name: impl Into<String>, pos: Vec2, score: f32) -> Self {
        Self::new(name, pos.x, pos.y, Some(score))
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Confidence for drawing: an unscored point is drawn at full strength
    #[inline]
    pub fn score_or_full(&self) -> f32 {
        self.score.unwrap_or(1.0)
    }

    /// Confidence for gameplay: an unscored point is never trusted
    #[inline]
    pub fn score_or_zero(&self) -> f32 {
        self.score.unwrap_or(0.0)
    }
}

/// Keypoints indexed by name
pub type KeypointMap = HashMap<String, Keypoint>;

/// One detected body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Skeleton {
    pub keypoints: Vec<Keypoint>,
    /// Overall detection confidence
    #[serde(default)]
    pub score: Option<f32>,
    /// Tracker identity, stable across frames (render color only)
    #[serde(default)]
    pub id: Option<u32>,
}

impl Skeleton {
    pub fn new(keypoints: Vec<Keypoint>) -> Self {
        Self {
            keypoints,
            score: None,
            id: None,
        }
    }

    pub fn keypoint(&self, name: &str) -> Option<&Keypoint> {
        self.keypoints.iter().find(|k| k.name == name)
    }

    /// Named keypoints as a map (unnamed points are dropped)
    pub fn keypoint_map(&self) -> KeypointMap {
        self.keypoints
            .iter()
            .filter(|k| !k.name.is_empty())
            .map(|k| (k.name.clone(), k.clone()))
            .collect()
    }
}
