//! Synthetic face and head landmarks
//!
//! The detector only reports eyes, ears and nose for the head. The cartoon
//! characters need a mouth, a chin, a head outline and bigger eyes, all built
//! from the eye line:
//!
//! - the eye line runs from the right eye to the left eye;
//! - the face axis is its perpendicular bisector, scaled so one unit is one
//!   eye separation and positive offsets point down the face;
//! - every synthetic point carries the lowest score of the points it was
//!   derived from.

use std::f32::consts::PI;

use glam::Vec2;

use super::{
    CARTOON_LEFT_EYE, CARTOON_RIGHT_EYE, CHIN, Keypoint, KeypointMap, LEFT_EYE, LEFT_HEAD,
    MIDDLE_EYES, MOUTH_LEFT, MOUTH_RIGHT, NOSE, RIGHT_EYE, RIGHT_HEAD, TOP_HEAD, TOP_HEAD_TALL,
};
use crate::geometry::Line;

/// Offsets along the face axis, in eye separations
pub const TOP_HEAD_OFFSET: f32 = -2.0;
pub const TOP_HEAD_TALL_OFFSET: f32 = -2.5;
pub const CHIN_OFFSET: f32 = 2.0;
/// Pivot for flipping the eye line into the mouth line
pub const MOUTH_PIVOT: f32 = 1.0;
/// Height of the cartoon eyes relative to the real ones
pub const CARTOON_EYE_LEVEL: f32 = -0.15;

/// How far the widened eye line extends past each eye
pub const EXTRA_EYE_SEPARATION: f32 = 0.75;
/// Cartoon eye offset from the face axis, along the widened line
pub const CARTOON_EYE_SPREAD: f32 = 0.3;
/// Head outline extends this far past each eye
pub const HEAD_WIDTH: f32 = 1.5;

/// Return `keypoints` plus every landmark that can be derived from them
///
/// Requires both eyes; the nose orients the face axis when present. Missing
/// inputs just mean fewer outputs.
pub fn augment_keypoints(keypoints: &KeypointMap) -> KeypointMap {
    let mut result = keypoints.clone();

    let (Some(right_eye), Some(left_eye)) = (keypoints.get(RIGHT_EYE), keypoints.get(LEFT_EYE))
    else {
        return result;
    };
    let nose = keypoints.get(NOSE);

    let eyes_score = right_eye.score_or_zero().min(left_eye.score_or_zero());
    let face_score = nose.map_or(eyes_score, |n| eyes_score.min(n.score_or_zero()));

    let eye_line = Line::new(right_eye.pos(), left_eye.pos());
    let axis = face_axis(&eye_line, nose.map(Keypoint::pos));

    let mut put = |name: &str, pos: Vec2, score: f32| {
        result.insert(name.to_string(), Keypoint::at(name, pos, score));
    };

    put(MIDDLE_EYES, eye_line.midpoint(), face_score);

    put(TOP_HEAD_TALL, axis.at(TOP_HEAD_TALL_OFFSET), face_score);
    put(TOP_HEAD, axis.at(TOP_HEAD_OFFSET), face_score);
    put(CHIN, axis.at(CHIN_OFFSET), face_score);

    let wide_eyes = Line::new(
        eye_line.at(-EXTRA_EYE_SEPARATION),
        eye_line.at(1.0 + EXTRA_EYE_SEPARATION),
    )
    .parallel(axis.at(CARTOON_EYE_LEVEL));
    put(CARTOON_RIGHT_EYE, wide_eyes.at(-CARTOON_EYE_SPREAD), face_score);
    put(CARTOON_LEFT_EYE, wide_eyes.at(CARTOON_EYE_SPREAD), face_score);

    let mouth = eye_line.rotate(PI, axis.at(MOUTH_PIVOT));
    put(MOUTH_RIGHT, mouth.at(0.25), face_score);
    put(MOUTH_LEFT, mouth.at(0.75), face_score);

    put(RIGHT_HEAD, eye_line.at(-HEAD_WIDTH), eyes_score);
    put(LEFT_HEAD, eye_line.at(1.0 + HEAD_WIDTH), eyes_score);

    result
}

/// Perpendicular bisector of the eye line, flipped if needed so that
/// positive offsets head toward the nose
fn face_axis(eye_line: &Line, nose: Option<Vec2>) -> Line {
    let axis = eye_line.perpendicular_bisector();
    match nose {
        Some(nose) if eye_line.side_of(nose) < 0.0 => axis.reversed().parallel(axis.p1),
        _ => axis,
    }
}
