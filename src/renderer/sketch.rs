//! Stroke generation for the hand-drawn renderer
//!
//! Turns players and targets into projected, colored primitives. A canvas
//! backend (rough.js or similar) only has to paint them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::pose::{self, Keypoint, KeypointMap, augment_keypoints};
use crate::sim::{GameWorld, Player, Target};

/// Full-strength stroke color (black)
pub const COLOR_FULL: u32 = 0x000000;
/// Fully faded stroke color (white)
pub const COLOR_FADED: u32 = 0xFFFFFF;
/// At or above this score, lines use the full color
pub const MAX_FULL_SCORE: f32 = 0.7;
/// At or below this score, lines are completely faded
pub const MIN_FULL_SCORE: f32 = 0.1;

pub const OBJECT_STROKE: u32 = 0x000000;
pub const HOT_SPOT_FILL: u32 = 0x00BB00;

pub const SIZE_PLAYER_POINTS: f32 = 10.0;
pub const SIZE_HOT_SPOTS: f32 = 30.0;
/// Targets fade out over their last this-many milliseconds
pub const FADE_OUT_MS: f64 = 2_000.0;

/// Single dots (the cartoon eyes)
const POINTS: [&str; 2] = [pose::CARTOON_RIGHT_EYE, pose::CARTOON_LEFT_EYE];

const LINES: [&[&str]; 11] = [
    &[pose::LEFT_SHOULDER, pose::RIGHT_SHOULDER],
    &[pose::MOUTH_RIGHT, pose::MOUTH_LEFT],
    &[pose::LEFT_SHOULDER, pose::LEFT_ELBOW, pose::LEFT_WRIST],
    &[pose::RIGHT_SHOULDER, pose::RIGHT_ELBOW, pose::RIGHT_WRIST],
    &[pose::LEFT_SHOULDER, pose::LEFT_HIP],
    &[pose::RIGHT_SHOULDER, pose::RIGHT_HIP],
    &[pose::LEFT_HIP, pose::RIGHT_HIP],
    &[pose::LEFT_HIP, pose::LEFT_KNEE],
    &[pose::LEFT_ANKLE, pose::LEFT_KNEE],
    &[pose::RIGHT_HIP, pose::RIGHT_KNEE],
    &[pose::RIGHT_ANKLE, pose::RIGHT_KNEE],
];

/// Head outline, shoulder to shoulder over the top of the head
const CURVES: [&[&str]; 1] = [&[
    pose::LEFT_SHOULDER,
    pose::LEFT_HEAD,
    pose::TOP_HEAD_TALL,
    pose::RIGHT_HEAD,
    pose::RIGHT_SHOULDER,
]];

/// Convert 0xRRGGBB to linear [r, g, b, a]
pub fn rgba(hex: u32, alpha: f32) -> [f32; 4] {
    let channel = |shift: u32| ((hex >> shift) & 0xFF) as f32 / 255.0;
    [channel(16), channel(8), channel(0), alpha]
}

fn lerp_color(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    std::array::from_fn(|i| a[i] + (b[i] - a[i]) * t)
}

/// Stroke color for a confidence score: faded white up to `MIN_FULL_SCORE`,
/// full black from `MAX_FULL_SCORE`, blended in between
pub fn fade_color(min_score: f32) -> [f32; 4] {
    if min_score <= MIN_FULL_SCORE {
        return rgba(COLOR_FADED, 1.0);
    }
    if min_score >= MAX_FULL_SCORE {
        return rgba(COLOR_FULL, 1.0);
    }
    let t = (min_score - MIN_FULL_SCORE) / (MAX_FULL_SCORE - MIN_FULL_SCORE);
    lerp_color(rgba(COLOR_FADED, 1.0), rgba(COLOR_FULL, 1.0), t)
}

/// Maps world coordinates onto the canvas, skipping the letterbox margins
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Projector {
    pub horizontal: f32,
    pub vertical: f32,
}

impl Projector {
    pub fn new(horizontal: f32, vertical: f32) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    #[inline]
    pub fn project(&self, point: Vec2) -> Vec2 {
        point + Vec2::new(self.horizontal, self.vertical)
    }
}

/// A paintable primitive (canvas coordinates)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Stroke {
    Dot {
        center: Vec2,
        diameter: f32,
        color: [f32; 4],
    },
    Polyline {
        points: Vec<Vec2>,
        color: [f32; 4],
    },
    /// Smooth curve through the points
    Curve {
        points: Vec<Vec2>,
        color: [f32; 4],
    },
    /// Filled marker on a collidable keypoint
    HotSpot {
        center: Vec2,
        diameter: f32,
        fill: [f32; 4],
    },
    Polygon {
        points: Vec<Vec2>,
        stroke: [f32; 4],
        fill: [f32; 4],
    },
}

/// Look up every name; `None` if any is missing
fn resolve<'a>(map: &'a KeypointMap, names: &[&str]) -> Option<Vec<&'a Keypoint>> {
    names.iter().map(|name| map.get(*name)).collect()
}

fn weakest(keypoints: &[&Keypoint]) -> f32 {
    keypoints
        .iter()
        .map(|k| k.score_or_full())
        .fold(1.0, f32::min)
}

/// Strokes for one player's cartoon body (empty without a pose)
pub fn player_strokes(player: &Player, projector: &Projector) -> Vec<Stroke> {
    let Some(skeleton) = &player.pose else {
        return Vec::new();
    };
    let keypoints = augment_keypoints(&skeleton.keypoint_map());
    let happy = player.is_happy();

    let color_for = |points: &[&Keypoint]| {
        if happy {
            rgba(player.happy_color(), 1.0)
        } else {
            fade_color(weakest(points))
        }
    };
    let project_all = |points: &[&Keypoint]| -> Vec<Vec2> {
        points.iter().map(|k| projector.project(k.pos())).collect()
    };

    let mut strokes = Vec::new();

    for name in POINTS {
        if let Some(k) = keypoints.get(name) {
            strokes.push(Stroke::Dot {
                center: projector.project(k.pos()),
                diameter: SIZE_PLAYER_POINTS,
                color: color_for(&[k]),
            });
        }
    }

    for names in LINES {
        if let Some(points) = resolve(&keypoints, names) {
            strokes.push(Stroke::Polyline {
                points: project_all(&points),
                color: color_for(&points),
            });
        }
    }

    for names in CURVES {
        if let Some(points) = resolve(&keypoints, names) {
            strokes.push(Stroke::Curve {
                points: project_all(&points),
                color: color_for(&points),
            });
        }
    }

    // Same eligibility as collisions, so players see what can pop
    for name in pose::COLLIDABLE_KEYPOINTS {
        if let Some(k) = keypoints.get(name) {
            if k.score_or_zero() >= player.rules.min_score {
                strokes.push(Stroke::HotSpot {
                    center: projector.project(k.pos()),
                    diameter: SIZE_HOT_SPOTS,
                    fill: rgba(HOT_SPOT_FILL, 1.0),
                });
            }
        }
    }

    strokes
}

/// Opacity from remaining lifetime
pub fn target_alpha(target: &Target) -> f32 {
    (target.time_to_die() / FADE_OUT_MS).clamp(0.0, 1.0) as f32
}

pub fn target_strokes(target: &Target, projector: &Projector) -> Vec<Stroke> {
    let alpha = target_alpha(target);
    vec![Stroke::Polygon {
        points: target
            .polygon()
            .into_iter()
            .map(|p| projector.project(p))
            .collect(),
        stroke: rgba(OBJECT_STROKE, alpha),
        fill: rgba(target.color, alpha),
    }]
}

/// Everything to paint this frame: players first, then targets on top
pub fn frame_strokes(world: &GameWorld, projector: &Projector) -> Vec<Stroke> {
    let players = world
        .players()
        .iter()
        .flat_map(|p| player_strokes(p, projector));
    let targets = world
        .targets()
        .iter()
        .flat_map(|t| target_strokes(t, projector));
    players.chain(targets).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::Skeleton;
    use crate::settings::GameConfig;
    use crate::sim::player::HotSpotRules;
    use crate::sim::{ScriptedRandom, WorldSize};

    fn close(a: [f32; 4], b: [f32; 4]) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-4)
    }

    fn face_and_arm(score: Option<f32>) -> Skeleton {
        Skeleton::new(vec![
            Keypoint::new(pose::LEFT_EYE, 110.0, 100.0, score),
            Keypoint::new(pose::RIGHT_EYE, 90.0, 100.0, score),
            Keypoint::new(pose::NOSE, 100.0, 110.0, score),
            Keypoint::new(pose::LEFT_SHOULDER, 130.0, 160.0, score),
            Keypoint::new(pose::RIGHT_SHOULDER, 70.0, 160.0, score),
            Keypoint::new(pose::LEFT_ELBOW, 150.0, 200.0, score),
            Keypoint::new(pose::LEFT_WRIST, 160.0, 240.0, score),
        ])
    }

    #[test]
    fn test_rgba() {
        assert_eq!(rgba(0xFF0000, 1.0), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(rgba(0x0000FF, 0.5), [0.0, 0.0, 1.0, 0.5]);
    }

    #[test]
    fn test_fade_color_ramp() {
        assert_eq!(fade_color(0.0), rgba(COLOR_FADED, 1.0));
        assert_eq!(fade_color(MIN_FULL_SCORE), rgba(COLOR_FADED, 1.0));
        assert_eq!(fade_color(0.9), rgba(COLOR_FULL, 1.0));
        assert!(close(fade_color(0.4), [0.5, 0.5, 0.5, 1.0]));
    }

    #[test]
    fn test_projector_adds_margins() {
        let projector = Projector::new(20.0, 5.0);
        assert_eq!(projector.project(Vec2::new(1.0, 2.0)), Vec2::new(21.0, 7.0));
    }

    #[test]
    fn test_no_pose_no_strokes() {
        let player = Player::new(0, HotSpotRules::default());
        assert!(player_strokes(&player, &Projector::default()).is_empty());
    }

    #[test]
    fn test_player_strokes_skip_incomplete_lines() {
        let mut player = Player::new(0, HotSpotRules::default());
        player.update_with_pose(Some(face_and_arm(Some(0.9))), 0.0);
        let strokes = player_strokes(&player, &Projector::default());

        let dots = strokes.iter().filter(|s| matches!(s, Stroke::Dot { .. })).count();
        let lines = strokes.iter().filter(|s| matches!(s, Stroke::Polyline { .. })).count();
        let curves = strokes.iter().filter(|s| matches!(s, Stroke::Curve { .. })).count();
        let hot_spots = strokes.iter().filter(|s| matches!(s, Stroke::HotSpot { .. })).count();

        assert_eq!(dots, 2);
        // Shoulders, mouth and left arm; nothing below the shoulders
        assert_eq!(lines, 3);
        assert_eq!(curves, 1);
        assert_eq!(hot_spots, 1);
    }

    #[test]
    fn test_unscored_points_draw_full_but_cannot_pop() {
        let mut player = Player::new(0, HotSpotRules::default());
        player.update_with_pose(Some(face_and_arm(None)), 0.0);
        let strokes = player_strokes(&player, &Projector::default());

        // Raw shoulders are unscored: drawn at full strength
        let shoulders = strokes.iter().find_map(|s| match s {
            Stroke::Polyline { points, color } if points.len() == 2 && points[0].y == 160.0 => {
                Some(*color)
            }
            _ => None,
        });
        assert_eq!(shoulders, Some(rgba(COLOR_FULL, 1.0)));
        // Synthetic mouth inherits a zero score from the unscored eyes
        assert!(strokes.iter().any(|s| matches!(
            s,
            Stroke::Polyline { points, color } if points[0].y > 100.0 && points[0].y < 160.0
                && *color == rgba(COLOR_FADED, 1.0)
        )));
        assert!(!strokes.iter().any(|s| matches!(s, Stroke::HotSpot { .. })));
    }

    #[test]
    fn test_happy_player_uses_type_color() {
        let mut rng = ScriptedRandom::constant(0.0);
        let mut player = Player::new(2, HotSpotRules::default());
        player.update_with_pose(Some(face_and_arm(Some(0.2))), 100.0);
        player.notify_object_destroyed(&crate::sim::DestroyedObject {
            id: 1,
            when: 100.0,
            object: Target::spawn(1, Vec2::ZERO, 0.0, WorldSize::default(), &mut rng),
            player: 2,
        });

        let strokes = player_strokes(&player, &Projector::default());
        let happy = rgba(player.happy_color(), 1.0);
        assert!(strokes.iter().all(|s| match s {
            Stroke::Dot { color, .. } | Stroke::Polyline { color, .. } | Stroke::Curve { color, .. } =>
                *color == happy,
            _ => true,
        }));
    }

    #[test]
    fn test_target_fades_near_death() {
        let mut rng = ScriptedRandom::constant(0.0);
        let mut target = Target::spawn(1, Vec2::new(50.0, 50.0), 0.0, WorldSize::default(), &mut rng);
        target.rotation_speed = 0.0;
        assert_eq!(target_alpha(&target), 1.0);

        target.update(target.max_age - FADE_OUT_MS / 2.0);
        assert!((target_alpha(&target) - 0.5).abs() < 1e-6);

        let strokes = target_strokes(&target, &Projector::new(10.0, 0.0));
        let Stroke::Polygon { points, fill, .. } = &strokes[0] else {
            panic!("expected polygon");
        };
        assert_eq!(points.len(), target.sides as usize);
        assert!((points[0].x - (50.0 + target.size + 10.0)).abs() < 1e-3);
        assert!((fill[3] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_frame_strokes_cover_world() {
        let mut world = GameWorld::new(GameConfig::default(), ScriptedRandom::constant(0.0));
        world.update(0.0, &[]);
        world.update(3000.0, &[face_and_arm(Some(0.9))]);

        let strokes = frame_strokes(&world, &Projector::default());
        let polygons = strokes.iter().filter(|s| matches!(s, Stroke::Polygon { .. })).count();
        assert_eq!(polygons, world.targets().len());
        assert!(strokes.len() > polygons);
        // Targets paint over players
        assert!(matches!(strokes.last(), Some(Stroke::Polygon { .. })));
    }
}
