//! Players
//!
//! One player per tracked-body slot. A player holds whatever skeleton the
//! detector reported for its slot this tick and turns its wrists and ankles
//! into collision hot-spots.

use serde::{Deserialize, Serialize};

use super::bounds::Bounds;
use super::events::DestroyedObject;
use crate::consts::*;
use crate::pose::{COLLIDABLE_KEYPOINTS, Skeleton};

pub type PlayerId = u32;

/// Cartoon character drawn for a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerType {
    Pucas,
    Pelix,
    Papip,
    Pamip,
}

/// Characters assigned to slots, cycling
pub const PLAYER_TYPES: [PlayerType; 4] = [
    PlayerType::Pucas,
    PlayerType::Pelix,
    PlayerType::Papip,
    PlayerType::Pamip,
];

impl PlayerType {
    pub fn for_slot(slot: usize) -> Self {
        PLAYER_TYPES[slot % PLAYER_TYPES.len()]
    }

    /// Color used while the player is happy (0xRRGGBB)
    pub fn happy_color(&self) -> u32 {
        match self {
            PlayerType::Pucas => 0x3A86FF,
            PlayerType::Pelix => 0x8338EC,
            PlayerType::Papip => 0xFF006E,
            PlayerType::Pamip => 0xFB5607,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerType::Pucas => "Pucas",
            PlayerType::Pelix => "Pelix",
            PlayerType::Papip => "Papip",
            PlayerType::Pamip => "Pamip",
        }
    }
}

/// A target popped by this player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Destruction {
    pub target_id: u32,
    pub when: f64,
}

/// Hot-spot tuning, copied from the world config
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HotSpotRules {
    pub box_size: f32,
    pub min_score: f32,
    pub happy_window_ms: f64,
}

impl Default for HotSpotRules {
    fn default() -> Self {
        Self {
            box_size: COLLIDABLE_BOX_SIZE,
            min_score: MIN_COLLISION_SCORE,
            happy_window_ms: HAPPY_WINDOW_MS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub slot: usize,
    pub kind: PlayerType,
    /// Latest skeleton for this slot, if the detector saw one
    pub pose: Option<Skeleton>,
    /// Timestamp of the last tick that touched this player
    pub current_time: Option<f64>,
    pub destroyed: Vec<Destruction>,
    pub rules: HotSpotRules,
}

impl Player {
    pub fn new(slot: usize, rules: HotSpotRules) -> Self {
        Self {
            id: slot as PlayerId,
            slot,
            kind: PlayerType::for_slot(slot),
            pose: None,
            current_time: None,
            destroyed: Vec::new(),
            rules,
        }
    }

    pub fn update_with_pose(&mut self, pose: Option<Skeleton>, current_time: f64) {
        self.pose = pose;
        self.current_time = Some(current_time);
    }

    /// One small square per confident wrist/ankle, in keypoint order
    pub fn collidable_bounds(&self) -> Vec<Bounds> {
        let Some(pose) = &self.pose else {
            return Vec::new();
        };
        pose.keypoints
            .iter()
            .filter(|k| {
                k.score_or_zero() >= self.rules.min_score
                    && COLLIDABLE_KEYPOINTS.contains(&k.name.as_str())
            })
            .map(|k| Bounds::square(k.pos(), self.rules.box_size))
            .collect()
    }

    pub fn notify_object_destroyed(&mut self, record: &DestroyedObject) {
        log::debug!(
            "Player {} ({}) popped target {}",
            self.id,
            self.kind.as_str(),
            record.object.id
        );
        self.destroyed.push(Destruction {
            target_id: record.object.id,
            when: record.when,
        });
    }

    /// Popped something within the happy window of the latest tick
    pub fn is_happy(&self) -> bool {
        match (self.destroyed.last(), self.current_time) {
            (Some(last), Some(now)) => now - last.when < self.rules.happy_window_ms,
            _ => false,
        }
    }

    pub fn destroyed_count(&self) -> usize {
        self.destroyed.len()
    }

    pub fn happy_color(&self) -> u32 {
        self.kind.happy_color()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::{Keypoint, LEFT_ANKLE, LEFT_WRIST, NOSE, RIGHT_WRIST};
    use crate::sim::rng::ScriptedRandom;
    use crate::sim::target::{Target, WorldSize};
    use glam::Vec2;

    fn record(when: f64) -> DestroyedObject {
        let mut rng = ScriptedRandom::constant(0.0);
        DestroyedObject {
            id: 1,
            when,
            object: Target::spawn(9, Vec2::ZERO, 0.0, WorldSize::default(), &mut rng),
            player: 0,
        }
    }

    #[test]
    fn test_slot_types_cycle() {
        let types: Vec<_> = (0..8).map(PlayerType::for_slot).collect();
        assert_eq!(&types[..4], &PLAYER_TYPES);
        assert_eq!(&types[4..], &PLAYER_TYPES);
        for slot in 0..12 {
            assert_eq!(
                Player::new(slot, HotSpotRules::default()).kind,
                Player::new(slot, HotSpotRules::default()).kind
            );
        }
    }

    #[test]
    fn test_no_pose_no_bounds() {
        let player = Player::new(0, HotSpotRules::default());
        assert!(player.collidable_bounds().is_empty());
    }

    #[test]
    fn test_bounds_filter_name_and_score() {
        let mut player = Player::new(0, HotSpotRules::default());
        let pose = Skeleton::new(vec![
            Keypoint::new(NOSE, 1.0, 1.0, Some(1.0)),
            Keypoint::new(LEFT_WRIST, 100.0, 50.0, Some(0.3)),
            Keypoint::new(RIGHT_WRIST, 10.0, 10.0, Some(0.29)),
            Keypoint::new(LEFT_ANKLE, 10.0, 10.0, None),
        ]);
        player.update_with_pose(Some(pose), 0.0);

        let bounds = player.collidable_bounds();
        assert_eq!(bounds, vec![Bounds::new(95.0, 105.0, 45.0, 55.0)]);
    }

    #[test]
    fn test_happy_window() {
        let mut player = Player::new(1, HotSpotRules::default());
        assert!(!player.is_happy());

        player.update_with_pose(None, 1000.0);
        player.notify_object_destroyed(&record(1000.0));
        assert!(player.is_happy());
        assert_eq!(player.destroyed_count(), 1);

        player.update_with_pose(None, 1999.0);
        assert!(player.is_happy());
        player.update_with_pose(None, 2000.0);
        assert!(!player.is_happy());
    }

    #[test]
    fn test_happy_colors_differ() {
        let colors: std::collections::HashSet<_> =
            PLAYER_TYPES.iter().map(PlayerType::happy_color).collect();
        assert_eq!(colors.len(), PLAYER_TYPES.len());
    }
}
