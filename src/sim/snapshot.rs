//! Serializable read model of the world
//!
//! What a renderer or a JS host needs each frame, flattened into plain data.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bounds::Bounds;
use super::player::{Player, PlayerId, PlayerType};
use super::target::Target;
use super::world::GameWorld;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub slot: usize,
    pub kind: PlayerType,
    pub has_pose: bool,
    pub happy: bool,
    pub popped: usize,
    pub hot_spots: Vec<Bounds>,
}

impl From<&Player> for PlayerSnapshot {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id,
            slot: player.slot,
            kind: player.kind,
            has_pose: player.pose.is_some(),
            happy: player.is_happy(),
            popped: player.destroyed_count(),
            hot_spots: player.collidable_bounds(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetSnapshot {
    pub id: u32,
    pub pos: Vec2,
    pub polygon: Vec<Vec2>,
    pub bounds: Bounds,
    pub color: u32,
    pub time_to_die: f64,
}

impl From<&Target> for TargetSnapshot {
    fn from(target: &Target) -> Self {
        Self {
            id: target.id,
            pos: target.pos,
            polygon: target.polygon(),
            bounds: target.bounds(),
            color: target.color,
            time_to_die: target.time_to_die(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub time: Option<f64>,
    pub players: Vec<PlayerSnapshot>,
    pub targets: Vec<TargetSnapshot>,
    pub destroyed: usize,
    pub max_targets: usize,
    pub speed: f32,
}

impl GameWorld {
    pub fn snapshot(&self) -> WorldSnapshot {
        let tier = self.difficulty();
        WorldSnapshot {
            time: self.last_update(),
            players: self.players().iter().map(PlayerSnapshot::from).collect(),
            targets: self.targets().iter().map(TargetSnapshot::from).collect(),
            destroyed: self.destroyed().len(),
            max_targets: tier.max_targets,
            speed: tier.speed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::GameConfig;
    use crate::sim::rng::ScriptedRandom;

    #[test]
    fn test_snapshot_reflects_world() {
        let config = GameConfig {
            max_players: 2,
            ..GameConfig::default()
        };
        let mut world = GameWorld::new(config, ScriptedRandom::constant(0.0));
        world.update(0.0, &[]);
        world.update(3000.0, &[]);

        let snap = world.snapshot();
        assert_eq!(snap.time, Some(3000.0));
        assert_eq!(snap.players.len(), 2);
        assert_eq!(snap.players[1].kind, PlayerType::Pelix);
        assert!(!snap.players[0].has_pose);
        assert_eq!(snap.targets.len(), 1);
        assert_eq!(snap.targets[0].polygon.len(), world.targets()[0].sides as usize);
        assert_eq!(snap.destroyed, 0);
        assert_eq!(snap.max_targets, 1);

        let json = serde_json::to_string(&snap).unwrap();
        let back: WorldSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.targets[0].id, snap.targets[0].id);
    }
}
