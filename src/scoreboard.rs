//! Session scoreboard
//!
//! Subscribes to a world and counts pops per player.

use serde::{Deserialize, Serialize};

use crate::sim::{DestroyedObject, Player, PlayerId, PlayerType, WorldListener};

/// One player's tally
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub player: PlayerId,
    pub kind: PlayerType,
    pub popped: u32,
    /// Timestamp (ms) of the latest pop
    pub last_pop: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scoreboard {
    entries: Vec<ScoreEntry>,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn score(&self, player: PlayerId) -> u32 {
        self.entries
            .iter()
            .find(|e| e.player == player)
            .map(|e| e.popped)
            .unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.entries.iter().map(|e| e.popped).sum()
    }

    /// Entries by pops (descending), ties by player id
    pub fn ranking(&self) -> Vec<ScoreEntry> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.popped.cmp(&a.popped).then(a.player.cmp(&b.player)));
        ranked
    }

    /// Best player, if anyone scored
    pub fn leader(&self) -> Option<ScoreEntry> {
        self.ranking().into_iter().next()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl WorldListener for Scoreboard {
    fn on_object_destroyed(&mut self, record: &DestroyedObject, player: &Player) {
        match self.entries.iter_mut().find(|e| e.player == player.id) {
            Some(entry) => {
                entry.popped += 1;
                entry.last_pop = record.when;
            }
            None => self.entries.push(ScoreEntry {
                player: player.id,
                kind: player.kind,
                popped: 1,
                last_pop: record.when,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::player::HotSpotRules;
    use crate::sim::{ScriptedRandom, Target, WorldSize};
    use glam::Vec2;

    fn pop(board: &mut Scoreboard, player: &Player, when: f64) {
        let mut rng = ScriptedRandom::constant(0.0);
        let record = DestroyedObject {
            id: 0,
            when,
            object: Target::spawn(0, Vec2::ZERO, 0.0, WorldSize::default(), &mut rng),
            player: player.id,
        };
        board.on_object_destroyed(&record, player);
    }

    #[test]
    fn test_tally_and_ranking() {
        let p0 = Player::new(0, HotSpotRules::default());
        let p1 = Player::new(1, HotSpotRules::default());
        let p2 = Player::new(2, HotSpotRules::default());
        let mut board = Scoreboard::new();
        assert!(board.is_empty());
        assert!(board.leader().is_none());

        pop(&mut board, &p2, 10.0);
        pop(&mut board, &p1, 20.0);
        pop(&mut board, &p1, 30.0);
        pop(&mut board, &p0, 40.0);

        assert_eq!(board.total(), 4);
        assert_eq!(board.score(1), 2);
        assert_eq!(board.score(3), 0);

        let ranking = board.ranking();
        assert_eq!(ranking.iter().map(|e| e.player).collect::<Vec<_>>(), vec![1, 0, 2]);
        let leader = board.leader().unwrap();
        assert_eq!(leader.kind, PlayerType::Pelix);
        assert_eq!(leader.last_pop, 30.0);
    }
}
