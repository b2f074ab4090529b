//! The game world
//!
//! Owns the player roster, the live targets and the log of popped targets.
//! `update` is the only mutator; the host calls it once per frame with the
//! latest skeletons and a millisecond timestamp.

use glam::Vec2;

use super::difficulty::{DifficultyTier, tier_for};
use super::events::{DestroyedObject, ListenerId, WorldListener};
use super::player::{HotSpotRules, Player};
use super::rng::{RandomSource, SeededRandom};
use super::target::{Target, WorldSize};
use crate::pose::Skeleton;
use crate::settings::{ConfigError, GameConfig};

pub struct GameWorld {
    config: GameConfig,
    size: WorldSize,
    players: Vec<Player>,
    /// Live targets, in spawn order
    targets: Vec<Target>,
    /// Every pop this session (never pruned, drives difficulty)
    destroyed: Vec<DestroyedObject>,
    last_update: Option<f64>,
    rng: Box<dyn RandomSource>,
    listeners: Vec<(ListenerId, Box<dyn WorldListener>)>,
    next_target_id: u32,
    next_record_id: u32,
    next_listener_id: u32,
}

impl GameWorld {
    /// Create a world with one player per configured slot and no targets
    ///
    /// `config` must pass `GameConfig::validate`; use `try_new` for
    /// configs that haven't been checked.
    pub fn new(config: GameConfig, rng: impl RandomSource + 'static) -> Self {
        debug_assert!(config.validate().is_ok(), "invalid game config: {config:?}");
        let rules = HotSpotRules {
            box_size: config.collidable_box_size,
            min_score: config.min_collision_score,
            happy_window_ms: config.happy_window_ms,
        };
        let players = (0..config.max_players)
            .map(|slot| Player::new(slot, rules))
            .collect();
        let size = WorldSize::new(config.width, config.height);

        log::info!(
            "World created: {} players, {}x{}",
            config.max_players,
            size.width,
            size.height
        );

        Self {
            config,
            size,
            players,
            targets: Vec::new(),
            destroyed: Vec::new(),
            last_update: None,
            rng: Box::new(rng),
            listeners: Vec::new(),
            next_target_id: 1,
            next_record_id: 1,
            next_listener_id: 1,
        }
    }

    /// Validate `config` first
    pub fn try_new(
        config: GameConfig,
        rng: impl RandomSource + 'static,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config, rng))
    }

    /// World driven by a seeded PCG stream
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::new(config, SeededRandom::new(seed))
    }

    pub fn subscribe(&mut self, listener: Box<dyn WorldListener>) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, listener));
        id
    }

    /// Returns false if the listener was already gone
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Advance the simulation to `current_time` (ms)
    ///
    /// Slot `i` takes `skeletons[i]`; slots past the end of the batch get no
    /// pose this tick.
    pub fn update(&mut self, current_time: f64, skeletons: &[Skeleton]) {
        let last_update = *self.last_update.get_or_insert(current_time);
        let elapsed = current_time - last_update;

        for (slot, player) in self.players.iter_mut().enumerate() {
            player.update_with_pose(skeletons.get(slot).cloned(), current_time);
        }

        for target in &mut self.targets {
            target.update(elapsed);
        }

        // Expire before spawning so the cap sees this tick's free slots, and
        // before collisions so dead targets can't be popped
        self.expire_targets();
        self.maybe_add_target(elapsed);
        self.check_collisions(current_time);

        self.last_update = Some(current_time);
    }

    fn expire_targets(&mut self) {
        if !self.targets.iter().any(Target::is_too_old) {
            return;
        }
        let (expired, remaining): (Vec<_>, Vec<_>) = std::mem::take(&mut self.targets)
            .into_iter()
            .partition(Target::is_too_old);
        self.targets = remaining;

        for target in &expired {
            log::debug!("Target {} died of old age", target.id);
            for (_, listener) in &mut self.listeners {
                listener.on_object_died_naturally(target);
            }
        }
    }

    /// One Bernoulli draw per tick with p = elapsed / spawn interval
    fn maybe_add_target(&mut self, elapsed: f64) {
        let tier = self.difficulty();
        if self.targets.len() >= tier.max_targets || elapsed <= 0.0 {
            return;
        }

        let chance = elapsed / self.config.spawn_interval_ms;
        if f64::from(self.rng.unit()) > chance {
            return;
        }

        let margin = self.config.spawn_margin_ratio;
        let (w, h) = (self.size.width, self.size.height);
        let pos = Vec2::new(
            self.rng.uniform(margin * w, (1.0 - margin) * w),
            self.rng.uniform(margin * h, (1.0 - margin) * h),
        );

        let id = self.next_target_id;
        self.next_target_id += 1;
        let mut target = Target::spawn(id, pos, tier.speed, self.size, self.rng.as_mut());
        target.max_age = self.config.max_target_age_ms;

        log::debug!(
            "Spawned target {} at ({:.0}, {:.0}), {} sides, speed {}",
            id,
            pos.x,
            pos.y,
            target.sides,
            target.speed
        );
        for (_, listener) in &mut self.listeners {
            listener.on_object_created(&target);
        }
        self.targets.push(target);
    }

    /// Players in slot order, hot-spots in keypoint order, targets in spawn
    /// order; a popped target leaves the live set immediately
    fn check_collisions(&mut self, current_time: f64) {
        for slot in 0..self.players.len() {
            let bounds = self.players[slot].collidable_bounds();
            for bound in &bounds {
                let mut i = 0;
                while i < self.targets.len() {
                    if self.targets[i].collides_with(bound) {
                        let target = self.targets.remove(i);
                        self.record_destruction(slot, target, current_time);
                    } else {
                        i += 1;
                    }
                }
            }
        }
    }

    fn record_destruction(&mut self, slot: usize, target: Target, when: f64) {
        let record = DestroyedObject {
            id: self.next_record_id,
            when,
            object: target,
            player: self.players[slot].id,
        };
        self.next_record_id += 1;

        let player = &mut self.players[slot];
        player.notify_object_destroyed(&record);
        for (_, listener) in &mut self.listeners {
            listener.on_object_destroyed(&record, player);
        }
        self.destroyed.push(record);
    }

    /// Current tier, from the number of targets popped so far
    pub fn difficulty(&self) -> DifficultyTier {
        tier_for(&self.config.difficulty, self.destroyed.len())
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn destroyed(&self) -> &[DestroyedObject] {
        &self.destroyed
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn size(&self) -> WorldSize {
        self.size
    }

    pub fn last_update(&self) -> Option<f64> {
        self.last_update
    }
}
