//! World event notifications
//!
//! Any number of listeners can subscribe to a world; each is told about
//! spawns, pops and natural deaths synchronously during `update`.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::player::{Player, PlayerId};
use super::target::Target;

/// A popped target, kept for the whole session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestroyedObject {
    pub id: u32,
    /// Tick timestamp of the pop (ms)
    pub when: f64,
    /// Target as it was when popped
    pub object: Target,
    pub player: PlayerId,
}

/// Observer for world events; every method defaults to a no-op
pub trait WorldListener {
    fn on_object_created(&mut self, _target: &Target) {}

    fn on_object_destroyed(&mut self, _record: &DestroyedObject, _player: &Player) {}

    fn on_object_died_naturally(&mut self, _target: &Target) {}
}

/// Shared handles let the host keep reading a listener it subscribed
impl<L: WorldListener> WorldListener for Rc<RefCell<L>> {
    fn on_object_created(&mut self, target: &Target) {
        self.borrow_mut().on_object_created(target);
    }

    fn on_object_destroyed(&mut self, record: &DestroyedObject, player: &Player) {
        self.borrow_mut().on_object_destroyed(record, player);
    }

    fn on_object_died_naturally(&mut self, target: &Target) {
        self.borrow_mut().on_object_died_naturally(target);
    }
}

/// Handle returned by `GameWorld::subscribe`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u32);

/// Flattened event, as recorded by `EventLog`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorldEvent {
    Created { target_id: u32 },
    Destroyed { target_id: u32, player: PlayerId, when: f64 },
    DiedNaturally { target_id: u32 },
}

/// Listener that records every event in order
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    pub events: Vec<WorldEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take everything recorded so far
    pub fn drain(&mut self) -> Vec<WorldEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn created(&self) -> usize {
        self.count(|e| matches!(e, WorldEvent::Created { .. }))
    }

    pub fn destroyed(&self) -> usize {
        self.count(|e| matches!(e, WorldEvent::Destroyed { .. }))
    }

    fn count(&self, pred: impl Fn(&WorldEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl WorldListener for EventLog {
    fn on_object_created(&mut self, target: &Target) {
        self.events.push(WorldEvent::Created { target_id: target.id });
    }

    fn on_object_destroyed(&mut self, record: &DestroyedObject, player: &Player) {
        self.events.push(WorldEvent::Destroyed {
            target_id: record.object.id,
            player: player.id,
            when: record.when,
        });
    }

    fn on_object_died_naturally(&mut self, target: &Target) {
        self.events.push(WorldEvent::DiedNaturally { target_id: target.id });
    }
}
