//! Colony broadcast network.
//!
//! Ants share every freshly sensed cell with the rest of their colony so
//! nobody has to query the same tile twice. Delivery is best-effort and
//! may duplicate; receivers must treat updates idempotently.
//!
//! Inbound updates are buffered in each member's channel and only applied
//! when the owning planner drains them between propagation cycles.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crossbeam_channel::{Receiver, Sender, unbounded};
use log::{debug, trace};
use parking_lot::RwLock;

use crate::core::{GridCoord, Terrain};

/// One shared observation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MapUpdate {
    /// Network id of the publishing member
    pub sender: usize,
    /// Observed cell
    pub pos: GridCoord,
    /// Terrain found there
    pub terrain: Terrain,
}

/// Outgoing and incoming side of the colony network for one agent.
pub trait Broadcast: Send {
    /// Share an observation with the other members.
    fn publish(&self, pos: GridCoord, terrain: Terrain);

    /// Take every update received since the last call. Never blocks.
    fn receive(&self) -> Vec<MapUpdate>;
}

/// Network of one: publishes nowhere, never receives.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullBroadcast;

impl Broadcast for NullBroadcast {
    fn publish(&self, _pos: GridCoord, _terrain: Terrain) {}

    fn receive(&self) -> Vec<MapUpdate> {
        Vec::new()
    }
}

#[derive(Debug)]
struct Member {
    id: usize,
    name: String,
    tx: Sender<MapUpdate>,
}

type Members = Arc<RwLock<Vec<Member>>>;

/// Hub that hands out [`ColonyPort`]s.
#[derive(Clone, Debug, Default)]
pub struct ColonyNetwork {
    members: Members,
    next_id: Arc<AtomicUsize>,
}

impl ColonyNetwork {
    /// Create an empty network
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new member and return its port.
    pub fn join(&self, name: impl Into<String>) -> ColonyPort {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let name = name.into();
        let (tx, rx) = unbounded();

        debug!("[Colony] {} joined as #{}", name, id);
        self.members.write().push(Member {
            id,
            name: name.clone(),
            tx,
        });

        ColonyPort {
            id,
            name,
            members: Arc::clone(&self.members),
            rx,
        }
    }

    /// Number of connected members
    pub fn len(&self) -> usize {
        self.members.read().len()
    }

    /// Check if nobody joined yet
    pub fn is_empty(&self) -> bool {
        self.members.read().is_empty()
    }

    /// Names of connected members, in join order
    pub fn member_names(&self) -> Vec<String> {
        self.members.read().iter().map(|m| m.name.clone()).collect()
    }
}

/// One member's connection to a [`ColonyNetwork`].
///
/// Leaves the network when dropped.
#[derive(Debug)]
pub struct ColonyPort {
    id: usize,
    name: String,
    members: Members,
    rx: Receiver<MapUpdate>,
}

impl ColonyPort {
    /// Network id of this member
    pub fn id(&self) -> usize {
        self.id
    }

    /// Member name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Broadcast for ColonyPort {
    fn publish(&self, pos: GridCoord, terrain: Terrain) {
        let update = MapUpdate {
            sender: self.id,
            pos,
            terrain,
        };

        for member in self.members.read().iter().filter(|m| m.id != self.id) {
            // Receiver gone means the peer is shutting down
            if member.tx.send(update).is_err() {
                trace!("[Colony] {} unreachable, dropping update", member.name);
            }
        }
    }

    fn receive(&self) -> Vec<MapUpdate> {
        self.rx.try_iter().collect()
    }
}

impl Drop for ColonyPort {
    fn drop(&mut self) {
        self.members.write().retain(|m| m.id != self.id);
        debug!("[Colony] {} left", self.name);
    }
}
