//! In-memory server world backing the console host.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock};

use destroy_core::{ActorId, EntityDestroyer, MessageSink, PermissionOracle, TargetRef};

/// Permission table, live entities and outgoing chat of a pretend server.
#[derive(Debug, Default)]
pub struct ServerWorld {
    grants: RwLock<HashMap<ActorId, HashSet<String>>>,
    registered: RwLock<BTreeSet<String>>,
    entities: Mutex<BTreeSet<TargetRef>>,
    outbox: Mutex<Vec<(ActorId, String)>>,
}

impl ServerWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant(&self, actor: ActorId, permission: &str) {
        if !self.is_registered(permission) {
            tracing::warn!("Granting unregistered permission '{}'", permission);
        }
        self.grants
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(actor)
            .or_default()
            .insert(permission.to_owned());
    }

    /// Returns true if the actor held the permission.
    pub fn revoke(&self, actor: ActorId, permission: &str) -> bool {
        self.grants
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_mut(&actor)
            .is_some_and(|set| set.remove(permission))
    }

    pub fn is_registered(&self, permission: &str) -> bool {
        self.registered
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(permission)
    }

    /// Returns false if the entity already existed.
    pub fn spawn(&self, target: TargetRef) -> bool {
        self.entities().insert(target)
    }

    pub fn is_alive(&self, target: TargetRef) -> bool {
        self.entities().contains(&target)
    }

    pub fn live_entities(&self) -> Vec<TargetRef> {
        self.entities().iter().copied().collect()
    }

    /// Takes every chat message sent since the last call.
    pub fn drain_outbox(&self) -> Vec<(ActorId, String)> {
        std::mem::take(&mut *self.outbox.lock().unwrap_or_else(PoisonError::into_inner))
    }

    fn entities(&self) -> MutexGuard<'_, BTreeSet<TargetRef>> {
        self.entities.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PermissionOracle for ServerWorld {
    fn has_permission(&self, actor: ActorId, permission: &str) -> bool {
        self.grants
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&actor)
            .is_some_and(|set| set.contains(permission))
    }

    fn register_permission(&self, permission: &str) {
        let added = self
            .registered
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(permission.to_owned());
        if added {
            tracing::info!("Registered permission '{}'", permission);
        }
    }
}

impl EntityDestroyer for ServerWorld {
    fn destroy(&self, target: TargetRef) {
        if self.entities().remove(&target) {
            tracing::info!("Killed {}", target);
        } else {
            tracing::debug!("{} already removed", target);
        }
    }
}

impl MessageSink for ServerWorld {
    fn send_message(&self, actor: ActorId, text: &str) {
        self.outbox
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((actor, text.to_owned()));
    }
}
