//! Per-actor opt-in set for the destroy path.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::types::ActorId;

/// In-memory set of actors that switched the destroy mode on.
///
/// The set is volatile: it starts empty and is never persisted, so every
/// restart switches everyone back off.
///
/// Toggles and membership checks may arrive concurrently from different host
/// threads. Each operation is a single critical section over one mutex, so
/// no caller can observe a half-applied toggle.
#[derive(Debug, Default)]
pub struct ToggleRegistry {
    enabled: Mutex<HashSet<ActorId>>,
}

impl ToggleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips the actor's state and returns the new one (`true` = enabled).
    pub fn toggle(&self, actor: ActorId) -> bool {
        let mut enabled = self.lock();
        if enabled.remove(&actor) {
            false
        } else {
            enabled.insert(actor);
            true
        }
    }

    /// Returns true if the actor has the destroy mode switched on.
    pub fn is_enabled(&self, actor: ActorId) -> bool {
        self.lock().contains(&actor)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Switches everyone off.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Returns the enabled actors in ascending order.
    pub fn enabled_actors(&self) -> Vec<ActorId> {
        let mut actors: Vec<ActorId> = self.lock().iter().copied().collect();
        actors.sort_unstable();
        actors
    }

    // Every critical section is one set operation, so a poisoned lock still
    // guards a consistent set.
    fn lock(&self) -> MutexGuard<'_, HashSet<ActorId>> {
        self.enabled.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    #[test]
    fn never_toggled_is_disabled() {
        let registry = ToggleRegistry::new();
        assert!(!registry.is_enabled(ActorId(1)));
        assert!(registry.is_empty());
    }

    #[test]
    fn toggle_twice_round_trips() {
        let registry = ToggleRegistry::new();
        let actor = ActorId(7);

        assert!(registry.toggle(actor));
        assert!(registry.is_enabled(actor));
        assert!(!registry.toggle(actor));
        assert!(!registry.is_enabled(actor));
        assert!(registry.is_empty());
    }

    #[test]
    fn actors_are_independent() {
        let registry = ToggleRegistry::new();
        registry.toggle(ActorId(1));
        registry.toggle(ActorId(3));

        assert!(registry.is_enabled(ActorId(1)));
        assert!(!registry.is_enabled(ActorId(2)));
        assert_eq!(registry.enabled_actors(), vec![ActorId(1), ActorId(3)]);

        registry.clear();
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn concurrent_toggles_keep_set_consistent() {
        let registry = Arc::new(ToggleRegistry::new());

        // Each thread owns one actor and toggles it an odd number of times,
        // while a reader hammers membership checks on all of them.
        let writers: Vec<_> = (0..8u64)
            .map(|id| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    for _ in 0..101 {
                        registry.toggle(ActorId(id));
                    }
                })
            })
            .collect();

        let reader = {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                for round in 0..1_000u64 {
                    let _ = registry.is_enabled(ActorId(round % 8));
                }
            })
        };

        for handle in writers {
            handle.join().unwrap();
        }
        reader.join().unwrap();

        assert_eq!(registry.len(), 8);
        assert!((0..8u64).all(|id| registry.is_enabled(ActorId(id))));
    }

    #[test]
    fn concurrent_toggles_on_same_actor_are_serialized() {
        let registry = Arc::new(ToggleRegistry::new());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    (0..50)
                        .filter(|_| registry.toggle(ActorId(99)))
                        .count()
                })
            })
            .collect();

        let enabled_transitions: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();

        // 200 toggles: exactly half of them turned the actor on.
        assert_eq!(enabled_transitions, 100);
        assert!(!registry.is_enabled(ActorId(99)));
    }
}
