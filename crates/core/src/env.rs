//! Traits describing the host capabilities the core consumes.
//!
//! The core never talks to a concrete game server. Hosts implement these
//! traits and inject them; tests implement them in a few lines.
use crate::types::{ActorId, TargetRef};

/// Answers whether an actor holds a permission string.
///
/// Implementations are expected to be side-effect free and cheap; the gate
/// calls this once per evaluated hit.
pub trait PermissionOracle: Send + Sync {
    /// Returns true if `actor` holds `permission`.
    fn has_permission(&self, actor: ActorId, permission: &str) -> bool;

    /// Announces a permission the plugin is going to check.
    ///
    /// Hosts with a permission registry use this to make the permission
    /// grantable. The default does nothing.
    fn register_permission(&self, _permission: &str) {}
}

/// Destructive primitive that removes an entity from the world.
///
/// Fire-and-forget: the caller never retries or verifies. Destroying an
/// entity that is already gone must be a safe no-op.
pub trait EntityDestroyer: Send + Sync {
    fn destroy(&self, target: TargetRef);
}

/// Best-effort chat delivery to a single actor.
pub trait MessageSink: Send + Sync {
    fn send_message(&self, actor: ActorId, text: &str);
}
