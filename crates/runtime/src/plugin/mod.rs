//! The destroy plugin service.
//!
//! [`DestroyPlugin`] is what a host embeds. It is constructed once at startup
//! through [`DestroyPlugin::builder`], shared as `Arc<DestroyPlugin>` across
//! the host's callback threads, and dropped (or [`DestroyPlugin::shutdown`])
//! when the host unloads it. All state (configuration, toggles, templates)
//! lives inside the instance.

mod builder;
mod command;

pub use builder::DestroyPluginBuilder;
pub use command::{CommandOutcome, TOGGLE_COMMAND};

use std::sync::Arc;

use destroy_core::{
    ActionEvent, ActionGate, ActorId, Configuration, Decision, EntityDestroyer, MessageCatalog,
    MessageKey, MessageSink, PermissionOracle, ToggleRegistry,
};
use tracing::{debug, error, info};

use crate::config_store::{ConfigStore, LoadOutcome};

/// Host-facing service that gates hammer hits behind a permission and a
/// per-actor toggle.
pub struct DestroyPlugin {
    config: ConfigStore,
    toggles: ToggleRegistry,
    catalog: MessageCatalog,
    permissions: Arc<dyn PermissionOracle>,
    destroyer: Arc<dyn EntityDestroyer>,
    messenger: Arc<dyn MessageSink>,
}

impl DestroyPlugin {
    pub const NAME: &'static str = "Destroy";
    pub const VERSION: &'static str = env!("CARGO_PKG_VERSION");
    pub const DESCRIPTION: &'static str =
        "Lets actors holding the permission destroy entities with a hammer.";

    /// Create a new plugin builder
    pub fn builder() -> DestroyPluginBuilder {
        DestroyPluginBuilder::new()
    }

    /// Dispatches a chat command issued by `actor`.
    ///
    /// Only the toggle command is handled. It is available to every actor;
    /// the permission is checked on the hit path.
    pub fn handle_command(&self, actor: Option<ActorId>, name: &str) -> CommandOutcome {
        if !command::is_toggle_command(name) {
            return CommandOutcome::Unknown;
        }

        match actor {
            Some(actor) => CommandOutcome::Toggled {
                enabled: self.toggle(actor),
            },
            None => CommandOutcome::Ignored,
        }
    }

    /// Flips `actor`'s destroy mode, tells them the new state and returns it.
    pub fn toggle(&self, actor: ActorId) -> bool {
        let enabled = self.toggles.toggle(actor);

        debug!(
            target: "runtime::plugin",
            actor = %actor,
            enabled,
            "Destroy mode toggled"
        );

        let key = if enabled {
            MessageKey::Enabled
        } else {
            MessageKey::Disabled
        };
        self.notify(Some(actor), key);

        enabled
    }

    /// Returns true if `actor` has the destroy mode switched on.
    pub fn is_enabled(&self, actor: ActorId) -> bool {
        self.toggles.is_enabled(actor)
    }

    /// Evaluates a hammer hit and carries out the decision.
    ///
    /// `Destroy` calls the host destroyer exactly once and says nothing;
    /// `NotifyOnly` messages the actor; `Ignore` does nothing.
    pub fn on_hammer_hit(&self, event: &ActionEvent) -> Decision {
        let config = self.config.current();
        let decision = self.gate(&config).evaluate(event);

        match decision {
            Decision::Destroy(target) => {
                debug!(
                    target: "runtime::plugin",
                    actor = ?event.actor,
                    target = %target,
                    "Destroying entity"
                );
                self.destroyer.destroy(target);
            }
            Decision::NotifyOnly(key) => self.notify(event.actor, key),
            Decision::Ignore => {}
        }

        decision
    }

    /// Re-reads the configuration and registers the permission if it changed.
    pub fn reload_config(&self) -> LoadOutcome {
        let previous = self.config.current();
        let outcome = self.config.reload();

        if outcome.config.permission != previous.permission {
            self.permissions
                .register_permission(&outcome.config.permission);
            info!(
                target: "runtime::plugin",
                from = %previous.permission,
                to = %outcome.config.permission,
                "Permission changed on reload"
            );
        }

        outcome
    }

    /// Persists the configuration in effect.
    pub fn save_config(&self) {
        self.config.save(&self.config.current());
    }

    /// Snapshot of the configuration in effect.
    pub fn config(&self) -> Arc<Configuration> {
        self.config.current()
    }

    pub fn toggles(&self) -> &ToggleRegistry {
        &self.toggles
    }

    /// Switches everyone off and releases the plugin.
    pub fn shutdown(self) {
        let enabled = self.toggles.len();
        self.toggles.clear();
        info!(
            target: "runtime::plugin",
            enabled,
            "Destroy plugin unloaded"
        );
    }

    fn gate<'a>(&'a self, config: &'a Configuration) -> ActionGate<'a> {
        ActionGate::new(self.permissions.as_ref(), &self.toggles, &config.permission)
    }

    fn notify(&self, actor: Option<ActorId>, key: MessageKey) {
        if let Err(e) = self.catalog.notify(self.messenger.as_ref(), actor, key) {
            error!(
                target: "runtime::plugin",
                key = %key,
                error = %e,
                "Failed to resolve notification"
            );
        }
    }
}
