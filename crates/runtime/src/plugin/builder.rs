//! Builder that performs the plugin's startup sequence.

use std::sync::Arc;

use destroy_core::{
    EntityDestroyer, MessageCatalog, MessageKey, MessageSink, PermissionOracle, ToggleRegistry,
};
use strum::IntoEnumIterator;
use tracing::{debug, info};

use super::DestroyPlugin;
use crate::config_store::ConfigStore;
use crate::error::{PluginError, Result};
use crate::repository::{ConfigRepository, InMemoryConfigRepository};

/// Collects the host collaborators and builds a [`DestroyPlugin`].
///
/// `build` runs the startup sequence:
/// 1. register message templates and check every [`MessageKey`] resolves
/// 2. load the configuration (never fails, see [`ConfigStore`])
/// 3. register the configured permission with the permission oracle
pub struct DestroyPluginBuilder {
    repository: Option<Arc<dyn ConfigRepository>>,
    permissions: Option<Arc<dyn PermissionOracle>>,
    destroyer: Option<Arc<dyn EntityDestroyer>>,
    messenger: Option<Arc<dyn MessageSink>>,
    catalog: MessageCatalog,
}

impl DestroyPluginBuilder {
    pub(super) fn new() -> Self {
        Self {
            repository: None,
            permissions: None,
            destroyer: None,
            messenger: None,
            catalog: MessageCatalog::with_defaults(),
        }
    }

    /// Set where the configuration record is stored.
    ///
    /// Defaults to an in-memory repository, which forgets the configuration
    /// on shutdown.
    pub fn config_repository(mut self, repository: Arc<dyn ConfigRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Set the required permission oracle
    pub fn permissions(mut self, permissions: Arc<dyn PermissionOracle>) -> Self {
        self.permissions = Some(permissions);
        self
    }

    /// Set the required entity destroyer
    pub fn destroyer(mut self, destroyer: Arc<dyn EntityDestroyer>) -> Self {
        self.destroyer = Some(destroyer);
        self
    }

    /// Set the required chat sink
    pub fn messenger(mut self, messenger: Arc<dyn MessageSink>) -> Self {
        self.messenger = Some(messenger);
        self
    }

    /// Layer templates over the built-in ones (e.g. a locale table).
    pub fn messages<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        self.catalog.register(entries);
        self
    }

    /// Replace the whole catalog, built-in templates included.
    pub fn catalog(mut self, catalog: MessageCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn build(self) -> Result<DestroyPlugin> {
        let permissions = self
            .permissions
            .ok_or(PluginError::MissingCollaborator {
                name: "permission oracle",
            })?;
        let destroyer = self.destroyer.ok_or(PluginError::MissingCollaborator {
            name: "entity destroyer",
        })?;
        let messenger = self.messenger.ok_or(PluginError::MissingCollaborator {
            name: "message sink",
        })?;

        self.catalog.ensure_keys(MessageKey::iter())?;

        let repository = self.repository.unwrap_or_else(|| {
            debug!(
                target: "runtime::plugin",
                "No config repository set, keeping configuration in memory"
            );
            Arc::new(InMemoryConfigRepository::new())
        });
        let (config, outcome) = ConfigStore::load(repository);

        permissions.register_permission(&outcome.config.permission);

        info!(
            target: "runtime::plugin",
            plugin = DestroyPlugin::NAME,
            version = DestroyPlugin::VERSION,
            permission = %outcome.config.permission,
            defaults = outcome.used_defaults(),
            templates = self.catalog.len(),
            "Destroy plugin initialized"
        );

        Ok(DestroyPlugin {
            config,
            toggles: ToggleRegistry::new(),
            catalog: self.catalog,
            permissions,
            destroyer,
            messenger,
        })
    }
}
