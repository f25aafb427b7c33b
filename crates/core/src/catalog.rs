//! Notification keys and the template catalog that resolves them.

use std::collections::HashMap;

use strum::IntoEnumIterator;

use crate::env::MessageSink;
use crate::error::CatalogError;
use crate::types::ActorId;

/// Every notification the plugin can emit.
///
/// The string form of each key is its variant name, which is also the key
/// hosts use in their locale tables.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MessageKey {
    /// Destroy mode switched on.
    Enabled,
    /// Destroy mode switched off.
    Disabled,
    /// A hit arrived without an entity to destroy.
    EntityIsNull,
}

impl MessageKey {
    /// Built-in English template for this key.
    pub const fn default_template(self) -> &'static str {
        match self {
            Self::Enabled => "Destroy >> <color=green>Enabled</color>",
            Self::Disabled => "Destroy >> <color=red>Disabled</color>",
            Self::EntityIsNull => "Destroy >> The entity appears to be null.",
        }
    }
}

/// Key → template mapping filled at startup.
///
/// Registration is last-wins per key so a locale table registered after the
/// defaults overrides them. After startup the catalog is only read.
#[derive(Clone, Debug, Default)]
pub struct MessageCatalog {
    templates: HashMap<String, String>,
}

impl MessageCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog holding the built-in template of every [`MessageKey`].
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();
        catalog.register(MessageKey::iter().map(|key| (key, key.default_template())));
        catalog
    }

    /// Registers a batch of templates, overwriting existing keys.
    pub fn register<I, K, V>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (key, template) in entries {
            self.templates
                .insert(key.as_ref().to_owned(), template.into());
        }
    }

    /// Looks up the template registered for `key`.
    pub fn resolve(&self, key: impl AsRef<str>) -> Result<&str, CatalogError> {
        let key = key.as_ref();
        self.templates
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| CatalogError::MissingKey(key.to_owned()))
    }

    /// Resolves `key` and delivers it to `actor` through `sink`.
    ///
    /// An absent actor (disconnected between the event and the notification)
    /// is a silent no-op, even for keys that are not registered.
    pub fn notify(
        &self,
        sink: &dyn MessageSink,
        actor: Option<ActorId>,
        key: impl AsRef<str>,
    ) -> Result<(), CatalogError> {
        let Some(actor) = actor else {
            return Ok(());
        };

        let text = self.resolve(key)?;
        sink.send_message(actor, text);
        Ok(())
    }

    /// Checks that every key in `keys` resolves.
    ///
    /// Reports the first missing key.
    pub fn ensure_keys<I, K>(&self, keys: I) -> Result<(), CatalogError>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        keys.into_iter()
            .try_for_each(|key| self.resolve(key).map(|_| ()))
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
