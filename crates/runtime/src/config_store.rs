//! Fail-safe loading and saving of the plugin configuration.
//!
//! Loading never fails. Anything short of a usable record (missing, corrupt,
//! blank permission) degrades to [`Configuration::default`], is reported as a
//! [`ConfigDiagnostic`] and is immediately written back so the next load is
//! stable.

use std::sync::{Arc, PoisonError, RwLock};

use destroy_core::Configuration;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::repository::{ConfigRepository, RepositoryError};

/// Why a load fell back to the default configuration.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigDiagnostic {
    #[error("no configuration has been saved yet")]
    Missing,

    #[error("configuration contains an error: {0}")]
    Corrupt(String),

    #[error("configuration is invalid: {0}")]
    Invalid(String),
}

/// Result of a load: the configuration in effect plus what went wrong, if
/// anything.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadOutcome {
    pub config: Configuration,
    pub diagnostic: Option<ConfigDiagnostic>,
}

impl LoadOutcome {
    fn loaded(config: Configuration) -> Self {
        Self {
            config,
            diagnostic: None,
        }
    }

    fn fallback(diagnostic: ConfigDiagnostic) -> Self {
        Self {
            config: Configuration::default(),
            diagnostic: Some(diagnostic),
        }
    }

    /// Returns true if the defaults were substituted.
    pub fn used_defaults(&self) -> bool {
        self.diagnostic.is_some()
    }
}

/// Owns the configuration currently in effect.
///
/// Readers take an `Arc` snapshot via [`ConfigStore::current`]. Reloads and
/// replacements swap the whole `Arc`, so a reader sees either the old or the
/// new configuration, never a mix.
pub struct ConfigStore {
    repository: Arc<dyn ConfigRepository>,
    current: RwLock<Arc<Configuration>>,
}

impl ConfigStore {
    /// Loads the configuration from `repository` and persists the result.
    pub fn load(repository: Arc<dyn ConfigRepository>) -> (Self, LoadOutcome) {
        let outcome = read_config(repository.as_ref());
        let store = Self {
            repository,
            current: RwLock::new(Arc::new(outcome.config.clone())),
        };
        store.save(&outcome.config);
        (store, outcome)
    }

    /// Re-reads the repository and swaps in the result.
    pub fn reload(&self) -> LoadOutcome {
        let outcome = read_config(self.repository.as_ref());
        self.swap(outcome.config.clone());
        self.save(&outcome.config);
        outcome
    }

    /// Snapshot of the configuration in effect.
    pub fn current(&self) -> Arc<Configuration> {
        let current = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&current)
    }

    /// Makes `config` current and persists it.
    ///
    /// A configuration with a blank permission is rejected and the current
    /// one is kept.
    pub fn replace(&self, config: Configuration) -> Result<(), ConfigDiagnostic> {
        if !config.is_usable() {
            return Err(ConfigDiagnostic::Invalid("permission is empty".into()));
        }
        self.save(&config);
        self.swap(config);
        Ok(())
    }

    /// Persists `config`, logging failures instead of returning them.
    pub fn save(&self, config: &Configuration) {
        if let Err(e) = self.persist(config) {
            error!(
                target: "runtime::config",
                error = %e,
                "Failed to save configuration"
            );
        }
    }

    /// Persists `config` and reports failures to the caller.
    pub fn persist(&self, config: &Configuration) -> Result<(), RepositoryError> {
        let contents = serde_json::to_string_pretty(config)?;
        self.repository.write(&contents)
    }

    fn swap(&self, config: Configuration) {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *current = Arc::new(config);
    }
}

fn read_config(repository: &dyn ConfigRepository) -> LoadOutcome {
    let outcome = match repository.read() {
        Ok(Some(raw)) => parse_config(&raw),
        Ok(None) => LoadOutcome::fallback(ConfigDiagnostic::Missing),
        Err(e) => LoadOutcome::fallback(ConfigDiagnostic::Corrupt(e.to_string())),
    };

    match &outcome.diagnostic {
        None => info!(
            target: "runtime::config",
            permission = %outcome.config.permission,
            "Configuration loaded"
        ),
        Some(ConfigDiagnostic::Missing) => warn!(
            target: "runtime::config",
            "No configuration found, writing default configuration"
        ),
        Some(diagnostic) => error!(
            target: "runtime::config",
            error = %diagnostic,
            "Your configuration file contains an error. Using default configuration values."
        ),
    }

    outcome
}

fn parse_config(raw: &str) -> LoadOutcome {
    match serde_json::from_str::<Option<Configuration>>(raw) {
        Ok(Some(config)) if config.is_usable() => LoadOutcome::loaded(config),
        Ok(Some(_)) => {
            LoadOutcome::fallback(ConfigDiagnostic::Invalid("permission is empty".into()))
        }
        Ok(None) => {
            LoadOutcome::fallback(ConfigDiagnostic::Corrupt("configuration is null".into()))
        }
        Err(e) => LoadOutcome::fallback(ConfigDiagnostic::Corrupt(e.to_string())),
    }
}
