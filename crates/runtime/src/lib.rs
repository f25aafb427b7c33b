//! Runtime wiring for the destroy toggle.
//!
//! This crate turns the pure pieces of `destroy-core` into a service a host
//! can embed. [`DestroyPlugin`] owns the configuration store, the toggle
//! registry and the message catalog, holds the injected host collaborators,
//! and exposes the host-facing entry points (chat command, hammer hit,
//! configuration reload).
//!
//! Modules are organized by responsibility:
//! - [`plugin`] hosts the service and its builder
//! - [`config_store`] keeps the persisted configuration fail-safe
//! - [`repository`] provides the storage backends for the configuration record
//! - [`config`] resolves where the configuration lives from the environment
pub mod config;
pub mod config_store;
pub mod error;
pub mod plugin;
pub mod repository;

pub use config::RuntimeConfig;
pub use config_store::{ConfigDiagnostic, ConfigStore, LoadOutcome};
pub use error::{PluginError, Result};
pub use plugin::{CommandOutcome, DestroyPlugin, DestroyPluginBuilder, TOGGLE_COMMAND};
pub use repository::{
    ConfigRepository, FileConfigRepository, InMemoryConfigRepository, RepositoryError,
};
