//! Authorization-gated destroy toggle: ids, decisions and the pure gate logic.
//!
//! `destroy-core` decides, per actor, whether a hammer hit should destroy the
//! hit entity. The decision combines a standing permission grant answered by
//! the host ([`env::PermissionOracle`]) with a volatile per-actor opt-in kept
//! in [`ToggleRegistry`]. Everything that touches the outside world (storage,
//! chat delivery, entity removal) is reached through the traits in [`env`],
//! so the crate has no dependency on any concrete host.
//!
//! Modules are organized leaf-first:
//! - [`types`] and [`event`] define ids, incoming events and decisions
//! - [`config`] holds the single persisted configuration value
//! - [`toggle`] owns the opt-in set
//! - [`gate`] evaluates events into decisions
//! - [`catalog`] resolves notification keys into templates
pub mod catalog;
pub mod config;
pub mod env;
pub mod error;
pub mod event;
pub mod gate;
pub mod toggle;
pub mod types;

pub use catalog::{MessageCatalog, MessageKey};
pub use config::Configuration;
pub use env::{EntityDestroyer, MessageSink, PermissionOracle};
pub use error::CatalogError;
pub use event::{ActionEvent, Decision};
pub use gate::ActionGate;
pub use toggle::ToggleRegistry;
pub use types::{ActorId, TargetRef};
