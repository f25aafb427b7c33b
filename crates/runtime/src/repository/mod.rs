//! Storage backends for the persisted configuration record.
//!
//! The record is opaque text to the repositories; parsing and validation
//! live in [`crate::config_store`].

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileConfigRepository;
pub use memory::InMemoryConfigRepository;
pub use traits::ConfigRepository;
