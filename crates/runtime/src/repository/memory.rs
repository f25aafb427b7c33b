//! In-memory ConfigRepository implementation for tests and embedded hosts.

use std::sync::RwLock;

use super::{ConfigRepository, RepositoryError, Result};

/// Keeps the configuration record in memory.
#[derive(Debug, Default)]
pub struct InMemoryConfigRepository {
    contents: RwLock<Option<String>>,
}

impl InMemoryConfigRepository {
    /// Create an empty repository (no record written yet).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository that already holds `contents`.
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: RwLock::new(Some(contents.into())),
        }
    }
}

impl ConfigRepository for InMemoryConfigRepository {
    fn read(&self) -> Result<Option<String>> {
        let contents = self
            .contents
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(contents.clone())
    }

    fn write(&self, contents: &str) -> Result<()> {
        let mut slot = self
            .contents
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        *slot = Some(contents.to_owned());
        Ok(())
    }
}
