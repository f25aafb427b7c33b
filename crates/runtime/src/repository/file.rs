//! File-based ConfigRepository implementation.

use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{ConfigRepository, RepositoryError, Result};

/// Stores the configuration record as a single JSON file.
///
/// Writes go to `<file>.tmp` first and are renamed over the target, so a
/// crash mid-write never leaves a truncated record behind.
#[derive(Clone, Debug)]
pub struct FileConfigRepository {
    path: PathBuf,
}

impl FileConfigRepository {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl ConfigRepository for FileConfigRepository {
    fn read(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                tracing::debug!("Loaded config from {}", self.path.display());
                Ok(Some(contents))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(RepositoryError::Io(e)),
        }
    }

    fn write(&self, contents: &str) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let temp_path = self.temp_path();
        fs::write(&temp_path, contents)?;

        // Atomic rename
        fs::rename(&temp_path, &self.path)?;

        tracing::debug!("Saved config to {}", self.path.display());

        Ok(())
    }
}
