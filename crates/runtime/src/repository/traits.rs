//! Repository contract for the configuration record.

use super::Result;

/// Reads and writes the serialized configuration record.
///
/// There is exactly one record per repository. `read` distinguishes a record
/// that was never written (`Ok(None)`) from one that exists but could not be
/// read (`Err`).
pub trait ConfigRepository: Send + Sync {
    /// Load the raw record, if one has been written.
    fn read(&self) -> Result<Option<String>>;

    /// Replace the raw record.
    fn write(&self, contents: &str) -> Result<()>;
}
