//! Error types raised by the core.

/// Errors from [`crate::MessageCatalog`] lookups.
///
/// A missing key is a programmer error: startup registration is expected to
/// cover every [`crate::MessageKey`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("message key '{0}' is not registered")]
    MissingKey(String),
}
