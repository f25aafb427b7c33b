//! Errors surfaced while assembling the plugin.
//!
//! Only construction can fail. Once built, every host-facing operation is
//! total and absorbs collaborator failures at the boundary.
use destroy_core::CatalogError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PluginError>;

#[derive(Debug, Error)]
pub enum PluginError {
    #[error("plugin requires a {name} before building")]
    MissingCollaborator { name: &'static str },

    #[error("message catalog is incomplete")]
    Catalog(#[from] CatalogError),
}
