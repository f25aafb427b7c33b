//! Decision function for hammer hits.

use crate::catalog::MessageKey;
use crate::env::PermissionOracle;
use crate::event::{ActionEvent, Decision};
use crate::toggle::ToggleRegistry;

/// Combines the permission oracle, the toggle registry and the configured
/// permission into a [`Decision`] for each hit.
///
/// The gate borrows its collaborators and holds no state, so evaluating the
/// same event against the same permission and toggle state always yields the
/// same decision.
///
/// # Evaluation order
///
/// ```text
/// no actor               → Ignore
/// actor lacks permission → Ignore
/// toggle is off          → Ignore
/// no target              → NotifyOnly(EntityIsNull)
/// otherwise              → Destroy(target)
/// ```
///
/// Permission is checked before the toggle so a switched-off actor learns
/// nothing about their grants.
#[derive(Clone, Copy)]
pub struct ActionGate<'a> {
    permissions: &'a dyn PermissionOracle,
    toggles: &'a ToggleRegistry,
    permission: &'a str,
}

impl<'a> ActionGate<'a> {
    pub fn new(
        permissions: &'a dyn PermissionOracle,
        toggles: &'a ToggleRegistry,
        permission: &'a str,
    ) -> Self {
        Self {
            permissions,
            toggles,
            permission,
        }
    }

    /// The permission this gate checks.
    pub fn permission(&self) -> &str {
        self.permission
    }

    pub fn evaluate(&self, event: &ActionEvent) -> Decision {
        let Some(actor) = event.actor else {
            return Decision::Ignore;
        };

        if !self.permissions.has_permission(actor, self.permission) {
            return Decision::Ignore;
        }

        if !self.toggles.is_enabled(actor) {
            return Decision::Ignore;
        }

        match event.target {
            Some(target) => Decision::Destroy(target),
            None => Decision::NotifyOnly(MessageKey::EntityIsNull),
        }
    }
}
