/// Plugin configuration persisted by the host.
///
/// The persisted record has exactly one field, stored under the property
/// name `Permission`. A record that omits the field deserializes to the
/// default permission.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Configuration {
    /// Permission an actor must hold for hits to destroy entities.
    #[cfg_attr(feature = "serde", serde(rename = "Permission"))]
    pub permission: String,
}

impl Configuration {
    pub const DEFAULT_PERMISSION: &'static str = "destroy.use";

    pub fn new() -> Self {
        Self {
            permission: Self::DEFAULT_PERMISSION.to_owned(),
        }
    }

    pub fn with_permission(permission: impl Into<String>) -> Self {
        Self {
            permission: permission.into(),
        }
    }

    /// Returns true if the configuration can be used as-is.
    ///
    /// Only blankness is checked: an empty or whitespace-only permission is
    /// unusable, and any other permission string is accepted verbatim.
    pub fn is_usable(&self) -> bool {
        !self.permission.trim().is_empty()
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}
