use std::fmt;

/// Stable identifier of whoever triggered an event or issued a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorId(pub u64);

impl ActorId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for ActorId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Host-side reference to an entity that was hit.
///
/// A `TargetRef` only names the entity. Whether it still exists is the
/// host's business: destroying a reference to an already-removed entity is
/// expected to be a no-op on the host side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetRef(pub u64);

impl TargetRef {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for TargetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity:{}", self.0)
    }
}

impl From<u64> for TargetRef {
    fn from(value: u64) -> Self {
        Self(value)
    }
}
