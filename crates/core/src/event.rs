//! Incoming hit events and the decisions the gate produces for them.

use crate::catalog::MessageKey;
use crate::types::{ActorId, TargetRef};

/// One hammer hit reported by the host.
///
/// Both fields are optional because the host contract is not trusted: an
/// event without an actor is ignored, and an event without a target is a
/// normal outcome that earns the actor a notification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionEvent {
    pub actor: Option<ActorId>,
    pub target: Option<TargetRef>,
}

impl ActionEvent {
    pub const fn new(actor: Option<ActorId>, target: Option<TargetRef>) -> Self {
        Self { actor, target }
    }

    /// Hit by `actor` on `target`.
    pub const fn hit(actor: ActorId, target: TargetRef) -> Self {
        Self::new(Some(actor), Some(target))
    }

    /// Hit by `actor` that carried no target.
    pub const fn without_target(actor: ActorId) -> Self {
        Self::new(Some(actor), None)
    }
}

/// Outcome of evaluating an [`ActionEvent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Decision {
    /// Nothing happens and nobody is told.
    Ignore,
    /// Nothing is destroyed; the actor receives the given message.
    NotifyOnly(MessageKey),
    /// The target is destroyed. Success is silent.
    Destroy(TargetRef),
}

impl Decision {
    #[inline]
    pub const fn is_ignore(&self) -> bool {
        matches!(self, Self::Ignore)
    }

    /// Returns the target to destroy, if any.
    pub const fn target(&self) -> Option<TargetRef> {
        match self {
            Self::Destroy(target) => Some(*target),
            Self::Ignore | Self::NotifyOnly(_) => None,
        }
    }

    /// Returns the message the actor should receive, if any.
    pub const fn notification(&self) -> Option<MessageKey> {
        match self {
            Self::NotifyOnly(key) => Some(*key),
            Self::Ignore | Self::Destroy(_) => None,
        }
    }
}
