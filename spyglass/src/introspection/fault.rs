use std::{fmt, sync::Arc};

use crate::AugmenterId;

/// Something that went wrong for one property or one augmenter, without
/// stopping the introspection call.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Fault {
    /// The accessor of `property` failed; its value was replaced with
    /// [`Value::Unreadable`](crate::Value::Unreadable).
    PropertyRead { property: Arc<str>, reason: Arc<str> },
    /// The augmenter failed; none of its properties were applied.
    Augmenter {
        augmenter: AugmenterId,
        name: Arc<str>,
        reason: Arc<str>,
    },
}

impl Fault {
    pub fn reason(&self) -> &str {
        match self {
            Fault::PropertyRead { reason, .. } | Fault::Augmenter { reason, .. } => reason,
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fault::PropertyRead { property, reason } => {
                write!(f, "property '{property}' unreadable: {reason}")
            }
            Fault::Augmenter {
                augmenter,
                name,
                reason,
            } => write!(f, "augmenter '{name}' ({augmenter}) failed: {reason}"),
        }
    }
}
