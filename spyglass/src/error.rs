use std::sync::Arc;

/// Errors that escape an introspection or dump call.
///
/// Faults confined to a single property or a single augmenter never show up
/// here; they are recovered locally and recorded as [`Fault`](crate::Fault)s
/// on the resulting [`PropertySet`](crate::PropertySet).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Subject '{subject}' cannot be inspected: {reason}")]
    SubjectUnusable { subject: Arc<str>, reason: Arc<str> },

    #[error("Augmenter registry is sealed, '{0}' was not registered.")]
    RegistrySealed(Arc<str>),

    #[error("Couldn't write to the dump output: {0}")]
    Format(#[from] std::fmt::Error),

    #[cfg(feature = "serde")]
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn unusable(subject: impl Into<Arc<str>>, reason: impl Into<Arc<str>>) -> Self {
        Error::SubjectUnusable {
            subject: subject.into(),
            reason: reason.into(),
        }
    }
}

/// A single property accessor failed.
///
/// Returned by [`Inspect::read`](crate::Inspect::read). The introspector
/// replaces the value with [`Value::Unreadable`](crate::Value::Unreadable)
/// and carries on with the remaining properties.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{reason}")]
pub struct ReadFault {
    reason: Arc<str>,
}

impl ReadFault {
    pub fn new(reason: impl Into<Arc<str>>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// The property has no such name on this subject.
    pub fn unknown(name: &str) -> Self {
        Self::new(format!("no property named '{name}'"))
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// An augmenter could not produce its contribution for a subject.
///
/// The whole contribution of that augmenter is dropped for the call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct AugmentError(Arc<str>);

impl AugmentError {
    pub fn new(reason: impl Into<Arc<str>>) -> Self {
        Self(reason.into())
    }

    pub fn reason(&self) -> &str {
        &self.0
    }
}

impl From<ReadFault> for AugmentError {
    fn from(fault: ReadFault) -> Self {
        AugmentError(fault.reason)
    }
}
