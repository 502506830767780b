use std::{borrow::Cow, fmt};

use crate::{AugmentError, Context, Filter, Inspect, Property};

/// Identifier assigned to an augmenter when it is registered.
///
/// Ids grow with registration order, so comparing two ids tells which
/// augmenter was registered later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AugmenterId(u32);

impl AugmenterId {
    /// Placeholder carried by a pseudo-property until the introspector stamps it.
    pub(crate) const UNASSIGNED: AugmenterId = AugmenterId(u32::MAX);

    pub(crate) fn new(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for AugmenterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Contributes pseudo-properties for a subject.
///
/// Called once per introspection of every subject, with the subject's native
/// properties (already filtered) in `base`. Implementations must be
/// deterministic for the same inputs and must not keep per-subject state;
/// dumps and tests rely on repeatable output.
///
/// Returning an error, or panicking, drops this augmenter's whole
/// contribution for the call. The augmenter is still asked again next time.
pub trait Augmenter: Send + Sync {
    /// Name used in logs and fault records.
    fn name(&self) -> Cow<'static, str> {
        Cow::Borrowed(std::any::type_name::<Self>())
    }

    fn contribute(
        &self,
        subject: &dyn Inspect,
        ctx: &Context,
        filter: &Filter,
        base: &[Property],
    ) -> Result<Vec<Property>, AugmentError>;
}
