use std::{
    fmt,
    ops::Deref,
    sync::{
        Arc, PoisonError, RwLock,
        atomic::{AtomicBool, Ordering},
    },
};

use crate::{Augmenter, AugmenterId, Error, Result};

/// A registered augmenter together with its id and name.
#[derive(Clone)]
pub struct Registration {
    id: AugmenterId,
    name: Arc<str>,
    augmenter: Arc<dyn Augmenter>,
}

impl Registration {
    #[inline]
    pub fn id(&self) -> AugmenterId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn augmenter(&self) -> &dyn Augmenter {
        self.augmenter.as_ref()
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish()
    }
}

/// Immutable, ordered view of the registry at one point in time.
///
/// Iterates in registration order. Registrations made after the snapshot
/// was taken are not part of it.
#[derive(Debug, Clone)]
pub struct Snapshot(Arc<[Registration]>);

impl Deref for Snapshot {
    type Target = [Registration];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Ordered, append-only list of augmenters.
///
/// Augmenters are registered during start-up (or plugin load). Readers work
/// on a [`Snapshot`]; registering swaps in a new list rather than mutating
/// the one readers may be iterating, so a late registration never disturbs
/// a call in flight. It is only picked up by calls that start afterwards.
///
/// Once [`seal`](AugmenterRegistry::seal)ed, the registration phase is over
/// and further registrations are rejected.
pub struct AugmenterRegistry {
    entries: RwLock<Arc<[Registration]>>,
    sealed: AtomicBool,
}

impl AugmenterRegistry {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Arc::from(Vec::<Registration>::new())),
            sealed: AtomicBool::new(false),
        }
    }

    /// Appends an augmenter and returns its id.
    ///
    /// Later registrations take precedence over earlier ones when they
    /// produce properties with the same name.
    pub fn register<A: Augmenter + 'static>(&self, augmenter: A) -> Result<AugmenterId> {
        let name: Arc<str> = augmenter.name().into();
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        // Checked under the write lock; `seal` takes the same lock.
        if self.is_sealed() {
            return Err(Error::RegistrySealed(name));
        }

        let id = AugmenterId::new(entries.len() as u32);
        let mut next = Vec::with_capacity(entries.len() + 1);
        next.extend(entries.iter().cloned());
        next.push(Registration {
            id,
            name: name.clone(),
            augmenter: Arc::new(augmenter),
        });
        *entries = Arc::from(next);

        tracing::debug!(augmenter = %name, id = %id, "Augmenter registered");
        Ok(id)
    }

    /// Ends the registration phase.
    ///
    /// Once this returns, no registration can land any more, including one
    /// that was already in progress on another thread.
    pub fn seal(&self) {
        let entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        self.sealed.store(true, Ordering::Release);
        let augmenters = entries.len();
        drop(entries);
        tracing::debug!(augmenters, "Augmenter registry sealed");
    }

    #[inline]
    pub fn is_sealed(&self) -> bool {
        self.sealed.load(Ordering::Acquire)
    }

    /// Current augmenters, in registration order.
    pub fn snapshot(&self) -> Snapshot {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Snapshot(entries.clone())
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for AugmenterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AugmenterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AugmenterRegistry")
            .field("entries", &self.snapshot())
            .field("sealed", &self.is_sealed())
            .finish()
    }
}
