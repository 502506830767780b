//! Pluggable pseudo-property contributors.
//!
//! An [`Augmenter`] looks at a subject and its native properties and adds
//! properties the subject's type does not declare: derived figures, status
//! summaries, values only reachable through other APIs, and so on.
//!
//! Augmenters are registered once, in order, with an [`AugmenterRegistry`].
//! When two augmenters produce a property with the same name, the one
//! registered later wins.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use spyglass::{AugmenterRegistry, Introspector, Property, augmenting};
//!
//! # #[derive(spyglass::Inspect)]
//! # struct Widget { count: u32 }
//! let registry = Arc::new(AugmenterRegistry::new());
//! registry.register(augmenting::for_type::<Widget, _>("emptiness", |w, _ctx, _base| {
//!     Ok(vec![Property::pseudo("IsEmpty", w.count == 0)])
//! }))?;
//! let introspector = Introspector::new(registry);
//! # Ok::<(), spyglass::Error>(())
//! ```

mod augmenter;
mod fn_augmenter;
mod registry;

pub use augmenter::{Augmenter, AugmenterId};
pub use fn_augmenter::{FnAugmenter, for_type, from_fn};
pub use registry::{AugmenterRegistry, Registration, Snapshot};
