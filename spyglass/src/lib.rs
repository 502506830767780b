//! Spyglass - live property introspection
//!
//! Browse the state of a running application object by object: list each
//! object's properties, enrich them with computed pseudo-properties from
//! pluggable augmenters, and render the result as an ordered property set
//! (for a property grid) or as an indented, cycle-safe text dump.
//!
//! - [`Inspect`]: implemented by every inspectable object, by hand or with
//!   `#[derive(Inspect)]`
//! - [`Augmenter`] / [`AugmenterRegistry`]: pseudo-property contributors,
//!   registered once at start-up
//! - [`Introspector`]: merges native and pseudo-properties into a sorted
//!   [`PropertySet`]
//! - [`Dumper`]: writes `name = value` lines, recursing into nested objects
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use spyglass::{AugmenterRegistry, Dumper, Inspect, Introspector, Property, augmenting};
//!
//! #[derive(Inspect)]
//! struct Widget {
//!     name: String,
//!     count: u32,
//! }
//!
//! let registry = Arc::new(AugmenterRegistry::new());
//! registry.register(augmenting::for_type::<Widget, _>("emptiness", |w, _ctx, _base| {
//!     Ok(vec![Property::pseudo("IsEmpty", w.count == 0)])
//! }))?;
//! registry.seal();
//!
//! let dumper = Dumper::new(Introspector::new(registry));
//! let text = dumper.dump_string(&Widget { name: "Widget".into(), count: 5 })?;
//! assert_eq!(text, "Count = 5\nIsEmpty = false\nName = Widget\n");
//! # Ok::<(), spyglass::Error>(())
//! ```

mod config;
mod context;
mod error;
mod property;
mod subject;
mod tag;
mod value;

mod internal;

pub mod augmenting;
pub mod dumping;
pub mod introspection;

pub use augmenting::{Augmenter, AugmenterId, AugmenterRegistry};
pub use config::Config;
pub use context::Context;
pub use dumping::Dumper;
pub use error::{AugmentError, Error, ReadFault};
pub use introspection::{Fault, Introspector, PropertySet};
pub use property::{Origin, Property, PropertyDescriptor};
pub use subject::{Inspect, ObjectId, downcast_ref};
pub use tag::{Filter, Tag};
pub use value::{CYCLE_MARKER, NULL_MARKER, ToValue, Value};

#[cfg(feature = "macros")]
pub use spyglass_macros::Inspect;

pub type Result<T = ()> = std::result::Result<T, Error>;
