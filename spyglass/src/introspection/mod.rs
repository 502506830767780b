//! Building the property set of a live subject.
//!
//! # Overview
//!
//! The [`Introspector`] asks a subject for its native properties, lets every
//! registered [`Augmenter`](crate::Augmenter) add pseudo-properties, and
//! returns a [`PropertySet`]:
//! - unique property names, sorted by ordinal comparison
//! - pseudo-properties override native ones, later augmenters override earlier
//! - failed reads and failed augmenters recorded as [`Fault`]s, never fatal
//!
//! The property set is what a property grid binds its rows to. For a
//! textual rendering see [`Dumper`](crate::Dumper).

mod fault;
mod introspector;
mod property_set;

pub use fault::Fault;
pub use introspector::Introspector;
pub use property_set::PropertySet;
