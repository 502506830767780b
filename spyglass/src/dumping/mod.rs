//! Indented textual dumps of live object graphs.
//!
//! A dump lists every introspected property of a subject as
//! `name = value`, one per line, in property-set order. Properties holding
//! another inspectable object print the object's type label and continue
//! with that object's properties one level deeper.
//!
//! ```text
//! Count = 5
//! Engine = Engine
//! 	Owner = ‹cycle: reference already shown›
//! 	Rpm = 900
//! Name = Widget
//! ```
//!
//! Each object is expanded at most once per dump; any further reference to
//! it prints the cycle marker. This bounds the output by the number of
//! distinct objects, even for self-referencing graphs.

mod dump_context;
mod dumper;

pub(crate) use dump_context::DumpContext;
pub use dumper::Dumper;
