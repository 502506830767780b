use std::{collections::HashSet, sync::Arc};

use crate::{Inspect, ObjectId};

/// State of one top-level dump call.
///
/// Created fresh by every [`Dumper::dump`](crate::Dumper::dump) and dropped
/// when it returns, so concurrent dumps never share it.
pub(crate) struct DumpContext {
    level: usize,
    visited: HashSet<ObjectId>,
    // Keeps nested objects alive until the dump ends, so an id is never
    // reused by a fresh allocation while it sits in `visited`.
    retained: Vec<Arc<dyn Inspect>>,
    lines: usize,
}

impl DumpContext {
    pub fn new(level: usize) -> Self {
        Self {
            level,
            visited: HashSet::new(),
            retained: Vec::new(),
            lines: 0,
        }
    }

    #[inline]
    pub fn level(&self) -> usize {
        self.level
    }

    /// Marks `subject` as shown. Returns `false` if it already was.
    pub fn visit(&mut self, subject: &dyn Inspect) -> bool {
        self.visited.insert(ObjectId::of(subject))
    }

    /// Like [`visit`](DumpContext::visit) for a nested object reached through
    /// a property value.
    pub fn visit_shared(&mut self, object: &Arc<dyn Inspect>) -> bool {
        let first = self.visit(object.as_ref());
        if first {
            self.retained.push(Arc::clone(object));
        }
        first
    }

    pub fn descend(&mut self) {
        self.level += 1;
    }

    pub fn ascend(&mut self) {
        self.level -= 1;
    }

    pub fn line_written(&mut self) {
        self.lines += 1;
    }

    pub fn lines(&self) -> usize {
        self.lines
    }

    pub fn objects(&self) -> usize {
        self.visited.len()
    }
}
