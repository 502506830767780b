#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use spyglass::{Inspect, Property, augmenting::FnAugmenter};

/// Routes engine logs to the test output; safe to call from every test.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

#[derive(Inspect)]
pub struct Widget {
    pub name: String,
    pub count: u32,
}

impl Widget {
    pub fn new(name: &str, count: u32) -> Self {
        Self {
            name: name.to_string(),
            count,
        }
    }
}

/// `IsEmpty = (Count == 0)` for widgets.
pub fn emptiness() -> FnAugmenter<
    impl Fn(
        &dyn Inspect,
        &spyglass::Context,
        &spyglass::Filter,
        &[Property],
    ) -> Result<Vec<Property>, spyglass::AugmentError>
    + Send
    + Sync
    + 'static,
> {
    spyglass::augmenting::for_type::<Widget, _>("emptiness", |widget, _ctx, _base| {
        Ok(vec![Property::pseudo("IsEmpty", widget.count == 0)])
    })
}

/// A node of a possibly cyclic graph.
#[derive(Inspect)]
pub struct Node {
    pub name: String,
    pub next: Mutex<Option<Arc<Node>>>,
}

impl Node {
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            next: Mutex::new(None),
        })
    }

    pub fn point_to(&self, other: &Arc<Node>) {
        *self.next.lock().unwrap() = Some(other.clone());
    }

    /// Breaks the reference so the test doesn't leak the cycle.
    pub fn unlink(&self) {
        self.next.lock().unwrap().take();
    }
}
