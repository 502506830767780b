use std::{fmt, sync::Arc};

/// Request context handed to subjects and augmenters.
///
/// Tells them who is asking and from where:
/// - `view()`: the name of the property view making the request, if any
///   (a grid tab, an export, ...)
/// - `path()`: the dotted property path from the dump root to the current
///   subject; empty for a top-level request
///
/// Cheap to clone; descending into a child shares the parent's segments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    view: Option<Arc<str>>,
    path: Vec<Arc<str>>,
}

impl Context {
    /// Context for a top-level request with no particular view.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn with_view(mut self, view: impl Into<Arc<str>>) -> Self {
        self.view = Some(view.into());
        self
    }

    /// Context for the subject held by property `name` of the current subject.
    pub fn child(&self, name: impl Into<Arc<str>>) -> Self {
        let mut path = Vec::with_capacity(self.path.len() + 1);
        path.extend(self.path.iter().cloned());
        path.push(name.into());
        Self {
            view: self.view.clone(),
            path,
        }
    }

    #[inline]
    pub fn view(&self) -> Option<&str> {
        self.view.as_deref()
    }

    /// Dotted path of the current subject, e.g. `Engine.Pump`.
    pub fn path(&self) -> String {
        self.path.join(".")
    }

    /// How many properties deep the current subject is (0 for the root).
    #[inline]
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.view {
            Some(view) => write!(f, "{view}:{}", self.path()),
            None => write!(f, "{}", self.path()),
        }
    }
}
