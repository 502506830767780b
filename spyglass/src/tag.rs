use std::{borrow::Cow, collections::BTreeSet, fmt};

/// A label attached to a property, used to select it for a given view.
///
/// Tags play the role attributes play in a component model: a property grid
/// may show only `browsable` properties, an "expert" tab may add `advanced`
/// ones, and so on. Tags are compared by their exact text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Tag(Cow<'static, str>);

impl Tag {
    /// Shown in an ordinary property view. Derived properties carry it by default.
    pub const BROWSABLE: Tag = Tag::new("browsable");
    /// Only of interest to someone digging into internals.
    pub const ADVANCED: Tag = Tag::new("advanced");

    pub const fn new(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for Tag {
    fn from(name: &'static str) -> Self {
        Tag::new(name)
    }
}

impl From<String> for Tag {
    fn from(name: String) -> Self {
        Tag(Cow::Owned(name))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tag-based selector restricting which properties a view is interested in.
///
/// An empty filter lets every property through. A non-empty filter admits a
/// property when it carries at least one of the filter's tags. A filter
/// naming tags nobody uses is not an error; it just matches nothing.
///
/// ```rust
/// use spyglass::{Filter, Tag};
///
/// let grid = Filter::tags([Tag::BROWSABLE]);
/// assert!(grid.matches(&[Tag::BROWSABLE, Tag::ADVANCED]));
/// assert!(!grid.matches(&[Tag::ADVANCED]));
/// assert!(Filter::any().matches(&[]));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    tags: BTreeSet<Tag>,
}

impl Filter {
    /// A filter that lets every property through.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn tags<I, T>(tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Tag>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    /// Properties visible in an ordinary property grid.
    pub fn browsable() -> Self {
        Self::tags([Tag::BROWSABLE])
    }

    pub fn with_tag(mut self, tag: impl Into<Tag>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.tags.iter()
    }

    /// Whether a property carrying `tags` passes this filter.
    pub fn matches(&self, tags: &[Tag]) -> bool {
        self.is_empty() || tags.iter().any(|tag| self.tags.contains(tag))
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "*");
        }
        for (i, tag) in self.tags.iter().enumerate() {
            if i > 0 {
                write!(f, "|")?;
            }
            write!(f, "{tag}")?;
        }
        Ok(())
    }
}
