use std::{borrow::Cow, fmt, sync::Arc};

use crate::{AugmenterId, Tag, ToValue, Value};

/// A property as declared by a subject: its name and tags, no value yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDescriptor {
    pub name: Cow<'static, str>,
    pub tags: Vec<Tag>,
}

impl PropertyDescriptor {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            tags: Vec::new(),
        }
    }

    pub fn with_tag(mut self, tag: impl Into<Tag>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Tag>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }
}

/// Where a property came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Origin {
    /// Declared by the subject itself.
    Native,
    /// Injected by the augmenter with this id.
    Pseudo(AugmenterId),
}

/// One entry of an introspected property set.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Property {
    name: Arc<str>,
    value: Value,
    tags: Vec<Tag>,
    origin: Origin,
}

impl Property {
    pub(crate) fn native(descriptor: PropertyDescriptor, value: Value) -> Self {
        Self {
            name: descriptor.name.into(),
            value,
            tags: descriptor.tags,
            origin: Origin::Native,
        }
    }

    /// A pseudo-property, as returned by an [`Augmenter`](crate::Augmenter).
    ///
    /// The introspector stamps the id of the augmenter that produced it.
    pub fn pseudo(name: impl Into<Arc<str>>, value: impl ToValue) -> Self {
        Self {
            name: name.into(),
            value: value.to_value(),
            tags: vec![Tag::BROWSABLE],
            origin: Origin::Pseudo(AugmenterId::UNASSIGNED),
        }
    }

    /// Replaces the default `browsable` tag of a pseudo-property.
    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Tag>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub(crate) fn stamped(mut self, id: AugmenterId) -> Self {
        self.origin = Origin::Pseudo(id);
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    #[inline]
    pub fn is_pseudo(&self) -> bool {
        matches!(self.origin, Origin::Pseudo(_))
    }

    /// The augmenter that contributed this property, if any.
    pub fn augmenter(&self) -> Option<AugmenterId> {
        match self.origin {
            Origin::Pseudo(id) => Some(id),
            Origin::Native => None,
        }
    }

    pub(crate) fn shared_name(&self) -> Arc<str> {
        self.name.clone()
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.name, self.value)
    }
}
