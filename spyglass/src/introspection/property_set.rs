use std::slice;

use crate::{Fault, Property};

/// The result of introspecting one subject.
///
/// Properties are unique by name and sorted by ordinal (byte-wise)
/// comparison of their names, whatever order the subject and augmenters
/// produced them in. The set also carries the faults recovered while
/// building it.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PropertySet {
    properties: Vec<Property>,
    faults: Vec<Fault>,
}

impl PropertySet {
    /// Properties must already be sorted and unique by name.
    pub(crate) fn new(properties: Vec<Property>, faults: Vec<Fault>) -> Self {
        debug_assert!(properties.windows(2).all(|w| w[0].name() < w[1].name()));
        Self { properties, faults }
    }

    pub fn iter(&self) -> slice::Iter<'_, Property> {
        self.properties.iter()
    }

    pub fn as_slice(&self) -> &[Property] {
        &self.properties
    }

    pub fn get(&self, name: &str) -> Option<&Property> {
        self.properties
            .binary_search_by(|p| p.name().cmp(name))
            .ok()
            .map(|i| &self.properties[i])
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(Property::name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Faults recovered during introspection, in the order they occurred.
    pub fn faults(&self) -> &[Fault] {
        &self.faults
    }

    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl<'a> IntoIterator for &'a PropertySet {
    type Item = &'a Property;
    type IntoIter = slice::Iter<'a, Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.properties.iter()
    }
}

impl IntoIterator for PropertySet {
    type Item = Property;
    type IntoIter = std::vec::IntoIter<Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.properties.into_iter()
    }
}
