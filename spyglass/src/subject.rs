use std::{any::Any, borrow::Cow, fmt};

use crate::{Context, PropertyDescriptor, ReadFault, Value, internal::guarded};

/// A live object that can be browsed property by property.
///
/// This is the capability set every inspected object exposes: it can list
/// its properties ([`describe`](Inspect::describe)) and read the value of any
/// of them by name ([`read`](Inspect::read)). The engine never owns a
/// subject; it only borrows it for the duration of one call.
///
/// Implement it by hand or with `#[derive(Inspect)]` (the `macros` feature,
/// enabled by default).
///
/// # Example
///
/// ```rust
/// use spyglass::{Context, Inspect, PropertyDescriptor, ReadFault, Tag, ToValue, Value};
///
/// struct Gauge {
///     level: u32,
/// }
///
/// impl Inspect for Gauge {
///     fn describe(&self, _ctx: &Context) -> Result<Vec<PropertyDescriptor>, ReadFault> {
///         Ok(vec![PropertyDescriptor::new("Level").with_tag(Tag::BROWSABLE)])
///     }
///
///     fn read(&self, name: &str, _ctx: &Context) -> Result<Value, ReadFault> {
///         match name {
///             "Level" => Ok(self.level.to_value()),
///             _ => Err(ReadFault::unknown(name)),
///         }
///     }
/// }
/// ```
pub trait Inspect: Any + Send + Sync + 'static {
    /// Human-readable name of the subject's type.
    ///
    /// Shown as the value of a property that holds this subject. The default
    /// returns the full type path via `std::any::type_name`.
    fn type_label(&self) -> Cow<'static, str> {
        Cow::Borrowed(std::any::type_name::<Self>())
    }

    /// Lists the native properties of this subject.
    ///
    /// An `Err` means the subject as a whole cannot be inspected; it is
    /// reported to the caller as [`Error::SubjectUnusable`](crate::Error::SubjectUnusable).
    fn describe(&self, ctx: &Context) -> Result<Vec<PropertyDescriptor>, ReadFault>;

    /// Reads a single property by name.
    ///
    /// A failure here only affects that one property.
    fn read(&self, name: &str, ctx: &Context) -> Result<Value, ReadFault>;
}

/// Returns the subject as its concrete type, if it is a `T`.
///
/// Lets an augmenter targeted at one type get at fields that are not exposed
/// as properties.
pub fn downcast_ref<T: Inspect>(subject: &dyn Inspect) -> Option<&T> {
    let any: &dyn Any = subject;
    any.downcast_ref::<T>()
}

/// The subject's type label, or a marker when producing it panicked.
///
/// Used wherever the engine needs a label for its own logs and errors.
pub(crate) fn label_of(subject: &dyn Inspect) -> Cow<'static, str> {
    guarded(|| subject.type_label())
        .unwrap_or_else(|panic| Cow::Owned(format!("‹label unavailable: {panic}›")))
}

/// Identity of a live object, used to detect cycles while dumping.
///
/// Two references have the same id when they point at the same object in
/// memory. An id is only meaningful while the object is alive, which holds
/// for the whole duration of a dump since the graph is borrowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(usize);

impl ObjectId {
    pub fn of(subject: &dyn Inspect) -> Self {
        Self(subject as *const dyn Inspect as *const () as usize)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    struct Empty;

    impl Inspect for Empty {
        fn describe(&self, _ctx: &Context) -> Result<Vec<PropertyDescriptor>, ReadFault> {
            Ok(Vec::new())
        }

        fn read(&self, name: &str, _ctx: &Context) -> Result<Value, ReadFault> {
            Err(ReadFault::unknown(name))
        }
    }

    struct Other(#[allow(dead_code)] u8);

    impl Inspect for Other {
        fn type_label(&self) -> Cow<'static, str> {
            Cow::Borrowed("Other")
        }

        fn describe(&self, _ctx: &Context) -> Result<Vec<PropertyDescriptor>, ReadFault> {
            Ok(Vec::new())
        }

        fn read(&self, name: &str, _ctx: &Context) -> Result<Value, ReadFault> {
            Err(ReadFault::unknown(name))
        }
    }

    #[test]
    fn default_type_label_is_type_path() {
        assert!(Empty.type_label().ends_with("Empty"));
        assert_eq!(Other(1).type_label(), "Other");
    }

    #[test]
    fn downcast_to_matching_type_only() {
        let subject: &dyn Inspect = &Other(3);
        assert!(downcast_ref::<Other>(subject).is_some());
        assert!(downcast_ref::<Empty>(subject).is_none());
    }

    #[test]
    fn object_id_follows_the_allocation() {
        let a: Arc<dyn Inspect> = Arc::new(Other(1));
        let b: Arc<dyn Inspect> = Arc::new(Other(1));
        let a2 = a.clone();
        assert_eq!(ObjectId::of(a.as_ref()), ObjectId::of(a2.as_ref()));
        assert_ne!(ObjectId::of(a.as_ref()), ObjectId::of(b.as_ref()));
    }
}
