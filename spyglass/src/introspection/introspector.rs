use std::{
    collections::{BTreeMap, HashSet},
    sync::Arc,
};

use crate::{
    AugmentError, AugmenterRegistry, Context, Error, Fault, Filter, Inspect, Property,
    PropertySet, ReadFault, Result, Value, augmenting::Registration, internal::guarded,
    subject::label_of,
};

/// Builds the property set of a live subject.
///
/// Combines the subject's native properties with the pseudo-properties of
/// every registered augmenter:
/// 1. native properties are listed and those passing the filter are read;
/// 2. each augmenter, in registration order, sees those native properties
///    and may contribute more;
/// 3. a pseudo-property replaces a native one of the same name, and a later
///    augmenter replaces an earlier one;
/// 4. the result is sorted by name.
///
/// A failing accessor turns into an [`Unreadable`](Value::Unreadable) value
/// and a failing augmenter contributes nothing; both are recorded as
/// [`Fault`]s on the result. Only a subject that cannot describe itself at
/// all fails the call, with [`Error::SubjectUnusable`].
///
/// Cheap to clone; clones share the registry.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use spyglass::{AugmenterRegistry, Context, Filter, Inspect, Introspector};
///
/// #[derive(Inspect)]
/// struct Widget {
///     name: String,
///     count: u32,
/// }
///
/// let introspector = Introspector::new(Arc::new(AugmenterRegistry::new()));
/// let widget = Widget { name: "Widget".into(), count: 5 };
/// let props = introspector.introspect(&widget, &Context::root(), &Filter::any())?;
/// assert_eq!(props.names().collect::<Vec<_>>(), ["Count", "Name"]);
/// # Ok::<(), spyglass::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Introspector {
    registry: Arc<AugmenterRegistry>,
}

impl Introspector {
    pub fn new(registry: Arc<AugmenterRegistry>) -> Self {
        Self { registry }
    }

    /// Introspector that only reports native properties.
    pub fn native_only() -> Self {
        Self::new(Arc::new(AugmenterRegistry::new()))
    }

    pub fn registry(&self) -> &AugmenterRegistry {
        &self.registry
    }

    pub fn introspect(
        &self,
        subject: &dyn Inspect,
        ctx: &Context,
        filter: &Filter,
    ) -> Result<PropertySet> {
        let mut faults = Vec::new();
        let base = self.native_properties(subject, ctx, filter, &mut faults)?;

        let mut merged: BTreeMap<Arc<str>, Property> = base
            .iter()
            .map(|p| (p.shared_name(), p.clone()))
            .collect();

        for registration in self.registry.snapshot().iter() {
            let contribution =
                self.contribution(registration, subject, ctx, filter, &base, &mut faults);
            for prop in contribution.into_iter().flatten() {
                merged.insert(prop.shared_name(), prop);
            }
        }

        tracing::trace!(
            subject = %label_of(subject),
            path = %ctx,
            native = base.len(),
            total = merged.len(),
            faults = faults.len(),
            "Subject introspected"
        );

        Ok(PropertySet::new(merged.into_values().collect(), faults))
    }

    fn native_properties(
        &self,
        subject: &dyn Inspect,
        ctx: &Context,
        filter: &Filter,
        faults: &mut Vec<Fault>,
    ) -> Result<Vec<Property>> {
        let descriptors = match guarded(|| subject.describe(ctx)) {
            Ok(Ok(descriptors)) => descriptors,
            Ok(Err(fault)) => return Err(Error::unusable(label_of(subject), fault.reason())),
            Err(panic) => return Err(Error::unusable(label_of(subject), panic)),
        };

        let mut seen = HashSet::with_capacity(descriptors.len());
        let mut props = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            if !filter.matches(&descriptor.tags) {
                continue;
            }
            if !seen.insert(descriptor.name.clone()) {
                tracing::warn!(
                    subject = %label_of(subject),
                    property = %descriptor.name,
                    "Duplicate native property ignored"
                );
                continue;
            }

            let read = guarded(|| subject.read(&descriptor.name, ctx))
                .unwrap_or_else(|panic| Err(ReadFault::new(panic)));
            let value = match read {
                Ok(value) => value,
                Err(fault) => {
                    tracing::warn!(
                        subject = %label_of(subject),
                        property = %descriptor.name,
                        reason = %fault,
                        "Property read failed"
                    );
                    faults.push(Fault::PropertyRead {
                        property: descriptor.name.clone().into(),
                        reason: fault.reason().into(),
                    });
                    Value::Unreadable(fault)
                }
            };
            props.push(Property::native(descriptor, value));
        }
        Ok(props)
    }

    /// Runs one augmenter; `None` when it failed and must be skipped entirely.
    fn contribution(
        &self,
        registration: &Registration,
        subject: &dyn Inspect,
        ctx: &Context,
        filter: &Filter,
        base: &[Property],
        faults: &mut Vec<Fault>,
    ) -> Option<Vec<Property>> {
        let result = guarded(|| registration.augmenter().contribute(subject, ctx, filter, base))
            .unwrap_or_else(|panic| Err(AugmentError::new(panic)));

        match result {
            Ok(props) => Some(
                props
                    .into_iter()
                    .map(|p| p.stamped(registration.id()))
                    .collect(),
            ),
            Err(err) => {
                tracing::warn!(
                    augmenter = %registration.name(),
                    id = %registration.id(),
                    subject = %label_of(subject),
                    reason = %err,
                    "Augmenter failed, contribution dropped"
                );
                faults.push(Fault::Augmenter {
                    augmenter: registration.id(),
                    name: registration.name().into(),
                    reason: err.reason().into(),
                });
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::*;
    use crate::{Augmenter, PropertyDescriptor, Tag, augmenting};

    /// Subject with a fixed list of (name, tags, value) rows; `None` fails the read.
    struct Table {
        rows: Vec<(&'static str, Vec<Tag>, Option<Value>)>,
    }

    impl Inspect for Table {
        fn type_label(&self) -> Cow<'static, str> {
            Cow::Borrowed("Table")
        }

        fn describe(&self, _ctx: &Context) -> std::result::Result<Vec<PropertyDescriptor>, ReadFault> {
            Ok(self
                .rows
                .iter()
                .map(|(name, tags, _)| PropertyDescriptor::new(*name).with_tags(tags.clone()))
                .collect())
        }

        fn read(&self, name: &str, _ctx: &Context) -> std::result::Result<Value, ReadFault> {
            self.rows
                .iter()
                .find(|(n, _, _)| *n == name)
                .and_then(|(_, _, v)| v.clone())
                .ok_or_else(|| ReadFault::new("sensor offline"))
        }
    }

    fn row(name: &'static str, value: Option<Value>) -> (&'static str, Vec<Tag>, Option<Value>) {
        (name, vec![Tag::BROWSABLE], value)
    }

    fn constant(name: &'static str, prop: &'static str, value: i64) -> impl Augmenter {
        augmenting::from_fn(
            name,
            move |_s: &dyn Inspect, _c: &Context, _f: &Filter, _b: &[Property]| {
                Ok(vec![Property::pseudo(prop, value)])
            },
        )
    }

    fn introspect(registry: AugmenterRegistry, subject: &dyn Inspect) -> PropertySet {
        Introspector::new(Arc::new(registry))
            .introspect(subject, &Context::root(), &Filter::any())
            .unwrap()
    }

    #[test]
    fn native_properties_are_sorted_ordinally() {
        let table = Table {
            rows: vec![
                row("beta", Some(Value::Int(2))),
                row("Alpha", Some(Value::Int(1))),
                row("alpha", Some(Value::Int(3))),
            ],
        };
        let props = introspect(AugmenterRegistry::new(), &table);
        assert_eq!(props.names().collect::<Vec<_>>(), ["Alpha", "alpha", "beta"]);
        assert!(props.iter().all(|p| !p.is_pseudo()));
    }

    #[test]
    fn pseudo_property_overrides_native_one() {
        let registry = AugmenterRegistry::new();
        let id = registry.register(constant("override", "Count", 99)).unwrap();
        let table = Table {
            rows: vec![row("Count", Some(Value::Int(5)))],
        };

        let props = introspect(registry, &table);
        assert_eq!(props.len(), 1);
        let count = props.get("Count").unwrap();
        assert!(count.is_pseudo());
        assert_eq!(count.augmenter(), Some(id));
        assert_eq!(count.value(), &Value::Int(99));
    }

    #[test]
    fn later_augmenter_wins_on_collision() {
        let registry = AugmenterRegistry::new();
        registry.register(constant("first", "X", 1)).unwrap();
        let second = registry.register(constant("second", "X", 2)).unwrap();

        let props = introspect(registry, &Table { rows: vec![] });
        let x = props.get("X").unwrap();
        assert_eq!(x.value(), &Value::Int(2));
        assert_eq!(x.augmenter(), Some(second));
    }

    #[test]
    fn duplicate_within_one_contribution_keeps_last() {
        let registry = AugmenterRegistry::new();
        registry
            .register(augmenting::from_fn(
                "twice",
                |_s: &dyn Inspect, _c: &Context, _f: &Filter, _b: &[Property]| {
                    Ok(vec![Property::pseudo("X", 1), Property::pseudo("X", 2)])
                },
            ))
            .unwrap();

        let props = introspect(registry, &Table { rows: vec![] });
        assert_eq!(props.len(), 1);
        assert_eq!(props.get("X").unwrap().value(), &Value::Int(2));
    }

    #[test]
    fn failed_read_yields_sentinel_and_fault() {
        let table = Table {
            rows: vec![row("A", Some(Value::Int(1))), row("B", None), row("C", Some(Value::Int(3)))],
        };
        let props = introspect(AugmenterRegistry::new(), &table);

        assert_eq!(props.len(), 3);
        assert!(props.get("B").unwrap().value().is_unreadable());
        assert_eq!(props.get("C").unwrap().value(), &Value::Int(3));
        assert_eq!(
            props.faults(),
            [Fault::PropertyRead {
                property: "B".into(),
                reason: "sensor offline".into(),
            }]
        );
    }

    #[test]
    fn failing_augmenter_contributes_nothing() {
        let registry = AugmenterRegistry::new();
        registry.register(constant("ok", "Good", 1)).unwrap();
        let bad = registry
            .register(augmenting::from_fn(
                "bad",
                |_s: &dyn Inspect, _c: &Context, _f: &Filter, _b: &[Property]| {
                    Err(AugmentError::new("no data"))
                },
            ))
            .unwrap();

        let props = introspect(registry, &Table { rows: vec![] });
        assert_eq!(props.names().collect::<Vec<_>>(), ["Good"]);
        assert!(matches!(
            &props.faults()[0],
            Fault::Augmenter { augmenter, .. } if *augmenter == bad
        ));
    }

    #[test]
    fn panicking_augmenter_is_contained_and_retried() {
        let registry = AugmenterRegistry::new();
        registry
            .register(augmenting::from_fn(
                "panicky",
                |_s: &dyn Inspect, _c: &Context, _f: &Filter, _b: &[Property]| -> std::result::Result<Vec<Property>, AugmentError> {
                    panic!("augmenter bug")
                },
            ))
            .unwrap();
        let introspector = Introspector::new(Arc::new(registry));
        let table = Table {
            rows: vec![row("A", Some(Value::Int(1)))],
        };

        for _ in 0..2 {
            let props = introspector
                .introspect(&table, &Context::root(), &Filter::any())
                .unwrap();
            assert_eq!(props.len(), 1);
            assert_eq!(props.faults().len(), 1);
            assert_eq!(props.faults()[0].reason(), "panicked: augmenter bug");
        }
    }

    #[test]
    fn filter_restricts_native_properties() {
        let table = Table {
            rows: vec![
                ("Shown", vec![Tag::BROWSABLE], Some(Value::Int(1))),
                ("Deep", vec![Tag::ADVANCED], Some(Value::Int(2))),
                ("Bare", vec![], Some(Value::Int(3))),
            ],
        };
        let introspector = Introspector::native_only();
        let ctx = Context::root();

        let browsable = introspector.introspect(&table, &ctx, &Filter::browsable()).unwrap();
        assert_eq!(browsable.names().collect::<Vec<_>>(), ["Shown"]);

        let all = introspector.introspect(&table, &ctx, &Filter::any()).unwrap();
        assert_eq!(all.len(), 3);

        let unknown = introspector
            .introspect(&table, &ctx, &Filter::tags(["nonexistent"]))
            .unwrap();
        assert!(unknown.is_empty());
    }

    #[test]
    fn augmenter_sees_filtered_native_properties() {
        let registry = AugmenterRegistry::new();
        registry
            .register(augmenting::from_fn(
                "counter",
                |_s: &dyn Inspect, _c: &Context, _f: &Filter, base: &[Property]| {
                    Ok(vec![Property::pseudo("NativeCount", base.len())])
                },
            ))
            .unwrap();
        let table = Table {
            rows: vec![
                row("A", Some(Value::Int(1))),
                ("Hidden", vec![Tag::ADVANCED], Some(Value::Int(2))),
            ],
        };

        let props = Introspector::new(Arc::new(registry))
            .introspect(&table, &Context::root(), &Filter::browsable())
            .unwrap();
        assert_eq!(props.get("NativeCount").unwrap().value(), &Value::UInt(1));
    }

    #[test]
    fn duplicate_native_names_keep_first() {
        let table = Table {
            rows: vec![row("A", Some(Value::Int(1))), row("A", Some(Value::Int(2)))],
        };
        let props = introspect(AugmenterRegistry::new(), &table);
        assert_eq!(props.len(), 1);
        assert_eq!(props.get("A").unwrap().value(), &Value::Int(1));
    }

    #[test]
    fn unusable_subject_fails_the_call() {
        struct Broken;

        impl Inspect for Broken {
            fn describe(&self, _ctx: &Context) -> std::result::Result<Vec<PropertyDescriptor>, ReadFault> {
                Err(ReadFault::new("detached"))
            }

            fn read(&self, name: &str, _ctx: &Context) -> std::result::Result<Value, ReadFault> {
                Err(ReadFault::unknown(name))
            }
        }

        let err = Introspector::native_only()
            .introspect(&Broken, &Context::root(), &Filter::any())
            .unwrap_err();
        assert!(matches!(err, Error::SubjectUnusable { ref reason, .. } if &**reason == "detached"));
    }

    #[test]
    fn repeated_calls_are_identical() {
        let registry = AugmenterRegistry::new();
        registry.register(constant("a", "Z", 1)).unwrap();
        registry.register(constant("b", "M", 2)).unwrap();
        let introspector = Introspector::new(Arc::new(registry));
        let table = Table {
            rows: vec![row("Q", Some(Value::text("q"))), row("B", None)],
        };
        let ctx = Context::root();

        let first = introspector.introspect(&table, &ctx, &Filter::any()).unwrap();
        let second = introspector.introspect(&table, &ctx, &Filter::any()).unwrap();
        assert_eq!(first, second);
    }
}
