use std::borrow::Cow;

use crate::{AugmentError, Augmenter, Context, Filter, Inspect, Property, downcast_ref};

/// An [`Augmenter`] backed by a closure.
///
/// Build one with [`from_fn`] or [`for_type`].
pub struct FnAugmenter<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> Augmenter for FnAugmenter<F>
where
    F: Fn(&dyn Inspect, &Context, &Filter, &[Property]) -> Result<Vec<Property>, AugmentError>
        + Send
        + Sync,
{
    fn name(&self) -> Cow<'static, str> {
        self.name.clone()
    }

    fn contribute(
        &self,
        subject: &dyn Inspect,
        ctx: &Context,
        filter: &Filter,
        base: &[Property],
    ) -> Result<Vec<Property>, AugmentError> {
        (self.f)(subject, ctx, filter, base)
    }
}

/// Augmenter applied to every subject.
pub fn from_fn<F>(name: impl Into<Cow<'static, str>>, f: F) -> FnAugmenter<F>
where
    F: Fn(&dyn Inspect, &Context, &Filter, &[Property]) -> Result<Vec<Property>, AugmentError>
        + Send
        + Sync,
{
    FnAugmenter {
        name: name.into(),
        f,
    }
}

/// Augmenter applied only to subjects of type `T`; other subjects get nothing.
///
/// Produced properties that don't pass the request's filter are dropped, so
/// the closure doesn't have to look at it.
pub fn for_type<T, G>(
    name: impl Into<Cow<'static, str>>,
    g: G,
) -> FnAugmenter<
    impl Fn(&dyn Inspect, &Context, &Filter, &[Property]) -> Result<Vec<Property>, AugmentError>
    + Send
    + Sync,
>
where
    T: Inspect,
    G: Fn(&T, &Context, &[Property]) -> Result<Vec<Property>, AugmentError> + Send + Sync,
{
    from_fn(
        name,
        move |subject: &dyn Inspect, ctx: &Context, filter: &Filter, base: &[Property]| {
            let Some(subject) = downcast_ref::<T>(subject) else {
                return Ok(Vec::new());
            };
            let mut props = g(subject, ctx, base)?;
            props.retain(|p| filter.matches(p.tags()));
            Ok(props)
        },
    )
}
