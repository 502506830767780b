use std::fmt::Write;

use crate::{
    CYCLE_MARKER, Config, Context, Error, Filter, Inspect, Introspector, PropertySet, Result,
    Value, subject::label_of, value::Escaped,
};

use super::DumpContext;

/// Renders subjects as indented `name = value` text.
///
/// Objects reachable through properties are expanded recursively, each one
/// at most once per call; a repeated reference prints
/// [`CYCLE_MARKER`](crate::CYCLE_MARKER) instead. There is no depth limit
/// beyond that.
///
/// Every property takes exactly one line: text values and names have their
/// control characters escaped.
///
/// A failed read prints its `‹unreadable: ...›` marker in place of the
/// value, and a nested object that cannot be inspected at all prints
/// `‹unusable: ...›`. Neither stops the dump. Only the top-level subject
/// being unusable fails the call.
///
/// # Example
///
/// ```rust
/// use spyglass::{Dumper, Inspect, Introspector};
///
/// #[derive(Inspect)]
/// struct Widget {
///     name: String,
///     count: u32,
/// }
///
/// let dumper = Dumper::new(Introspector::native_only());
/// let mut out = String::new();
/// dumper.dump_to(&Widget { name: "Widget".into(), count: 5 }, &mut out)?;
/// assert_eq!(out, "Count = 5\nName = Widget\n");
/// # Ok::<(), spyglass::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Dumper {
    introspector: Introspector,
    config: Config,
    filter: Filter,
    context: Context,
}

impl Dumper {
    pub fn new(introspector: Introspector) -> Self {
        Self {
            introspector,
            config: Config::default(),
            filter: Filter::any(),
            context: Context::root(),
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Only dump properties passing `filter`, at every level.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    /// Context handed to the root subject; nested subjects get child contexts.
    pub fn with_context(mut self, context: Context) -> Self {
        self.context = context;
        self
    }

    /// Appends the dump of `subject` to `out`, indenting by `indent` levels.
    pub fn dump(&self, subject: &dyn Inspect, out: &mut impl Write, indent: usize) -> Result<()> {
        let mut dc = DumpContext::new(indent);
        dc.visit(subject);

        let props = self
            .introspector
            .introspect(subject, &self.context, &self.filter)?;
        self.write_properties(&props, &self.context, out, &mut dc)?;

        tracing::debug!(
            subject = %label_of(subject),
            lines = dc.lines(),
            objects = dc.objects(),
            "Dump complete"
        );
        Ok(())
    }

    /// Same as [`dump`](Dumper::dump) at indent level 0.
    pub fn dump_to(&self, subject: &dyn Inspect, out: &mut impl Write) -> Result<()> {
        self.dump(subject, out, 0)
    }

    /// Dump into a fresh string.
    pub fn dump_string(&self, subject: &dyn Inspect) -> Result<String> {
        let mut out = String::new();
        self.dump_to(subject, &mut out)?;
        Ok(out)
    }

    fn write_properties(
        &self,
        props: &PropertySet,
        ctx: &Context,
        out: &mut impl Write,
        dc: &mut DumpContext,
    ) -> Result<()> {
        for prop in props {
            let Value::Object(object) = prop.value() else {
                self.write_line(out, dc, prop.name(), prop.value())?;
                continue;
            };

            if !dc.visit_shared(object) {
                self.write_line(out, dc, prop.name(), CYCLE_MARKER)?;
                continue;
            }

            let child_ctx = ctx.child(prop.name());
            match self
                .introspector
                .introspect(object.as_ref(), &child_ctx, &self.filter)
            {
                Ok(children) => {
                    self.write_line(out, dc, prop.name(), prop.value())?;
                    dc.descend();
                    self.write_properties(&children, &child_ctx, out, dc)?;
                    dc.ascend();
                }
                Err(Error::SubjectUnusable { reason, .. }) => {
                    tracing::warn!(path = %child_ctx, %reason, "Nested subject unusable");
                    self.write_line(
                        out,
                        dc,
                        prop.name(),
                        format_args!("‹unusable: {}›", Escaped::inline(&reason)),
                    )?;
                }
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }

    fn write_line(
        &self,
        out: &mut impl Write,
        dc: &mut DumpContext,
        name: &str,
        value: impl std::fmt::Display,
    ) -> Result<()> {
        for _ in 0..dc.level() {
            out.write_str(&self.config.indent)?;
        }
        writeln!(out, "{}{}{value}", Escaped::inline(name), self.config.separator)?;
        dc.line_written();
        Ok(())
    }
}
