use std::borrow::Cow;

/// Text layout of a dump.
///
/// Use the builder methods to customize, or [`Default`] for the classic
/// layout: one tab per level and `name = value` lines.
///
/// # Examples
///
/// ```rust
/// use spyglass::Config;
///
/// let config = Config::default()
///     .with_spaces(2)           // two spaces per nesting level
///     .with_separator(": ");    // `name: value`
/// assert_eq!(config.indent, "  ");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Text written once per nesting level at the start of each line.
    /// Default: a single tab
    pub indent: Cow<'static, str>,

    /// Text between a property's name and its value.
    /// Default: `" = "`
    pub separator: Cow<'static, str>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            indent: Cow::Borrowed("\t"),
            separator: Cow::Borrowed(" = "),
        }
    }
}

impl Config {
    /// Set the text written per nesting level.
    pub fn with_indent(mut self, indent: impl Into<Cow<'static, str>>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Indent with `count` spaces per nesting level instead of tabs.
    pub fn with_spaces(self, count: usize) -> Self {
        self.with_indent(" ".repeat(count))
    }

    /// Set the text between name and value.
    pub fn with_separator(mut self, separator: impl Into<Cow<'static, str>>) -> Self {
        self.separator = separator.into();
        self
    }
}
