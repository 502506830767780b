use std::{
    borrow::Cow,
    fmt::{self, Write},
    sync::{Arc, Mutex, RwLock, Weak},
    time::Duration,
};

use crate::{Inspect, ReadFault, internal::guarded, subject::label_of};

/// Opens every marker. Text starting with it is shown with a leading `\`.
const MARKER_OPEN: char = '‹';

/// Rendered in place of an absent value.
pub const NULL_MARKER: &str = "‹null›";

/// Rendered in place of a subject that was already shown in the same dump.
pub const CYCLE_MARKER: &str = "‹cycle: reference already shown›";

/// The value of a property, as shown to an operator.
///
/// Scalars keep their type so a property grid can offer the right editor.
/// A value that is itself inspectable is kept as a live
/// [`Object`](Value::Object) reference, which is what makes nested dumps
/// possible.
///
/// `Display` renders scalars with their own formatting and text unquoted,
/// on a single line: control characters are escaped (`\n`, `\t`, ...).
/// Absent and failed values use markers wrapped in `‹ ›`. Text that would
/// start with `‹` gets a leading backslash, so no string can pass for a
/// marker or for an empty value.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(Arc<str>),
    Object(Arc<dyn Inspect>),
    /// The accessor failed; the fault explains why.
    Unreadable(ReadFault),
}

impl Value {
    pub fn text(text: impl Into<Arc<str>>) -> Self {
        Value::Text(text.into())
    }

    pub fn object<T: Inspect>(object: T) -> Self {
        Value::Object(Arc::new(object))
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    pub fn is_unreadable(&self) -> bool {
        matches!(self, Value::Unreadable(_))
    }

    pub fn as_object(&self) -> Option<&Arc<dyn Inspect>> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::UInt(n) => i64::try_from(*n).ok(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str(NULL_MARKER),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::UInt(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Text(s) => write!(f, "{}", Escaped::text(s)),
            Value::Object(object) => match guarded(|| object.type_label()) {
                Ok(label) => write!(f, "{}", Escaped::text(&label)),
                Err(panic) => write!(f, "‹label unavailable: {}›", Escaped::inline(&panic)),
            },
            Value::Unreadable(fault) => {
                write!(f, "‹unreadable: {}›", Escaped::inline(fault.reason()))
            }
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Int(n) => write!(f, "Int({n})"),
            Value::UInt(n) => write!(f, "UInt({n})"),
            Value::Float(x) => write!(f, "Float({x})"),
            Value::Text(s) => write!(f, "Text({s:?})"),
            Value::Object(object) => write!(f, "Object({})", label_of(object.as_ref())),
            Value::Unreadable(fault) => write!(f, "Unreadable({:?})", fault.reason()),
        }
    }
}

/// Objects compare by identity, everything else by content.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::UInt(a), Value::UInt(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => {
                std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
            }
            (Value::Unreadable(a), Value::Unreadable(b)) => a == b,
            _ => false,
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Value {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::UInt(n) => serializer.serialize_u64(*n),
            Value::Float(x) => serializer.serialize_f64(*x),
            Value::Text(s) => serializer.serialize_str(s),
            Value::Object(_) | Value::Unreadable(_) => serializer.collect_str(self),
        }
    }
}

/// Writes user-supplied text so it stays on one line.
///
/// Control characters are written as their `char::escape_default` escapes.
/// A standalone value additionally gets a `\` in front of a leading `‹`;
/// text shown inside a marker or as a property name does not need it.
pub(crate) struct Escaped<'a> {
    text: &'a str,
    standalone: bool,
}

impl<'a> Escaped<'a> {
    pub(crate) fn text(text: &'a str) -> Self {
        Self {
            text,
            standalone: true,
        }
    }

    pub(crate) fn inline(text: &'a str) -> Self {
        Self {
            text,
            standalone: false,
        }
    }
}

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.standalone && self.text.starts_with(MARKER_OPEN) {
            f.write_char('\\')?;
        }
        let mut rest = self.text;
        while let Some(at) = rest.find(char::is_control) {
            f.write_str(&rest[..at])?;
            let mut chars = rest[at..].chars();
            if let Some(c) = chars.next() {
                write!(f, "{}", c.escape_default())?;
            }
            rest = chars.as_str();
        }
        f.write_str(rest)
    }
}

/// Conversion into a property [`Value`].
///
/// Implemented for the usual scalar types, strings, `Option` (where `None`
/// is [`Value::Null`]), shared inspectable objects and lock-guarded values.
/// `#[derive(Inspect)]` requires it on every exposed field.
pub trait ToValue {
    fn to_value(&self) -> Value;
}

macro_rules! to_value_as {
    ($variant:ident($target:ty): $($ty:ty),*) => {
        $(
            impl ToValue for $ty {
                #[inline]
                fn to_value(&self) -> Value {
                    Value::$variant(*self as $target)
                }
            }
        )*
    };
}

to_value_as!(Int(i64): i8, i16, i32, i64, isize);
to_value_as!(UInt(u64): u8, u16, u32, u64, usize);
to_value_as!(Float(f64): f32, f64);

impl ToValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl ToValue for char {
    fn to_value(&self) -> Value {
        Value::Text(self.to_string().into())
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::Text(self.into())
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::Text(self.as_str().into())
    }
}

impl ToValue for Arc<str> {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
}

impl ToValue for Cow<'_, str> {
    fn to_value(&self) -> Value {
        Value::Text(self.as_ref().into())
    }
}

impl ToValue for Duration {
    fn to_value(&self) -> Value {
        Value::Text(format!("{self:?}").into())
    }
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, ToValue::to_value)
    }
}

impl<T: Inspect> ToValue for Arc<T> {
    fn to_value(&self) -> Value {
        Value::Object(self.clone())
    }
}

/// A dangling reference reads as `Null`.
impl<T: Inspect> ToValue for Weak<T> {
    fn to_value(&self) -> Value {
        self.upgrade().map_or(Value::Null, |object| Value::Object(object))
    }
}

impl<T: ToValue> ToValue for Mutex<T> {
    fn to_value(&self) -> Value {
        match self.lock() {
            Ok(guard) => guard.to_value(),
            Err(_) => Value::Unreadable(ReadFault::new("lock poisoned")),
        }
    }
}

impl<T: ToValue> ToValue for RwLock<T> {
    fn to_value(&self) -> Value {
        match self.read() {
            Ok(guard) => guard.to_value(),
            Err(_) => Value::Unreadable(ReadFault::new("lock poisoned")),
        }
    }
}
