use std::fmt::{self, Display};

use crate::json;
use crate::{Array, Kind, ObjectRef};

/// Any value the codec can carry.
///
/// Strings, blobs and arrays are owned by the value holding them; cloning
/// duplicates them. An `Object` value only refers to an object kept in an
/// [`ObjectTable`](crate::ObjectTable) and never owns it.
///
/// Arrays have a non-recursive drop implementation so it is safe to build
/// arbitrarily deeply nested instances.
///
/// ```rust
/// use bsonlite::{Array, Value};
///
/// let mut value = Value::Null;
/// for _ in 0..100000 {
///     let mut array = Array::new();
///     array.push(value);
///     value = Value::Array(array);
/// }
/// // no stack overflow when `value` goes out of scope
/// ```
#[derive(Clone, Debug)]
pub enum Value {
    /// Slot of a pre-sized array that nothing was written to.
    Undefined,
    Null,
    String(String),
    Number(f64),
    Object(ObjectRef),
    Array(Array),
    Bool(bool),
    Byte(Vec<u8>),
    Int32(i32),
    Int64(i64),
    /// Whole seconds since the Unix epoch.
    Date(i64),
}

impl Default for Value {
    /// The default value is null.
    fn default() -> Self {
        Value::Null
    }
}

impl Value {
    pub fn null() -> Self {
        Value::Null
    }

    pub fn boolean(b: bool) -> Self {
        Value::Bool(b)
    }

    pub fn number(n: f64) -> Self {
        Value::Number(n)
    }

    pub fn string<S: Into<String>>(s: S) -> Self {
        Value::String(s.into())
    }

    pub fn bytes<B: Into<Vec<u8>>>(b: B) -> Self {
        Value::Byte(b.into())
    }

    pub fn int32(n: i32) -> Self {
        Value::Int32(n)
    }

    pub fn int64(n: i64) -> Self {
        Value::Int64(n)
    }

    /// Date from whole seconds since the Unix epoch.
    pub fn date(secs: i64) -> Self {
        Value::Date(secs)
    }

    /// Array of `n` elements, every one of them `Undefined`.
    pub fn array(n: usize) -> Self {
        Value::Array(Array::with_len(n))
    }

    pub fn object(r: ObjectRef) -> Self {
        Value::Object(r)
    }

    pub fn kind(&self) -> Kind {
        match self {
            Value::Undefined => Kind::Undefined,
            Value::Null => Kind::Null,
            Value::String(_) => Kind::String,
            Value::Number(_) => Kind::Number,
            Value::Object(_) => Kind::Object,
            Value::Array(_) => Kind::Array,
            Value::Bool(true) => Kind::True,
            Value::Bool(false) => Kind::False,
            Value::Byte(_) => Kind::Byte,
            Value::Int32(_) => Kind::Int32,
            Value::Int64(_) => Kind::Int64,
            Value::Date(_) => Kind::Date,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Byte(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Int32(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int64(n) => Some(*n),
            _ => None,
        }
    }

    /// Seconds since the Unix epoch, for dates.
    pub fn as_date(&self) -> Option<i64> {
        match self {
            Value::Date(secs) => Some(*secs),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Array> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<ObjectRef> {
        match self {
            Value::Object(r) => Some(*r),
            _ => None,
        }
    }

    /// Element `i` of an array.
    ///
    /// # Panics
    ///
    /// If `self` is not an array or `i` is out of bounds. Check
    /// [`kind`](Value::kind) and the length first.
    #[track_caller]
    pub fn at(&self, i: usize) -> &Value {
        match self {
            Value::Array(array) => &array[i],
            other => panic!("`at` called on {} value", other.kind().name()),
        }
    }

    /// Mutable element `i` of an array.
    ///
    /// # Panics
    ///
    /// Same as [`at`](Value::at).
    #[track_caller]
    pub fn at_mut(&mut self, i: usize) -> &mut Value {
        match self {
            Value::Array(array) => &mut array[i],
            other => panic!("`at_mut` called on {} value", other.kind().name()),
        }
    }
}

impl Display for Value {
    /// Compact JSON-like text; object references are not expanded.
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(&json::to_string(self, &()))
    }
}

macro_rules! from_impl {
    ($($t:ty => $variant:ident),*) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::$variant(v)
            }
        })*
    };
}

from_impl!(
    bool => Bool,
    f64 => Number,
    String => String,
    i32 => Int32,
    i64 => Int64,
    Vec<u8> => Byte,
    Array => Array,
    ObjectRef => Object
);

impl<'a> From<&'a str> for Value {
    fn from(s: &'a str) -> Self {
        Value::String(s.to_owned())
    }
}

impl<'a> From<&'a [u8]> for Value {
    fn from(b: &'a [u8]) -> Self {
        Value::Byte(b.to_vec())
    }
}
