//! Equality and ordering between values.
//!
//! Values of different kinds order by [`Kind`](crate::Kind) position, with
//! `false` before `true`. Within a kind, strings and blobs compare byte-wise,
//! numbers numerically, arrays element by element and objects by handle.
//!
//! Null is not equal to anything, itself included:
//!
//! ```rust
//! use bsonlite::Value;
//!
//! let v = Value::Null;
//! assert!(v != v);
//! assert!(!v.less_than(&v));
//! ```

use std::cmp::Ordering;

use crate::Value;

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::String(left), Value::String(right)) => left == right,
            (Value::Number(left), Value::Number(right)) => left == right,
            (Value::Object(left), Value::Object(right)) => left == right,
            (Value::Array(left), Value::Array(right)) => {
                left.len() == right.len() && left.iter().zip(right.iter()).all(|(l, r)| l == r)
            }
            (Value::Bool(left), Value::Bool(right)) => left == right,
            (Value::Byte(left), Value::Byte(right)) => left == right,
            (Value::Int32(left), Value::Int32(right)) => left == right,
            (Value::Int64(left), Value::Int64(right)) => left == right,
            (Value::Date(left), Value::Date(right)) => left == right,
            // Null and Undefined included
            _ => false,
        }
    }
}

impl PartialOrd for Value {
    /// `None` exactly when [`order`](Value::order) calls the two equivalent
    /// but they are not equal, e.g. two nulls or two NaNs.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.order(other) {
            Ordering::Equal if self != other => None,
            ordering => Some(ordering),
        }
    }
}

impl Value {
    pub fn equals(&self, other: &Value) -> bool {
        self == other
    }

    pub fn less_than(&self, other: &Value) -> bool {
        self.order(other) == Ordering::Less
    }

    /// Total preorder over values, suitable for `sort_by`.
    ///
    /// Nulls are equivalent to each other here even though they are never
    /// equal; NaN sorts after every other number.
    pub fn order(&self, other: &Value) -> Ordering {
        let (left, right) = (self.kind().rank(), other.kind().rank());
        if left != right {
            return left.cmp(&right);
        }

        match (self, other) {
            (Value::String(left), Value::String(right)) => left.as_bytes().cmp(right.as_bytes()),
            (Value::Number(left), Value::Number(right)) => order_f64(*left, *right),
            (Value::Object(left), Value::Object(right)) => left.cmp(right),
            (Value::Array(left), Value::Array(right)) => {
                for (l, r) in left.iter().zip(right.iter()) {
                    match l.order(r) {
                        Ordering::Equal => continue,
                        ordering => return ordering,
                    }
                }
                left.len().cmp(&right.len())
            }
            (Value::Byte(left), Value::Byte(right)) => left.cmp(right),
            (Value::Int32(left), Value::Int32(right)) => left.cmp(right),
            (Value::Int64(left), Value::Int64(right)) => left.cmp(right),
            (Value::Date(left), Value::Date(right)) => left.cmp(right),
            // same rank: Null, Undefined, or the same boolean
            _ => Ordering::Equal,
        }
    }
}

fn order_f64(left: f64, right: f64) -> Ordering {
    match (left.is_nan(), right.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => left.partial_cmp(&right).unwrap_or(Ordering::Equal),
    }
}
