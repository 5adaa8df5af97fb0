//! Dynamically typed values and a compact BSON codec for them.
//!
//! A [`Value`] is one of a fixed set of [`Kind`]s: null, string, number,
//! object, array, booleans, byte blobs, 32 and 64 bit integers and dates.
//! Objects are not owned by the values that mention them; they live in an
//! [`ObjectTable`] and values carry an [`ObjectRef`] into it.
//!
//! # Binary
//!
//! ```rust
//! use bsonlite::{bson, Object, ObjectTable, Value};
//!
//! fn main() -> bsonlite::Result<()> {
//!     let mut object = Object::new();
//!     object.insert("hello".to_owned(), Value::string("world"));
//!     object.insert("n".to_owned(), Value::int32(42));
//!
//!     let b = bson::to_vec(&object, &())?;
//!
//!     let mut table = ObjectTable::new();
//!     let out = bson::from_slice(&b, &mut table)?;
//!     assert_eq!(out["hello"], Value::string("world"));
//!     assert_eq!(out["n"], Value::int32(42));
//!
//!     Ok(())
//! }
//! ```
//!
//! # Text
//!
//! ```rust
//! use bsonlite::{json, Array, Value};
//!
//! let v = Value::Array(Array::from(vec![Value::string("string"), Value::number(1.23)]));
//! assert_eq!(v.to_string(), r#"["string",1.23]"#);
//! assert_eq!(json::to_string(&v, &()), v.to_string());
//! ```

#![doc(html_root_url = "https://docs.rs/bsonlite/0.1.0")]
#![allow(clippy::needless_doctest_main)]

mod array;
mod cmp;
mod drop;
mod error;
pub mod kind;
mod object;
mod value;

pub mod buffer;

pub mod bson;
pub mod de;
pub mod json;
pub mod ser;

pub use crate::array::Array;
pub use crate::error::{Error, Result};
pub use crate::kind::Kind;
pub use crate::object::{Object, ObjectRef, ObjectTable};
pub use crate::value::Value;
