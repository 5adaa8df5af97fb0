//! Serialization context.
//!
//! An `Object` value is only a handle. Whatever serializes it, the binary
//! [`Writer`](crate::bson::Writer) or the JSON text writer, asks a
//! [`Context`] for the object behind the handle.
//!
//! ```rust
//! use bsonlite::{bson, Object, ObjectTable, Value};
//!
//! let mut table = ObjectTable::new();
//! let mut inner = Object::new();
//! inner.insert("n".to_owned(), Value::int32(1));
//! let r = table.insert(inner);
//!
//! let mut root = Object::new();
//! root.insert("inner".to_owned(), Value::object(r));
//!
//! // `()` resolves nothing, the table resolves `r`
//! assert!(bson::to_vec(&root, &()).is_err());
//! assert!(bson::to_vec(&root, &table).is_ok());
//! ```

use crate::object::{Object, ObjectRef};

/// Resolves object references while serializing.
pub trait Context {
    fn object(&self, r: ObjectRef) -> Option<&Object> {
        let _ = r;
        None
    }
}

impl Context for () {}
