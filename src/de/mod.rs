//! Deserialization context.
//!
//! Decoders build nested objects as they go and hand each one to a
//! [`Context`], which stores it and answers with the handle the decoded
//! `Object` value will carry. If the decode fails later on, every object
//! stored during that call is handed back through [`Context::discard`].

use crate::error::{Error, Result};
use crate::object::{Object, ObjectRef};

/// Stores objects produced while deserializing.
pub trait Context {
    fn insert(&mut self, object: Object) -> Result<ObjectRef> {
        let _ = object;
        Err(Error::NoObjectTable)
    }

    /// Drops the objects stored by a call that then failed.
    fn discard(&mut self, inserted: &[ObjectRef]) {
        let _ = inserted;
    }
}

impl Context for () {}
