use std::convert::TryFrom;

use log::{debug, trace};

use crate::buffer::Buffer;
use crate::error::{Error, Result};
use crate::ser::Context;
use crate::{Array, Object, Value};

use super::DEFAULT_MAX_DEPTH;

/// Serialize an object as a top level BSON document.
///
/// ```rust
/// use bsonlite::{bson, Object, Value};
///
/// let mut object = Object::new();
/// object.insert("hello".to_owned(), Value::string("world"));
///
/// let b = bson::to_vec(&object, &()).unwrap();
/// assert_eq!(b.len(), 0x16);
/// ```
pub fn to_vec(object: &Object, context: &dyn Context) -> Result<Vec<u8>> {
    let mut writer = Writer::new(context);
    writer.write_document(object)?;
    Ok(writer.into_vec())
}

/// Writes elements and documents into an owned buffer.
///
/// A failed write leaves the buffer exactly as it was before the call.
pub struct Writer<'c> {
    out: Buffer,
    context: &'c dyn Context,
    depth: usize,
    max_depth: usize,
}

// Open a document, returning where its length goes
macro_rules! begin {
    ($w:ident) => {{
        let index = $w.out.len();
        $w.out.write_i32(0)?;
        index
    }};
}

// End document starting at some index
macro_rules! done {
    ($w:ident, $index:expr) => {{
        $w.out.write_u8(0x00)?;
        let len = $w.out.len() - $index;
        $w.out.patch_i32($index, length(len)?);
    }};
}

impl<'c> Writer<'c> {
    pub fn new(context: &'c dyn Context) -> Self {
        Writer::from_buffer(Buffer::new(), context)
    }

    /// Writer whose output may never exceed `limit` bytes.
    pub fn with_limit(context: &'c dyn Context, limit: usize) -> Self {
        Writer::from_buffer(Buffer::with_limit(limit), context)
    }

    fn from_buffer(out: Buffer, context: &'c dyn Context) -> Self {
        Writer {
            out,
            context,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Deepest nesting of documents and arrays the writer accepts.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn len(&self) -> usize {
        self.out.len()
    }

    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.out.as_slice()
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.out.into_vec()
    }

    /// Writes one `key: value` element and returns the number of bytes
    /// written.
    ///
    /// `key` must be non-empty and free of NUL bytes.
    pub fn write_element(&mut self, key: &str, value: &Value) -> Result<usize> {
        if key.is_empty() {
            return Err(Error::InvalidKey);
        }
        self.guarded(|w| w.element(key, value))
    }

    /// Writes `object` as a top level document (no tag, no key) and returns
    /// the number of bytes written.
    pub fn write_document(&mut self, object: &Object) -> Result<usize> {
        self.guarded(|w| w.document(object))
    }

    fn guarded<F>(&mut self, f: F) -> Result<usize>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let start = self.out.len();
        match f(self) {
            Ok(()) => Ok(self.out.len() - start),
            Err(e) => {
                debug!("bson write failed at byte {}: {}", self.out.len(), e);
                self.out.truncate(start);
                self.depth = 0;
                Err(e)
            }
        }
    }

    fn element(&mut self, key: &str, value: &Value) -> Result<()> {
        if key.as_bytes().contains(&0) {
            return Err(Error::InvalidKey);
        }
        trace!("bson write {:?} ({}) at {}", key, value.kind().name(), self.out.len());

        self.out.write_u8(value.kind().tag())?;
        // e_name contents
        self.out.extend_from_slice(key.as_bytes())?;
        self.out.write_u8(0x00)?; // c_string null terminator

        match value {
            Value::Undefined | Value::Null => {}
            Value::Bool(b) => self.out.write_u8(if *b { 1_u8 } else { 0_u8 })?,
            Value::Number(n) => self.out.write_f64(*n)?,
            Value::String(s) => {
                self.out.write_i32(length(s.len() + 1)?)?;
                self.out.extend_from_slice(s.as_bytes())?;
                self.out.write_u8(0x00)?; // '\0'
            }
            Value::Byte(b) => {
                self.out.write_i32(length(b.len())?)?;
                self.out.extend_from_slice(b)?;
            }
            Value::Int32(n) => self.out.write_i32(*n)?,
            Value::Int64(n) => self.out.write_i64(*n)?,
            Value::Date(secs) => self.out.write_i64(*secs)?,
            Value::Array(array) => self.array(array)?,
            Value::Object(r) => {
                let context = self.context;
                let object = context.object(*r).ok_or(Error::UnresolvedObject(*r))?;
                self.document(object)?;
            }
        }
        Ok(())
    }

    fn document(&mut self, object: &Object) -> Result<()> {
        self.enter()?;
        let doc = begin!(self);
        for (key, value) in object {
            if key.is_empty() {
                return Err(Error::InvalidKey);
            }
            self.element(key, value)?;
        }
        done!(self, doc);
        self.depth -= 1;
        Ok(())
    }

    fn array(&mut self, array: &Array) -> Result<()> {
        self.enter()?;
        let doc = begin!(self);
        let mut key = itoa::Buffer::new();
        for (i, value) in array.iter().enumerate() {
            self.element(key.format(i), value)?;
        }
        done!(self, doc);
        self.depth -= 1;
        Ok(())
    }

    fn enter(&mut self) -> Result<()> {
        if self.depth >= self.max_depth {
            return Err(Error::DepthLimitExceeded);
        }
        self.depth += 1;
        Ok(())
    }
}

fn length(len: usize) -> Result<i32> {
    i32::try_from(len).map_err(|_| Error::LengthOverflow)
}
