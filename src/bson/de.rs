use std::convert::TryFrom;
use std::mem;
use std::str;

use log::{debug, trace, warn};
use paste::paste;

use crate::de::Context;
use crate::error::{Error, Result};
use crate::kind::tag;
use crate::{Array, Object, ObjectRef, Value};

use super::DEFAULT_MAX_DEPTH;

/// Deserialize a top level BSON document.
///
/// Nested documents are stored in `context`; the returned root object is
/// owned by the caller. The whole input must be consumed.
///
/// ```rust
/// use bsonlite::{bson, Value};
///
/// let b = b"\x16\x00\x00\x00\x02hello\x00\x06\x00\x00\x00world\x00\x00";
/// let object = bson::from_slice(b, &mut ()).unwrap();
/// assert_eq!(object["hello"], Value::string("world"));
/// ```
pub fn from_slice(b: &[u8], context: &mut dyn Context) -> Result<Object> {
    let mut reader = Reader::new(b);
    reader.guarded(context, |r, c| {
        let entries = r.document(c)?;
        // Trailing bytes fail the whole call, stored objects included
        if !r.remaining().is_empty() {
            return Err(Error::TruncatedOrInvalidInput);
        }
        Ok(entries.into_iter().collect())
    })
}

/// Cursor over BSON bytes.
///
/// On success the cursor moves past exactly the bytes consumed; on failure
/// it stays where it was and every object the call stored is discarded.
pub struct Reader<'de> {
    buffer: &'de [u8],
    index: usize,
    depth: usize,
    max_depth: usize,
    inserted: Vec<ObjectRef>,
}

/// What an element's payload decoded to.
enum Payload {
    Value(Value),
    /// Tag the reader has no layout for; the payload was not consumed.
    Unknown(u8),
}

macro_rules! read_impl {
    ($($t:ident),*) => {
        $(paste! {
            fn [<read_ $t>] (&mut self) -> Result<$t> {
                const N: usize = std::mem::size_of::<$t>();
                let mut a = [0u8; N];
                a.copy_from_slice(self.read_bytes(N)?);
                Ok($t::from_le_bytes(a))
            }
        })*
    };
}

/// Provides various functions to read bytes from the inner buffer
/// and interpreting as little endian bytes many primitive types
impl<'de> Reader<'de> {
    pub fn new(buffer: &'de [u8]) -> Self {
        Reader {
            buffer,
            index: 0,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
            inserted: Vec::new(),
        }
    }

    /// Deepest nesting of documents and arrays the reader accepts.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Offset of the cursor from the start of the buffer.
    pub fn position(&self) -> usize {
        self.index
    }

    pub fn remaining(&self) -> &'de [u8] {
        let buffer: &'de [u8] = self.buffer;
        &buffer[self.index..]
    }

    /// Reads one element starting at its tag byte.
    ///
    /// An unrecognized tag decodes as `Null` with no payload consumed.
    pub fn read_element(&mut self, context: &mut dyn Context) -> Result<(String, Value)> {
        self.guarded(context, |r, c| {
            let tag = r.read_u8()?;
            let key = r.read_cstring()?;
            match r.payload(tag, c)? {
                Payload::Value(value) => Ok((key, value)),
                Payload::Unknown(tag) => {
                    warn!("bson unknown tag {:#04x} for {:?}, read as null", tag, key);
                    Ok((key, Value::Null))
                }
            }
        })
    }

    /// Reads a top level document starting at its length prefix.
    pub fn read_document(&mut self, context: &mut dyn Context) -> Result<Object> {
        self.guarded(context, |r, c| {
            let entries = r.document(c)?;
            Ok(entries.into_iter().collect())
        })
    }

    fn guarded<T, F>(&mut self, context: &mut dyn Context, f: F) -> Result<T>
    where
        F: FnOnce(&mut Self, &mut dyn Context) -> Result<T>,
    {
        let start = self.index;
        self.inserted.clear();
        let result = f(&mut *self, &mut *context);
        let inserted = mem::take(&mut self.inserted);
        if let Err(e) = &result {
            debug!(
                "bson read failed at byte {}: {}; discarding {} objects",
                self.index,
                e,
                inserted.len()
            );
            context.discard(&inserted);
            self.index = start;
            self.depth = 0;
        }
        result
    }

    fn payload(&mut self, ty: u8, context: &mut dyn Context) -> Result<Payload> {
        trace!("bson read tag {:#04x} at {}", ty, self.index);
        let value = match ty {
            tag::NULL => Value::Null,
            tag::BOOL => match self.read_u8()? {
                0 => Value::Bool(false),
                1 => Value::Bool(true),
                _ => return Err(Error::TruncatedOrInvalidInput),
            },
            tag::NUMBER => Value::Number(self.read_f64()?),
            tag::INT32 => Value::Int32(self.read_i32()?),
            tag::INT64 => Value::Int64(self.read_i64()?),
            tag::DATE => Value::Date(self.read_i64()?),
            tag::STRING => Value::String(self.read_string()?),
            tag::BYTE => {
                let size = self.read_length()?;
                Value::Byte(self.read_bytes(size)?.to_vec())
            }
            tag::ARRAY => {
                let entries = self.document(context)?;
                // Keys are whatever the writer chose; position is what counts
                Value::Array(entries.into_iter().map(|(_, v)| v).collect::<Array>())
            }
            tag::OBJECT => {
                let object: Object = self.document(context)?.into_iter().collect();
                let r = context.insert(object)?;
                self.inserted.push(r);
                Value::Object(r)
            }
            _ => {
                if self.skip_foreign(ty)? {
                    debug!("bson skipped foreign tag {:#04x}, read as null", ty);
                    Value::Null
                } else {
                    return Ok(Payload::Unknown(ty));
                }
            }
        };
        Ok(Payload::Value(value))
    }

    /// Elements of an embedded document, cursor at its length prefix.
    fn document(&mut self, context: &mut dyn Context) -> Result<Vec<(String, Value)>> {
        if self.depth >= self.max_depth {
            return Err(Error::DepthLimitExceeded);
        }
        self.depth += 1;

        let start = self.index;
        let size = self.read_i32()?;
        // Length prefix plus the trailing '\0' at least
        if size < 5 {
            return Err(Error::TruncatedOrInvalidInput);
        }
        let end = start
            .checked_add(size as usize)
            .filter(|end| *end <= self.buffer.len())
            .ok_or(Error::TruncatedOrInvalidInput)?;
        if self.buffer[end - 1] != 0 {
            return Err(Error::TruncatedOrInvalidInput);
        }

        let mut entries = Vec::new();
        loop {
            let ty = self.read_u8()?;
            if ty == 0 {
                break; // '\0' (end document)
            }
            let key = self.read_cstring()?;
            match self.payload(ty, context)? {
                Payload::Value(value) => entries.push((key, value)),
                Payload::Unknown(ty) => {
                    warn!(
                        "bson unknown tag {:#04x} for {:?}, skipping rest of document",
                        ty, key
                    );
                    entries.push((key, Value::Null));
                    self.index = end - 1;
                }
            }
            if self.index >= end {
                return Err(Error::TruncatedOrInvalidInput);
            }
        }

        if self.index != end {
            return Err(Error::TruncatedOrInvalidInput);
        }
        self.depth -= 1;
        Ok(entries)
    }

    /// Skips the payload of BSON types this codec doesn't model. Returns
    /// `false` for tags that aren't BSON at all.
    fn skip_foreign(&mut self, ty: u8) -> Result<bool> {
        match ty {
            // undefined, min key, max key
            0x06 | 0xFF | 0x7F => {}
            // ObjectId
            0x07 => {
                self.read_bytes(12)?;
            }
            // regex: pattern and options
            0x0B => {
                self.read_cstring()?;
                self.read_cstring()?;
            }
            // DBPointer
            0x0C => {
                self.read_string()?;
                self.read_bytes(12)?;
            }
            // JavaScript code, symbol
            0x0D | 0x0E => {
                self.read_string()?;
            }
            // code with scope, total length includes itself
            0x0F => {
                let size = self.read_length()?;
                if size < 4 {
                    return Err(Error::TruncatedOrInvalidInput);
                }
                self.read_bytes(size - 4)?;
            }
            // timestamp
            0x11 => {
                self.read_bytes(8)?;
            }
            // decimal128
            0x13 => {
                self.read_bytes(16)?;
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    read_impl!(u8, i32, i64, f64);

    fn read_length(&mut self) -> Result<usize> {
        let n = self.read_i32()?;
        usize::try_from(n).map_err(|_| Error::TruncatedOrInvalidInput)
    }

    fn read_bytes(&mut self, length: usize) -> Result<&'de [u8]> {
        let buffer: &'de [u8] = self.buffer;
        let end = self
            .index
            .checked_add(length)
            .filter(|end| *end <= buffer.len())
            .ok_or(Error::TruncatedOrInvalidInput)?;
        let bytes = &buffer[self.index..end];
        self.index = end;
        Ok(bytes)
    }

    /// Length prefixed, '\0' terminated UTF-8.
    fn read_string(&mut self) -> Result<String> {
        let size = self.read_length()?;
        if size == 0 {
            return Err(Error::TruncatedOrInvalidInput);
        }
        let bytes = self.read_bytes(size)?;
        if bytes[size - 1] != 0 {
            return Err(Error::TruncatedOrInvalidInput);
        }
        let s = str::from_utf8(&bytes[..size - 1]).map_err(|_| Error::TruncatedOrInvalidInput)?;
        Ok(s.to_owned())
    }

    /// Reads a sequence of bytes until find a '\0' then return it as a string
    fn read_cstring(&mut self) -> Result<String> {
        let buffer: &'de [u8] = self.buffer;
        let rest = &buffer[self.index..];
        let len = rest
            .iter()
            .position(|b| *b == 0)
            .ok_or(Error::TruncatedOrInvalidInput)?;
        let s = str::from_utf8(&rest[..len]).map_err(|_| Error::TruncatedOrInvalidInput)?;
        // Plus 1 because we don't need the '\0' string terminator
        self.index += len + 1;
        Ok(s.to_owned())
    }
}
