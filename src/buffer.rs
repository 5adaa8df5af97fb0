use paste::paste;

use crate::error::{Error, Result};

/// Growable byte buffer with an optional upper bound on its length.
///
/// Every write checks the bound first, so a write that doesn't fit leaves
/// the buffer untouched.
#[derive(Clone, Debug)]
pub struct Buffer {
    bytes: Vec<u8>,
    limit: usize,
}

impl Default for Buffer {
    fn default() -> Self {
        Buffer::new()
    }
}

impl Buffer {
    pub fn new() -> Self {
        Buffer {
            bytes: Vec::new(),
            limit: usize::MAX,
        }
    }

    /// Buffer that refuses to grow past `limit` bytes.
    pub fn with_limit(limit: usize) -> Self {
        Buffer {
            bytes: Vec::new(),
            limit,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }

    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        match self.bytes.len().checked_add(additional) {
            Some(len) if len <= self.limit => {
                self.bytes.reserve(additional);
                Ok(())
            }
            _ => Err(Error::BufferOverflow),
        }
    }

    pub fn extend_from_slice(&mut self, slice: &[u8]) -> Result<()> {
        self.reserve(slice.len())?;
        self.bytes.extend_from_slice(slice);
        Ok(())
    }

    /// Drops everything after the first `len` bytes.
    pub fn truncate(&mut self, len: usize) {
        self.bytes.truncate(len);
    }

    /// Overwrites four bytes at `index` with `value`, little endian.
    ///
    /// # Panics
    ///
    /// If `index + 4` is past the end of the buffer.
    pub fn patch_i32(&mut self, index: usize, value: i32) {
        self.bytes[index..index + 4].copy_from_slice(&value.to_le_bytes());
    }
}

macro_rules! write_impl {
    ($($t:ident),*) => {
        impl Buffer {
            $(paste! {
                pub fn [<write_ $t>] (&mut self, value: $t) -> Result<()> {
                    self.extend_from_slice(&value.to_le_bytes()[..])
                }
            })*
        }
    };
}

write_impl!(u8, i32, i64, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_data() {
        let mut buf = Buffer::new();
        assert_eq!(buf.len(), 0);

        let d = &[0, 1, 2, 3, 4, 5][..];
        buf.extend_from_slice(d).unwrap();
        assert_eq!(buf.len(), 6);

        let v = buf.into_vec();
        assert_eq!(v, d.to_vec());
    }

    #[test]
    fn little_endian() {
        let mut buf = Buffer::new();
        buf.write_i32(0x16).unwrap();
        buf.write_f64(1.0).unwrap();
        assert_eq!(
            buf.as_slice(),
            &[0x16u8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xF0, 0x3F][..]
        );
    }

    #[test]
    fn limit_is_respected() {
        let mut buf = Buffer::with_limit(5);
        buf.write_i32(1).unwrap();
        assert_eq!(buf.write_i32(2), Err(Error::BufferOverflow));
        assert_eq!(buf.len(), 4);
        buf.write_u8(0).unwrap();
        assert_eq!(buf.write_u8(0), Err(Error::BufferOverflow));
    }

    #[test]
    fn patch() {
        let mut buf = Buffer::new();
        buf.write_i32(0).unwrap();
        buf.write_u8(0).unwrap();
        buf.patch_i32(0, 5);
        assert_eq!(buf.as_slice(), &[5u8, 0, 0, 0, 0]);
    }
}
