//! BSON data format.
//!
//! Documents are a little endian `int32` length, their elements and a
//! trailing `\x00`. Every element is a tag byte, a NUL terminated key and
//! the payload for that tag. `{"hello": "world"}` is:
//!
//! ```text
//! \x16\x00\x00\x00
//! \x02 hello\x00 \x06\x00\x00\x00 world\x00
//! \x00
//! ```
//!
//! Arrays are documents keyed `"0"`, `"1"`, ... and dates travel as whole
//! seconds since the epoch, the same number `Value::Date` holds.

mod ser;
pub use self::ser::*;

mod de;
pub use self::de::*;

/// How deep documents and arrays may nest before reading or writing fails.
pub const DEFAULT_MAX_DEPTH: usize = 128;
