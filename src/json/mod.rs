//! JSON text for values.
//!
//! Byte blobs don't exist in JSON, they are written as hex strings ending
//! with [`HEX_HINT`] so they can be told apart from text when parsed back.

mod ser;
pub use self::ser::{object_to_string, to_string};

#[cfg(feature = "simd")]
mod simd;
#[cfg(feature = "simd")]
pub use self::simd::from_str;

/// String pos-fixed with `\u{0011}` control char, should be treated as
/// hex encoded binary data
pub const HEX_HINT: char = '\u{11}';

/// Utf8 escaped string for `HEX_HINT` char.
pub const HEX_HINT_ESCAPED: &str = r#"\u0011"#;
