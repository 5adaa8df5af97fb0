use std::fmt::{self, Display};

use crate::object::ObjectRef;

/// Error type when encoding or decoding fails.
///
/// Every failure is local to the call that produced it; the codec rolls its
/// buffer, cursor and object table back before returning one of these.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// A declared length runs past the end of the input, a terminator is
    /// missing, or the bytes are otherwise not a valid document.
    TruncatedOrInvalidInput,
    /// Writing would exceed the writer's byte limit.
    BufferOverflow,
    /// Nesting went deeper than the configured maximum.
    DepthLimitExceeded,
    /// Key is empty or contains a NUL byte.
    InvalidKey,
    /// A string, blob or document does not fit an `i32` length prefix.
    LengthOverflow,
    /// An object reference that the serialization context can't resolve.
    UnresolvedObject(ObjectRef),
    /// A nested object was decoded but the context has nowhere to store it.
    NoObjectTable,
    /// Text input is not valid JSON.
    InvalidText,
}

/// Result type returned by encoding and decoding functions.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    fn as_str(&self) -> &'static str {
        match self {
            Error::TruncatedOrInvalidInput => "truncated or invalid input",
            Error::BufferOverflow => "buffer overflow",
            Error::DepthLimitExceeded => "depth limit exceeded",
            Error::InvalidKey => "invalid key",
            Error::LengthOverflow => "length overflow",
            Error::UnresolvedObject(_) => "unresolved object reference",
            Error::NoObjectTable => "no object table to store nested object",
            Error::InvalidText => "invalid text",
        }
    }
}

impl Display for Error {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::UnresolvedObject(r) => {
                write!(formatter, "{} (#{})", self.as_str(), r.index())
            }
            _ => formatter.write_str(self.as_str()),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(feature = "ufmt1")]
impl ufmt::uDisplay for Error {
    fn fmt<W>(&self, f: &mut ufmt::Formatter<'_, W>) -> std::result::Result<(), W::Error>
    where
        W: ufmt::uWrite + ?Sized,
    {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(Error::BufferOverflow.to_string(), "buffer overflow");
        assert_eq!(
            Error::UnresolvedObject(ObjectRef::new(3)).to_string(),
            "unresolved object reference (#3)"
        );
    }
}
