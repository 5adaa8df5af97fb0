//! Variant kinds and their wire tags.

/// Discriminator naming which payload a [`Value`](crate::Value) holds.
///
/// Declaration order is the cross-kind sort order, except that `False`
/// sorts before `True` (see [`Value::order`](crate::Value::order)).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Kind {
    /// Placeholder for array slots that were never populated.
    Undefined = 0,
    Null = 1,
    String = 2,
    Number = 3,
    Object = 4,
    Array = 5,
    True = 6,
    False = 7,
    Byte = 8,
    Int32 = 9,
    Int64 = 10,
    Date = 11,
}

/// Wire tags. Only the ones this codec produces.
pub mod tag {
    pub const NUMBER: u8 = 0x01;
    pub const STRING: u8 = 0x02;
    pub const OBJECT: u8 = 0x03;
    pub const ARRAY: u8 = 0x04;
    pub const BYTE: u8 = 0x05;
    pub const BOOL: u8 = 0x08;
    pub const DATE: u8 = 0x09;
    pub const NULL: u8 = 0x0A;
    pub const INT32: u8 = 0x10;
    pub const INT64: u8 = 0x12;
}

impl Kind {
    /// Tag byte that introduces an element of this kind.
    ///
    /// `Undefined` has no tag of its own and goes out as null.
    #[inline]
    pub fn tag(self) -> u8 {
        match self {
            Kind::Undefined | Kind::Null => tag::NULL,
            Kind::String => tag::STRING,
            Kind::Number => tag::NUMBER,
            Kind::Object => tag::OBJECT,
            Kind::Array => tag::ARRAY,
            Kind::True | Kind::False => tag::BOOL,
            Kind::Byte => tag::BYTE,
            Kind::Int32 => tag::INT32,
            Kind::Int64 => tag::INT64,
            Kind::Date => tag::DATE,
        }
    }

    /// Position used when ordering values of different kinds.
    #[inline]
    pub(crate) fn rank(self) -> u8 {
        match self {
            Kind::True => Kind::False as u8,
            Kind::False => Kind::True as u8,
            k => k as u8,
        }
    }

    /// Lower case name, for messages.
    pub fn name(self) -> &'static str {
        match self {
            Kind::Undefined => "undefined",
            Kind::Null => "null",
            Kind::String => "string",
            Kind::Number => "number",
            Kind::Object => "object",
            Kind::Array => "array",
            Kind::True => "true",
            Kind::False => "false",
            Kind::Byte => "byte",
            Kind::Int32 => "int32",
            Kind::Int64 => "int64",
            Kind::Date => "date",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags() {
        assert_eq!(Kind::Number.tag(), 0x01);
        assert_eq!(Kind::True.tag(), Kind::False.tag());
        assert_eq!(Kind::Undefined.tag(), Kind::Null.tag());
        assert_eq!(Kind::Int64.tag(), 0x12);
    }

    #[test]
    fn booleans_swap_rank() {
        assert!(Kind::False.rank() < Kind::True.rank());
        assert!(Kind::Array.rank() < Kind::False.rank());
        assert!(Kind::True.rank() < Kind::Byte.rank());
        assert!(Kind::Undefined.rank() < Kind::Null.rank());
    }
}
