use crate::bson::DEFAULT_MAX_DEPTH;
use crate::json::HEX_HINT;
use crate::ser::Context;
use crate::{Object, Value};

/// Renders a value as compact JSON text.
///
/// Objects are looked up in `context`; the ones it can't resolve, or that
/// nest deeper than [`DEFAULT_MAX_DEPTH`], print as `(#n)`.
///
/// ```rust
/// use bsonlite::{json, Array, Value};
///
/// let v = Value::Array(Array::from(vec![Value::string("string"), Value::number(1.23)]));
/// assert_eq!(json::to_string(&v, &()), r#"["string",1.23]"#);
/// ```
pub fn to_string(value: &Value, context: &dyn Context) -> String {
    let mut json = Printer::new(context);
    json.value(value);
    json.out
}

/// Renders the members of `object` as a JSON object.
pub fn object_to_string(object: &Object, context: &dyn Context) -> String {
    let mut json = Printer::new(context);
    json.object(object);
    json.out
}

struct Printer<'c> {
    out: String,
    context: &'c dyn Context,
    depth: usize,
}

impl<'c> Printer<'c> {
    fn new(context: &'c dyn Context) -> Self {
        Printer {
            out: String::new(),
            context,
            depth: 0,
        }
    }

    #[inline]
    fn push(&mut self, c: char) {
        self.out.push(c)
    }

    fn push_str(&mut self, s: &str) {
        self.out.push_str(s)
    }

    // Clippy false positive: https://github.com/rust-lang/rust-clippy/issues/5169
    #[allow(clippy::zero_prefixed_literal)]
    fn push_str_escaped(&mut self, value: &str) {
        self.push('"');

        let bytes = value.as_bytes();
        let mut start = 0;

        for (i, &byte) in bytes.iter().enumerate() {
            let escape = ESCAPE[byte as usize];
            if escape == 0 {
                continue;
            }

            if start < i {
                self.push_str(&value[start..i]);
            }

            match escape {
                self::BB => self.push_str("\\b"),
                self::TT => self.push_str("\\t"),
                self::NN => self.push_str("\\n"),
                self::FF => self.push_str("\\f"),
                self::RR => self.push_str("\\r"),
                self::QU => self.push_str("\\\""),
                self::BS => self.push_str("\\\\"),
                _ => {
                    static HEX_DIGITS: [u8; 16] = *b"0123456789abcdef";
                    self.push_str("\\u00");
                    self.push(HEX_DIGITS[(byte >> 4) as usize] as char);
                    self.push(HEX_DIGITS[(byte & 0xF) as usize] as char);
                }
            }

            start = i + 1;
        }

        if start != bytes.len() {
            self.push_str(&value[start..]);
        }

        self.push('"');
    }

    fn undo_comma(&mut self) {
        if self.out.ends_with(',') {
            self.out.pop();
        }
    }

    fn value(&mut self, value: &Value) {
        match value {
            Value::Undefined => self.push_str("undefined"),
            Value::Null => self.push_str("null"),
            Value::Bool(b) => self.push_str(if *b { "true" } else { "false" }),
            Value::Number(n) => {
                if n.is_finite() {
                    self.push_str(ryu::Buffer::new().format_finite(*n))
                } else {
                    self.push_str("null")
                }
            }
            Value::Int32(n) => self.push_str(itoa::Buffer::new().format(*n)),
            Value::Int64(n) | Value::Date(n) => self.push_str(itoa::Buffer::new().format(*n)),
            Value::String(s) => self.push_str_escaped(s),
            Value::Byte(b) => {
                let mut text = String::with_capacity(b.len() * 2 + 1);
                text.push_str(&bintext::hex::encode(b));
                text.push(HEX_HINT);
                self.push_str_escaped(&text);
            }
            Value::Array(array) => {
                self.push('[');
                for element in array {
                    self.value(element);
                    self.push(',');
                }
                self.undo_comma();
                self.push(']');
            }
            Value::Object(r) => {
                let context = self.context;
                match context.object(*r) {
                    Some(object) if self.depth < DEFAULT_MAX_DEPTH => {
                        self.depth += 1;
                        self.object(object);
                        self.depth -= 1;
                    }
                    _ => {
                        self.push_str("(#");
                        self.push_str(itoa::Buffer::new().format(r.index()));
                        self.push(')');
                    }
                }
            }
        }
    }

    fn object(&mut self, object: &Object) {
        self.push('{');
        for (key, value) in object {
            self.push_str_escaped(key);
            self.push(':');
            self.value(value);
            self.push(',');
        }
        self.undo_comma();
        self.push('}');
    }
}

const BB: u8 = b'b'; // \x08
const TT: u8 = b't'; // \x09
const NN: u8 = b'n'; // \x0A
const FF: u8 = b'f'; // \x0C
const RR: u8 = b'r'; // \x0D
const QU: u8 = b'"'; // \x22
const BS: u8 = b'\\'; // \x5C
const U: u8 = b'u'; // \x00...\x1F except the ones above

// Lookup table of escape sequences. A value of b'x' at index i means that byte
// i is escaped as "\x" in JSON. A value of 0 means that byte i is not escaped.
#[rustfmt::skip]
static ESCAPE: [u8; 256] = [
    //  1   2   3   4   5   6   7   8   9   A   B   C   D   E   F
    U,  U,  U,  U,  U,  U,  U,  U, BB, TT, NN,  U, FF, RR,  U,  U, // 0
    U,  U,  U,  U,  U,  U,  U,  U,  U,  U,  U,  U,  U,  U,  U,  U, // 1
    0,  0, QU,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0, // 2
    0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0, // 3
    0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0, // 4
    0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0, BS,  0,  0,  0, // 5
    0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0, // 6
    0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0, // 7
    0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0, // 8
    0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0, // 9
    0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0, // A
    0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0, // B
    0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0, // C
    0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0, // D
    0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0, // E
    0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0, // F
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::HEX_HINT_ESCAPED;
    use crate::{Array, ObjectRef, ObjectTable};

    #[test]
    fn scalars() {
        assert_eq!(to_string(&Value::Null, &()), "null");
        assert_eq!(to_string(&Value::Undefined, &()), "undefined");
        assert_eq!(to_string(&Value::boolean(false), &()), "false");
        assert_eq!(to_string(&Value::int32(-7), &()), "-7");
        assert_eq!(to_string(&Value::int64(1 << 40), &()), "1099511627776");
        assert_eq!(to_string(&Value::date(86400), &()), "86400");
        assert_eq!(to_string(&Value::number(0.5), &()), "0.5");
        assert_eq!(to_string(&Value::number(f64::NAN), &()), "null");
        assert_eq!(to_string(&Value::number(f64::INFINITY), &()), "null");
    }

    #[test]
    fn escapes() {
        let v = Value::string("a\"b\\c\n\u{1}");
        assert_eq!(to_string(&v, &()), r#""a\"b\\c\n\u0001""#);
    }

    #[test]
    fn bytes_carry_the_hint() {
        let text = to_string(&Value::bytes(vec![0x01, 0xAB]), &());
        assert!(text.starts_with('"'));
        assert!(text.ends_with(&format!("{}\"", HEX_HINT_ESCAPED)));
        // two hex digits per byte, quotes and the escaped hint
        assert_eq!(text.len(), 4 + 2 + HEX_HINT_ESCAPED.len());
        assert_eq!(to_string(&Value::bytes(vec![]), &()), format!("\"{}\"", HEX_HINT_ESCAPED));
    }

    #[test]
    fn arrays() {
        assert_eq!(to_string(&Value::array(0), &()), "[]");
        assert_eq!(to_string(&Value::array(2), &()), "[undefined,undefined]");
        let nested = Value::Array(Array::from(vec![Value::array(0), Value::int32(1)]));
        assert_eq!(to_string(&nested, &()), "[[],1]");
    }

    #[test]
    fn objects() {
        let mut table = ObjectTable::new();
        let mut object = Object::new();
        object.insert("b".to_owned(), Value::int32(2));
        object.insert("a\n".to_owned(), Value::Null);
        let r = table.insert(object);

        assert_eq!(to_string(&Value::object(r), &table), r#"{"a\n":null,"b":2}"#);
        assert_eq!(to_string(&Value::object(r), &()), "(#0)");
        assert_eq!(object_to_string(&Object::new(), &()), "{}");
        assert_eq!(to_string(&Value::object(ObjectRef::new(9)), &table), "(#9)");
    }

    #[test]
    fn self_reference_is_cut() {
        let mut table = ObjectTable::new();
        let r = table.insert(Object::new());
        if let Some(object) = table.get_mut(r) {
            object.insert("me".to_owned(), Value::object(r));
        }
        let text = to_string(&Value::object(r), &table);
        assert!(text.starts_with(r#"{"me":{"me":"#));
        assert!(text.contains("(#0)"));
        assert_eq!(text.matches('{').count(), DEFAULT_MAX_DEPTH);
    }
}
