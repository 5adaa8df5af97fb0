use std::convert::TryFrom;

use log::debug;
use simd_json::{Node, StaticNode};

use crate::bson::DEFAULT_MAX_DEPTH;
use crate::de::Context;
use crate::error::{Error, Result};
use crate::json::HEX_HINT;
use crate::{Array, Object, ObjectRef, Value};

/// Parses JSON text into a value.
///
/// Objects are stored in `context` and come back as handles. Integers that
/// fit an `i32` become `Int32`, other integers `Int64`; anything else
/// numeric is a `Number`. Strings ending with [`HEX_HINT`] are hex encoded
/// bytes.
///
/// Malformed text fails with [`Error::InvalidText`]. Nesting deeper than
/// [`DEFAULT_MAX_DEPTH`] fails with [`Error::DepthLimitExceeded`] and context
/// errors such as [`Error::NoObjectTable`] are passed through, the same as
/// the binary reader.
///
/// ```rust
/// use bsonlite::{json, ObjectTable};
///
/// let mut table = ObjectTable::new();
/// let v = json::from_str(r#" {"code": 200, "message": "reminiscent of BSON"} "#, &mut table)?;
/// let object = table.get(v.as_object().unwrap()).unwrap();
/// assert_eq!(object["code"].as_i32(), Some(200));
/// # Ok::<(), bsonlite::Error>(())
/// ```
pub fn from_str(j: &str, context: &mut dyn Context) -> Result<Value> {
    // simd-json works in place
    let mut bytes = j.as_bytes().to_vec();
    let tape = simd_json::to_tape(&mut bytes).map_err(|e| {
        debug!("json rejected: {:?}", e);
        Error::InvalidText
    })?;

    // Some tape layouts lead with a placeholder root
    let start = match tape.first() {
        Some(Node::Static(StaticNode::Null)) if tape.len() > 1 => 1,
        _ => 0,
    };

    let mut de = Deserializer {
        tape: &tape,
        i: start,
        depth: 0,
        inserted: Vec::new(),
    };
    let result = de.value(context).and_then(|value| {
        // All input was consumed
        if de.i == tape.len() {
            Ok(value)
        } else {
            Err(Error::InvalidText)
        }
    });
    if let Err(e) = &result {
        debug!(
            "json read failed at node {}: {}; discarding {} objects",
            de.i,
            e,
            de.inserted.len()
        );
        context.discard(&de.inserted);
    }
    result
}

struct Deserializer<'t, 'a> {
    tape: &'t [Node<'a>],
    i: usize,
    depth: usize,
    inserted: Vec<ObjectRef>,
}

impl<'t, 'a> Deserializer<'t, 'a> {
    fn next(&mut self) -> Result<&'t Node<'a>> {
        let tape: &'t [Node<'a>] = self.tape;
        let node = tape.get(self.i).ok_or(Error::InvalidText)?;
        self.i += 1;
        Ok(node)
    }

    fn value(&mut self, context: &mut dyn Context) -> Result<Value> {
        let value = match self.next()? {
            Node::Static(StaticNode::Null) => Value::Null,
            Node::Static(StaticNode::Bool(b)) => Value::Bool(*b),
            Node::Static(StaticNode::I64(n)) => match i32::try_from(*n) {
                Ok(n) => Value::Int32(n),
                Err(_) => Value::Int64(*n),
            },
            Node::Static(StaticNode::U64(n)) => {
                if let Ok(n) = i32::try_from(*n) {
                    Value::Int32(n)
                } else if let Ok(n) = i64::try_from(*n) {
                    Value::Int64(n)
                } else {
                    Value::Number(*n as f64)
                }
            }
            Node::Static(StaticNode::F64(n)) => Value::Number(*n),
            Node::String(s) => string(s)?,
            Node::Array(len, _) => {
                let len = *len;
                self.enter()?;
                let mut array = Array::new();
                array.reserve(len);
                for _ in 0..len {
                    array.push(self.value(context)?);
                }
                self.depth -= 1;
                Value::Array(array)
            }
            Node::Object(len, _) => {
                let len = *len;
                self.enter()?;
                let mut object = Object::new();
                for _ in 0..len {
                    let key = match self.next()? {
                        Node::String(s) => s.to_string(),
                        _ => return Err(Error::InvalidText),
                    };
                    let value = self.value(context)?;
                    object.insert(key, value);
                }
                self.depth -= 1;
                let r = context.insert(object)?;
                self.inserted.push(r);
                Value::Object(r)
            }
            #[allow(unreachable_patterns)]
            _ => return Err(Error::InvalidText),
        };
        Ok(value)
    }

    fn enter(&mut self) -> Result<()> {
        if self.depth >= DEFAULT_MAX_DEPTH {
            return Err(Error::DepthLimitExceeded);
        }
        self.depth += 1;
        Ok(())
    }
}

fn string(s: &str) -> Result<Value> {
    if s.ends_with(HEX_HINT) {
        let c = s.len() - HEX_HINT.len_utf8();
        let b = bintext::hex::decode(&s[..c]).map_err(|_| Error::InvalidText)?;
        Ok(Value::bytes(&b[..]))
    } else {
        Ok(Value::string(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::to_string;
    use crate::ObjectTable;

    #[test]
    fn scalars() {
        assert!(from_str("null", &mut ()).unwrap().is_null());
        assert_eq!(from_str("true", &mut ()), Ok(Value::boolean(true)));
        assert_eq!(from_str("7", &mut ()), Ok(Value::int32(7)));
        assert_eq!(from_str("-3000000000", &mut ()), Ok(Value::int64(-3_000_000_000)));
        assert_eq!(from_str("0.5", &mut ()), Ok(Value::number(0.5)));
        assert_eq!(from_str(r#""a\nb""#, &mut ()), Ok(Value::string("a\nb")));
    }

    #[test]
    fn nested() {
        let mut table = ObjectTable::new();
        let v = from_str(r#"{"a": [1, "x", false, []], "b": {"c": null}}"#, &mut table).unwrap();
        assert_eq!(table.len(), 2);

        let root = table.get(v.as_object().unwrap()).unwrap();
        let a = root["a"].as_array().unwrap();
        assert_eq!(a.len(), 4);
        assert_eq!(a[0], Value::int32(1));
        assert_eq!(a[1], Value::string("x"));
        assert_eq!(a[2], Value::boolean(false));
        assert_eq!(a[3].as_array().map(|a| a.len()), Some(0));

        let b = table.get(root["b"].as_object().unwrap()).unwrap();
        assert!(b["c"].is_null());
    }

    #[test]
    fn bytes_round_trip() {
        let v = Value::bytes(vec![0, 1, 0x7F, 0xFF]);
        let text = to_string(&v, &());
        assert_eq!(from_str(&text, &mut ()), Ok(v));
    }

    #[test]
    fn objects_need_a_table() {
        assert_eq!(from_str("{}", &mut ()), Err(Error::NoObjectTable));
    }

    #[test]
    fn invalid() {
        assert_eq!(from_str("[1, 2", &mut ()), Err(Error::InvalidText));
        assert_eq!(from_str("{\"a\" 1}", &mut ()), Err(Error::InvalidText));
        assert_eq!(from_str("", &mut ()), Err(Error::InvalidText));
    }

    #[test]
    fn depth_limit() {
        let deep = |n: usize| format!("{}{}", "[".repeat(n), "]".repeat(n));
        assert!(from_str(&deep(DEFAULT_MAX_DEPTH), &mut ()).is_ok());
        assert_eq!(
            from_str(&deep(DEFAULT_MAX_DEPTH + 1), &mut ()),
            Err(Error::DepthLimitExceeded)
        );
    }

    #[test]
    fn failure_discards_stored_objects() {
        let mut table = ObjectTable::new();
        table.insert(Object::new());
        // the second element isn't valid hex
        let j = r#"[{"a": 1}, "zz\u0011"]"#;
        assert_eq!(from_str(j, &mut table), Err(Error::InvalidText));
        assert_eq!(table.len(), 1);
    }
}
