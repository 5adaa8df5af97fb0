use std::cmp::Ordering;

use bsonlite::{Array, Kind, ObjectRef, Value};

fn values() -> Vec<Value> {
    vec![
        Value::date(3),
        Value::int64(-1),
        Value::boolean(true),
        Value::string("b"),
        Value::Null,
        Value::number(f64::NAN),
        Value::bytes(vec![1]),
        Value::object(ObjectRef::new(2)),
        Value::Undefined,
        Value::int32(4),
        Value::boolean(false),
        Value::number(-0.0),
        Value::Array(Array::from(vec![Value::int32(1)])),
        Value::string("a"),
        Value::number(2.5),
        Value::object(ObjectRef::new(1)),
        Value::array(0),
        Value::bytes(vec![]),
        Value::int32(-4),
        Value::number(0.0),
    ]
}

#[test]
fn test_less_than_is_a_strict_weak_order() {
    let values = values();
    for a in &values {
        assert!(!a.less_than(a), "{:?} < itself", a);
        for b in &values {
            if a.less_than(b) {
                assert!(!b.less_than(a), "{:?} and {:?} both less", a, b);
            }
            for c in &values {
                if a.less_than(b) && b.less_than(c) {
                    assert!(a.less_than(c), "{:?} < {:?} < {:?}", a, b, c);
                }
            }
        }
    }
}

#[test]
fn test_sorted_by_kind_then_payload() {
    let mut values = values();
    values.sort_by(Value::order);

    for pair in values.windows(2) {
        assert_ne!(pair[0].order(&pair[1]), Ordering::Greater);
    }

    let kinds: Vec<Kind> = values.iter().map(Value::kind).collect();
    assert_eq!(kinds[0], Kind::Undefined);
    assert_eq!(kinds[1], Kind::Null);
    assert_eq!(kinds[kinds.len() - 1], Kind::Date);

    let position = |v: &Value| values.iter().position(|x| x == v).unwrap();
    assert!(position(&Value::string("a")) < position(&Value::string("b")));
    assert!(position(&Value::boolean(false)) < position(&Value::boolean(true)));
    assert!(position(&Value::int32(-4)) < position(&Value::int32(4)));
    // NaN is the last number
    assert!(values[position(&Value::number(2.5)) + 1].as_f64().map_or(false, f64::is_nan));
}

#[test]
fn test_partial_cmp_agrees_with_order() {
    for a in &values() {
        for b in &values() {
            match a.partial_cmp(b) {
                Some(ordering) => assert_eq!(ordering, a.order(b)),
                None => {
                    assert_eq!(a.order(b), Ordering::Equal);
                    assert!(a != b);
                }
            }
        }
    }
}

#[test]
fn test_display() {
    let v = Value::Array(Array::from(vec![Value::string("string"), Value::number(1.23)]));
    assert_eq!(format!("{}", v), r#"["string",1.23]"#);
    assert_eq!(Value::object(ObjectRef::new(3)).to_string(), "(#3)");
}
