use bsonlite::{json, Array, Object, ObjectTable, Value};

#[test]
fn test_json_is_valid_json() {
    let mut table = ObjectTable::new();
    let mut inner = Object::new();
    inner.insert("quote\"d".to_owned(), Value::string("tab\there\u{7}"));
    let inner = table.insert(inner);

    let v = Value::Array(Array::from(vec![
        Value::Null,
        Value::boolean(true),
        Value::number(-1.5),
        Value::number(f64::NAN),
        Value::int64(i64::MIN),
        Value::date(1_600_000_000),
        Value::bytes(vec![0xDE, 0xAD]),
        Value::object(inner),
    ]));

    let text = json::to_string(&v, &table);
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();

    let items = parsed.as_array().unwrap();
    assert_eq!(items.len(), 8);
    assert!(items[0].is_null());
    assert_eq!(items[1], serde_json::Value::Bool(true));
    assert_eq!(items[2].as_f64(), Some(-1.5));
    assert!(items[3].is_null());
    assert_eq!(items[4].as_i64(), Some(i64::MIN));
    assert_eq!(items[5].as_i64(), Some(1_600_000_000));
    assert!(items[6].as_str().unwrap().ends_with(json::HEX_HINT));
    assert_eq!(items[7]["quote\"d"], "tab\there\u{7}");
}

#[test]
#[cfg(feature = "simd")]
fn test_json_round_trip() {
    let j = r#"{"a":[1,-3000000000,0.25,"x",null,true],"b":{"c":"\u0001"},"d":[]}"#;

    let mut table = ObjectTable::new();
    let v = json::from_str(j, &mut table).unwrap();
    assert_eq!(json::to_string(&v, &table), j);
    assert_eq!(table.len(), 2);
}
