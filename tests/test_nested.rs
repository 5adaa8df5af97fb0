use bsonlite::bson::{Reader, Writer, DEFAULT_MAX_DEPTH};
use bsonlite::{Array, Error, Object, Value};

fn nested(depth: usize) -> Value {
    let mut v = Value::array(0);
    for _ in 0..depth {
        let mut outer = Array::new();
        outer.push(v);
        v = Value::Array(outer);
    }
    v
}

#[test]
fn test_drop_deeply_nested() {
    let v = nested(100_000);
    drop(v);
}

#[test]
fn test_depth_limit_round_trip() {
    let mut object = Object::new();
    object.insert("x".to_owned(), nested(DEFAULT_MAX_DEPTH + 10));

    assert_eq!(
        bsonlite::bson::to_vec(&object, &()),
        Err(Error::DepthLimitExceeded)
    );

    let mut writer = Writer::new(&()).max_depth(DEFAULT_MAX_DEPTH * 2);
    writer.write_document(&object).unwrap();
    let bin = writer.into_vec();

    assert_eq!(
        bsonlite::bson::from_slice(&bin, &mut ()),
        Err(Error::DepthLimitExceeded)
    );

    let mut reader = Reader::new(&bin).max_depth(DEFAULT_MAX_DEPTH * 2);
    let out = reader.read_document(&mut ()).unwrap();
    assert!(reader.remaining().is_empty());
    assert_eq!(out["x"].kind(), bsonlite::Kind::Array);
}
