use crate::Value;

/// Drops `value` without recursing on the call stack, however deeply its
/// arrays nest.
pub(crate) fn safely(value: Value) {
    match value {
        Value::Array(_) => {}
        _ => return,
    }

    let mut stack = Vec::new();
    stack.push(value);
    while let Some(value) = stack.pop() {
        if let Value::Array(array) = value {
            stack.extend(array);
        }
    }
}
