use dynobj::{Key, Value};

/// Deep structural comparison for assertions: objects compare by key set
/// (order-insensitive) and recursive value equality, everything else by the
/// runtime's own strict equality.
pub fn structural_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Object(x), Value::Object(y)) => {
            if x.len() != y.len() {
                return false;
            }
            x.keys()
                .iter()
                .all(|k| y.has(k) && structural_eq(&x.get(k.clone()), &y.get(k.clone())))
        }
        _ => a == b,
    }
}

pub fn assert_structural_eq(a: &Value, b: &Value) {
    assert!(structural_eq(a, b), "expected {a:?} to equal {b:?}");
}

/// Object literal shorthand for string-keyed fixtures.
pub fn bag(entries: &[(&str, Value)]) -> Value {
    Value::object_from(
        entries
            .iter()
            .map(|(k, v)| (Key::from(*k), v.clone())),
    )
}
