//! Stateless structural algorithms over property stores: spread-style merge,
//! destructuring with rest collection, and computed-key construction. None of
//! this knows anything about classes.

use crate::error::Fault;
use crate::runtime::store::PropertyStore;
use crate::types::{Key, ObjRef, Value, number_to_string};
use rustc_hash::FxHashMap;

/// Shallow left-to-right combination. A key defined by several inputs takes
/// its value from the last one and its position from the first. The result
/// is always a fresh store; later mutation of a source is not observed.
pub fn merge_stores<'a>(stores: impl IntoIterator<Item = &'a PropertyStore>) -> PropertyStore {
    let mut out = PropertyStore::new();
    for store in stores {
        for (key, value) in store.iter() {
            out.set(key.clone(), value.clone());
        }
    }
    out
}

/// [`merge_stores`] over object handles, yielding a new object.
pub fn merge<'a>(sources: impl IntoIterator<Item = &'a ObjRef>) -> ObjRef {
    let mut out = PropertyStore::new();
    for source in sources {
        let store = source.borrow_store();
        for (key, value) in store.iter() {
            out.set(key.clone(), value.clone());
        }
    }
    ObjRef::from_store(out)
}

/// Splits a store into the requested bindings and the rest. Every requested
/// name is bound (absent names bind `Undefined`); the rest keeps all other
/// entries in their original order.
pub fn destructure_store(
    store: &PropertyStore,
    names: &[Key],
) -> (FxHashMap<Key, Value>, PropertyStore) {
    let mut bindings = FxHashMap::default();
    for name in names {
        bindings.insert(name.clone(), store.get(name));
    }
    let mut rest = PropertyStore::new();
    for (key, value) in store.iter() {
        if !names.contains(key) {
            rest.set(key.clone(), value.clone());
        }
    }
    (bindings, rest)
}

/// [`destructure_store`] over an object handle; the rest comes back as a new
/// object.
pub fn destructure(source: &ObjRef, names: &[Key]) -> (FxHashMap<Key, Value>, ObjRef) {
    let (bindings, rest) = destructure_store(&source.borrow_store(), names);
    (bindings, ObjRef::from_store(rest))
}

/// Evaluated `[expr]: value` entry. Strings and symbols are keys as-is;
/// numbers, booleans and undefined coerce to their string form. Objects and
/// functions are refused: the key semantics for non-primitive values are
/// deliberately unsupported.
pub fn computed_entry(key_val: &Value, value: Value) -> Result<(Key, Value), Fault> {
    let key = match key_val {
        Value::String(s) => Key::Str(s.clone()),
        Value::Symbol(sym) => Key::Sym(sym.clone()),
        Value::Number(n) => Key::Str(number_to_string(*n)),
        Value::Boolean(b) => Key::Str(b.to_string()),
        Value::Undefined => Key::Str("undefined".to_string()),
        Value::Object(_) | Value::Function(_) => {
            return Err(Fault::InvalidKey(key_val.type_name()));
        }
    };
    Ok((key, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(entries: &[(&str, f64)]) -> PropertyStore {
        PropertyStore::from_entries(
            entries
                .iter()
                .map(|(k, v)| (Key::from(*k), Value::Number(*v))),
        )
    }

    fn key_names(store: &PropertyStore) -> Vec<String> {
        store.keys().map(|k| k.to_string()).collect()
    }

    #[test]
    fn merge_last_write_wins() {
        let merged = merge_stores(&[store(&[("a", 1.0)]), store(&[("a", 2.0)])]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged.get(&Key::from("a")), Value::Number(2.0));
    }

    #[test]
    fn merge_orders_by_first_occurrence() {
        let merged = merge_stores(&[
            store(&[("a", 1.0), ("b", 1.0)]),
            store(&[("b", 2.0)]),
            store(&[("a", 3.0)]),
        ]);
        assert_eq!(key_names(&merged), ["a", "b"]);
        assert_eq!(merged.get(&Key::from("a")), Value::Number(3.0));
        assert_eq!(merged.get(&Key::from("b")), Value::Number(2.0));
    }

    #[test]
    fn merge_copies_rather_than_aliases() {
        let salute = ObjRef::new();
        salute.set("hello", Value::str("world"));
        let copy = merge([&salute]);

        salute.set("hello", Value::str("catelyn"));
        assert_eq!(copy.get("hello"), Value::str("world"));
    }

    #[test]
    fn destructure_splits_bindings_from_rest() {
        let mut main = PropertyStore::new();
        main.set(Key::from("peter"), Value::str("tyrion"));
        main.set(Key::from("kit"), Value::str("jon"));

        let (bindings, rest) = destructure_store(&main, &[Key::from("peter")]);
        assert_eq!(bindings[&Key::from("peter")], Value::str("tyrion"));
        assert_eq!(key_names(&rest), ["kit"]);
        assert_eq!(rest.get(&Key::from("kit")), Value::str("jon"));
    }

    #[test]
    fn destructure_binds_missing_names_to_undefined() {
        let (bindings, rest) = destructure_store(&store(&[("a", 1.0)]), &[Key::from("zz")]);
        assert_eq!(bindings[&Key::from("zz")], Value::Undefined);
        assert_eq!(rest.len(), 1);
    }

    #[test]
    fn computed_keys_coerce_primitives_to_strings() {
        let (key, _) = computed_entry(&Value::Number(123.0), Value::Undefined).unwrap();
        assert_eq!(key, Key::from("123"));
        let (key, _) = computed_entry(&Value::Boolean(true), Value::Undefined).unwrap();
        assert_eq!(key, Key::from("true"));
        let (key, _) = computed_entry(&Value::str("sophie"), Value::Undefined).unwrap();
        assert_eq!(key, Key::from("sophie"));
    }

    #[test]
    fn computed_keys_refuse_objects() {
        let err = computed_entry(&Value::object(), Value::Undefined).unwrap_err();
        assert_eq!(err, Fault::InvalidKey("object"));
    }
}
