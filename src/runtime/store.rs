use crate::types::{Key, Value};
use rustc_hash::FxHashMap;

/// Ordered key/value container backing every object.
///
/// Iteration order is first-insertion order and survives overwrites of
/// existing keys. Deleting a key frees its order slot; re-adding it later
/// appends it at the end like any new key.
#[derive(Clone, Debug, Default)]
pub struct PropertyStore {
    entries: FxHashMap<Key, Value>,
    order: Vec<Key>,
}

impl PropertyStore {
    pub fn new() -> PropertyStore {
        PropertyStore::default()
    }

    /// Builds a store by applying `set` left to right, so duplicate keys
    /// follow the same overwrite-in-place rule as everywhere else.
    pub fn from_entries(entries: impl IntoIterator<Item = (Key, Value)>) -> PropertyStore {
        let mut store = PropertyStore::new();
        for (key, value) in entries {
            store.set(key, value);
        }
        store
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn has(&self, key: &Key) -> bool {
        self.entries.contains_key(key)
    }

    /// Absent keys read as `Undefined`; this is never an error.
    pub fn get(&self, key: &Key) -> Value {
        self.entries.get(key).cloned().unwrap_or(Value::Undefined)
    }

    pub fn set(&mut self, key: Key, value: Value) {
        if self.entries.insert(key.clone(), value).is_none() {
            self.order.push(key);
        }
    }

    pub fn delete(&mut self, key: &Key) -> bool {
        if self.entries.remove(key).is_some() {
            self.order.retain(|k| k != key);
            true
        } else {
            false
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.order.iter()
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.order.iter().map(|k| &self.entries[k])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Value)> {
        self.order.iter().map(|k| (k, &self.entries[k]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_names(store: &PropertyStore) -> Vec<String> {
        store.keys().map(|k| k.to_string()).collect()
    }

    #[test]
    fn keys_come_back_in_insertion_order() {
        let mut store = PropertyStore::new();
        store.set(Key::from("hello"), Value::str("world"));
        store.set(Key::from("all"), Value::Number(42.0));
        assert_eq!(key_names(&store), ["hello", "all"]);
        let values: Vec<Value> = store.values().cloned().collect();
        assert_eq!(values, [Value::str("world"), Value::Number(42.0)]);
    }

    #[test]
    fn overwrite_keeps_the_original_position() {
        let mut store = PropertyStore::new();
        store.set(Key::from("a"), Value::Number(1.0));
        store.set(Key::from("b"), Value::Number(2.0));
        store.set(Key::from("a"), Value::Number(3.0));
        assert_eq!(key_names(&store), ["a", "b"]);
        assert_eq!(store.get(&Key::from("a")), Value::Number(3.0));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn absent_key_reads_as_undefined() {
        let store = PropertyStore::new();
        assert_eq!(store.get(&Key::from("missing")), Value::Undefined);
    }

    #[test]
    fn delete_then_re_add_moves_to_the_end() {
        let mut store = PropertyStore::new();
        store.set(Key::from("a"), Value::Number(1.0));
        store.set(Key::from("b"), Value::Number(2.0));
        store.set(Key::from("c"), Value::Number(3.0));

        assert!(store.delete(&Key::from("a")));
        assert_eq!(key_names(&store), ["b", "c"]);

        store.set(Key::from("a"), Value::Number(4.0));
        assert_eq!(key_names(&store), ["b", "c", "a"]);
    }

    #[test]
    fn delete_of_absent_key_is_a_no_op() {
        let mut store = PropertyStore::new();
        store.set(Key::from("a"), Value::Number(1.0));
        assert!(!store.delete(&Key::from("b")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn from_entries_applies_duplicates_in_place() {
        let store = PropertyStore::from_entries([
            (Key::from("x"), Value::Number(1.0)),
            (Key::from("y"), Value::Number(2.0)),
            (Key::from("x"), Value::Number(9.0)),
        ]);
        assert_eq!(key_names(&store), ["x", "y"]);
        assert_eq!(store.get(&Key::from("x")), Value::Number(9.0));
    }
}
