mod call;
mod class;
mod construct;
mod store;
mod structural;

pub use class::{ClassDef, ClassId};
pub use store::PropertyStore;
pub use structural::{computed_entry, destructure, destructure_store, merge, merge_stores};

use crate::types::Symbol;

/// The runtime holds everything that outlives a single call: the class
/// table and the symbol mint. Objects themselves are plain shared handles
/// owned by whoever holds them; the runtime never keeps them alive.
pub struct Runtime {
    pub(crate) classes: Vec<class::ClassSlot>,
    next_symbol_id: u64,
}

impl Runtime {
    pub fn new() -> Runtime {
        Runtime {
            classes: Vec::new(),
            next_symbol_id: 1,
        }
    }

    /// Mints a fresh symbol. Two symbols are never equal, whatever their
    /// descriptions say.
    pub fn symbol(&mut self, description: Option<&str>) -> Symbol {
        let id = self.next_symbol_id;
        self.next_symbol_id += 1;
        Symbol::new(id, description)
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Runtime::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_are_unique_even_with_equal_descriptions() {
        let mut rt = Runtime::new();
        let a = rt.symbol(Some("token"));
        let b = rt.symbol(Some("token"));
        assert_ne!(a, b);
        assert_eq!(a.clone(), a);
        assert_eq!(a.description(), Some("token"));
    }
}
