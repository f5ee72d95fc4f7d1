//! The variable table and its input preprocessor.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use tracing::debug;

use fprompt_core::pipeline::Preprocessor;
use fprompt_core::value::Value;

/// Named values captured during a session.
///
/// Clones share the same storage, so the lookup preprocessor and the menu
/// entries all see every write. Names are non-empty and alphabetic.
#[derive(Debug, Clone, Default)]
pub struct MemoryTable {
    values: Rc<RefCell<BTreeMap<String, Value>>>,
}

impl MemoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `name` can be used as a variable name.
    pub fn is_valid_name(name: &str) -> bool {
        !name.is_empty() && name.chars().all(char::is_alphabetic)
    }

    /// Stores `value` under `name`, replacing any previous value.
    ///
    /// Returns `false` without storing if the name is not valid.
    pub fn store(&self, name: &str, value: Value) -> bool {
        if !Self::is_valid_name(name) {
            return false;
        }
        debug!(name, kind = value.kind(), "stored in memory");
        self.values.borrow_mut().insert(name.to_string(), value);
        true
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.values.borrow().get(name).cloned()
    }

    /// Every variable, sorted by name.
    pub fn entries(&self) -> Vec<(String, Value)> {
        self.values
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }
}

/// Substitutes stored variables for their names at any input prompt.
#[derive(Debug, Clone)]
pub struct MemoryLookup {
    table: MemoryTable,
}

impl MemoryLookup {
    pub fn new(table: MemoryTable) -> Self {
        Self { table }
    }
}

impl Preprocessor for MemoryLookup {
    fn name(&self) -> &str {
        "memory"
    }

    fn preprocess(&self, raw: &str) -> Option<Value> {
        self.table.get(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn names_must_be_alphabetic() {
        assert!(MemoryTable::is_valid_name("rate"));
        assert!(MemoryTable::is_valid_name("X"));
        assert!(!MemoryTable::is_valid_name(""));
        assert!(!MemoryTable::is_valid_name("x1"));
        assert!(!MemoryTable::is_valid_name("my rate"));
        assert!(!MemoryTable::is_valid_name("a_b"));
    }

    #[test]
    fn store_overwrites_and_is_shared_between_clones() {
        let table = MemoryTable::new();
        let view = table.clone();
        assert!(table.store("x", Value::Float(1.0)));
        assert!(table.store("x", Value::List(vec![2.0])));
        assert!(!table.store("9", Value::Int(9)));

        assert_eq!(view.get("x"), Some(Value::List(vec![2.0])));
        assert_eq!(view.len(), 1);
    }

    #[test]
    fn lookup_only_answers_for_stored_names() {
        let table = MemoryTable::new();
        table.store("rate", Value::Float(0.05));
        let lookup = MemoryLookup::new(table);

        assert_eq!(lookup.preprocess("rate"), Some(Value::Float(0.05)));
        assert_eq!(lookup.preprocess("0.05"), None);
        assert_eq!(lookup.preprocess("Rate"), None);
    }
}
