use std::collections::HashMap;
use std::fmt;
use std::fmt::{Debug, Formatter};

use crate::runner::ds::object::ObjectRef;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TableKey {
    Integer(i64),
    Text(String),
}

/// Insertion-ordered key-value container, usable as a dense array through
/// sequential integer keys.
pub struct Table {
    entries: Vec<(TableKey, ObjectRef)>,
    index: HashMap<TableKey, usize>,
}

impl Table {
    pub fn new() -> Self {
        Table {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &TableKey) -> Option<&ObjectRef> {
        self.index.get(key).map(|position| &self.entries[*position].1)
    }

    /// Insert or update; an existing key keeps its position.
    pub fn set(&mut self, key: TableKey, value: ObjectRef) {
        match self.index.get(&key) {
            Some(&position) => self.entries[position].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    /// Append with the next integer key, starting at 1. Explicit `set`
    /// calls may have created sparse regions; append keying stays dense
    /// over the entry count.
    pub fn push(&mut self, value: ObjectRef) -> TableKey {
        let key = TableKey::Integer(self.entries.len() as i64 + 1);
        self.set(key.clone(), value);
        key
    }

    pub fn iter(&self) -> impl Iterator<Item = &(TableKey, ObjectRef)> {
        self.entries.iter()
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Table {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "table[{}]", self.entries.len())
    }
}
