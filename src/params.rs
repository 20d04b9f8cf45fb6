//! Parameter tracker (C4).
//!
//! One [`ParamTracker`] per statement. Assigns each distinct `@name` a
//! positional index in order of first appearance (starting at 1) and
//! returns that same index on every later occurrence of the same name.

use std::collections::HashMap;

/// Per-statement parameter interning table. Simultaneously a name→index map
/// and an index→name map, per spec.md §3.
#[derive(Debug, Default, Clone)]
pub struct ParamTracker {
    names: Vec<String>,
    index_of: HashMap<String, usize>,
}

impl ParamTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns `name`, returning its 1-based positional index. Repeated
    /// calls with the same name always return the same index.
    pub fn intern(&mut self, name: &str) -> usize {
        if let Some(&idx) = self.index_of.get(name) {
            return idx;
        }
        self.names.push(name.to_string());
        let idx = self.names.len();
        self.index_of.insert(name.to_string(), idx);
        idx
    }

    /// Reverse lookup used by downstream code emission.
    pub fn by_index(&self, i: usize) -> Option<&str> {
        self.names.get(i.checked_sub(1)?).map(String::as_str)
    }

    /// Number of distinct parameter names interned so far.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
