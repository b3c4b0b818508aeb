//! String intern tables.
//!
//! [`StringTable`] is the decode side: entries are decoded once and cells
//! hold shared clones. [`Interner`] is the encode side: it assigns indices in
//! first-seen order.

use std::sync::Arc;

use hashbrown::HashMap;

/// Decoded intern table.
#[derive(Debug, Clone, Default)]
pub struct StringTable {
    entries: Vec<Arc<str>>,
}

impl StringTable {
    /// Create an empty table with room for `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Append an entry.
    pub fn push(&mut self, entry: Arc<str>) {
        self.entries.push(entry);
    }

    /// Look up an entry by wire index.
    #[must_use]
    pub fn get(&self, index: u32) -> Option<&Arc<str>> {
        self.entries.get(index as usize)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in index order.
    pub fn iter(&self) -> std::slice::Iter<'_, Arc<str>> {
        self.entries.iter()
    }
}

/// Assigns stable indices to strings.
///
/// The first occurrence of a string gets the next free index; later
/// occurrences reuse it. Each distinct string is allocated once and shared
/// between the lookup map and the ordered entry list.
#[derive(Debug, Clone, Default)]
pub struct Interner {
    entries: Vec<Arc<str>>,
    indices: HashMap<Arc<str>, u32>,
}

impl Interner {
    /// Create an interner with room for `capacity` distinct strings.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            indices: HashMap::with_capacity(capacity),
        }
    }

    /// Return the index for `value`, adding it if unseen.
    ///
    /// Indices are `u32` on the wire; the count is checked against that
    /// bound when the table is written.
    pub fn intern(&mut self, value: &str) -> u32 {
        if let Some(&index) = self.indices.get(value) {
            return index;
        }
        let index = self.entries.len() as u32;
        let entry: Arc<str> = Arc::from(value);
        self.indices.insert(Arc::clone(&entry), index);
        self.entries.push(entry);
        index
    }

    /// Return the shared entry for `value`, adding it if unseen.
    pub fn intern_arc(&mut self, value: &str) -> Arc<str> {
        let index = self.intern(value);
        Arc::clone(&self.entries[index as usize])
    }

    /// Number of distinct strings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing has been interned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in index order.
    #[must_use]
    pub fn entries(&self) -> &[Arc<str>] {
        &self.entries
    }

    /// Forget all strings, keeping allocated capacity.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.indices.clear();
    }
}
