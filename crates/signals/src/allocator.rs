//! Stable first-seen id assignment for names.

use indexmap::IndexSet;

/// Assigns consecutive ids `0, 1, 2, …` to names in the order they are first seen.
///
/// The id of a name never changes once assigned. Collecting the names back
/// with [`NameIndexAllocator::into_names`] yields them in id order, so the
/// position of each name is its id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NameIndexAllocator {
    names: IndexSet<String>,
}

impl NameIndexAllocator {
    /// Creates an empty allocator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id of `name`, assigning the next free id on first sight.
    pub fn index_of(&mut self, name: &str) -> usize {
        if let Some(id) = self.names.get_index_of(name) {
            return id;
        }
        self.names.insert_full(name.to_owned()).0
    }

    /// Returns the id of `name` if it has been assigned.
    pub fn get(&self, name: &str) -> Option<usize> {
        self.names.get_index_of(name)
    }

    /// Returns the name assigned to `id`.
    pub fn name(&self, id: usize) -> Option<&str> {
        self.names.get_index(id).map(String::as_str)
    }

    /// Number of distinct names seen.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if no name has been assigned yet.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterates names in id order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Consumes the allocator, returning the names indexed by id.
    pub fn into_names(self) -> Vec<String> {
        self.names.into_iter().collect()
    }
}
