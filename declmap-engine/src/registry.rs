//! Declaration registry - the committed state carried between passes.
//!
//! Maps each live id to the declaration it was last reconciled against and
//! the instance its mapping produced. Entries remember the order they were
//! inserted in, so iteration, sweeps and clears are deterministic.

use crate::mapping::AnyMapped;
use crate::Declaration;
use std::collections::HashMap;
use std::fmt;

/// One live declaration and its mapped instance.
pub struct Entry<D> {
    declaration: D,
    mapped: AnyMapped,
    rank: u64,
}

impl<D> Entry<D> {
    /// Returns the declaration this entry was last reconciled against.
    pub fn declaration(&self) -> &D {
        &self.declaration
    }

    /// Returns the mapped instance if it has type `M`.
    pub fn mapped<M: 'static>(&self) -> Option<&M> {
        self.mapped.downcast_ref::<M>()
    }

    pub(crate) fn into_parts(self) -> (D, AnyMapped) {
        (self.declaration, self.mapped)
    }
}

impl<D: fmt::Debug> fmt::Debug for Entry<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("declaration", &self.declaration)
            .field("rank", &self.rank)
            .finish_non_exhaustive()
    }
}

/// Live entries keyed by declaration id.
pub struct Registry<D: Declaration> {
    entries: HashMap<D::Id, Entry<D>>,
    next_rank: u64,
}

impl<D: Declaration> Default for Registry<D> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            next_rank: 0,
        }
    }
}

impl<D: Declaration> Registry<D> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
            next_rank: 0,
        }
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is live.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if `id` is live.
    pub fn contains(&self, id: &D::Id) -> bool {
        self.entries.contains_key(id)
    }

    /// Gets the entry for `id`.
    pub fn get(&self, id: &D::Id) -> Option<&Entry<D>> {
        self.entries.get(id)
    }

    /// Gets the declaration last applied for `id`.
    pub fn declaration(&self, id: &D::Id) -> Option<&D> {
        self.get(id).map(Entry::declaration)
    }

    /// Gets the mapped instance for `id` if it has type `M`.
    pub fn mapped<M: 'static>(&self, id: &D::Id) -> Option<&M> {
        self.get(id).and_then(Entry::mapped::<M>)
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&D::Id, &Entry<D>)> {
        let mut entries: Vec<_> = self.entries.iter().collect();
        entries.sort_by_key(|(_, entry)| entry.rank);
        entries.into_iter()
    }

    /// Iterates live ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &D::Id> {
        self.iter().map(|(id, _)| id)
    }

    pub(crate) fn insert(&mut self, id: D::Id, declaration: D, mapped: AnyMapped) {
        let rank = self.next_rank;
        self.next_rank += 1;
        self.entries.insert(
            id,
            Entry {
                declaration,
                mapped,
                rank,
            },
        );
    }

    pub(crate) fn remove(&mut self, id: &D::Id) -> Option<Entry<D>> {
        self.entries.remove(id)
    }

    /// Consumes the registry, yielding entries in insertion order.
    pub(crate) fn into_ordered(self) -> std::vec::IntoIter<(D::Id, Entry<D>)> {
        let mut entries: Vec<_> = self.entries.into_iter().collect();
        entries.sort_by_key(|(_, entry)| entry.rank);
        entries.into_iter()
    }

    /// Appends `entries` after the current ones, keeping their relative order.
    pub(crate) fn extend(&mut self, entries: impl IntoIterator<Item = (D::Id, Entry<D>)>) {
        for (id, entry) in entries {
            let (declaration, mapped) = entry.into_parts();
            self.insert(id, declaration, mapped);
        }
    }
}

impl<D: Declaration> fmt::Debug for Registry<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(id, entry)| (id, entry.declaration.kind())))
            .finish()
    }
}
