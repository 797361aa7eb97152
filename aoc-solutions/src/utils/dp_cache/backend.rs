//! Storage backends for the DP cache.

use std::collections::HashMap;
use std::hash::Hash;

/// Storage for computed values.
///
/// A value, once stored, is never replaced: [`Backend::get_or_insert`] only
/// runs its closure for an empty slot.
pub trait Backend<I, K> {
    /// The stored value for `index`, if any.
    fn get(&self, index: &I) -> Option<&K>;

    /// Returns the stored value, computing and storing it with `f` when absent.
    fn get_or_insert(&mut self, index: I, f: impl FnOnce() -> K) -> &K;

    /// Number of stored values.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Vec-backed storage for dense `usize` indices starting at 0.
#[derive(Debug)]
pub struct VecBackend<K> {
    data: Vec<Option<K>>,
}

impl<K> VecBackend<K> {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Pre-sizes storage for indices `0..capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: (0..capacity).map(|_| None).collect(),
        }
    }
}

impl<K> Default for VecBackend<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Backend<usize, K> for VecBackend<K> {
    fn get(&self, index: &usize) -> Option<&K> {
        self.data.get(*index)?.as_ref()
    }

    fn get_or_insert(&mut self, index: usize, f: impl FnOnce() -> K) -> &K {
        if index >= self.data.len() {
            self.data.resize_with(index + 1, || None);
        }
        self.data[index].get_or_insert_with(f)
    }

    fn len(&self) -> usize {
        self.data.iter().filter(|slot| slot.is_some()).count()
    }
}

/// HashMap-backed storage for sparse or structured indices.
#[derive(Debug)]
pub struct HashMapBackend<I, K> {
    data: HashMap<I, K>,
}

impl<I, K> HashMapBackend<I, K> {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
        }
    }
}

impl<I, K> Default for HashMapBackend<I, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Hash + Eq, K> Backend<I, K> for HashMapBackend<I, K> {
    fn get(&self, index: &I) -> Option<&K> {
        self.data.get(index)
    }

    fn get_or_insert(&mut self, index: I, f: impl FnOnce() -> K) -> &K {
        self.data.entry(index).or_insert_with(f)
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}
