use std::hash::Hash;

use rustc_hash::FxHashMap;

/// A set that assigns a dense index to every inserted element, in insertion
/// order.
#[derive(Clone, Debug)]
pub struct IndexedSet<T> {
    indices: FxHashMap<T, usize>,
    elements: Vec<T>,
}

impl<T: Eq + Hash + Clone> IndexedSet<T> {
    pub fn new() -> Self {
        Self {
            indices: FxHashMap::default(),
            elements: Vec::new(),
        }
    }

    /// Inserts the given element and returns its index, together with true iff
    /// the element was not already present.
    pub fn insert(&mut self, element: T) -> (usize, bool) {
        if let Some(&index) = self.indices.get(&element) {
            return (index, false);
        }

        let index = self.elements.len();
        self.indices.insert(element.clone(), index);
        self.elements.push(element);
        (index, true)
    }

    /// Returns the index of the given element, if it was inserted before.
    pub fn index(&self, element: &T) -> Option<&usize> {
        self.indices.get(element)
    }

    /// Returns the element stored at the given index.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.elements.get(index)
    }

    /// Returns the number of elements in the set.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true iff the set is empty.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns an iterator over the elements in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.elements.iter()
    }

    /// Returns the elements as a vector, in insertion order.
    pub fn to_vec(&self) -> Vec<T> {
        self.elements.clone()
    }
}

impl<T: Eq + Hash + Clone> Default for IndexedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}
