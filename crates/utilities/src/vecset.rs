use std::fmt;

use itertools::Itertools;

///
/// A set that is internally represented by a sorted vector. Mostly useful for
/// a compact representation of sets that are not changed often.
///
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VecSet<T> {
    /// The internal storage with the invariant that the array is sorted.
    sorted_array: Vec<T>,
}

impl<T: Ord> VecSet<T> {
    pub fn new() -> Self {
        Self {
            sorted_array: Vec::new(),
        }
    }

    /// Returns a new set only containing the given element.
    pub fn singleton(element: T) -> Self {
        Self {
            sorted_array: vec![element],
        }
    }

    /// Returns true iff the set is empty.
    pub fn is_empty(&self) -> bool {
        self.sorted_array.is_empty()
    }

    /// Returns the number of elements in the set.
    pub fn len(&self) -> usize {
        self.sorted_array.len()
    }

    /// Inserts the given element into the set, returns true iff the element was
    /// inserted.
    pub fn insert(&mut self, element: T) -> bool {
        // Finds the location where to insert the element to keep the array sorted.
        if let Err(position) = self.sorted_array.binary_search(&element) {
            self.sorted_array.insert(position, element);
            return true;
        }

        false
    }

    /// Returns true iff the given element is in the set.
    pub fn contains(&self, element: &T) -> bool {
        self.sorted_array.binary_search(element).is_ok()
    }

    /// Returns an iterator over the elements in the set, they are yielded in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.sorted_array.iter()
    }

    /// Extends the set with the elements of the other set.
    pub fn union_with(&mut self, other: &Self)
    where
        T: Clone,
    {
        for element in other.iter() {
            self.insert(element.clone());
        }
    }

    /// Returns true iff every element of this set is also in the other set.
    ///
    /// Both arrays are sorted, so a single merge pass suffices.
    pub fn is_subset_of(&self, other: &Self) -> bool {
        let mut other_iter = other.sorted_array.iter();

        'outer: for element in &self.sorted_array {
            for candidate in other_iter.by_ref() {
                match candidate.cmp(element) {
                    std::cmp::Ordering::Less => continue,
                    std::cmp::Ordering::Equal => continue 'outer,
                    std::cmp::Ordering::Greater => return false,
                }
            }

            return false;
        }

        true
    }

    /// Returns true iff the two sets have no element in common.
    pub fn is_disjoint(&self, other: &Self) -> bool {
        let mut lhs = self.sorted_array.iter().peekable();
        let mut rhs = other.sorted_array.iter().peekable();

        while let (Some(&left), Some(&right)) = (lhs.peek(), rhs.peek()) {
            match left.cmp(right) {
                std::cmp::Ordering::Less => {
                    lhs.next();
                }
                std::cmp::Ordering::Equal => return false,
                std::cmp::Ordering::Greater => {
                    rhs.next();
                }
            }
        }

        true
    }
}

impl<T> Default for VecSet<T> {
    fn default() -> Self {
        Self {
            sorted_array: Vec::new(),
        }
    }
}

impl<T: Ord> FromIterator<T> for VecSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut sorted_array: Vec<T> = iter.into_iter().collect();
        sorted_array.sort();
        sorted_array.dedup_by(|a, b| a == b);

        Self { sorted_array }
    }
}

impl<T> IntoIterator for VecSet<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.sorted_array.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a VecSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.sorted_array.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for VecSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{:?}}}", self.sorted_array.iter().format(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_order() {
        let mut set = VecSet::new();
        assert!(set.insert(3));
        assert!(set.insert(1));
        assert!(set.insert(2));
        assert!(!set.insert(2));

        assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(set.len(), 3);
        assert!(set.contains(&1));
        assert!(!set.contains(&4));
    }

    #[test]
    fn test_subset_and_disjoint() {
        let small: VecSet<usize> = [1, 3].into_iter().collect();
        let large: VecSet<usize> = [1, 2, 3].into_iter().collect();
        let other: VecSet<usize> = [4, 5].into_iter().collect();

        assert!(small.is_subset_of(&large));
        assert!(!large.is_subset_of(&small));
        assert!(small.is_subset_of(&small));

        assert!(small.is_disjoint(&other));
        assert!(!small.is_disjoint(&large));
        assert!(VecSet::<usize>::new().is_disjoint(&large));
    }

    #[test]
    fn test_from_iterator_deduplicates() {
        let set: VecSet<usize> = [3, 1, 3, 2, 1].into_iter().collect();
        assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_union_with() {
        let mut set: VecSet<usize> = [1, 3].into_iter().collect();
        let other: VecSet<usize> = [2, 3, 4].into_iter().collect();

        set.union_with(&other);
        assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    }
}
