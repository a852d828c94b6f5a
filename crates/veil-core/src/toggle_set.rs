//! Sorted set of offsets with toggle semantics

use serde::{Deserialize, Serialize};

/// An ordered set of unique values where inserting a present value removes it.
///
/// Lookups are a binary search over the sorted backing vector; the
/// insert/remove itself shifts the tail, which is fine for the handful of
/// boundaries a single text line carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToggleSet<T = usize> {
    points: Vec<T>,
}

impl<T: Ord + Copy> ToggleSet<T> {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Remove `value` if present, otherwise insert it in order.
    ///
    /// Returns `true` when the value is a member afterwards.
    pub fn toggle(&mut self, value: T) -> bool {
        match self.points.binary_search(&value) {
            Ok(index) => {
                self.points.remove(index);
                false
            }
            Err(index) => {
                self.points.insert(index, value);
                true
            }
        }
    }

    pub fn contains(&self, value: T) -> bool {
        self.points.binary_search(&value).is_ok()
    }

    pub fn reset(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Members in ascending order
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.points.iter().copied()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.points
    }
}

impl<'a, T: Ord + Copy> IntoIterator for &'a ToggleSet<T> {
    type Item = T;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter().copied()
    }
}

impl<T: Ord + Copy> FromIterator<T> for ToggleSet<T> {
    /// Toggles every item in turn, so values seen an even number of times cancel out.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        for value in iter {
            set.toggle(value);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_twice_restores_empty() {
        let mut set = ToggleSet::new();
        assert!(set.toggle(7));
        assert!(!set.toggle(7));
        assert!(set.is_empty());
    }

    #[test]
    fn test_iteration_is_ascending() {
        let mut set = ToggleSet::new();
        for value in [3, 2, 8, 9, 5, 1, 1, 2] {
            set.toggle(value);
        }
        assert_eq!(set.as_slice(), &[3, 5, 8, 9]);

        let collected: Vec<usize> = set.iter().collect();
        assert!(collected.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_remove_first_and_last() {
        let mut set: ToggleSet = [0, 4, 10].into_iter().collect();
        set.toggle(0);
        set.toggle(10);
        assert_eq!(set.as_slice(), &[4]);
        assert!(set.contains(4));
    }

    #[test]
    fn test_toggle_sequence_is_self_inverse() {
        let mut set: ToggleSet = [1, 6, 12].into_iter().collect();
        let before = set.clone();
        let ops = [6, 2, 12, 40, 0];
        for value in ops {
            set.toggle(value);
        }
        for value in ops.iter().rev() {
            set.toggle(*value);
        }
        assert_eq!(set, before);
    }

    #[test]
    fn test_negative_values() {
        let set: ToggleSet<i64> = [5, -3, 0, -10].into_iter().collect();
        assert_eq!(set.as_slice(), &[-10, -3, 0, 5]);
        assert!(set.contains(-3));
        assert!(!set.contains(3));
    }

    #[test]
    fn test_reset() {
        let mut set: ToggleSet = [1, 2, 3].into_iter().collect();
        set.reset();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
    }
}
