//! Bitmask sets of small cell values.

use std::{
    fmt::{self, Debug},
    iter::FusedIterator,
    ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Sub, SubAssign},
};

/// A set of cell values in the range `1..=16`, stored as a 16-bit mask.
///
/// Value `v` occupies bit `v - 1`. This is the pencil-mark representation of
/// the grid state and the candidate representation of the solvers.
///
/// # Examples
///
/// ```
/// use gridlace_core::CandidateSet;
///
/// let mut set = CandidateSet::full(4);
/// assert_eq!(set.len(), 4);
///
/// set.remove(2);
/// assert!(!set.contains(2));
/// assert_eq!(set.iter().collect::<Vec<_>>(), vec![1, 3, 4]);
///
/// let single = set & CandidateSet::from_value(3);
/// assert_eq!(single.as_single(), Some(3));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CandidateSet {
    bits: u16,
}

impl CandidateSet {
    /// The largest value a set can hold.
    pub const MAX_VALUE: u8 = 16;

    /// The empty set.
    pub const EMPTY: Self = Self { bits: 0 };

    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Creates a set from a raw bitmask.
    #[must_use]
    pub const fn from_bits(bits: u16) -> Self {
        Self { bits }
    }

    /// Returns the raw bitmask.
    #[must_use]
    pub const fn bits(self) -> u16 {
        self.bits
    }

    /// Creates the set `{1, ..., n}`.
    ///
    /// # Panics
    ///
    /// Panics if `n` exceeds [`MAX_VALUE`](Self::MAX_VALUE).
    #[must_use]
    pub const fn full(n: u8) -> Self {
        assert!(n <= Self::MAX_VALUE);
        #[expect(clippy::cast_possible_truncation)]
        let bits = ((1_u32 << n) - 1) as u16;
        Self { bits }
    }

    /// Creates a set containing only `value`.
    ///
    /// # Panics
    ///
    /// Panics if `value` is not in `1..=16`.
    #[must_use]
    pub const fn from_value(value: u8) -> Self {
        Self { bits: bit(value) }
    }

    /// Returns `true` if the set contains no values.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Returns the number of values in the set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Returns `true` if `value` is in the set.
    #[must_use]
    pub const fn contains(self, value: u8) -> bool {
        self.bits & bit(value) != 0
    }

    /// Inserts `value`, returning `true` if it was not present.
    pub fn insert(&mut self, value: u8) -> bool {
        let added = !self.contains(value);
        self.bits |= bit(value);
        added
    }

    /// Removes `value`, returning `true` if it was present.
    pub fn remove(&mut self, value: u8) -> bool {
        let removed = self.contains(value);
        self.bits &= !bit(value);
        removed
    }

    /// Flips membership of `value`.
    pub fn toggle(&mut self, value: u8) {
        self.bits ^= bit(value);
    }

    /// Removes every value.
    pub fn clear(&mut self) {
        self.bits = 0;
    }

    /// Returns the only value if the set has exactly one.
    #[must_use]
    pub const fn as_single(self) -> Option<u8> {
        if self.bits.is_power_of_two() {
            #[expect(clippy::cast_possible_truncation)]
            let v = self.bits.trailing_zeros() as u8 + 1;
            Some(v)
        } else {
            None
        }
    }

    /// Returns the smallest value in the set.
    #[must_use]
    pub const fn first(self) -> Option<u8> {
        if self.bits == 0 {
            None
        } else {
            #[expect(clippy::cast_possible_truncation)]
            let v = self.bits.trailing_zeros() as u8 + 1;
            Some(v)
        }
    }

    /// Returns `true` if every value of `self` is also in `other`.
    #[must_use]
    pub const fn is_subset(self, other: Self) -> bool {
        self.bits & !other.bits == 0
    }

    /// Iterates over the values in ascending order.
    #[must_use]
    pub const fn iter(self) -> Iter {
        Iter { bits: self.bits }
    }
}

const fn bit(value: u8) -> u16 {
    assert!(value >= 1 && value <= CandidateSet::MAX_VALUE);
    1 << (value - 1)
}

impl Debug for CandidateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl BitAnd for CandidateSet {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self::from_bits(self.bits & rhs.bits)
    }
}

impl BitAndAssign for CandidateSet {
    fn bitand_assign(&mut self, rhs: Self) {
        self.bits &= rhs.bits;
    }
}

impl BitOr for CandidateSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self::from_bits(self.bits | rhs.bits)
    }
}

impl BitOrAssign for CandidateSet {
    fn bitor_assign(&mut self, rhs: Self) {
        self.bits |= rhs.bits;
    }
}

impl Sub for CandidateSet {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::from_bits(self.bits & !rhs.bits)
    }
}

impl SubAssign for CandidateSet {
    fn sub_assign(&mut self, rhs: Self) {
        self.bits &= !rhs.bits;
    }
}

impl FromIterator<u8> for CandidateSet {
    fn from_iter<T: IntoIterator<Item = u8>>(iter: T) -> Self {
        let mut set = Self::new();
        for v in iter {
            set.insert(v);
        }
        set
    }
}

impl IntoIterator for CandidateSet {
    type Item = u8;
    type IntoIter = Iter;

    fn into_iter(self) -> Iter {
        self.iter()
    }
}

/// Iterator over the values of a [`CandidateSet`].
#[derive(Debug, Clone)]
pub struct Iter {
    bits: u16,
}

impl Iterator for Iter {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.bits == 0 {
            return None;
        }
        #[expect(clippy::cast_possible_truncation)]
        let v = self.bits.trailing_zeros() as u8 + 1;
        self.bits &= self.bits - 1;
        Some(v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.bits.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Iter {}
impl FusedIterator for Iter {}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_basic_operations() {
        let mut set = CandidateSet::new();
        assert!(set.is_empty());
        assert!(set.insert(3));
        assert!(!set.insert(3));
        assert!(set.contains(3));
        assert_eq!(set.as_single(), Some(3));
        assert!(set.remove(3));
        assert!(!set.remove(3));
        assert!(set.is_empty());

        set.toggle(16);
        assert!(set.contains(16));
        set.toggle(16);
        assert!(set.is_empty());
    }

    #[test]
    fn test_full_and_ops() {
        assert_eq!(CandidateSet::full(0), CandidateSet::EMPTY);
        assert_eq!(CandidateSet::full(16).len(), 16);

        let a = CandidateSet::full(5);
        let b: CandidateSet = [2, 4, 6].into_iter().collect();
        assert_eq!((a & b).iter().collect::<Vec<_>>(), vec![2, 4]);
        assert_eq!((a | b).len(), 6);
        assert_eq!((a - b).iter().collect::<Vec<_>>(), vec![1, 3, 5]);
        assert!((a & b).is_subset(a));
        assert!(!b.is_subset(a));
        assert_eq!(b.first(), Some(2));
        assert_eq!(b.as_single(), None);
    }

    #[test]
    fn test_debug_format() {
        let set: CandidateSet = [1, 9].into_iter().collect();
        assert_eq!(format!("{set:?}"), "{1, 9}");
    }

    #[test]
    #[should_panic(expected = "assertion failed")]
    fn test_zero_value_panics() {
        let _ = CandidateSet::from_value(0);
    }

    proptest! {
        #[test]
        fn prop_iter_matches_contains(bits in any::<u16>()) {
            let set = CandidateSet::from_bits(bits);
            let values: Vec<u8> = set.iter().collect();
            prop_assert_eq!(values.len(), set.len());
            for v in 1..=16 {
                prop_assert_eq!(values.contains(&v), set.contains(v));
            }
            prop_assert_eq!(values.into_iter().collect::<CandidateSet>(), set);
        }
    }
}
