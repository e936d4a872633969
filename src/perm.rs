//! Permutations as immutable values.

use std::{cmp, hash::Hash, ops::Index, sync::OnceLock};

use smallvec::SmallVec;

use crate::pattern::Bounds;

mod fmt;
mod parse;

pub mod ops;

pub use parse::ParseError;

/// Inline capacity of the entry storage; longer permutations spill to the
/// heap.
pub(crate) const INLINE_LEN: usize = 8;

/// Maximal supported permutation length.
pub(crate) const MAX_LEN: usize = 1 << 16;

pub(crate) type Entries = SmallVec<[u16; INLINE_LEN]>;

/// A permutation of `{0, ..., n-1}` in one-line notation.
///
/// `Perm` is an immutable value: every transformation returns a new value and
/// no method mutates the entry sequence. Equality, hashing and ordering are
/// determined by the entry sequence alone; the ordering is lexicographic,
/// which makes the minimum of a set of symmetric variants a usable canonical
/// representative (see [`Perm::is_representative`]).
///
/// Entries are `u16`, so a permutation has at most 65536 positions. The
/// pattern-containment search is exponential in the pattern length; at any
/// scale where it is usable this limit is far out of reach.
pub struct Perm {
    entries: Entries,
    bounds: OnceLock<Bounds>,
}

fn is_perm(entries: &[u16]) -> bool {
    if entries.len() > MAX_LEN {
        return false;
    }
    let mut seen = vec![false; entries.len()];
    for &value in entries {
        match seen.get_mut(value as usize) {
            Some(slot) if !*slot => *slot = true,
            _ => return false,
        }
    }
    true
}

impl Perm {
    /// Creates a permutation without re-validating the entries.
    ///
    /// Callers must pass a permutation of `0..entries.len()`.
    pub(crate) fn from_raw(entries: Entries) -> Self {
        debug_assert!(is_perm(&entries));
        Perm {
            entries,
            bounds: OnceLock::new(),
        }
    }

    /// Creates a permutation from its one-line entries.
    ///
    /// Returns `None` unless `entries` contains every value in
    /// `0..entries.len()` exactly once.
    ///
    /// ```
    /// use patova::Perm;
    ///
    /// assert!(Perm::from_entries(&[2, 0, 1]).is_some());
    /// assert!(Perm::from_entries(&[2, 0, 2]).is_none());
    /// ```
    pub fn from_entries(entries: &[u16]) -> Option<Self> {
        is_perm(entries).then(|| Self::from_raw(entries.iter().copied().collect()))
    }

    /// Creates the permutation realizing the relative order of `keys`.
    ///
    /// Each key is replaced by its rank among all keys, so any sequence of
    /// distinct, ordered values standardizes to a permutation of the same
    /// length. Returns `None` when two keys compare equal or when `keys` is
    /// too long.
    ///
    /// ```
    /// use patova::Perm;
    ///
    /// let p = Perm::standardize(&[215, -99, 30, 12, 0]).unwrap();
    /// assert_eq!(p.entries(), &[4, 0, 3, 2, 1]);
    /// ```
    pub fn standardize<T: Ord>(keys: &[T]) -> Option<Self> {
        if keys.len() > MAX_LEN {
            return None;
        }
        let mut order: Vec<usize> = (0..keys.len()).collect();
        order.sort_unstable_by(|&a, &b| keys[a].cmp(&keys[b]));
        if order.windows(2).any(|w| keys[w[0]] == keys[w[1]]) {
            return None;
        }
        let mut entries: Entries = smallvec::smallvec![0; keys.len()];
        for (rank, &idx) in order.iter().enumerate() {
            entries[idx] = rank as u16;
        }
        Some(Self::from_raw(entries))
    }

    /// Standardizes entries that are already known to be distinct.
    pub(crate) fn rank_standardize(values: &[u16]) -> Self {
        let mut order: Vec<usize> = (0..values.len()).collect();
        order.sort_unstable_by_key(|&i| values[i]);
        let mut entries: Entries = smallvec::smallvec![0; values.len()];
        for (rank, &idx) in order.iter().enumerate() {
            entries[idx] = rank as u16;
        }
        Self::from_raw(entries)
    }

    /// Returns the monotone increasing (identity) permutation of length `n`.
    ///
    /// Panics when `n` exceeds the maximal supported length.
    pub fn identity(n: usize) -> Self {
        assert!(n <= MAX_LEN, "permutation length {n} out of range");
        Self::from_raw((0..n).map(|i| i as u16).collect())
    }

    /// Returns the monotone increasing permutation of length `n`.
    ///
    /// Same as [`Perm::identity`].
    pub fn increasing(n: usize) -> Self {
        Self::identity(n)
    }

    /// Returns the monotone decreasing permutation of length `n`.
    pub fn decreasing(n: usize) -> Self {
        assert!(n <= MAX_LEN, "permutation length {n} out of range");
        Self::from_raw((0..n).rev().map(|i| i as u16).collect())
    }

    /// Returns the number of positions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` for the empty permutation.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the one-line entry sequence.
    pub fn entries(&self) -> &[u16] {
        &self.entries
    }

    /// Returns the lazily computed neighbor-bound arrays used by the
    /// containment search.
    pub(crate) fn bound_cache(&self) -> &Bounds {
        self.bounds.get_or_init(|| Bounds::new(self.entries()))
    }

    /// Returns the complement, replacing each entry `v` by `n - 1 - v`.
    pub fn complement(&self) -> Self {
        let n = self.len() as u16;
        Self::from_raw(self.entries.iter().map(|&v| n - 1 - v).collect())
    }

    /// Returns the reverse, reading the entries right to left.
    pub fn reverse(&self) -> Self {
        Self::from_raw(self.entries.iter().rev().copied().collect())
    }

    /// Returns the functional inverse.
    pub fn inverse(&self) -> Self {
        let mut entries: Entries = smallvec::smallvec![0; self.len()];
        for (idx, &val) in self.entries.iter().enumerate() {
            entries[val as usize] = idx as u16;
        }
        Self::from_raw(entries)
    }

    /// Returns the permutation with the entry at `idx` removed and the
    /// remaining entries standardized.
    ///
    /// Panics when `idx` is out of bounds.
    pub fn delete_index(&self, idx: usize) -> Self {
        let removed = self.entries[idx];
        let entries = self
            .entries
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != idx)
            .map(|(_, &v)| if v > removed { v - 1 } else { v })
            .collect();
        Self::from_raw(entries)
    }

    /// Returns the permutation with the entry of value `value` removed and
    /// the remaining entries standardized.
    ///
    /// Panics when `value` is not an entry.
    pub fn delete_value(&self, value: u16) -> Self {
        assert!((value as usize) < self.len(), "value {value} not present");
        let entries = self
            .entries
            .iter()
            .filter(|&&v| v != value)
            .map(|&v| if v > value { v - 1 } else { v })
            .collect();
        Self::from_raw(entries)
    }

    /// Returns the permutation obtained by inserting a new entry of value
    /// `value` before position `idx`.
    ///
    /// Existing entries of value `value` or above are shifted up by one, so
    /// the new entry slots in directly below them. Inverse of
    /// [`Perm::delete_index`] in the sense that
    /// `p.insert(i, v).delete_index(i) == p`.
    ///
    /// Panics when `idx > len` or `value > len`.
    pub fn insert(&self, idx: usize, value: u16) -> Self {
        assert!(idx <= self.len(), "position {idx} out of bounds");
        assert!(value as usize <= self.len(), "value {value} out of range");
        let mut entries: Entries = self
            .entries
            .iter()
            .map(|&v| if v >= value { v + 1 } else { v })
            .collect();
        entries.insert(idx, value);
        Self::from_raw(entries)
    }

    /// Returns the pattern formed by the entries at the given positions.
    ///
    /// `indices` must be strictly increasing and in bounds.
    pub fn subpattern(&self, indices: &[usize]) -> Self {
        debug_assert!(indices.windows(2).all(|w| w[0] < w[1]));
        let values: Vec<u16> = indices.iter().map(|&i| self.entries[i]).collect();
        Self::rank_standardize(&values)
    }

    /// Returns all symmetric variants of this permutation: its closure under
    /// reverse, complement and inverse, sorted and deduplicated.
    ///
    /// The result has at most eight elements.
    pub fn symmetries(&self) -> Vec<Perm> {
        let mut set = std::collections::BTreeSet::new();
        set.insert(self.clone());
        for transform in [Perm::reverse, Perm::complement, Perm::inverse] {
            let images: Vec<Perm> = set.iter().map(transform).collect();
            set.extend(images);
        }
        set.into_iter().collect()
    }

    /// Checks whether this permutation is the lexicographically least element
    /// of its symmetry class.
    pub fn is_representative(&self) -> bool {
        self.symmetries().first() == Some(self)
    }
}

impl Clone for Perm {
    fn clone(&self) -> Self {
        // An initialized bound cache stays valid on the clone: it depends on
        // the entries only.
        Perm {
            entries: self.entries.clone(),
            bounds: self.bounds.clone(),
        }
    }
}

impl Default for Perm {
    fn default() -> Self {
        Self::identity(0)
    }
}

impl Index<usize> for Perm {
    type Output = u16;

    fn index(&self, idx: usize) -> &u16 {
        &self.entries[idx]
    }
}

impl PartialEq for Perm {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for Perm {}

impl Hash for Perm {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.entries.hash(state);
    }
}

impl PartialOrd for Perm {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Perm {
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        self.entries.cmp(&other.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(entries: &[u16]) -> Perm {
        Perm::from_entries(entries).unwrap()
    }

    #[test]
    fn validated_construction() {
        assert!(Perm::from_entries(&[]).is_some());
        assert!(Perm::from_entries(&[0, 1, 2]).is_some());
        assert!(Perm::from_entries(&[1, 2, 3]).is_none());
        assert!(Perm::from_entries(&[0, 0, 1]).is_none());
        assert_eq!(Perm::increasing(3), p(&[0, 1, 2]));
        assert_eq!(Perm::decreasing(3), p(&[2, 1, 0]));
    }

    #[test]
    fn standardize_ranks() {
        assert_eq!(
            Perm::standardize(&[3, 5, 1, 2, 4]).unwrap(),
            p(&[2, 4, 0, 1, 3])
        );
        assert!(Perm::standardize(&[1, 1]).is_none());
        assert_eq!(Perm::standardize::<i32>(&[]).unwrap(), Perm::default());
    }

    #[test]
    fn unary_transforms() {
        let q = p(&[1, 2, 0, 3]);
        assert_eq!(q.complement(), p(&[2, 1, 3, 0]));
        assert_eq!(q.reverse(), p(&[3, 0, 2, 1]));
        assert_eq!(q.inverse(), p(&[2, 0, 1, 3]));
        assert_eq!(q.complement().complement(), q);
        assert_eq!(q.reverse().reverse(), q);
        assert_eq!(q.inverse().inverse(), q);
    }

    #[test]
    fn delete_and_insert() {
        // 35214 with position 2 removed reads 2413.
        let q = p(&[2, 4, 1, 0, 3]);
        assert_eq!(q.delete_index(2), p(&[1, 3, 0, 2]));
        assert_eq!(q.delete_value(4), p(&[2, 1, 0, 3]));
        assert_eq!(p(&[1, 3, 0, 2]).insert(2, 1), p(&[2, 4, 1, 0, 3]));
        let q = p(&[4, 2, 0, 3, 1, 5]);
        assert_eq!(q.insert(4, 3).delete_index(4), q);
    }

    #[test]
    fn subpattern_standardizes() {
        let q = p(&[4, 3, 1, 0, 2]);
        assert_eq!(q.subpattern(&[0, 2, 4]), p(&[2, 0, 1]));
        assert_eq!(q.subpattern(&[]), Perm::default());
    }

    #[test]
    fn symmetry_class() {
        let sym = p(&[1, 3, 0, 2]).symmetries();
        assert!(sym.len() <= 8);
        assert!(sym.contains(&p(&[2, 0, 3, 1])));
        assert!(sym.windows(2).all(|w| w[0] < w[1]));

        assert!(p(&[0, 1, 2]).is_representative());
        assert!(!p(&[2, 1, 0]).is_representative());
    }

    #[test]
    fn ordering_is_lexicographic() {
        assert!(p(&[0, 1, 2]) < p(&[0, 2, 1]));
        assert!(p(&[0]) < p(&[0, 1]));
        assert!(p(&[1, 0]) > p(&[0, 2, 1]));
    }

    #[test]
    fn equality_ignores_cache_state() {
        let a = p(&[2, 0, 1]);
        let b = p(&[2, 0, 1]);
        // Populate the cache on one side only.
        a.bound_cache();
        assert_eq!(a, b);
        let c = a.clone();
        assert_eq!(c, b);
    }
}
