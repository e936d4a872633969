//! Exhaustive enumeration and integer indexing of permutations.

use crate::perm::{Entries, Perm, MAX_LEN};

/// Returns an iterator over every permutation of length `n` in lexicographic
/// order, starting from the identity.
///
/// The iterator is `Clone`, so an exhausted enumeration can be restarted
/// cheaply from a saved copy.
///
/// ```
/// use patova::enumerate;
///
/// assert_eq!(enumerate::all(3).count(), 6);
/// assert_eq!(enumerate::all(0).count(), 1);
/// ```
pub fn all(n: usize) -> All {
    All {
        next: Some(Perm::identity(n)),
    }
}

/// Iterator over all permutations of a fixed length, returned by [`all`].
#[derive(Clone)]
pub struct All {
    next: Option<Perm>,
}

impl Iterator for All {
    type Item = Perm;

    fn next(&mut self) -> Option<Perm> {
        let current = self.next.take()?;
        self.next = successor(&current);
        Some(current)
    }
}

/// Computes the lexicographic successor, or `None` for the final (strictly
/// decreasing) permutation.
fn successor(perm: &Perm) -> Option<Perm> {
    let mut entries = Entries::from(perm.entries());
    let pivot = entries.windows(2).rposition(|w| w[0] < w[1])?;
    let swap = entries.iter().rposition(|&v| v > entries[pivot])?;
    entries.swap(pivot, swap);
    entries[pivot + 1..].reverse();
    Some(Perm::from_raw(entries))
}

impl Perm {
    /// Builds the permutation of length `n` with the given index under a
    /// fixed bijection between `0..n!` and the permutations of length `n`.
    ///
    /// Indices at or above `n!` wrap around, so the result is always defined.
    /// Inverse of [`Perm::to_index`]. The index space outgrows `u64` beyond
    /// length 20, so indexing is only faithful for short permutations. Panics
    /// when `n` exceeds the maximal supported length.
    pub fn from_index(index: u64, n: usize) -> Perm {
        assert!(n <= MAX_LEN, "permutation length {n} out of range");
        let mut entries: Entries = (0..n).map(|i| i as u16).collect();
        let mut remaining = index;
        for i in (1..=n).rev() {
            let j = (remaining % i as u64) as usize;
            entries.swap(i - 1, j);
            remaining /= i as u64;
        }
        Perm::from_raw(entries)
    }

    /// Returns the index of the permutation under the bijection of
    /// [`Perm::from_index`], an integer in `0..n!`.
    pub fn to_index(&self) -> u64 {
        let mut scratch: Vec<u16> = self.entries().to_vec();
        let mut positions = self.inverse().entries().to_vec();
        let mut index = 0u64;
        let mut multiplier = 1u64;
        for i in (0..scratch.len()).rev() {
            index += scratch[i] as u64 * multiplier;
            multiplier *= i as u64 + 1;
            let j = positions[i] as usize;
            positions[scratch[i] as usize] = j as u16;
            positions[i] = i as u16;
            scratch.swap(i, j);
        }
        index
    }
}
