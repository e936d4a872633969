//! Pattern containment and avoidance.
//!
//! A permutation `q` contains a pattern `p` when some subsequence of `q`'s
//! entries, read left to right, has the same relative order as `p`; it avoids
//! `p` otherwise. Containment is decided by a backtracking search over
//! candidate positions, pruned with two precomputed neighbor-bound arrays so
//! that each tentative position is checked against at most two previously
//! placed ones instead of all of them.

use std::borrow::Borrow;
use std::collections::{BTreeSet, HashMap};

use itertools::Itertools;
use smallvec::SmallVec;

use crate::perm::{Perm, INLINE_LEN};

/// Structural neighbor bounds of a pattern, computed once per value.
///
/// For pattern position `i`, `lower[i]` is the later position holding the
/// largest entry below the entry at `i`, and `upper[i]` the later position
/// holding the smallest entry above it. During the search these are the only
/// positions a candidate has to be compared against: every other constraint
/// is implied transitively.
#[derive(Clone)]
pub(crate) struct Bounds {
    lower: Box<[Option<u16>]>,
    upper: Box<[Option<u16>]>,
}

impl Bounds {
    pub(crate) fn new(entries: &[u16]) -> Self {
        let n = entries.len();
        let mut lower = vec![None; n].into_boxed_slice();
        let mut upper = vec![None; n].into_boxed_slice();
        for i in 0..n {
            let mut max_below = None;
            let mut min_above = None;
            for j in i + 1..n {
                if entries[j] < entries[i] {
                    if max_below.map_or(true, |m| entries[j] > m) {
                        max_below = Some(entries[j]);
                        lower[i] = Some(j as u16);
                    }
                } else if min_above.map_or(true, |m| entries[j] < m) {
                    min_above = Some(entries[j]);
                    upper[i] = Some(j as u16);
                }
            }
        }
        Bounds { lower, upper }
    }
}

/// Backtracking state: one tentative target position per pattern position.
struct Search<'a> {
    target: &'a [u16],
    bounds: &'a Bounds,
    pos: SmallVec<[usize; INLINE_LEN]>,
}

impl Search<'_> {
    /// Checks the candidate at pattern position `level` against the two
    /// structurally adjacent positions fixed so far.
    fn fits(&self, level: usize) -> bool {
        let value = self.target[self.pos[level]];
        let above_lower = match self.bounds.lower[level] {
            Some(j) => value > self.target[self.pos[j as usize]],
            None => true,
        };
        let below_upper = match self.bounds.upper[level] {
            Some(j) => value < self.target[self.pos[j as usize]],
            None => true,
        };
        above_lower && below_upper
    }

    /// Assigns pattern position `level` and recurses towards position 0,
    /// trying target positions in descending order below the position fixed
    /// at `level + 1`.
    fn descend(&mut self, level: usize) -> bool {
        for candidate in (0..self.pos[level + 1]).rev() {
            self.pos[level] = candidate;
            if self.fits(level) && (level == 0 || self.descend(level - 1)) {
                return true;
            }
        }
        false
    }
}

impl Perm {
    /// Checks whether `self` occurs as a pattern in `target`.
    ///
    /// ```
    /// use patova::Perm;
    ///
    /// let pattern: Perm = "213".parse().unwrap();
    /// assert!(pattern.involved_in(&"54213".parse().unwrap()));
    /// assert!(!"123".parse::<Perm>().unwrap().involved_in(&"31542".parse().unwrap()));
    /// ```
    pub fn involved_in(&self, target: &Perm) -> bool {
        self.involved_in_anchored(target, 0)
    }

    /// Checks whether `self` occurs as a pattern in `target` with its last
    /// `anchor` positions matched to the last `anchor` positions of
    /// `target`, in order.
    ///
    /// With `anchor == 0` this is plain containment. An `anchor` larger than
    /// the pattern length is clamped to it.
    pub fn involved_in_anchored(&self, target: &Perm, anchor: usize) -> bool {
        let k = self.len();
        let n = target.len();
        if k <= 1 {
            return k <= n;
        }
        if k > n {
            return false;
        }

        let mut search = Search {
            target: target.entries(),
            bounds: self.bound_cache(),
            pos: smallvec::smallvec![0; k],
        };

        let anchor = anchor.min(k);
        if anchor == 0 {
            for last in (0..n).rev() {
                search.pos[k - 1] = last;
                if search.descend(k - 2) {
                    return true;
                }
            }
            return false;
        }

        for i in 1..=anchor {
            search.pos[k - i] = n - i;
        }
        if !(1..anchor).all(|i| search.fits(k - i - 1)) {
            return false;
        }
        anchor == k || search.descend(k - anchor - 1)
    }

    /// Checks whether `self` contains the pattern `pattern`.
    pub fn involves(&self, pattern: &Perm) -> bool {
        pattern.involved_in(self)
    }

    /// Checks whether `self` avoids the pattern `pattern`.
    ///
    /// ```
    /// use patova::Perm;
    ///
    /// let p: Perm = "123456".parse().unwrap();
    /// assert!(p.avoids(&"231".parse().unwrap()));
    /// assert!(!p.avoids(&"123".parse().unwrap()));
    /// ```
    pub fn avoids(&self, pattern: &Perm) -> bool {
        !pattern.involved_in(self)
    }

    /// Checks whether `self` avoids every pattern in `basis`.
    pub fn avoids_all(&self, basis: impl IntoIterator<Item = impl Borrow<Perm>>) -> bool {
        basis.into_iter().all(|b| self.avoids(b.borrow()))
    }

    /// Lists every occurrence of `pattern` in `self` as a strictly increasing
    /// sequence of positions, by brute-force enumeration of position subsets.
    ///
    /// This is the reference oracle the search is tested against; it is
    /// exponentially slower than [`Perm::involved_in`] on large inputs.
    pub fn copies(&self, pattern: &Perm) -> Vec<Vec<usize>> {
        (0..self.len())
            .combinations(pattern.len())
            .filter(|positions| self.subpattern(positions) == *pattern)
            .collect()
    }

    /// Lists the start positions at which `pattern` occurs as a contiguous
    /// factor of `self`.
    ///
    /// The empty pattern yields no occurrences.
    pub fn contiguous_copies(&self, pattern: &Perm) -> Vec<usize> {
        let m = pattern.len();
        if m == 0 || m > self.len() {
            return Vec::new();
        }
        self.entries()
            .windows(m)
            .enumerate()
            .filter(|(_, window)| Perm::rank_standardize(window) == *pattern)
            .map(|(start, _)| start)
            .collect()
    }

    /// Counts the occurrences of every length-`k` pattern in `self`.
    pub fn pattern_counts(&self, k: usize) -> HashMap<Perm, usize> {
        let mut counts = HashMap::new();
        for positions in (0..self.len()).combinations(k) {
            *counts.entry(self.subpattern(&positions)).or_insert(0) += 1;
        }
        counts
    }

    /// Returns the permutations covered by `self` in the containment order:
    /// all one-point deletions, sorted and deduplicated.
    pub fn covers(&self) -> Vec<Perm> {
        let set: BTreeSet<Perm> = (0..self.len()).map(|idx| self.delete_index(idx)).collect();
        set.into_iter().collect()
    }

    /// Returns the permutations covering `self` in the containment order:
    /// all one-point insertions, sorted and deduplicated.
    pub fn covered_by(&self) -> Vec<Perm> {
        let n = self.len();
        let mut set = BTreeSet::new();
        for idx in 0..=n {
            for value in 0..=n as u16 {
                set.insert(self.insert(idx, value));
            }
        }
        set.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enumerate;

    fn p(entries: &[u16]) -> Perm {
        Perm::from_entries(entries).unwrap()
    }

    #[test]
    fn bounds_point_at_nearest_neighbors() {
        // 2 4 1 3: position 0 (entry 1) sees entry 0 below and entry 2 above.
        let bounds = Bounds::new(&[1, 3, 0, 2]);
        assert_eq!(bounds.lower[0], Some(2));
        assert_eq!(bounds.upper[0], Some(3));
        assert_eq!(bounds.lower[1], Some(3));
        assert_eq!(bounds.upper[1], None);
        assert_eq!(bounds.lower[2], None);
        assert_eq!(bounds.upper[2], Some(3));
        assert_eq!(bounds.lower[3], None);
        assert_eq!(bounds.upper[3], None);
    }

    #[test]
    fn identity_avoids_231_but_not_123() {
        let target = Perm::identity(6);
        assert!(target.avoids(&p(&[1, 2, 0])));
        assert!(!target.avoids(&p(&[0, 1, 2])));
        assert!(target.involves(&p(&[0, 1, 2])));
    }

    #[test]
    fn degenerate_patterns_always_fit() {
        let empty = Perm::default();
        let point = Perm::identity(1);
        for target in [Perm::default(), p(&[1, 0]), Perm::decreasing(5)] {
            assert!(empty.involved_in(&target));
        }
        assert!(!point.involved_in(&Perm::default()));
        assert!(point.involved_in(&p(&[0])));
        assert!(point.involved_in(&Perm::decreasing(5)));
    }

    #[test]
    fn anchored_occurrences() {
        // 3 1 2: the final entry can close a descent but 12 must end on it too.
        let target = p(&[2, 0, 1]);
        assert!(p(&[1, 0]).involved_in_anchored(&target, 1));
        assert!(p(&[0, 1]).involved_in_anchored(&target, 1));
        // 2 3 1: nothing below the final 1 exists, so no 12 can end there.
        let target = p(&[1, 2, 0]);
        assert!(!p(&[0, 1]).involved_in_anchored(&target, 1));
        assert!(p(&[1, 0]).involved_in_anchored(&target, 1));

        // Fully anchored: the pattern must sit at the very end.
        let target = p(&[3, 0, 2, 1]);
        assert!(p(&[1, 0]).involved_in_anchored(&target, 2));
        assert!(!p(&[0, 1]).involved_in_anchored(&target, 2));

        // Anchors larger than the pattern clamp to it.
        assert!(p(&[1, 0]).involved_in_anchored(&target, 5));
    }

    #[test]
    fn search_agrees_with_brute_force() {
        for n in 0..=6 {
            for target in enumerate::all(n) {
                for k in 0..=4.min(n) {
                    for pattern in enumerate::all(k) {
                        assert_eq!(
                            pattern.involved_in(&target),
                            !target.copies(&pattern).is_empty(),
                            "pattern {pattern:?} in target {target:?}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn occurrence_listing() {
        // 1 3 2 4 holds two rising triples and one copy each of 132 and 213.
        let q = p(&[0, 2, 1, 3]);
        assert_eq!(q.copies(&p(&[0, 1, 2])).len(), 2);
        let counts = q.pattern_counts(3);
        assert_eq!(counts.get(&p(&[0, 1, 2])), Some(&2));
        assert_eq!(counts.get(&p(&[0, 2, 1])), Some(&1));
        assert_eq!(counts.get(&p(&[1, 0, 2])), Some(&1));
        assert_eq!(counts.values().sum::<usize>(), 4);

        assert_eq!(q.contiguous_copies(&p(&[0, 1])), vec![0, 2]);
        assert_eq!(q.contiguous_copies(&q), vec![0]);
    }

    #[test]
    fn cover_relations() {
        assert_eq!(Perm::identity(3).covers(), vec![Perm::identity(2)]);
        let ups = p(&[0]).covered_by();
        assert_eq!(ups, vec![p(&[0, 1]), p(&[1, 0])]);
        for up in p(&[1, 3, 0, 2]).covered_by() {
            assert!(up.involves(&p(&[1, 3, 0, 2])));
        }
    }
}
