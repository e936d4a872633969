//! Intervals (blocks) of permutations.
//!
//! An interval is a contiguous range of positions whose entries form a
//! contiguous range of values. Every permutation has its single positions and
//! its full length as trivial intervals; a permutation with no others is
//! called *simple*. The two directed scans here serve different callers:
//! substitution decomposition wants the largest proper interval at each step,
//! simplicity testing wants to find any small interval as early as possible.

use crate::perm::Perm;

/// Difference between the largest and smallest entry of a window.
fn span(window: &[u16]) -> usize {
    let mut lo = window[0];
    let mut hi = window[0];
    for &value in &window[1..] {
        lo = lo.min(value);
        hi = hi.max(value);
    }
    (hi - lo) as usize
}

impl Perm {
    /// Returns `(length, start)` of the longest proper interval, scanning
    /// lengths from `len - 1` down to 2, or `None` when the permutation is
    /// simple.
    pub fn maximal_proper_interval(&self) -> Option<(usize, usize)> {
        let entries = self.entries();
        let n = entries.len();
        for length in (2..n).rev() {
            for start in 0..=n - length {
                if span(&entries[start..start + length]) == length - 1 {
                    return Some((length, start));
                }
            }
        }
        None
    }

    /// Returns `(length, start)` of a shortest nontrivial proper interval,
    /// or `None` when the permutation is simple.
    ///
    /// Window extrema are maintained incrementally while the window grows, so
    /// a short interval is found without rescanning each window from scratch.
    pub fn minimal_nontrivial_interval(&self) -> Option<(usize, usize)> {
        let entries = self.entries();
        let n = entries.len();
        let mut lows = entries.to_vec();
        let mut highs = entries.to_vec();
        for length in 2..n {
            for end in (length - 1..n).rev() {
                lows[end] = lows[end - 1].min(entries[end]);
                highs[end] = highs[end - 1].max(entries[end]);
                if (highs[end] - lows[end]) as usize == length - 1 {
                    return Some((length, end + 1 - length));
                }
            }
        }
        None
    }

    /// Lists every nontrivial proper interval as `(length, start)`, shortest
    /// first.
    pub fn all_intervals(&self) -> Vec<(usize, usize)> {
        let entries = self.entries();
        let n = entries.len();
        let mut intervals = Vec::new();
        for length in 2..n {
            for start in 0..=n - length {
                if span(&entries[start..start + length]) == length - 1 {
                    intervals.push((length, start));
                }
            }
        }
        intervals
    }

    /// Checks whether the permutation is simple, i.e. has no nontrivial
    /// proper interval.
    ///
    /// Lengths 0 to 2 admit no such interval and count as simple.
    pub fn is_simple(&self) -> bool {
        self.minimal_nontrivial_interval().is_none()
    }

    /// Lists the maximal monotone runs of length at least 2 as inclusive
    /// `(start, end)` position pairs.
    ///
    /// A monotone run steps by exactly +1 or -1 between adjacent positions,
    /// in a fixed direction.
    pub fn monotone_intervals(&self) -> Vec<(usize, usize)> {
        let entries = self.entries();
        let mut runs = Vec::new();
        let mut start = 0;
        let mut length = 0;
        let mut direction = 0i32;
        for i in 0..entries.len().saturating_sub(1) {
            let step = entries[i] as i32 - entries[i + 1] as i32;
            if (step == 1 || step == -1) && (length == 0 || step == direction) {
                if length == 0 {
                    start = i;
                }
                length += 1;
                direction = step;
            } else if length != 0 {
                runs.push((start, start + length));
                length = 0;
                direction = 0;
            }
        }
        if length != 0 {
            runs.push((start, start + length));
        }
        runs
    }

    /// Contracts each maximal monotone run to its first entry and
    /// standardizes the result.
    pub fn monotone_quotient(&self) -> Perm {
        let entries = self.entries();
        let runs = self.monotone_intervals();
        let mut covered = vec![false; entries.len()];
        let mut starts = vec![false; entries.len()];
        for &(start, end) in &runs {
            starts[start] = true;
            for slot in &mut covered[start..=end] {
                *slot = true;
            }
        }
        let kept: Vec<u16> = entries
            .iter()
            .enumerate()
            .filter(|&(i, _)| starts[i] || !covered[i])
            .map(|(_, &v)| v)
            .collect();
        Perm::rank_standardize(&kept)
    }
}
