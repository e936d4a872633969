//! Positional statistics of permutations.
//!
//! Read-only observations on the entry sequence: descent and extremum
//! positions, inversions, runs, and the cycle structure of the underlying
//! bijection. None of these are needed by the containment search or the
//! decompositions; they are the vocabulary the results are usually discussed
//! in.

use crate::perm::Perm;

impl Perm {
    /// Returns the positions `i` with a descent, i.e. `p[i] > p[i + 1]`.
    pub fn descents(&self) -> Vec<usize> {
        let e = self.entries();
        (0..e.len().saturating_sub(1))
            .filter(|&i| e[i] > e[i + 1])
            .collect()
    }

    /// Returns the positions `i` with an ascent, i.e. `p[i] < p[i + 1]`.
    pub fn ascents(&self) -> Vec<usize> {
        let e = self.entries();
        (0..e.len().saturating_sub(1))
            .filter(|&i| e[i] < e[i + 1])
            .collect()
    }

    /// Returns the positions of peaks, entries larger than both neighbors.
    pub fn peaks(&self) -> Vec<usize> {
        let e = self.entries();
        (1..e.len().saturating_sub(1))
            .filter(|&i| e[i - 1] < e[i] && e[i] > e[i + 1])
            .collect()
    }

    /// Returns the positions of valleys, entries smaller than both neighbors.
    pub fn valleys(&self) -> Vec<usize> {
        let e = self.entries();
        (1..e.len().saturating_sub(1))
            .filter(|&i| e[i - 1] > e[i] && e[i] < e[i + 1])
            .collect()
    }

    /// Returns the positions of the left-to-right minima.
    pub fn ltr_minima(&self) -> Vec<usize> {
        let mut positions = Vec::new();
        let mut best = u16::MAX;
        for (idx, &value) in self.entries().iter().enumerate() {
            if value < best || idx == 0 {
                positions.push(idx);
                best = value;
            }
        }
        positions
    }

    /// Returns the positions of the left-to-right maxima.
    pub fn ltr_maxima(&self) -> Vec<usize> {
        let mut positions = Vec::new();
        let mut best = None;
        for (idx, &value) in self.entries().iter().enumerate() {
            if best.map_or(true, |b| value > b) {
                positions.push(idx);
                best = Some(value);
            }
        }
        positions
    }

    /// Returns the positions of the right-to-left minima, rightmost first.
    pub fn rtl_minima(&self) -> Vec<usize> {
        let mut positions = Vec::new();
        let mut best = u16::MAX;
        let n = self.len();
        for (back, &value) in self.entries().iter().rev().enumerate() {
            if value < best || back == 0 {
                positions.push(n - back - 1);
                best = value;
            }
        }
        positions
    }

    /// Returns the positions of the right-to-left maxima, rightmost first.
    pub fn rtl_maxima(&self) -> Vec<usize> {
        let mut positions = Vec::new();
        let mut best = None;
        let n = self.len();
        for (back, &value) in self.entries().iter().rev().enumerate() {
            if best.map_or(true, |b| value > b) {
                positions.push(n - back - 1);
                best = Some(value);
            }
        }
        positions
    }

    /// Returns the inversions: pairs `(i, j)` with `i < j` and
    /// `p[i] > p[j]`.
    pub fn inversions(&self) -> Vec<(usize, usize)> {
        let e = self.entries();
        let mut pairs = Vec::new();
        for i in 0..e.len() {
            for j in i + 1..e.len() {
                if e[i] > e[j] {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }

    /// Returns the noninversions: pairs `(i, j)` with `i < j` and
    /// `p[i] < p[j]`.
    pub fn noninversions(&self) -> Vec<(usize, usize)> {
        let e = self.entries();
        let mut pairs = Vec::new();
        for i in 0..e.len() {
            for j in i + 1..e.len() {
                if e[i] < e[j] {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }

    /// Returns the fixed points, positions holding their own index.
    pub fn fixed_points(&self) -> Vec<usize> {
        self.entries()
            .iter()
            .enumerate()
            .filter(|&(idx, &value)| idx == value as usize)
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Checks whether the permutation is its own inverse.
    pub fn is_involution(&self) -> bool {
        let e = self.entries();
        e.iter()
            .enumerate()
            .all(|(idx, &value)| e[value as usize] as usize == idx)
    }

    /// Returns the start positions of bonds, adjacent pairs of entries that
    /// differ by exactly one.
    pub fn bonds(&self) -> Vec<usize> {
        let e = self.entries();
        (0..e.len().saturating_sub(1))
            .filter(|&i| e[i].abs_diff(e[i + 1]) == 1)
            .collect()
    }

    /// Returns the minimal taxicab distance between two entries of the plot,
    /// or the length itself when fewer than two entries exist.
    pub fn breadth(&self) -> usize {
        let e = self.entries();
        let mut best = e.len();
        for i in 0..e.len() {
            for j in i + 1..e.len() {
                let dist = (j - i) + e[i].abs_diff(e[j]) as usize;
                best = best.min(dist);
            }
        }
        best
    }

    /// Returns `(start, length)` of the leftmost longest ascending run, a
    /// maximal block of consecutive positions with increasing entries.
    ///
    /// The empty permutation has the empty run `(0, 0)`.
    pub fn max_ascending_run(&self) -> (usize, usize) {
        let e = self.entries();
        let mut best = (0, 0);
        let mut start = 0;
        for idx in 0..e.len() {
            if idx > 0 && e[idx - 1] < e[idx] {
                continue;
            }
            if idx > 0 && idx - start > best.1 {
                best = (start, idx - start);
            }
            start = idx;
        }
        if e.len() - start > best.1 {
            best = (start, e.len() - start);
        }
        best
    }

    /// Returns the nontrivial cycles of the bijection `i -> p[i]`, each
    /// starting at its smallest position, ordered by that position.
    pub fn cycles(&self) -> Vec<Vec<u16>> {
        let e = self.entries();
        let mut seen = vec![false; e.len()];
        let mut cycles = Vec::new();
        for start in 0..e.len() {
            if seen[start] || e[start] as usize == start {
                continue;
            }
            let mut cycle = Vec::new();
            let mut point = start;
            while !seen[point] {
                seen[point] = true;
                cycle.push(point as u16);
                point = e[point] as usize;
            }
            cycles.push(cycle);
        }
        cycles
    }
}
