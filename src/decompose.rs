//! Sum, skew and substitution decompositions.
//!
//! A permutation is sum-decomposable when a proper prefix of its positions
//! holds exactly the lowest values, and skew-decomposable when a proper
//! prefix holds exactly the highest. The substitution decomposition is
//! coarser: it repeatedly contracts the longest proper interval to a single
//! position until a simple base remains, keeping the contracted patterns as
//! components. [`Perm::inflate`] is the formal inverse of that process.

use std::fmt;

use crate::perm::{Entries, Perm, MAX_LEN};

/// Error type for [`Perm::inflate`]: the number of components does not match
/// the base permutation's length.
#[derive(Debug)]
pub struct ShapeMismatch {
    base: usize,
    components: usize,
}

impl ShapeMismatch {
    /// Length of the base permutation.
    pub fn base_len(&self) -> usize {
        self.base
    }

    /// Number of components supplied.
    pub fn component_count(&self) -> usize {
        self.components
    }
}

impl std::error::Error for ShapeMismatch {}

impl fmt::Display for ShapeMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot inflate a base of length {} with {} components",
            self.base, self.components
        )
    }
}

impl Perm {
    /// Checks whether the permutation is the direct sum of two shorter ones.
    pub fn sum_decomposable(&self) -> bool {
        let interior = self.len().saturating_sub(1);
        let mut high = 0;
        for (idx, &value) in self.entries()[..interior].iter().enumerate() {
            high = high.max(value as usize);
            if high == idx {
                return true;
            }
        }
        false
    }

    /// Splits the permutation into the unique maximal list of
    /// sum-indecomposable components whose direct sum reconstructs it.
    ///
    /// The empty permutation yields an empty list; a sum-indecomposable
    /// permutation yields itself as the only component.
    ///
    /// ```
    /// use patova::Perm;
    ///
    /// let p: Perm = "1 4 2 3 6 5".parse().unwrap();
    /// let parts = p.sum_decomposition();
    /// assert_eq!(parts.len(), 3);
    /// assert_eq!(parts[1].to_string(), "3 1 2");
    /// ```
    pub fn sum_decomposition(&self) -> Vec<Perm> {
        let mut parts = Vec::new();
        let mut start = 0;
        let mut high = 0;
        for (idx, &value) in self.entries().iter().enumerate() {
            high = high.max(value as usize);
            if high == idx {
                let segment = self.entries()[start..=idx]
                    .iter()
                    .map(|&v| v - start as u16)
                    .collect();
                parts.push(Perm::from_raw(segment));
                start = idx + 1;
            }
        }
        parts
    }

    /// Checks whether the permutation is the skew sum of two shorter ones.
    pub fn skew_decomposable(&self) -> bool {
        let n = self.len();
        let mut low = usize::MAX;
        for (idx, &value) in self.entries()[..n.saturating_sub(1)].iter().enumerate() {
            low = low.min(value as usize);
            if low == n - idx - 1 {
                return true;
            }
        }
        false
    }

    /// Splits the permutation into the unique maximal list of
    /// skew-indecomposable components whose skew sum reconstructs it.
    pub fn skew_decomposition(&self) -> Vec<Perm> {
        let n = self.len();
        let mut parts = Vec::new();
        let mut start = 0;
        let mut low = usize::MAX;
        for (idx, &value) in self.entries().iter().enumerate() {
            low = low.min(value as usize);
            if low == n - idx - 1 {
                let shift = low as u16;
                let segment = self.entries()[start..=idx]
                    .iter()
                    .map(|&v| v - shift)
                    .collect();
                parts.push(Perm::from_raw(segment));
                start = idx + 1;
            }
        }
        parts
    }

    /// Computes the substitution decomposition: a simple base permutation
    /// and one component per base position such that inflating the base by
    /// the components reconstructs `self` exactly.
    ///
    /// The longest proper interval is contracted to a single position until
    /// no nontrivial interval remains; positions never contracted keep a
    /// singleton component.
    pub fn decomposition(&self) -> (Perm, Vec<Perm>) {
        let mut base = self.clone();
        let mut components: Vec<Perm> = (0..self.len()).map(|_| Perm::identity(1)).collect();
        while let Some((length, start)) = base.maximal_proper_interval() {
            let pattern = Perm::rank_standardize(&base.entries()[start..start + length]);
            let kept: Vec<u16> = base
                .entries()
                .iter()
                .enumerate()
                .filter(|&(i, _)| i <= start || i >= start + length)
                .map(|(_, &v)| v)
                .collect();
            base = Perm::rank_standardize(&kept);
            components.splice(start..start + length, std::iter::once(pattern));
        }
        (base, components)
    }

    /// Replaces each entry of `self` by an entire component permutation,
    /// keeping the components' relative vertical order given by the entries.
    ///
    /// This is the inverse of [`Perm::decomposition`]. Fails with
    /// [`ShapeMismatch`] when the number of components differs from the
    /// length of `self`; empty components are allowed and contribute no
    /// positions.
    pub fn inflate(&self, components: &[Perm]) -> Result<Perm, ShapeMismatch> {
        let n = self.len();
        if components.len() != n {
            return Err(ShapeMismatch {
                base: n,
                components: components.len(),
            });
        }
        let total: usize = components.iter().map(Perm::len).sum();
        assert!(total <= MAX_LEN, "inflated permutation too long");

        // Work up through the values so each component lands directly above
        // everything inflated before it.
        let positions = self.inverse();
        let mut blocks: Vec<Vec<u16>> = vec![Vec::new(); n];
        let mut shift = 0usize;
        for value in 0..n {
            let idx = positions.entries()[value] as usize;
            blocks[idx] = components[idx]
                .entries()
                .iter()
                .map(|&v| (v as usize + shift) as u16)
                .collect();
            shift += components[idx].len();
        }

        let entries: Entries = blocks.into_iter().flatten().collect();
        Ok(Perm::from_raw(entries))
    }
}
