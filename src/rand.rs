//! Sampling random permutations.

use rand_core::{RngCore, SeedableRng};

use crate::perm::{Entries, Perm, MAX_LEN};

/// A non-cryptographic pseudo-random number generator with a tiny state.
///
/// Currently implements the wyrand algorithm, but this may change in the
/// future.
#[derive(Default)]
pub struct TinyRng {
    state: u64,
}

impl SeedableRng for TinyRng {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        let mut new = Self {
            state: u64::from_le_bytes(seed),
        };
        new.next_u64();
        new
    }
}

impl RngCore for TinyRng {
    #[inline(always)]
    fn next_u32(&mut self) -> u32 {
        self.next_u64() as u32
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        // Based on https://github.com/lemire/testingRNG/blob/master/source/wyrand.h
        let state = self.state;
        self.state = self.state.wrapping_add(0xa0761d6478bd642f);
        let xored = state ^ 0xe7037ed1a0b428db;
        let wide_prod = (state as u128) * (xored as u128);
        (wide_prod as u64) ^ ((wide_prod >> 64) as u64)
    }

    #[inline(always)]
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        rand_core::impls::fill_bytes_via_next(self, dest)
    }

    #[inline(always)]
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// `RngCore` extension trait to sample positions and permutations.
pub trait Sample: RngCore {
    /// Returns a random index sampled uniformly from `0..bound`.
    ///
    /// Returns `0` when the range is empty.
    #[inline]
    fn next_index(&mut self, bound: usize) -> usize {
        // Based on
        // https://lemire.me/blog/2019/06/06/nearly-divisionless-random-integer-generation-on-various-systems/
        let s: u64 = bound as u64;
        let mut x = self.next_u64();
        let mut m = (x as u128) * (s as u128);
        let mut l = m as u64;
        if l < s {
            let t = s.wrapping_neg() % s;
            while l < t {
                x = self.next_u64();
                m = (x as u128) * (s as u128);
                l = m as u64;
            }
        }

        (m >> 64) as usize
    }

    /// Uniformly samples a permutation of the given length.
    ///
    /// Panics when `len` exceeds the maximal supported length.
    fn next_perm(&mut self, len: usize) -> Perm {
        assert!(len <= MAX_LEN, "permutation length {len} out of range");
        let mut entries: Entries = (0..len).map(|i| i as u16).collect();

        // Fisher-Yates shuffle
        for i in (1..len).rev() {
            let j = self.next_index(i + 1);
            entries.swap(i, j);
        }
        Perm::from_raw(entries)
    }

    /// Samples permutations of the given length until one avoids every
    /// pattern in `basis`, and returns it.
    ///
    /// Rejection sampling: the result is uniform among the avoiders of the
    /// given length. Does not terminate when no permutation of length `len`
    /// avoids `basis`.
    fn next_avoider(&mut self, len: usize, basis: &[Perm]) -> Perm {
        loop {
            let perm = self.next_perm(len);
            if perm.avoids_all(basis) {
                return perm;
            }
        }
    }
}

impl<T: RngCore + ?Sized> Sample for T {}
