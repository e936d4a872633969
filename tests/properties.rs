//! Property-based tests for the pattern and decomposition algorithms.
//!
//! These verify algebraic laws over randomized permutations: transform
//! involutions, decomposition round-trips, and agreement of the pruned
//! containment search with brute-force enumeration.

use patova::{rand::Sample, rand::TinyRng, Perm};
use proptest::prelude::*;
use rand_core::SeedableRng;

// ============================================================================
// Strategies
// ============================================================================

fn factorial(n: u64) -> u64 {
    (2..=n).product()
}

/// A permutation of length `0..=max_len`, drawn through the indexing
/// bijection so every length and every permutation is reachable.
fn perm(max_len: usize) -> impl Strategy<Value = Perm> {
    (0..=max_len)
        .prop_flat_map(|n| (Just(n), 0..factorial(n as u64)))
        .prop_map(|(n, k)| Perm::from_index(k, n))
}

/// A permutation together with a strictly increasing subset of its positions.
fn perm_and_positions(max_len: usize) -> impl Strategy<Value = (Perm, Vec<usize>)> {
    perm(max_len).prop_flat_map(|p| {
        let n = p.len();
        let positions = if n == 0 {
            Just(Vec::new()).boxed()
        } else {
            proptest::sample::subsequence((0..n).collect::<Vec<usize>>(), 0..=n).boxed()
        };
        (Just(p), positions)
    })
}

fn small_basis() -> impl Strategy<Value = Perm> {
    prop_oneof![
        Just("123".parse::<Perm>().unwrap()),
        Just("231".parse::<Perm>().unwrap()),
        Just("321".parse::<Perm>().unwrap()),
        Just("2413".parse::<Perm>().unwrap()),
        Just("21".parse::<Perm>().unwrap()),
    ]
}

// ============================================================================
// Value-type laws
// ============================================================================

proptest! {
    #[test]
    fn transforms_are_involutions(p in perm(8)) {
        prop_assert_eq!(p.reverse().reverse(), p.clone());
        prop_assert_eq!(p.complement().complement(), p.clone());
        prop_assert_eq!(p.inverse().inverse(), p.clone());
    }

    #[test]
    fn standardizing_entries_is_identity(p in perm(8)) {
        prop_assert_eq!(Perm::standardize(p.entries()).unwrap(), p);
    }

    #[test]
    fn indexing_roundtrips(p in perm(8)) {
        prop_assert_eq!(Perm::from_index(p.to_index(), p.len()), p);
    }

    #[test]
    fn insert_then_delete_is_identity(p in perm(8), idx in 0usize..9, value in 0u16..9) {
        let idx = idx.min(p.len());
        let value = value.min(p.len() as u16);
        prop_assert_eq!(p.insert(idx, value).delete_index(idx), p);
    }

    #[test]
    fn composition_with_inverse_cancels(p in perm(8)) {
        prop_assert_eq!(p.compose(&p.inverse()), Perm::identity(p.len()));
        prop_assert_eq!(p.inverse().compose(&p), Perm::identity(p.len()));
    }
}

// ============================================================================
// Containment laws
// ============================================================================

proptest! {
    #[test]
    fn search_matches_brute_force(target in perm(6), pattern in perm(4)) {
        let occurrences = target.copies(&pattern);
        prop_assert_eq!(pattern.involved_in(&target), !occurrences.is_empty());
    }

    #[test]
    fn subpatterns_are_involved(pair in perm_and_positions(8)) {
        let (p, positions) = pair;
        let sub = p.subpattern(&positions);
        prop_assert!(p.involves(&sub));
    }

    #[test]
    fn containment_respects_symmetry(target in perm(6), pattern in perm(3)) {
        let direct = pattern.involved_in(&target);
        prop_assert_eq!(pattern.reverse().involved_in(&target.reverse()), direct);
        prop_assert_eq!(pattern.complement().involved_in(&target.complement()), direct);
        prop_assert_eq!(pattern.inverse().involved_in(&target.inverse()), direct);
    }

    #[test]
    fn avoidance_is_monotone_under_deletion(p in perm(7), pattern in small_basis(), idx in 0usize..7) {
        if !p.is_empty() && p.avoids(&pattern) {
            let smaller = p.delete_index(idx % p.len());
            prop_assert!(smaller.avoids(&pattern));
        }
    }
}

// ============================================================================
// Decomposition laws
// ============================================================================

proptest! {
    #[test]
    fn sum_decomposition_reconstructs(p in perm(9)) {
        let parts = p.sum_decomposition();
        let rebuilt = parts
            .iter()
            .fold(Perm::default(), |acc, part| acc.direct_sum(part));
        prop_assert_eq!(rebuilt, p.clone());
        prop_assert!(parts.iter().all(|part| !part.sum_decomposable()));
    }

    #[test]
    fn skew_decomposition_reconstructs(p in perm(9)) {
        let parts = p.skew_decomposition();
        let mut iter = parts.iter();
        let rebuilt = match iter.next() {
            Some(first) => iter.fold(first.clone(), |acc, part| acc.skew_sum(part)),
            None => Perm::default(),
        };
        prop_assert_eq!(rebuilt, p.clone());
        prop_assert!(parts.iter().all(|part| !part.skew_decomposable()));
    }

    #[test]
    fn substitution_decomposition_reconstructs(p in perm(9)) {
        let (base, components) = p.decomposition();
        prop_assert!(base.is_simple());
        prop_assert_eq!(base.len(), components.len());
        prop_assert_eq!(base.inflate(&components).unwrap(), p);
    }
}

// ============================================================================
// Sampling
// ============================================================================

proptest! {
    #[test]
    fn sampled_avoiders_avoid(seed: u64, len in 0usize..7) {
        let basis = ["123".parse::<Perm>().unwrap()];
        let mut rng = TinyRng::from_seed(seed.to_le_bytes());
        let p = rng.next_avoider(len, &basis);
        prop_assert_eq!(p.len(), len);
        prop_assert!(p.avoids_all(&basis));
    }
}
