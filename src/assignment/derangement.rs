//! Rejection-sampled derangements.
//!
//! A candidate permutation is drawn with a Fisher-Yates shuffle and kept only
//! if no position maps to itself. For `n >= 2` roughly `1/e` of all
//! permutations qualify (exactly half for `n = 2`), so a handful of draws is
//! normally enough. If the attempt bound runs out, the generator returns the
//! single-cycle rotation `i -> (i + 1) mod n`. The rotation is always a valid
//! derangement but it is not random, so a drawing produced by the fallback is
//! not uniform over all derangements.

use crate::utils::permutation::{self, RandomPermutation};
use rand::Rng;
use tracing::{debug, warn};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerangementSource {
    /// Accepted shuffle; `attempts` counts the accepted one.
    Shuffled { attempts: u32 },
    Rotation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derangement {
    permutation: RandomPermutation,
    source: DerangementSource,
}

impl Derangement {
    fn rotation(n: usize) -> Self {
        Derangement {
            permutation: RandomPermutation::rotation(n),
            source: DerangementSource::Rotation,
        }
    }

    /// Source index for every position.
    pub fn indices(&self) -> &[usize] {
        self.permutation.as_slice()
    }

    pub fn source(&self) -> DerangementSource {
        self.source
    }

    pub fn is_fallback(&self) -> bool {
        self.source == DerangementSource::Rotation
    }

    pub fn attempts(&self) -> Option<u32> {
        match self.source {
            DerangementSource::Shuffled { attempts } => Some(attempts),
            DerangementSource::Rotation => None,
        }
    }

    pub fn len(&self) -> usize {
        self.permutation.len()
    }

    pub fn is_empty(&self) -> bool {
        self.permutation.is_empty()
    }

    pub fn apply<T: Clone>(&self, items: &[T]) -> Vec<T> {
        self.permutation.apply(items)
    }

    pub fn into_indices(self) -> Vec<usize> {
        self.permutation.into_inner()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deranger {
    max_attempts: u32,
}

impl Default for Deranger {
    fn default() -> Self {
        Deranger {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl Deranger {
    pub fn new(max_attempts: u32) -> Self {
        Deranger { max_attempts }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Draws a permutation of `0..n` without fixed points.
    ///
    /// `n < 2` has no derangement; the caller is expected to reject it. For
    /// completeness `n = 0` yields an empty permutation and `n = 1` yields
    /// `[0]`.
    pub fn derange_indices<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Derangement {
        if n < 2 {
            return Derangement::rotation(n);
        }

        let mut candidate = RandomPermutation::identity(n);
        for attempt in 1..=self.max_attempts {
            candidate.reshuffle(rng);
            if !candidate.has_fixed_point() {
                debug!(n, attempts = attempt, "drew derangement");
                return Derangement {
                    permutation: candidate,
                    source: DerangementSource::Shuffled { attempts: attempt },
                };
            }
        }

        warn!(
            n,
            max_attempts = self.max_attempts,
            "no derangement within retry bound, falling back to rotation"
        );
        Derangement::rotation(n)
    }

    /// Reorders `items` so that no element keeps its position.
    ///
    /// Positions, not values, are compared: equal values at different
    /// positions count as distinct elements.
    pub fn derange<T: Clone, R: Rng + ?Sized>(&self, items: &[T], rng: &mut R) -> Vec<T> {
        self.derange_indices(items.len(), rng).apply(items)
    }
}

pub fn rotation(n: usize) -> Vec<usize> {
    RandomPermutation::rotation(n).into_inner()
}

pub fn is_derangement(indices: &[usize]) -> bool {
    permutation::is_bijection(indices) && indices.iter().enumerate().all(|(i, &j)| i != j)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn two_elements_always_swap() {
        let deranger = Deranger::default();
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..200 {
            let derangement = deranger.derange_indices(2, &mut rng);
            assert_eq!(derangement.indices(), &[1, 0]);
        }
    }

    #[test]
    fn shuffled_results_have_no_fixed_points() {
        let deranger = Deranger::default();
        let mut rng = StdRng::seed_from_u64(0x5A17A);
        for n in 2..48 {
            for _ in 0..20 {
                let derangement = deranger.derange_indices(n, &mut rng);
                assert!(is_derangement(derangement.indices()), "n = {n}");
            }
        }
    }

    #[test]
    fn exhausted_bound_falls_back_to_rotation() {
        let deranger = Deranger::new(0);
        let mut rng = StdRng::seed_from_u64(11);
        for n in 2..32 {
            let derangement = deranger.derange_indices(n, &mut rng);
            assert!(derangement.is_fallback());
            assert_eq!(derangement.attempts(), None);
            assert_eq!(derangement.indices(), rotation(n).as_slice());
            assert!(is_derangement(derangement.indices()));
        }
    }

    #[test]
    fn accepted_shuffle_reports_attempt_count() {
        let deranger = Deranger::default();
        let mut rng = StdRng::seed_from_u64(99);
        let derangement = deranger.derange_indices(6, &mut rng);
        let attempts = derangement.attempts().expect("default bound should not be exhausted");
        assert!((1..=DEFAULT_MAX_ATTEMPTS).contains(&attempts));
    }

    #[test]
    fn degenerate_sizes_do_not_loop() {
        let deranger = Deranger::default();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(deranger.derange_indices(0, &mut rng).is_empty());
        assert_eq!(deranger.derange_indices(1, &mut rng).indices(), &[0]);
    }

    #[test]
    fn equal_values_are_deranged_by_position() {
        let deranger = Deranger::default();
        let mut rng = StdRng::seed_from_u64(3);
        let items = vec![("1", "Sam"), ("2", "Sam"), ("3", "Alex")];
        let deranged = deranger.derange(&items, &mut rng);
        for (original, moved) in items.iter().zip(&deranged) {
            assert_ne!(original.0, moved.0);
        }
    }

    #[test]
    fn is_derangement_rejects_identity_and_non_bijections() {
        assert!(!is_derangement(&[0, 1, 2]));
        assert!(!is_derangement(&[1, 1, 0]));
        assert!(is_derangement(&[2, 0, 1]));
    }
}
