use rand::seq::SliceRandom;
use rand::Rng;

/// Permutation of `0..n`, stored as the source index for each position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomPermutation(pub Vec<usize>);

impl RandomPermutation {
    pub fn identity(n: usize) -> Self {
        RandomPermutation((0..n).collect())
    }

    pub fn generate<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Self {
        let mut permutation = Self::identity(n);
        permutation.reshuffle(rng);
        permutation
    }

    /// Single-cycle rotation: position `i` takes index `(i + 1) mod n`.
    pub fn rotation(n: usize) -> Self {
        RandomPermutation((0..n).map(|i| (i + 1) % n).collect())
    }

    /// Fisher-Yates shuffle in place.
    pub fn reshuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.0.shuffle(rng);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }

    pub fn fixed_points(&self) -> impl Iterator<Item = usize> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter(|&(position, &index)| position == index)
            .map(|(position, _)| position)
    }

    pub fn has_fixed_point(&self) -> bool {
        self.fixed_points().next().is_some()
    }

    pub fn is_bijection(&self) -> bool {
        is_bijection(&self.0)
    }

    pub fn apply<T: Clone>(&self, items: &[T]) -> Vec<T> {
        assert_eq!(items.len(), self.0.len());
        self.0.iter().map(|&index| items[index].clone()).collect()
    }
}

pub fn is_bijection(indices: &[usize]) -> bool {
    let mut seen = vec![false; indices.len()];
    for &index in indices {
        match seen.get_mut(index) {
            Some(slot) if !*slot => *slot = true,
            _ => return false,
        }
    }
    true
}
