//! Unbiased index selection backed by the operating system CSPRNG.

use rand::{
    Rng, TryRngCore,
    rand_core::UnwrapErr,
    rngs::OsRng,
    seq::SliceRandom,
};

use super::errors::{SelectorError, SelectorResult};

/// Secure random selector for winner picks and reel shuffles.
///
/// Draws entropy straight from the OS; there is no seeded constructor.
pub struct SecureSelector {
    rng: UnwrapErr<OsRng>,
}

impl SecureSelector {
    pub fn new() -> Self {
        Self {
            rng: OsRng.unwrap_err(),
        }
    }

    /// Pick a uniformly distributed index in `[0, n)`.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError::EmptyRange`] when `n == 0`.
    pub fn pick(&mut self, n: usize) -> SelectorResult<usize> {
        if n == 0 {
            return Err(SelectorError::EmptyRange);
        }
        Ok(self.rng.random_range(0..n))
    }

    /// Uniformly permute a slice in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}

impl Default for SecureSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SecureSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecureSelector").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_empty_range_fails() {
        let mut selector = SecureSelector::new();
        assert_eq!(selector.pick(0), Err(SelectorError::EmptyRange));
    }

    #[test]
    fn test_pick_single_is_zero() {
        let mut selector = SecureSelector::new();
        for _ in 0..100 {
            assert_eq!(selector.pick(1), Ok(0));
        }
    }

    #[test]
    fn test_pick_frequencies_converge() {
        let mut selector = SecureSelector::new();
        let n = 5;
        let trials = 50_000;
        let mut counts = vec![0usize; n];

        for _ in 0..trials {
            let idx = selector.pick(n).expect("non-empty range");
            counts[idx] += 1;
        }

        // Expected 10_000 per bucket; allow a wide margin (~10 sigma)
        let expected = trials / n;
        for (idx, &count) in counts.iter().enumerate() {
            let diff = count.abs_diff(expected);
            assert!(diff < 1_000, "index {idx} drawn {count} times, expected ~{expected}");
        }
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut selector = SecureSelector::new();
        let mut items: Vec<u32> = (0..20).collect();
        selector.shuffle(&mut items);

        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }
}
