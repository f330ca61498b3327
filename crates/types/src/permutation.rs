//! The cupboard's hidden number assignment.

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

/// Errors from building a permutation out of raw values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PermutationError {
    /// A value falls outside `0..len`.
    #[error("value {value} at position {position} is out of range 0..{len}")]
    OutOfRange {
        /// The offending value.
        value: usize,
        /// Where it was found.
        position: usize,
        /// Length of the permutation.
        len: usize,
    },

    /// A value appears more than once.
    #[error("value {value} appears more than once")]
    Duplicate {
        /// The repeated value.
        value: usize,
    },
}

/// A bijective mapping from drawer position to the prisoner number hidden
/// inside it.
///
/// Fixed at the start of a run and immutable thereafter, which is what makes
/// the cycle decomposition computed from it valid for the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation(Vec<usize>);

impl Permutation {
    /// The identity assignment: drawer `i` hides number `i`.
    pub fn identity(len: usize) -> Self {
        Self((0..len).collect())
    }

    /// A uniformly random assignment drawn from `rng`.
    pub fn random(len: usize, rng: &mut impl Rng) -> Self {
        let mut values: Vec<usize> = (0..len).collect();
        values.shuffle(rng);
        Self(values)
    }

    /// Build from explicit values, rejecting anything that is not a
    /// bijection of `0..len`.
    pub fn from_vec(values: Vec<usize>) -> Result<Self, PermutationError> {
        let len = values.len();
        let mut seen = vec![false; len];
        for (position, &value) in values.iter().enumerate() {
            if value >= len {
                return Err(PermutationError::OutOfRange {
                    value,
                    position,
                    len,
                });
            }
            if seen[value] {
                return Err(PermutationError::Duplicate { value });
            }
            seen[value] = true;
        }
        Ok(Self(values))
    }

    /// The number hidden in drawer `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position >= len()`.
    pub fn image(&self, position: usize) -> usize {
        self.0[position]
    }

    /// Number of drawers covered by this assignment.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for the degenerate zero-drawer assignment.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The raw drawer-to-number table.
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn is_bijection(values: &[usize]) -> bool {
        let mut seen = vec![false; values.len()];
        for &v in values {
            if v >= values.len() || seen[v] {
                return false;
            }
            seen[v] = true;
        }
        true
    }

    #[test]
    fn test_identity() {
        let perm = Permutation::identity(4);
        assert_eq!(perm.as_slice(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_random_is_bijective() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for len in [1usize, 2, 7, 100, 1001] {
            let perm = Permutation::random(len, &mut rng);
            assert_eq!(perm.len(), len);
            assert!(is_bijection(perm.as_slice()), "len {} not bijective", len);
        }
    }

    #[test]
    fn test_random_is_seed_deterministic() {
        let a = Permutation::random(50, &mut ChaCha8Rng::seed_from_u64(7));
        let b = Permutation::random(50, &mut ChaCha8Rng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_from_vec_accepts_valid() {
        let perm = Permutation::from_vec(vec![1, 0, 3, 2]).unwrap();
        assert_eq!(perm.image(0), 1);
        assert_eq!(perm.image(3), 2);
    }

    #[test]
    fn test_from_vec_rejects_out_of_range() {
        let err = Permutation::from_vec(vec![0, 4, 2, 3]).unwrap_err();
        assert_eq!(
            err,
            PermutationError::OutOfRange {
                value: 4,
                position: 1,
                len: 4
            }
        );
    }

    #[test]
    fn test_from_vec_rejects_duplicates() {
        let err = Permutation::from_vec(vec![0, 1, 1, 3]).unwrap_err();
        assert_eq!(err, PermutationError::Duplicate { value: 1 });
    }

    #[test]
    fn test_empty_permutation() {
        let perm = Permutation::from_vec(Vec::new()).unwrap();
        assert!(perm.is_empty());
        assert_eq!(perm.len(), 0);
    }
}
