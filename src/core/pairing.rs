// Positional pairing of original and override clips

use super::CoreError;

/// Pair element `i` of `originals` with element `i` of `overrides`
///
/// Both sequences must come from the same enumeration (same animation list,
/// same order). Nothing is paired when the lengths differ.
pub fn pair_by_position<A: Clone, B: Clone>(
    originals: &[A],
    overrides: &[B],
) -> Result<Vec<(A, B)>, CoreError> {
    if originals.len() != overrides.len() {
        return Err(CoreError::PairingLengthMismatch {
            originals: originals.len(),
            overrides: overrides.len(),
        });
    }

    Ok(originals.iter().cloned().zip(overrides.iter().cloned()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_equal_lengths() {
        let originals = ["a", "b", "c", "d", "e"];
        let overrides = [1, 2, 3, 4, 5];

        let pairs = pair_by_position(&originals, &overrides).unwrap();
        assert_eq!(pairs.len(), 5);
        assert_eq!(pairs[0], ("a", 1));
        assert_eq!(pairs[4], ("e", 5));
    }

    #[test]
    fn test_pair_length_mismatch() {
        let originals = ["a", "b", "c", "d", "e"];
        let overrides = [1, 2, 3, 4];

        let result = pair_by_position(&originals, &overrides);
        assert_eq!(
            result,
            Err(CoreError::PairingLengthMismatch {
                originals: 5,
                overrides: 4
            })
        );
    }

    #[test]
    fn test_pair_empty() {
        let originals: [u8; 0] = [];
        let overrides: [u8; 0] = [];
        assert!(pair_by_position(&originals, &overrides).unwrap().is_empty());
    }
}
