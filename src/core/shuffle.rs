//! Fisher-Yates shuffling.
//!
//! Walks from the last index down to 1 and swaps each position with a
//! uniformly chosen index in `0..=i`, which yields a uniform permutation.

use super::rng::GameRng;

/// Shuffle a slice in place and hand it back.
///
/// ```
/// use memo_grid::core::{shuffle_in_place, GameRng};
///
/// let mut rng = GameRng::new(3);
/// let mut cards = vec![1, 2, 3, 4];
/// shuffle_in_place(&mut cards, &mut rng);
///
/// cards.sort();
/// assert_eq!(cards, vec![1, 2, 3, 4]);
/// ```
pub fn shuffle_in_place<'a, T>(items: &'a mut [T], rng: &mut GameRng) -> &'a mut [T] {
    for i in (1..items.len()).rev() {
        let j = rng.gen_index_inclusive(i);
        items.swap(i, j);
    }
    items
}

/// Return a shuffled copy, leaving the input untouched.
#[must_use]
pub fn shuffled<T: Clone>(items: &[T], rng: &mut GameRng) -> Vec<T> {
    let mut copy = items.to_vec();
    shuffle_in_place(&mut copy, rng);
    copy
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_and_single() {
        let mut rng = GameRng::new(1);

        let empty: Vec<u8> = Vec::new();
        assert!(shuffled(&empty, &mut rng).is_empty());

        let mut one = [9];
        shuffle_in_place(&mut one, &mut rng);
        assert_eq!(one, [9]);
    }

    #[test]
    fn test_copy_leaves_input_untouched() {
        let mut rng = GameRng::new(42);
        let original: Vec<u32> = (0..20).collect();

        let result = shuffled(&original, &mut rng);

        assert_eq!(original, (0..20).collect::<Vec<_>>());
        assert_ne!(result, original);
    }

    #[test]
    fn test_in_place_mutates_input() {
        let mut rng = GameRng::new(42);
        let mut data: Vec<u32> = (0..20).collect();

        shuffle_in_place(&mut data, &mut rng);

        assert_ne!(data, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_every_position_reachable() {
        // With j drawn from 0..=i the last element can stay where it is.
        let mut rng = GameRng::new(11);
        let mut stayed = false;
        let mut moved = false;

        for _ in 0..200 {
            let result = shuffled(&[0, 1, 2], &mut rng);
            if result[2] == 2 {
                stayed = true;
            } else {
                moved = true;
            }
        }

        assert!(stayed && moved);
    }

    proptest! {
        #[test]
        fn prop_shuffle_is_permutation(items in proptest::collection::vec(any::<i16>(), 0..64), seed in any::<u64>()) {
            let mut rng = GameRng::new(seed);
            let mut result = shuffled(&items, &mut rng);
            let mut expected = items.clone();

            result.sort_unstable();
            expected.sort_unstable();
            prop_assert_eq!(result, expected);
        }
    }
}
