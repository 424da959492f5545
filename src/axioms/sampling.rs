//! Drawing tuples of sample elements

use crate::utils::sampling_rng;
use rand::seq::index;
use tracing::debug;

/// Index tuples of length `repeat` drawn from `elements`.
///
/// Without `max_samples` this is the Cartesian product in lexicographic
/// order (first position slowest), cut off after `bound` tuples. With
/// `max_samples` it is a random choice of that many distinct tuples, drawn
/// from the whole product regardless of `bound`; `seed` makes it
/// reproducible.
pub fn some_tuples<T>(
    elements: &[T],
    repeat: usize,
    bound: usize,
    max_samples: Option<usize>,
    seed: Option<u64>,
) -> Vec<Vec<usize>> {
    let n = elements.len();
    if n == 0 {
        return Vec::new();
    }
    let total = n.checked_pow(repeat as u32).unwrap_or(usize::MAX);

    match max_samples {
        None => (0..total.min(bound))
            .map(|a| {
                let mut digits = decode(a, n, repeat);
                digits.reverse();
                digits
            })
            .collect(),
        Some(max_samples) => {
            let amount = max_samples.min(total);
            debug!(amount, total, "sampling tuples at random");
            let mut rng = sampling_rng(seed);
            index::sample(&mut rng, total, amount)
                .into_iter()
                .map(|a| decode(a, n, repeat))
                .collect()
        }
    }
}

/// Base-`n` digits of `a`, least significant first, padded to `len`
fn decode(mut a: usize, n: usize, len: usize) -> Vec<usize> {
    let mut digits = Vec::with_capacity(len);
    for _ in 0..len {
        digits.push(a % n);
        a /= n;
    }
    digits
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_lexicographic_product() {
        let tuples = some_tuples(&['a', 'b'], 3, 100, None, None);
        assert_eq!(tuples.len(), 8);
        assert_eq!(tuples[0], vec![0, 0, 0]);
        assert_eq!(tuples[1], vec![0, 0, 1]);
        assert_eq!(tuples[2], vec![0, 1, 0]);
        assert_eq!(tuples[7], vec![1, 1, 1]);
    }

    #[test]
    fn test_bound() {
        let tuples = some_tuples(&[1, 2, 3], 3, 5, None, None);
        assert_eq!(tuples.len(), 5);
        assert_eq!(tuples[4], vec![0, 1, 1]);
    }

    #[test]
    fn test_empty() {
        let empty: [u8; 0] = [];
        assert!(some_tuples(&empty, 3, 10, None, None).is_empty());
    }

    #[test]
    fn test_random_sampling_is_distinct_and_seeded() {
        let elements = [0u8; 4];
        let first = some_tuples(&elements, 3, 1, Some(20), Some(11));
        let second = some_tuples(&elements, 3, 1, Some(20), Some(11));

        assert_eq!(first.len(), 20);
        assert_eq!(first, second);
        let distinct: HashSet<_> = first.iter().collect();
        assert_eq!(distinct.len(), 20);
        assert!(first.iter().flatten().all(|&i| i < 4));
    }

    #[test]
    fn test_random_sampling_caps_at_total() {
        let tuples = some_tuples(&[1, 2], 3, 1, Some(100), Some(0));
        assert_eq!(tuples.len(), 8);
    }
}
