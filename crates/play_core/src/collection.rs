//! Sliding windows over point sequences

/// Consecutive pairs `(a[i], a[i + 1])`
///
/// Yields `max(0, n - 1)` windows.
pub fn pair_wise<T: Copy>(items: &[T]) -> impl Iterator<Item = (T, T)> + '_ {
    items.windows(2).map(|w| (w[0], w[1]))
}

/// Consecutive triples `(a[i], a[i + 1], a[i + 2])`
///
/// Yields `max(0, n - 2)` windows.
pub fn triple_wise<T: Copy>(items: &[T]) -> impl Iterator<Item = (T, T, T)> + '_ {
    items.windows(3).map(|w| (w[0], w[1], w[2]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_wise() {
        let pairs: Vec<_> = pair_wise(&[1, 2, 3, 4, 5]).collect();
        assert_eq!(pairs, vec![(1, 2), (2, 3), (3, 4), (4, 5)]);

        assert_eq!(pair_wise(&[1]).count(), 0);
        assert_eq!(pair_wise::<i32>(&[]).count(), 0);
    }

    #[test]
    fn test_triple_wise() {
        let triples: Vec<_> = triple_wise(&[1, 2, 3, 4, 5]).collect();
        assert_eq!(triples, vec![(1, 2, 3), (2, 3, 4), (3, 4, 5)]);

        assert_eq!(triple_wise(&[1, 2]).count(), 0);
        assert_eq!(triple_wise::<i32>(&[]).count(), 0);
    }
}
