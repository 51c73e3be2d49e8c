//! Shared "filter, sort, truncate" step used by every strategy.
//!
//! All rankings go through [`rank_top_n`] so ties break the same way
//! everywhere: the sort is stable, so equal keys keep their input order
//! (catalog insertion order for every caller in this workspace).

/// Drop excluded items, stable-sort by `key` descending and keep the first `n`.
///
/// Keys are compared with `f64::total_cmp`, so NaN never panics.
pub fn rank_top_n<T, K, E>(mut items: Vec<T>, key: K, exclude: E, n: usize) -> Vec<T>
where
    K: Fn(&T) -> f64,
    E: Fn(&T) -> bool,
{
    items.retain(|item| !exclude(item));
    items.sort_by(|a, b| key(b).total_cmp(&key(a)));
    items.truncate(n);
    items
}

/// [`rank_top_n`] without an exclusion set.
pub fn top_n_by<T, K>(items: Vec<T>, key: K, n: usize) -> Vec<T>
where
    K: Fn(&T) -> f64,
{
    rank_top_n(items, key, |_| false, n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ties_keep_input_order() {
        let items = vec![("a", 1.0), ("b", 2.0), ("c", 1.0), ("d", 2.0)];
        let ranked = top_n_by(items, |item| item.1, 10);
        let names: Vec<&str> = ranked.iter().map(|item| item.0).collect();
        assert_eq!(names, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_exclude_then_truncate() {
        let items = vec![(1, 0.9), (2, 0.8), (3, 0.7), (4, 0.6)];
        let ranked = rank_top_n(items, |item| item.1, |item| item.0 == 1, 2);
        assert_eq!(ranked, vec![(2, 0.8), (3, 0.7)]);
    }

    #[test]
    fn test_nan_does_not_panic() {
        let items = vec![(1, f64::NAN), (2, 0.5)];
        let ranked = top_n_by(items, |item| item.1, 2);
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn test_zero_and_oversized_n() {
        let items = vec![1.0, 2.0];
        assert!(top_n_by(items.clone(), |x| *x, 0).is_empty());
        assert_eq!(top_n_by(items, |x| *x, 100), vec![2.0, 1.0]);
    }
}
