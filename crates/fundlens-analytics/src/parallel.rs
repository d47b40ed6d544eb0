//! Parallel processing utilities for per-ticker analytics.
//!
//! Provides conditional parallel iteration based on configuration
//! and batch size. Uses rayon when the `parallel` feature is enabled.

use crate::config::AnalyticsConfig;

/// Maps a function over items, conditionally using parallel iteration.
///
/// Uses parallel iteration when:
/// - The `parallel` feature is enabled
/// - `config.parallel` is true
/// - The batch size reaches `config.parallel_threshold`
///
/// Output order always matches input order.
#[allow(unused_variables)]
pub fn maybe_parallel_map<T, U, F>(items: &[T], config: &AnalyticsConfig, f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        if config.should_parallelize(items.len()) {
            return items.par_iter().map(f).collect();
        }
    }

    items.iter().map(f).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_map() {
        let config = AnalyticsConfig::sequential();
        let out = maybe_parallel_map(&[1, 2, 3], &config, |x| x * 10);
        assert_eq!(out, vec![10, 20, 30]);
    }

    #[test]
    fn test_parallel_map_preserves_order() {
        let config = AnalyticsConfig::new().with_threshold(1);
        let items: Vec<usize> = (0..500).collect();
        let out = maybe_parallel_map(&items, &config, |x| x * 2);
        assert_eq!(out, items.iter().map(|x| x * 2).collect::<Vec<_>>());
    }
}
