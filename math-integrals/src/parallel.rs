//! Parallel iteration with a sequential fallback
//!
//! With the `parallel` feature the helpers use rayon; without it they run
//! sequentially. Both variants return results in input order, so callers
//! reducing the output in order get identical sums either way.

/// Check if parallel processing is available
#[inline]
pub fn is_parallel_available() -> bool {
    cfg!(feature = "parallel")
}

/// Map over a slice, preserving order
#[cfg(feature = "parallel")]
pub fn parallel_map<T, U, F>(data: &[T], f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    use rayon::prelude::*;
    data.par_iter().map(f).collect()
}

#[cfg(not(feature = "parallel"))]
pub fn parallel_map<T, U, F>(data: &[T], f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    data.iter().map(f).collect()
}

/// Map over `0..count`, preserving order
#[cfg(feature = "parallel")]
pub fn parallel_map_indexed<U, F>(count: usize, f: F) -> Vec<U>
where
    U: Send,
    F: Fn(usize) -> U + Sync + Send,
{
    use rayon::prelude::*;
    (0..count).into_par_iter().map(f).collect()
}

#[cfg(not(feature = "parallel"))]
pub fn parallel_map_indexed<U, F>(count: usize, f: F) -> Vec<U>
where
    U: Send,
    F: Fn(usize) -> U + Sync + Send,
{
    (0..count).map(f).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallel_map_preserves_order() {
        let data: Vec<i32> = (0..100).collect();
        let result = parallel_map(&data, |x| x * 2);
        assert_eq!(result, (0..100).map(|x| x * 2).collect::<Vec<_>>());
    }

    #[test]
    fn test_parallel_map_indexed() {
        let result = parallel_map_indexed(10, |i| i * i);
        assert_eq!(result, vec![0, 1, 4, 9, 16, 25, 36, 49, 64, 81]);
    }

    #[test]
    fn test_availability_matches_feature() {
        assert_eq!(is_parallel_available(), cfg!(feature = "parallel"));
    }
}
