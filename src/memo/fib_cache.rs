//! `FibCache` — a two-slot sliding memo for the Fibonacci recurrence.

use num_traits::PrimInt;

use super::MemoError;

/// Remembers the last two Fibonacci numbers produced and how many exist.
///
/// Starts out holding `fib(0) = 0` and `fib(1) = 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FibCache<N = u64> {
    previous: N,
    last: N,
    len: usize,
}

impl<N: PrimInt> FibCache<N> {
    /// Creates a cache seeded with `fib(0)` and `fib(1)`.
    pub fn new() -> Self {
        Self {
            previous: N::zero(),
            last: N::one(),
            len: 2,
        }
    }

    /// Number of values produced so far (the next index to compute).
    #[allow(clippy::len_without_is_empty)]
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `fib(index)` if it is one of the two values still held.
    ///
    /// # Errors
    ///
    /// [`MemoError::NotComputed`] if `index >= len()`, and
    /// [`MemoError::Evicted`] if it has slid out of the window.
    pub fn get(&self, index: usize) -> Result<N, MemoError> {
        let len = self.len;
        if index >= len {
            return Err(MemoError::NotComputed { index, len });
        }
        match len - index {
            1 => Ok(self.last),
            2 => Ok(self.previous),
            _ => Err(MemoError::Evicted { index, len }),
        }
    }

    /// Appends the next value, evicting the oldest one held.
    pub fn push(&mut self, value: N) {
        self.previous = self.last;
        self.last = value;
        self.len += 1;
    }

    fn next_value(&self) -> Result<N, MemoError> {
        self.last
            .checked_add(&self.previous)
            .ok_or(MemoError::Overflow { index: self.len })
    }
}

impl<N: PrimInt> Default for FibCache<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Computes `fib(n)`, extending `cache` as far as needed.
///
/// Requests at or just below the cache's frontier are answered in O(1); asking
/// for a larger `n` walks forward from the frontier. Indices that have slid out
/// of the window are reported, not recomputed, so callers that need random access
/// should use a fresh cache.
///
/// # Errors
///
/// [`MemoError::Evicted`] for an index no longer held, and
/// [`MemoError::Overflow`] once values stop fitting in `N`. An overflow leaves
/// the cache at the last value that did fit.
///
/// # Example
///
/// ```rust
/// use lazy_val::memo::{fib, FibCache};
///
/// let mut cache = FibCache::<u32>::new();
/// let firsts: Vec<u32> = (0..10).map(|n| fib(&mut cache, n).unwrap()).collect();
/// assert_eq!(firsts, [0, 1, 1, 2, 3, 5, 8, 13, 21, 34]);
/// ```
pub fn fib<N: PrimInt>(cache: &mut FibCache<N>, n: usize) -> Result<N, MemoError> {
    while cache.len() <= n {
        let next = cache.next_value()?;
        cache.push(next);
    }
    cache.get(n)
}

/// Largest `n` whose Fibonacci number fits in a `u64`.
pub const FIB_NAIVE_MAX_INDEX: u32 = 93;

/// Exponential-time reference definition, used to cross-check the cache.
///
/// Returns `None` for `n > FIB_NAIVE_MAX_INDEX`, where the result would not
/// fit in a `u64`. Running time doubles with each `n`, so in practice only
/// small inputs are useful.
pub fn fib_naive(n: u32) -> Option<u64> {
    fn go(n: u32) -> u64 {
        match n {
            0 => 0,
            1 => 1,
            _ => go(n - 1) + go(n - 2),
        }
    }

    // Every intermediate term is at most fib(n), so in range the sum cannot overflow.
    (n <= FIB_NAIVE_MAX_INDEX).then(|| go(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fib_cache_seed() {
        let cache = FibCache::<u64>::new();
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(0), Ok(0));
        assert_eq!(cache.get(1), Ok(1));
        assert_eq!(cache.get(2), Err(MemoError::NotComputed { index: 2, len: 2 }));
    }

    #[test]
    fn test_fib_cache_push_slides_window() {
        let mut cache = FibCache::<u64>::new();
        cache.push(1);
        cache.push(2);

        assert_eq!(cache.len(), 4);
        assert_eq!(cache.get(3), Ok(2));
        assert_eq!(cache.get(2), Ok(1));
        assert_eq!(cache.get(1), Err(MemoError::Evicted { index: 1, len: 4 }));
    }

    #[test]
    fn test_fib_sequential_matches_naive() {
        let mut cache = FibCache::<u64>::new();
        for n in 0..30u32 {
            assert_eq!(fib(&mut cache, n as usize).ok(), fib_naive(n));
        }
    }

    #[test]
    fn test_fib_naive_rejects_indices_past_u64() {
        assert_eq!(fib_naive(0), Some(0));
        assert_eq!(fib_naive(20), Some(6_765));
        assert_eq!(fib_naive(FIB_NAIVE_MAX_INDEX + 1), None);
        assert_eq!(fib_naive(u32::MAX), None);

        // The cache agrees on where u64 runs out.
        let mut cache = FibCache::<u64>::new();
        assert_eq!(fib(&mut cache, FIB_NAIVE_MAX_INDEX as usize), Ok(12_200_160_415_121_876_738));
        assert_eq!(
            fib(&mut cache, FIB_NAIVE_MAX_INDEX as usize + 1),
            Err(MemoError::Overflow { index: 94 })
        );
    }

    #[test]
    fn test_fib_jump_ahead() {
        let mut cache = FibCache::<u64>::new();
        assert_eq!(fib(&mut cache, 50), Ok(12_586_269_025));
        assert_eq!(cache.len(), 51);
        assert_eq!(fib(&mut cache, 49), Ok(7_778_742_049));
        assert!(matches!(fib(&mut cache, 10), Err(MemoError::Evicted { index: 10, .. })));
    }

    #[test]
    fn test_fib_overflow() {
        let mut cache = FibCache::<u8>::new();
        // fib(13) = 233 is the largest that fits in a u8.
        assert_eq!(fib(&mut cache, 13), Ok(233));
        assert_eq!(fib(&mut cache, 14), Err(MemoError::Overflow { index: 14 }));
        assert_eq!(cache.len(), 14);
        assert_eq!(fib(&mut cache, 13), Ok(233));
    }

    #[test]
    fn test_memo_error_messages() {
        let err = MemoError::Evicted { index: 3, len: 10 };
        assert_eq!(
            err.to_string(),
            "fib(3) is no longer in the cache; only the last two of 10 values are kept"
        );
        assert_eq!(
            MemoError::Overflow { index: 94 }.to_string(),
            "fib(94) overflows the numeric type"
        );
    }
}
