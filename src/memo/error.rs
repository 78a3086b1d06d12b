use thiserror::Error;

/// Errors produced by bounded memoization caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MemoError {
    /// The requested index was computed once but has since fallen out of the window.
    #[error("fib({index}) is no longer in the cache; only the last two of {len} values are kept")]
    Evicted {
        /// Requested index.
        index: usize,
        /// Number of values produced so far.
        len: usize,
    },
    /// The requested index lies beyond what the cache has produced.
    #[error("fib({index}) has not been computed yet; the cache holds {len} values")]
    NotComputed {
        /// Requested index.
        index: usize,
        /// Number of values produced so far.
        len: usize,
    },
    /// The next value does not fit in the cache's numeric type.
    #[error("fib({index}) overflows the numeric type")]
    Overflow {
        /// Index whose value overflowed.
        index: usize,
    },
}
