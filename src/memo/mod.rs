//! Bounded memoization for linear recurrences.
//!
//! Where [`LazyVal`](crate::LazyVal) caches one value forever, a [`FibCache`]
//! keeps only the trailing window a recurrence actually needs: the last two
//! Fibonacci numbers and how many have been produced so far.

mod error;
mod fib_cache;

pub use error::MemoError;
pub use fib_cache::{fib, fib_naive, FibCache, FIB_NAIVE_MAX_INDEX};
