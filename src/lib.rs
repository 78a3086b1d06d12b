//! # `lazy_val` - Memoizing Lazy Values
//!
//! A small toolkit for deferring work until it is needed and doing it at most
//! once, even when many threads ask for the result at the same time.
//!
//! ## Guarantees
//!
//! - **Laziness**: constructing a [`LazyVal`] runs nothing; the bound computation
//!   first executes on the first access.
//! - **At-most-once success**: the computation runs once per successful result, no
//!   matter how many threads race on the first access. Losers block on the cell's
//!   lock and then read the winner's value.
//! - **Retry on failure**: an `Err` (from a cell built with [`LazyVal::new_fallible`] and read via [`LazyVal::try_get`]) or a panic leaves
//!   the cell uncomputed; the next access runs the computation again.
//! - **Stable reads**: once published, the value never changes through `&self`,
//!   and readers past that point take no lock.
//!
//! ## Architecture
//!
//! 1. **Synchronization** ([`concurrency::sync::RawMutex`]):
//!    - Non-poisoning, data-less blocking lock
//!    - Spin with backoff, then park on an intrusive FIFO queue
//!
//! 2. **Lazy cells** ([`LazyVal`], [`lazy!`]):
//!    - Stored computation + optional value + per-cell lock
//!    - Atomic state byte for the lock-free read path
//!
//! 3. **Bounded memoization** ([`memo::FibCache`]):
//!    - Keeps only the last two results of a linear recurrence
//!
//! ## Example
//!
//! ```rust
//! use lazy_val::LazyVal;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::thread;
//!
//! static RUNS: AtomicUsize = AtomicUsize::new(0);
//!
//! let cell = LazyVal::new(|| {
//!     RUNS.fetch_add(1, Ordering::SeqCst);
//!     (1..=10u64).product::<u64>()
//! });
//!
//! thread::scope(|s| {
//!     for _ in 0..8 {
//!         s.spawn(|| assert_eq!(*cell, 3_628_800));
//!     }
//! });
//!
//! assert_eq!(RUNS.load(Ordering::SeqCst), 1);
//! ```
//!
//! ## Features
//!
//! - `tracing`: emit `tracing` events when a cell computes or fails.

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

macro_rules! trace_event {
    ($($arg:tt)*) => {{
        #[cfg(feature = "tracing")]
        ::tracing::trace!($($arg)*);
    }};
}

macro_rules! debug_event {
    ($($arg:tt)*) => {{
        #[cfg(feature = "tracing")]
        ::tracing::debug!($($arg)*);
    }};
}

pub(crate) use {debug_event, trace_event};

pub mod cell;
pub mod concurrency;
pub mod memo;

pub use cell::LazyVal;
pub use concurrency::sync::{RawMutex, RawMutexGuard};
pub use memo::{FibCache, MemoError};

// Compile-time layout checks.
const _: () = {
    use core::mem;

    // The computation and value share the cell with a lock and a state byte;
    // a unit value with a fn-pointer computation should stay within a cache line.
    assert!(mem::size_of::<LazyVal<(), fn()>>() <= mem::size_of::<usize>() * 8);
    assert!(mem::size_of::<FibCache<u64>>() <= mem::size_of::<u64>() * 3);
};
