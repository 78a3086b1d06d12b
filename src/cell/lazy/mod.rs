//! Lazy initialization and memoization cells.

pub mod lazy_val;

pub use lazy_val::LazyVal;
