//! Cell family - interior-mutability primitives built on [`crate::concurrency::sync`].
//!
//! - `lazy::*` are initialization and memoization-style building blocks.
//! - `macros` holds the `lazy!` construction sugar.

pub mod lazy;
mod macros;

pub use lazy::LazyVal;
