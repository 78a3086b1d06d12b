//! Concurrency building blocks.
//!
//! Every lazy cell embeds its own lock; nothing in this module is global.

pub mod sync;

pub use sync::{RawMutex, RawMutexGuard};
