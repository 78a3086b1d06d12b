//! Blocking synchronization primitives backing the lazy cells.
//!
//! [`RawMutex`] spins briefly with `crossbeam_utils::Backoff`, then parks the
//! thread on an intrusive FIFO wait queue. It carries no data and never poisons.

mod raw_mutex;
mod wait_queue;

pub use raw_mutex::{RawMutex, RawMutexGuard};
