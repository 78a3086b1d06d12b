//! `LazyVal` — a thread-safe memoizing lazy value.
//!
//! Holds a zero-argument computation and, once it has succeeded, its result.
//! The first accessor to find the cell empty runs the computation under the
//! cell's own [`RawMutex`]; everyone else either blocks on that lock or, once the
//! value is published, reads it without locking at all.
//!
//! Failures are not memoized: an `Err` from [`LazyVal::try_get`] or a panic from
//! either accessor leaves the cell uncomputed, and the next access tries again.

mod inner;


use core::{
    convert::Infallible,
    fmt,
    ops::Deref,
    sync::atomic::{AtomicU8, Ordering},
};

use crate::concurrency::sync::RawMutex;
use inner::{Slot, State};

/// A value computed on first access and cached thereafter.
///
/// `F` is kept for the lifetime of the cell so that a failed attempt can be
/// retried; it is dropped together with the cell.
///
/// `LazyVal` is move-only: it does not implement `Clone`, because a copy would
/// either run the computation a second time or share a half-finished one.
///
/// # Reentrancy
///
/// Calling [`get`](Self::get) or [`try_get`](Self::try_get) on a cell from inside
/// that same cell's computation deadlocks.
///
/// # Example
///
/// ```rust
/// use lazy_val::LazyVal;
///
/// let number = 6;
/// let answer = LazyVal::new(move || number * 7);
///
/// assert!(!answer.is_computed());
/// assert_eq!(*answer, 42);
/// assert!(answer.is_computed());
/// ```
///
/// Cells cannot be duplicated:
///
/// ```compile_fail
/// use lazy_val::LazyVal;
///
/// let cell = LazyVal::new(|| 1);
/// let copy = cell.clone();
/// ```
///
/// A value that is not `Sync` cannot be shared across threads:
///
/// ```compile_fail
/// use lazy_val::LazyVal;
/// use std::cell::Cell;
/// use std::thread;
///
/// let cell = LazyVal::new(|| Cell::new(1));
/// thread::scope(|s| {
///     s.spawn(|| cell.get().get());
/// });
/// ```
///
/// Nor can a computation that is not `Send`:
///
/// ```compile_fail
/// use lazy_val::LazyVal;
/// use std::rc::Rc;
/// use std::thread;
///
/// let shared = Rc::new(5);
/// let cell = LazyVal::new(move || *shared);
/// thread::scope(|s| {
///     s.spawn(|| *cell.get());
/// });
/// ```
pub struct LazyVal<T, F = fn() -> T> {
    state: AtomicU8,
    lock: RawMutex,
    slot: Slot<T, F>,
}

impl<T, F> LazyVal<T, F> {
    #[inline]
    const fn with_computation(computation: F) -> Self {
        Self {
            state: AtomicU8::new(State::Uncomputed as u8),
            lock: RawMutex::new(),
            slot: Slot::new(computation),
        }
    }

    /// Returns `true` once a computation has succeeded.
    #[inline]
    pub fn is_computed(&self) -> bool {
        State::from_u8(self.state.load(Ordering::Acquire)) == State::Computed
    }

    /// Returns the cached value without running the computation.
    #[inline]
    pub fn get_if_computed(&self) -> Option<&T> {
        if self.is_computed() {
            // SAFETY: `Computed` was observed with `Acquire`, pairing with the
            // `Release` store made after the value was written.
            Some(unsafe { self.slot.value_unchecked() })
        } else {
            None
        }
    }

    /// Returns a mutable reference to the cached value, if any.
    ///
    /// This is safe because `&mut self` guarantees exclusive access.
    #[inline]
    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.slot.value_mut()
    }

    /// Consumes the cell, returning the value if it was ever computed.
    #[inline]
    pub fn into_inner(self) -> Option<T> {
        self.slot.into_value()
    }

    /// Returns the cached value, or hands `run` exclusive access to the
    /// computation to produce one. `run` is only called while the lock is held.
    #[inline]
    fn force<E>(&self, run: impl FnOnce(&mut F) -> Result<T, E>) -> Result<&T, E> {
        if let Some(value) = self.get_if_computed() {
            return Ok(value);
        }
        self.force_slow(run)
    }

    #[cold]
    fn force_slow<E>(&self, run: impl FnOnce(&mut F) -> Result<T, E>) -> Result<&T, E> {
        let _guard = self.lock.lock();

        // Another thread may have finished while we were waiting on the lock.
        if let Some(value) = self.get_if_computed() {
            return Ok(value);
        }

        crate::trace_event!("lazy value: running computation");

        // SAFETY: lock held and state is `Uncomputed`, so nobody else can be
        // touching the computation or holding a reference to the value.
        let outcome = run(unsafe { self.slot.computation_mut() });

        match outcome {
            Ok(value) => {
                // SAFETY: as above.
                let value = unsafe { self.slot.fill(value) };
                self.state.store(State::Computed as u8, Ordering::Release);
                crate::trace_event!("lazy value: computed and cached");
                Ok(value)
            }
            Err(err) => {
                crate::debug_event!("lazy value: computation failed, cell left uncomputed");
                Err(err)
            }
        }
    }
}

impl<T, F> LazyVal<T, F>
where
    F: FnMut() -> T,
{
    /// Creates a new cell bound to `computation`. Nothing runs until first access.
    #[inline]
    pub const fn new(computation: F) -> Self {
        Self::with_computation(computation)
    }

    /// Returns the value, computing and caching it on first access.
    ///
    /// Blocks while another thread is running the computation. If the
    /// computation panics the lock is released, the cell stays uncomputed, and
    /// the panic continues to unwind into the caller.
    pub fn get(&self) -> &T {
        match self.force(|computation| Ok::<T, Infallible>(computation())) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }
}

impl<T, E, F> LazyVal<T, F>
where
    F: FnMut() -> Result<T, E>,
{
    /// Creates a cell bound to a fallible `computation`, read through
    /// [`try_get`](Self::try_get). Nothing runs until first access.
    #[inline]
    pub const fn new_fallible(computation: F) -> Self {
        Self::with_computation(computation)
    }

    /// Returns the value, computing and caching it on first success.
    ///
    /// An `Err` from the computation is handed back unchanged and nothing is
    /// cached; the next call runs the computation again. Concurrent callers that
    /// queued behind a failed attempt each retry in turn.
    ///
    /// # Errors
    ///
    /// Returns whatever error the computation produced on this attempt.
    ///
    /// # Example
    ///
    /// ```rust
    /// use lazy_val::LazyVal;
    ///
    /// let mut attempts = 0;
    /// let config = LazyVal::new_fallible(move || {
    ///     attempts += 1;
    ///     if attempts < 3 { Err(attempts) } else { Ok("loaded") }
    /// });
    ///
    /// assert_eq!(config.try_get(), Err(1));
    /// assert_eq!(config.try_get(), Err(2));
    /// assert_eq!(config.try_get(), Ok(&"loaded"));
    /// assert_eq!(config.try_get(), Ok(&"loaded"));
    /// ```
    pub fn try_get(&self) -> Result<&T, E> {
        self.force(|computation| computation())
    }
}

impl<T, F> Deref for LazyVal<T, F>
where
    F: FnMut() -> T,
{
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        self.get()
    }
}

impl<T: Default> Default for LazyVal<T, fn() -> T> {
    fn default() -> Self {
        Self::new(T::default)
    }
}

impl<T: fmt::Debug, F> fmt::Debug for LazyVal<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_tuple("LazyVal");
        match self.get_if_computed() {
            Some(value) => d.field(value),
            None => d.field(&format_args!("<uncomputed>")),
        };
        d.finish()
    }
}

// SAFETY: shared access hands out `&T` on any thread (`T: Sync`), the value may
// be produced on one thread and dropped on another (`T: Send`), and the
// computation runs on whichever thread wins the lock, one at a time (`F: Send`).
// `Send` is derived automatically from the fields.
unsafe impl<T: Send + Sync, F: Send> Sync for LazyVal<T, F> {}
