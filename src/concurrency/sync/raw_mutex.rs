use super::wait_queue::{WaitNode, WaitQueue};
use crossbeam_utils::Backoff;
use std::fmt;
use std::ptr::NonNull;
use std::sync::atomic::{AtomicU8, Ordering};

/// A blocking, non-poisoning mutual-exclusion lock that guards no data itself.
///
/// Callers pair it with their own `UnsafeCell` state and hold a [`RawMutexGuard`]
/// for the duration of each critical section. Unwinding out of a critical section
/// releases the lock like any other exit; there is no poison flag.
///
/// # States
/// - 0: Unlocked
/// - 1: Locked, no waiters
/// - 2: Locked, waiters may be parked (contended)
pub struct RawMutex {
    state: AtomicU8,
    queue: WaitQueue,
}

impl RawMutex {
    const UNLOCKED: u8 = 0;
    const LOCKED: u8 = 1;
    const CONTENDED: u8 = 2;

    /// Creates an unlocked mutex.
    pub const fn new() -> Self {
        Self {
            state: AtomicU8::new(Self::UNLOCKED),
            queue: WaitQueue::new(),
        }
    }

    /// Acquires the lock, blocking the current thread until it is available.
    #[inline]
    pub fn lock(&self) -> RawMutexGuard<'_> {
        if self
            .state
            .compare_exchange(Self::UNLOCKED, Self::LOCKED, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            self.lock_slow();
        }
        RawMutexGuard { mutex: self }
    }

    /// Attempts to acquire the lock without blocking.
    #[inline]
    pub fn try_lock(&self) -> Option<RawMutexGuard<'_>> {
        self.state
            .compare_exchange(Self::UNLOCKED, Self::LOCKED, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| RawMutexGuard { mutex: self })
    }

    /// Returns `true` if some thread currently holds the lock.
    #[inline]
    pub fn is_locked(&self) -> bool {
        self.state.load(Ordering::Relaxed) != Self::UNLOCKED
    }

    #[cold]
    fn lock_slow(&self) {
        let backoff = Backoff::new();
        while !backoff.is_completed() {
            if self.state.load(Ordering::Relaxed) == Self::UNLOCKED
                && self
                    .state
                    .compare_exchange(Self::UNLOCKED, Self::LOCKED, Ordering::Acquire, Ordering::Relaxed)
                    .is_ok()
            {
                return;
            }
            backoff.snooze();
        }

        loop {
            let node = WaitNode::new();

            self.queue.lock();
            // Once a thread has gone to the queue it only ever acquires as CONTENDED,
            // so the eventual unlock checks for the waiters behind it.
            if self.state.swap(Self::CONTENDED, Ordering::Acquire) == Self::UNLOCKED {
                self.queue.unlock();
                return;
            }
            // SAFETY: queue lock held; `node` stays on this stack frame until
            // `wait` returns, which only happens after it was popped.
            unsafe { self.queue.push_locked(NonNull::from(&node)) };
            self.queue.unlock();

            node.wait();
        }
    }

    #[inline]
    fn unlock(&self) {
        if self.state.swap(Self::UNLOCKED, Ordering::Release) == Self::CONTENDED {
            self.wake_one();
        }
    }

    #[cold]
    fn wake_one(&self) {
        self.queue.lock();
        // SAFETY: queue lock held.
        let node = unsafe { self.queue.pop_locked() };
        self.queue.unlock();

        if let Some(node) = node {
            // SAFETY: popped, and its owner is still parked in `wait`.
            unsafe { WaitNode::notify(node) };
        }
    }

    #[cfg(test)]
    pub(crate) fn has_waiters(&self) -> bool {
        !self.queue.is_empty()
    }
}

impl Default for RawMutex {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RawMutex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawMutex")
            .field("locked", &self.is_locked())
            .finish()
    }
}

/// Scoped ownership of a [`RawMutex`]; the lock is released on drop.
#[must_use = "the lock is released as soon as the guard is dropped"]
pub struct RawMutexGuard<'a> {
    mutex: &'a RawMutex,
}

impl Drop for RawMutexGuard<'_> {
    fn drop(&mut self) {
        self.mutex.unlock();
    }
}

impl fmt::Debug for RawMutexGuard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RawMutexGuard { .. }")
    }
}
