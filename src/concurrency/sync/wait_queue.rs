use std::cell::{Cell, UnsafeCell};
use std::marker::PhantomPinned;
use std::ptr::NonNull;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, Thread};

/// A node in the intrusive wait queue.
///
/// Lives on the stack of the waiting thread and must not move while enqueued.
pub(crate) struct WaitNode {
    thread: Thread,
    next: Cell<Option<NonNull<WaitNode>>>,
    notified: AtomicBool,
    _pin: PhantomPinned,
}

impl WaitNode {
    pub(crate) fn new() -> Self {
        Self {
            thread: thread::current(),
            next: Cell::new(None),
            notified: AtomicBool::new(false),
            _pin: PhantomPinned,
        }
    }

    /// Parks the current thread until this node has been dequeued and notified.
    ///
    /// Spurious unparks loop back into `park`, so the node never leaves the
    /// stack while it is still reachable from the queue.
    pub(crate) fn wait(&self) {
        while !self.notified.load(Ordering::Acquire) {
            thread::park();
        }
    }

    /// Marks `node` as notified and unparks its thread.
    ///
    /// # Safety
    /// `node` must have been removed from its queue and still be alive. After the
    /// `notified` store the waiter may return and free the node, so it is not
    /// touched again.
    pub(crate) unsafe fn notify(node: NonNull<WaitNode>) {
        let thread = node.as_ref().thread.clone();
        node.as_ref().notified.store(true, Ordering::Release);
        thread.unpark();
    }
}

/// A FIFO queue of parked threads.
///
/// Uses a spinlock around the linked list; operations are a few pointer swaps,
/// so the critical section is tiny.
pub(crate) struct WaitQueue {
    head: UnsafeCell<Option<NonNull<WaitNode>>>,
    tail: UnsafeCell<Option<NonNull<WaitNode>>>,
    lock: AtomicBool,
}

impl WaitQueue {
    pub(crate) const fn new() -> Self {
        Self {
            head: UnsafeCell::new(None),
            tail: UnsafeCell::new(None),
            lock: AtomicBool::new(false),
        }
    }

    pub(crate) fn lock(&self) {
        while self.lock.swap(true, Ordering::Acquire) {
            std::hint::spin_loop();
        }
    }

    pub(crate) fn unlock(&self) {
        self.lock.store(false, Ordering::Release);
    }

    /// Adds a node to the back of the queue.
    ///
    /// # Safety
    /// Caller must hold the queue lock. `node` must stay valid and pinned until
    /// it is popped.
    pub(crate) unsafe fn push_locked(&self, node: NonNull<WaitNode>) {
        let head = &mut *self.head.get();
        let tail = &mut *self.tail.get();

        node.as_ref().next.set(None);

        match *tail {
            Some(t) => t.as_ref().next.set(Some(node)),
            None => *head = Some(node),
        }
        *tail = Some(node);
    }

    /// Removes and returns the head node.
    ///
    /// # Safety
    /// Caller must hold the queue lock.
    pub(crate) unsafe fn pop_locked(&self) -> Option<NonNull<WaitNode>> {
        let head = &mut *self.head.get();
        let tail = &mut *self.tail.get();

        let ret = *head;
        if let Some(h) = ret {
            *head = h.as_ref().next.get();
            if head.is_none() {
                *tail = None;
            }
        }
        ret
    }

    /// Checks if any thread is parked on the queue.
    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.lock();
        // SAFETY: queue lock held.
        let empty = unsafe { (*self.head.get()).is_none() };
        self.unlock();
        empty
    }
}

// SAFETY: the list is only touched under `lock`; nodes are owned by their
// parked threads for as long as they are enqueued.
unsafe impl Sync for WaitQueue {}
unsafe impl Send for WaitQueue {}
