use core::cell::UnsafeCell;

#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(super) enum State {
    Uncomputed = 0,
    Computed = 1,
}

impl State {
    #[inline]
    pub(super) const fn from_u8(raw: u8) -> Self {
        match raw {
            1 => State::Computed,
            _ => State::Uncomputed,
        }
    }
}

/// The computation and its (possibly absent) result.
///
/// Neither field is synchronized here; the owning cell serializes writers with
/// its lock and publishes the value through its state byte.
pub(super) struct Slot<T, F> {
    computation: UnsafeCell<F>,
    value: UnsafeCell<Option<T>>,
}

impl<T, F> Slot<T, F> {
    pub(super) const fn new(computation: F) -> Self {
        Self {
            computation: UnsafeCell::new(computation),
            value: UnsafeCell::new(None),
        }
    }

    /// # Safety
    /// The caller must hold the cell's lock, and the state must be `Uncomputed`.
    #[inline]
    #[allow(clippy::mut_from_ref)]
    pub(super) unsafe fn computation_mut(&self) -> &mut F {
        &mut *self.computation.get()
    }

    /// Stores the computed value and returns a reference to it.
    ///
    /// # Safety
    /// Same as [`Slot::computation_mut`]; no reference to the value may exist yet.
    #[inline]
    pub(super) unsafe fn fill(&self, value: T) -> &T {
        (*self.value.get()).insert(value)
    }

    /// # Safety
    /// The state must have been observed as `Computed` with `Acquire` ordering.
    #[inline]
    pub(super) unsafe fn value_unchecked(&self) -> &T {
        match &*self.value.get() {
            Some(value) => value,
            None => core::hint::unreachable_unchecked(),
        }
    }

    #[inline]
    pub(super) fn value_mut(&mut self) -> Option<&mut T> {
        self.value.get_mut().as_mut()
    }

    #[inline]
    pub(super) fn into_value(self) -> Option<T> {
        self.value.into_inner()
    }
}
