//! Critical section protected cell
//!
//! Data shared between interrupt and thread context. Borrowing requires a
//! critical section token, so a value is never touched with interrupts enabled.

use core::cell::{RefCell, RefMut};

use critical_section::Mutex;

use crate::core::critical::{critical_section, CriticalSection};

/// A cell that can only be accessed within a critical section.
pub struct CsCell<T>(Mutex<RefCell<T>>);

impl<T> CsCell<T> {
    /// Create a new CsCell
    #[inline(always)]
    pub const fn new(value: T) -> Self {
        Self(Mutex::new(RefCell::new(value)))
    }

    /// Borrow the inner value for the lifetime of the critical section
    ///
    /// Panics if the value is already borrowed within the same section.
    #[inline(always)]
    pub fn borrow<'cs>(&'cs self, cs: CriticalSection<'cs>) -> RefMut<'cs, T> {
        self.0.borrow_ref_mut(cs)
    }

    /// Enter a critical section and run `f` on the inner value
    #[inline]
    pub fn lock<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        critical_section(|cs| f(&mut self.borrow(cs)))
    }
}
