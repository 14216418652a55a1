//! Opaque native resource handle
//!
//! Drivers construct a native struct (a `gpio_t`, an I2C bus, a socket
//! control block) and hand the table its address. The table never
//! dereferences, allocates or frees it.

use core::ffi::c_void;
use core::ptr::NonNull;

/// Non-null pointer to a driver-owned native resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct NativeHandle(NonNull<c_void>);

// SAFETY: the handle is an address only; the owning driver serializes access
// to the resource behind it.
unsafe impl Send for NativeHandle {}

impl NativeHandle {
    /// Wrap a raw pointer, rejecting null
    #[inline]
    pub fn new(ptr: *mut c_void) -> Option<Self> {
        NonNull::new(ptr).map(NativeHandle)
    }

    /// Wrap a typed non-null pointer
    #[inline]
    pub fn from_non_null<T>(ptr: NonNull<T>) -> Self {
        NativeHandle(ptr.cast())
    }

    /// Raw address of the resource
    #[inline]
    pub fn as_ptr(self) -> *mut c_void {
        self.0.as_ptr()
    }

    /// Reinterpret as a pointer to the driver's resource type
    #[inline]
    pub fn cast<T>(self) -> NonNull<T> {
        self.0.cast()
    }
}
