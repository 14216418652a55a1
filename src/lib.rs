//! Native event and descriptor core for an embedded Squawk VM
//!
//! Shared by every hardware target of the native layer:
//! - Interrupt-request queue bridging ISR / OS callbacks to a polling scheduler
//! - Bitmap-backed descriptor tables mapping native resources to small integers
//! - Unbound event sources (GPIO edges, timer ticks) and per-target checker tables
//! - Sleep primitive polling the queue until an event or a deadline

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]

// ============ Critical Section ============

#[cfg(target_arch = "arm")]
mod cs_impl {
    use cortex_m::interrupt;
    use cortex_m::register::primask;
    use critical_section::{set_impl, Impl, RawRestoreState};

    struct SingleCoreCriticalSection;
    set_impl!(SingleCoreCriticalSection);

    unsafe impl Impl for SingleCoreCriticalSection {
        unsafe fn acquire() -> RawRestoreState {
            let was_active = primask::read().is_active();
            interrupt::disable();
            was_active
        }

        unsafe fn release(was_active: RawRestoreState) {
            if was_active {
                unsafe { interrupt::enable() }
            }
        }
    }
}

// ============ Modules ============

pub mod log;
mod lang_items;

pub mod core;
pub mod desc;
pub mod event;
pub mod hal;
pub mod port;

// ============ Re-exports ============

pub use self::core::config;
pub use self::core::config::*;
pub use self::core::context;
pub use self::core::context::NativeContext;
pub use self::core::critical;
pub use self::core::error;
pub use self::core::error::{HalError, HalResult};
pub use self::core::time;
pub use self::core::time::os_milli_sleep;
pub use self::core::types;
pub use self::core::types::*;

pub use desc::{DescTable, NativeHandle};
pub use event::{Event, EventKind, EventQueue, NoUnbound, UnboundEvents};
