//! Critical section handling for the native layer
//!
//! The poster side (ISR, OS callback) and the consumer side (VM scheduler)
//! share the request list and ISR-visible descriptor tables. Every access goes
//! through the `critical-section` crate: PRIMASK on Cortex-M, the std
//! implementation on hosted builds.

pub use critical_section::CriticalSection;

/// Execute a closure with interrupts disabled
///
/// The closure receives the critical section token, which can be used to
/// access [`CsCell`](crate::core::cs_cell::CsCell) protected data. Nesting is
/// allowed; the outer interrupt state is restored on exit.
#[inline]
pub fn critical_section<F, R>(f: F) -> R
where
    F: FnOnce(CriticalSection<'_>) -> R,
{
    critical_section::with(f)
}

/// Check if currently executing in an ISR context
#[inline]
pub fn is_isr_context() -> bool {
    #[cfg(target_arch = "arm")]
    {
        let ipsr: u32;
        unsafe {
            core::arch::asm!(
                "mrs {}, IPSR",
                out(reg) ipsr,
                options(nomem, nostack, preserves_flags)
            );
        }
        ipsr != 0
    }

    #[cfg(not(target_arch = "arm"))]
    {
        false
    }
}
