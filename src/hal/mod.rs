//! Unbound event sources
//!
//! Status sources written from interrupt context and sampled by the event
//! queue through a target's [`UnboundEvents`](crate::event::UnboundEvents)
//! table.

pub mod gpio;
pub mod timer;

pub use gpio::{Edge, GpioEvents};
pub use timer::{Ticker, TimerEvents, TimerRequest, TimerScheduler};
