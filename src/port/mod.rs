//! Port layer - target-specific unbound event tables
//!
//! Each hardware target has a fixed set of unbound event sources. A port
//! names their event types and implements
//! [`UnboundEvents`](crate::event::UnboundEvents) over them; everything else
//! about the event queue is shared.

#[cfg(feature = "mbed")]
pub mod mbed;

#[cfg(feature = "esp8266")]
pub mod esp8266;
