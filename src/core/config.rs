//! Compile-time configuration for the native layer
//!
//! These constants bound every table and pool in the crate.

/// Capacity of a descriptor table
pub const CFG_DESC_MAX: usize = 32;

/// Number of 64-bit words backing a descriptor table's occupancy bitmap
pub const CFG_DESC_WORDS: usize = crate::core::bitset::words_for(CFG_DESC_MAX);

/// Number of interrupt-request nodes in the event queue pool
pub const CFG_IRQREQ_POOL_SIZE: usize = 4;

/// Depth of the GPIO edge ring buffer
pub const CFG_GPIO_BUFFER_LIMIT: usize = 4;

/// Number of GPIO pins that can carry an edge mask (two mask bits per pin)
pub const CFG_GPIO_PIN_MAX: u32 = 32;
