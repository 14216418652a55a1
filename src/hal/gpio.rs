//! GPIO edge event source
//!
//! The pin interrupt handler posts edges into a small ring buffer; the event
//! queue samples it as an unbound source. Only edges enabled in the per-pin
//! mask are buffered, and edges arriving while the buffer is full are dropped.
//!
//! An event value packs the pin and the edge: `(pin << 2) | 1` for a falling
//! edge, `(pin << 2) | 2` for a rising one. It is never zero.

use portable_atomic::{AtomicU64, Ordering};

use crate::config::{CFG_GPIO_BUFFER_LIMIT, CFG_GPIO_PIN_MAX};
use crate::core::cs_cell::CsCell;
use crate::error::{HalError, HalResult};
use crate::types::EventValue;

/// Signal edge reported by a pin interrupt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Edge {
    Fall = 1,
    Rise = 2,
}

impl Edge {
    #[inline]
    fn mask(self, pin: u32) -> u64 {
        (self as u64) << (pin * 2)
    }
}

/// Pack a pin edge into an event value
#[inline]
pub fn encode(pin: u32, edge: Edge) -> EventValue {
    ((pin << 2) | edge as u32) as EventValue
}

/// Unpack an event value produced by [`encode`]
#[inline]
pub fn decode(value: EventValue) -> (u32, Edge) {
    let value = value as u32;
    let edge = if value & 1 != 0 { Edge::Fall } else { Edge::Rise };
    (value >> 2, edge)
}

struct RingBuf {
    events: [EventValue; CFG_GPIO_BUFFER_LIMIT],
    start: usize,
    end: usize,
    size: usize,
}

impl RingBuf {
    const fn new() -> Self {
        RingBuf {
            events: [0; CFG_GPIO_BUFFER_LIMIT],
            start: 0,
            end: 0,
            size: 0,
        }
    }

    fn put(&mut self, event: EventValue) -> bool {
        if self.size >= CFG_GPIO_BUFFER_LIMIT {
            return false;
        }
        self.events[self.start] = event;
        self.start = (self.start + 1) % CFG_GPIO_BUFFER_LIMIT;
        self.size += 1;
        true
    }

    fn get(&mut self, clear: bool) -> Option<EventValue> {
        if self.size == 0 {
            return None;
        }
        let event = self.events[self.end];
        if clear {
            self.end = (self.end + 1) % CFG_GPIO_BUFFER_LIMIT;
            self.size -= 1;
        }
        Some(event)
    }
}

/// Buffered GPIO edge events with per-pin edge masks
pub struct GpioEvents {
    buf: CsCell<RingBuf>,
    mask: AtomicU64,
}

impl GpioEvents {
    pub const fn new() -> Self {
        GpioEvents {
            buf: CsCell::new(RingBuf::new()),
            mask: AtomicU64::new(0),
        }
    }

    /// Enable buffering of `edge` on `pin`
    pub fn add_mask(&self, pin: u32, edge: Edge) -> HalResult<()> {
        if pin >= CFG_GPIO_PIN_MAX {
            return Err(HalError::GpioPinInvalid);
        }
        self.mask.fetch_or(edge.mask(pin), Ordering::AcqRel);
        Ok(())
    }

    /// Disable buffering of `edge` on `pin`
    pub fn del_mask(&self, pin: u32, edge: Edge) -> HalResult<()> {
        if pin >= CFG_GPIO_PIN_MAX {
            return Err(HalError::GpioPinInvalid);
        }
        self.mask.fetch_and(!edge.mask(pin), Ordering::AcqRel);
        Ok(())
    }

    /// Check if `edge` on `pin` is buffered
    pub fn is_masked(&self, pin: u32, edge: Edge) -> bool {
        pin < CFG_GPIO_PIN_MAX && self.mask.load(Ordering::Acquire) & edge.mask(pin) != 0
    }

    /// Record an edge from the pin interrupt handler
    ///
    /// Returns `false` if the edge is masked off or the buffer is full.
    pub fn post(&self, pin: u32, edge: Edge) -> bool {
        if !self.is_masked(pin, edge) {
            return false;
        }
        let stored = self.buf.lock(|buf| buf.put(encode(pin, edge)));
        if !stored {
            crate::warn!("gpio event buffer full, pin {=u32} dropped", pin);
        }
        stored
    }

    /// Oldest buffered edge; `clear` removes it from the buffer
    pub fn get(&self, clear: bool) -> Option<EventValue> {
        self.buf.lock(|buf| buf.get(clear))
    }

    /// Number of buffered edges
    pub fn len(&self) -> usize {
        self.buf.lock(|buf| buf.size)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for GpioEvents {
    fn default() -> Self {
        Self::new()
    }
}
