//! mbed-family targets
//!
//! Event types below [`UNBOUND_EVENT_THRESHOLD`] are sampled from the GPIO
//! edge buffer and the timer status word; every other type is bound.

use crate::event::{EventQueue, UnboundEvents};
use crate::hal::{GpioEvents, TimerEvents};
use crate::types::{EventType, EventValue};

/// Buffered GPIO edge
pub const GPIO_EVENT: EventType = 0;

/// Timer expiry
pub const TIMER_EVENT: EventType = 1;

/// First bound event type
pub const UNBOUND_EVENT_THRESHOLD: EventType = 2;

/// Unbound sources of an mbed target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MbedUnbound {
    Gpio,
    Timer,
}

/// Unbound checker table of an mbed target
pub struct MbedEvents {
    pub gpio: GpioEvents,
    pub timer: TimerEvents,
}

impl MbedEvents {
    pub const fn new() -> Self {
        MbedEvents {
            gpio: GpioEvents::new(),
            timer: TimerEvents::new(),
        }
    }
}

impl Default for MbedEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl UnboundEvents for MbedEvents {
    type Kind = MbedUnbound;

    #[inline]
    fn classify(&self, ty: EventType) -> Option<MbedUnbound> {
        match ty {
            GPIO_EVENT => Some(MbedUnbound::Gpio),
            TIMER_EVENT => Some(MbedUnbound::Timer),
            _ => None,
        }
    }

    fn check(&self, kind: MbedUnbound, clear: bool) -> Option<EventValue> {
        match kind {
            MbedUnbound::Gpio => self.gpio.get(clear),
            MbedUnbound::Timer => self.timer.get(clear),
        }
    }
}

/// Event queue of an mbed target
pub type MbedEventQueue = EventQueue<MbedEvents>;
