//! ESP8266 target
//!
//! Every event type is bound. WiFi state changes are broadcast, socket and
//! resolver events are posted to the waiting thread. The SDK delivers its
//! callbacks from its own task loop, which must be pumped before each scan.

use core::convert::Infallible;

use crate::event::{EventQueue, UnboundEvents};
use crate::types::{event_type, EventType, EventValue, BROADCAST};

/// Checker table of the ESP8266: no unbound sources, an SDK pump hook
pub struct Esp8266Events {
    pump: fn(),
}

impl Esp8266Events {
    /// `pump` runs one iteration of the SDK task loop
    pub const fn new(pump: fn()) -> Self {
        Esp8266Events { pump }
    }
}

impl UnboundEvents for Esp8266Events {
    type Kind = Infallible;

    #[inline]
    fn classify(&self, _ty: EventType) -> Option<Infallible> {
        None
    }

    #[inline]
    fn check(&self, kind: Infallible, _clear: bool) -> Option<EventValue> {
        match kind {}
    }

    #[inline]
    fn update(&self) {
        (self.pump)()
    }
}

/// Event queue of an ESP8266 target
pub type Esp8266EventQueue = EventQueue<Esp8266Events>;

/// Forward a WiFi event from the SDK callback to every waiter
///
/// Non-WiFi types are ignored; they are posted to their requesting thread.
pub fn post_wifi_event(queue: &Esp8266EventQueue, ty: EventType, value: EventValue) {
    if event_type::is_wifi(ty) {
        queue.post_event(BROADCAST, ty, value);
    }
}
