//! Core type definitions for the native layer
//!
//! Integers crossing the VM boundary get named aliases here.

/// Small integer handle for an opened native resource
pub type Descriptor = usize;

/// Logical event class
pub type EventType = u32;

/// Identifier of a registered wait; never zero
pub type EventNumber = u32;

/// Target of a post: an event number, or [`BROADCAST`]
pub type ThreadNumber = u32;

/// Payload carried by a bound event or returned by an unbound checker
pub type EventValue = i32;

/// Event number reported when nothing is pending
pub const NO_EVENT: EventNumber = 0;

/// Thread number that addresses every request of a type
pub const BROADCAST: ThreadNumber = 0;

/// State of a single interrupt request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum IrqState {
    /// Stored, not yet signaled
    Pending = 0,
    /// A post matched it; payload is valid
    Signaled = 1,
}

/// Bound event types raised by the network and WiFi glue
///
/// Numbering follows `com.sun.squawk.hal.Events` on the esp8266 target.
pub mod event_type {
    use super::EventType;

    pub const WIFI_STAMODE_CONNECTED: EventType = 0;
    pub const WIFI_STAMODE_DISCONNECTED: EventType = 1;
    pub const WIFI_STAMODE_AUTHMODE_CHANGE: EventType = 2;
    pub const WIFI_STAMODE_GOT_IP: EventType = 3;
    pub const WIFI_STAMODE_DHCP_TIMEOUT: EventType = 4;
    pub const WIFI_SCAN_DONE: EventType = 8;

    pub const RESOLVED: EventType = 9;
    pub const CONNECTED: EventType = 10;
    pub const READ_READY: EventType = 11;
    pub const WRITE_READY: EventType = 12;
    pub const ACCEPTED: EventType = 13;
    pub const CONNECT_FAILED: EventType = 14;

    /// WiFi station-mode and scan events, which are broadcast
    #[inline]
    pub fn is_wifi(ty: EventType) -> bool {
        (WIFI_STAMODE_CONNECTED..=WIFI_SCAN_DONE).contains(&ty)
    }
}
