//! Unbound event dispatch
//!
//! An unbound event is sampled from a status source instead of being posted.
//! Each hardware target has a closed set of such sources; it describes them
//! with a `Kind` enum and implements [`UnboundEvents`] to classify event types
//! and poll the matching source.

use core::convert::Infallible;

use crate::types::{EventType, EventValue};

/// Delivery class of an event type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum EventKind {
    /// Sampled through a checker; observable without registration
    Unbound = 0,
    /// Delivered by post to registered waiters only
    Bound = 1,
}

/// Per-target table of unbound event checkers
pub trait UnboundEvents {
    /// The target's unbound sources
    type Kind: Copy;

    /// Map an event type to its unbound source, `None` for bound types
    fn classify(&self, ty: EventType) -> Option<Self::Kind>;

    /// Sample a source; `clear` consumes what was observed
    ///
    /// Returns the source's value when an event is outstanding.
    fn check(&self, kind: Self::Kind, clear: bool) -> Option<EventValue>;

    /// Hook run before every queue scan
    fn update(&self) {}
}

/// Table for targets where every event type is bound
#[derive(Debug, Clone, Copy, Default)]
pub struct NoUnbound;

impl UnboundEvents for NoUnbound {
    type Kind = Infallible;

    #[inline]
    fn classify(&self, _ty: EventType) -> Option<Infallible> {
        None
    }

    #[inline]
    fn check(&self, kind: Infallible, _clear: bool) -> Option<EventValue> {
        match kind {}
    }
}
