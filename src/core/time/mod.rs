//! Time management module
//!
//! The scheduler's idle sleep: poll the event queue until a request is
//! satisfied or the deadline passes, idling the processor in between.

use crate::event::{Event, EventQueue, UnboundEvents};

/// Millisecond clock and idle primitive of a target
pub trait Clock {
    /// Milliseconds since an arbitrary epoch
    fn now_ms(&self) -> u64;

    /// Wait for the next interrupt, or return immediately
    fn idle(&self) {}
}

/// Sleep for up to `millis`, waking early on an event
///
/// The queue is only peeked; the scheduler consumes the event afterwards with
/// [`EventQueue::get_event`].
///
/// # Returns
/// * `Some(event)` - A request was satisfied before the deadline
/// * `None` - The deadline passed
pub fn os_milli_sleep<U, C>(queue: &EventQueue<U>, clock: &C, millis: u64) -> Option<Event>
where
    U: UnboundEvents,
    C: Clock,
{
    let target = clock.now_ms().saturating_add(millis);

    loop {
        if let Some(event) = queue.check_for_events() {
            return Some(event);
        }
        if clock.now_ms() >= target {
            return None;
        }
        clock.idle();
    }
}
