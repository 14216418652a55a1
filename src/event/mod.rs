//! Event queue
//!
//! Bridges asynchronous event sources (interrupts, OS callbacks, DNS and TCP
//! stack events) into the polling model of the cooperative VM scheduler.
//!
//! A VM thread about to block registers a wait with [`EventQueue::store_irq_request`].
//! Interrupt and callback contexts call [`EventQueue::post_event`], which only
//! flips the matching requests to signaled. The scheduler polls with
//! [`EventQueue::check_for_events`] (peek) and [`EventQueue::get_event`]
//! (consume). Both scan oldest-first, so when several requests are ready the
//! longest-waiting one wins.
//!
//! Consuming a request always unlinks it and returns its node to the pool:
//! one registration is one wait. A thread that wants to wait again registers
//! again.

mod request;
mod unbound;

pub use unbound::{EventKind, NoUnbound, UnboundEvents};

use request::RequestList;

use crate::core::cs_cell::CsCell;
use crate::critical::is_isr_context;
use crate::error::{HalError, HalResult};
use crate::types::{EventNumber, EventType, EventValue, ThreadNumber, BROADCAST, NO_EVENT};

/// A satisfied wait as reported to the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    /// Number of the request that was satisfied
    pub number: EventNumber,
    /// Event type it was registered for
    pub event_type: EventType,
    /// Posted payload, or the value returned by an unbound checker
    pub value: EventValue,
}

impl Event {
    /// Event number of a poll result, [`NO_EVENT`] when nothing was ready
    #[inline]
    pub fn raw_number(event: Option<Event>) -> EventNumber {
        event.map_or(NO_EVENT, |e| e.number)
    }
}

/// Interrupt-request queue with a fixed node pool
///
/// `U` is the target's unbound checker table.
pub struct EventQueue<U: UnboundEvents> {
    requests: CsCell<RequestList>,
    unbound: U,
}

impl<U: UnboundEvents> EventQueue<U> {
    /// Create an empty queue using the given unbound checker table
    pub const fn new(unbound: U) -> Self {
        EventQueue {
            requests: CsCell::new(RequestList::new()),
            unbound,
        }
    }

    /// The target's unbound checker table
    #[inline]
    pub fn unbound(&self) -> &U {
        &self.unbound
    }

    /// Drop every outstanding request and rebuild the node pool
    pub fn reset(&self) {
        self.requests.lock(|list| list.init());
    }

    /// Number of outstanding requests
    pub fn pending(&self) -> usize {
        self.requests.lock(|list| list.len())
    }

    /// Delivery class of an event type
    #[inline]
    pub fn event_kind(&self, ty: EventType) -> EventKind {
        match self.unbound.classify(ty) {
            Some(_) => EventKind::Unbound,
            None => EventKind::Bound,
        }
    }

    /// Register a wait for `ty` under the next sequential event number
    ///
    /// Numbers start at 1, skip 0 on wrap-around and never repeat a number
    /// that is still live.
    ///
    /// # Returns
    /// * `Ok(number)` - Request appended to the queue
    /// * `Err(HalError::IrqPoolEmpty)` - No free node
    /// * `Err(HalError::StoreIsr)` - Called from interrupt context
    pub fn store_irq_request(&self, ty: EventType) -> HalResult<EventNumber> {
        if is_isr_context() {
            return Err(HalError::StoreIsr);
        }

        self.requests.lock(|list| {
            let mut number = list.last_number;
            loop {
                number = number.wrapping_add(1);
                if number != NO_EVENT && !list.contains_number(number) {
                    break;
                }
            }

            Self::append(list, number, ty)?;
            list.last_number = number;
            Ok(number)
        })
    }

    /// Register a wait for `ty` on behalf of a VM requestor
    ///
    /// The event number is `requestor + 1`, so directed posts addressed to the
    /// requestor's thread reach it.
    ///
    /// # Returns
    /// * `Ok(number)` - Request appended to the queue
    /// * `Err(HalError::IrqRequestExists)` - Requestor already waits on `ty`
    /// * `Err(HalError::IrqRequestorInvalid)` - `requestor + 1` wraps to zero
    /// * `Err(HalError::IrqPoolEmpty)` - No free node
    /// * `Err(HalError::StoreIsr)` - Called from interrupt context
    pub fn store_irq_request_for(&self, requestor: u32, ty: EventType) -> HalResult<EventNumber> {
        if is_isr_context() {
            return Err(HalError::StoreIsr);
        }

        let number = requestor.wrapping_add(1);
        if number == NO_EVENT {
            return Err(HalError::IrqRequestorInvalid);
        }

        self.requests.lock(|list| {
            if list.find(|r| r.number == number && r.ty == ty).is_some() {
                return Err(HalError::IrqRequestExists);
            }
            Self::append(list, number, ty)?;
            Ok(number)
        })
    }

    fn append(list: &mut RequestList, number: EventNumber, ty: EventType) -> HalResult<()> {
        match list.push_back(number, ty) {
            Some(_) => {
                crate::debug!("irq request {=u32} stored for type {=u32}", number, ty);
                Ok(())
            }
            None => {
                crate::warn!("irq request pool exhausted, type {=u32}", ty);
                Err(HalError::IrqPoolEmpty)
            }
        }
    }

    /// Post a bound event
    ///
    /// With `thread` set to [`BROADCAST`] every request of type `ty` is
    /// signaled. Otherwise only the first request numbered `thread` and typed
    /// `ty` is signaled. Each signaled request keeps the last posted value.
    /// Posts never remove requests and are ignored for unbound types.
    ///
    /// Safe to call from interrupt context.
    pub fn post_event(&self, thread: ThreadNumber, ty: EventType, value: EventValue) {
        if self.unbound.classify(ty).is_some() {
            crate::warn!("post to unbound event type {=u32} ignored", ty);
            return;
        }

        self.requests.lock(|list| {
            let mut cur = list.head();
            while let Some(idx) = cur {
                let req = list.node_mut(idx);
                cur = req.next;

                if req.ty != ty {
                    continue;
                }
                if thread == BROADCAST {
                    req.signal(value);
                } else if req.number == thread {
                    req.signal(value);
                    break;
                }
            }
        });
    }

    /// Poll an unbound source directly, without any registration
    ///
    /// Returns `None` for bound types or when the source has nothing pending.
    pub fn check_unbound(&self, ty: EventType, clear: bool) -> Option<EventValue> {
        let kind = self.unbound.classify(ty)?;
        self.unbound.check(kind, clear)
    }

    /// Oldest satisfied request, left in place
    ///
    /// Bound requests stay signaled and unbound sources are consulted without
    /// being cleared, so a following [`get_event`](Self::get_event) sees the
    /// same event.
    pub fn check_for_events(&self) -> Option<Event> {
        self.get_event_prim(false)
    }

    /// Oldest satisfied request, consumed
    ///
    /// The request is unlinked and its node recycled. Unbound sources are
    /// cleared by their checker.
    pub fn get_event(&self) -> Option<Event> {
        self.get_event_prim(true)
    }

    fn get_event_prim(&self, remove: bool) -> Option<Event> {
        self.unbound.update();

        self.requests.lock(|list| {
            let unbound = &self.unbound;
            let mut prev = None;
            let mut cur = list.head();

            while let Some(idx) = cur {
                let req = list.node_mut(idx);
                let satisfied = match unbound.classify(req.ty) {
                    Some(kind) => unbound.check(kind, remove),
                    None if req.is_signaled() => Some(req.value),
                    None => None,
                };

                if let Some(value) = satisfied {
                    let event = Event {
                        number: req.number,
                        event_type: req.ty,
                        value,
                    };
                    if remove {
                        list.remove(prev, idx);
                        crate::debug!("irq request {=u32} consumed", event.number);
                    }
                    return Some(event);
                }

                prev = cur;
                cur = req.next;
            }
            None
        })
    }

    /// Withdraw a wait without consuming an event
    ///
    /// # Returns
    /// * `Ok(())` - Request removed
    /// * `Err(HalError::IrqNotFound)` - No live request with this number and type
    pub fn cancel(&self, number: EventNumber, ty: EventType) -> HalResult<()> {
        self.requests.lock(|list| match list.find(|r| r.number == number && r.ty == ty) {
            Some((prev, idx)) => {
                list.remove(prev, idx);
                crate::debug!("irq request {=u32} cancelled", number);
                Ok(())
            }
            None => Err(HalError::IrqNotFound),
        })
    }
}

impl<U: UnboundEvents + Default> Default for EventQueue<U> {
    fn default() -> Self {
        Self::new(U::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T_A: EventType = 20;
    const T_B: EventType = 21;

    fn set_last_number(queue: &EventQueue<NoUnbound>, number: EventNumber) {
        queue.requests.lock(|list| list.last_number = number);
    }

    #[test]
    fn test_sequential_skips_requestor_numbers() {
        let queue = EventQueue::new(NoUnbound);

        assert_eq!(queue.store_irq_request_for(1, T_A), Ok(2));
        assert_eq!(queue.store_irq_request(T_B), Ok(1));
        // 2 is live under the requestor, whatever its type
        assert_eq!(queue.store_irq_request(T_B), Ok(3));
    }

    #[test]
    fn test_wrap_skips_zero_and_live() {
        let queue = EventQueue::new(NoUnbound);

        set_last_number(&queue, u32::MAX);
        assert_eq!(queue.store_irq_request(T_A), Ok(1));

        set_last_number(&queue, u32::MAX - 1);
        assert_eq!(queue.store_irq_request(T_A), Ok(u32::MAX));
        // Wrap lands on 0, then on live 1
        assert_eq!(queue.store_irq_request(T_A), Ok(2));
    }

    #[test]
    fn test_invalid_requestor() {
        let queue = EventQueue::new(NoUnbound);

        assert_eq!(
            queue.store_irq_request_for(u32::MAX, T_A),
            Err(HalError::IrqRequestorInvalid)
        );
        assert_eq!(queue.pending(), 0);
        assert_eq!(queue.store_irq_request_for(u32::MAX - 1, T_A), Ok(u32::MAX));
    }
}
