//! Interrupt-request list
//!
//! Singly-linked FIFO of wait requests threaded through a fixed node pool.
//! Links are pool indices, so the list can live in a `static` and never
//! touches the heap. Unused nodes form a free list through the same links.

use crate::config::CFG_IRQREQ_POOL_SIZE;
use crate::types::{EventNumber, EventType, EventValue, IrqState, NO_EVENT};

/// A single registered wait
#[derive(Debug, Clone, Copy)]
pub(crate) struct IrqRequest {
    pub number: EventNumber,
    pub ty: EventType,
    pub state: IrqState,
    pub value: EventValue,
    pub next: Option<usize>,
}

impl IrqRequest {
    const fn new() -> Self {
        IrqRequest {
            number: NO_EVENT,
            ty: 0,
            state: IrqState::Pending,
            value: 0,
            next: None,
        }
    }

    #[inline]
    pub fn is_signaled(&self) -> bool {
        self.state == IrqState::Signaled
    }

    /// Record a post; a later post overwrites the payload
    #[inline]
    pub fn signal(&mut self, value: EventValue) {
        self.value = value;
        self.state = IrqState::Signaled;
    }
}

/// FIFO of live requests plus the free list of spare nodes
pub(crate) struct RequestList {
    nodes: [IrqRequest; CFG_IRQREQ_POOL_SIZE],
    head: Option<usize>,
    tail: Option<usize>,
    free: Option<usize>,
    len: usize,
    /// Last number handed out by sequential numbering
    pub last_number: EventNumber,
}

impl RequestList {
    /// Create a list with every node on the free list
    pub const fn new() -> Self {
        let mut nodes = [IrqRequest::new(); CFG_IRQREQ_POOL_SIZE];
        let mut i = 0;
        while i + 1 < CFG_IRQREQ_POOL_SIZE {
            nodes[i].next = Some(i + 1);
            i += 1;
        }
        RequestList {
            nodes,
            head: None,
            tail: None,
            free: if CFG_IRQREQ_POOL_SIZE > 0 { Some(0) } else { None },
            len: 0,
            last_number: NO_EVENT,
        }
    }

    /// Drop every request and rebuild the free list
    pub fn init(&mut self) {
        *self = Self::new();
    }

    #[inline]
    pub fn head(&self) -> Option<usize> {
        self.head
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn node(&self, idx: usize) -> &IrqRequest {
        &self.nodes[idx]
    }

    #[inline]
    pub fn node_mut(&mut self, idx: usize) -> &mut IrqRequest {
        &mut self.nodes[idx]
    }

    /// Take a node from the pool and append it to the tail
    ///
    /// Returns `None` when the pool is exhausted.
    pub fn push_back(&mut self, number: EventNumber, ty: EventType) -> Option<usize> {
        let idx = self.free?;
        self.free = self.nodes[idx].next;

        self.nodes[idx] = IrqRequest {
            number,
            ty,
            state: IrqState::Pending,
            value: 0,
            next: None,
        };

        match self.tail {
            Some(tail) => self.nodes[tail].next = Some(idx),
            None => self.head = Some(idx),
        }
        self.tail = Some(idx);
        self.len += 1;

        Some(idx)
    }

    /// Unlink `idx`, whose predecessor is `prev`, and return it to the pool
    pub fn remove(&mut self, prev: Option<usize>, idx: usize) {
        let next = self.nodes[idx].next;

        match prev {
            Some(p) => self.nodes[p].next = next,
            None => self.head = next,
        }
        if self.tail == Some(idx) {
            self.tail = prev;
        }

        self.nodes[idx] = IrqRequest::new();
        self.nodes[idx].next = self.free;
        self.free = Some(idx);
        self.len -= 1;
    }

    /// Find the first request matching `pred`, with its predecessor
    pub fn find(&self, mut pred: impl FnMut(&IrqRequest) -> bool) -> Option<(Option<usize>, usize)> {
        let mut prev = None;
        let mut cur = self.head;
        while let Some(idx) = cur {
            if pred(&self.nodes[idx]) {
                return Some((prev, idx));
            }
            prev = cur;
            cur = self.nodes[idx].next;
        }
        None
    }

    /// Check if a live request carries `number`
    pub fn contains_number(&self, number: EventNumber) -> bool {
        self.find(|r| r.number == number).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(list: &RequestList) -> [EventNumber; CFG_IRQREQ_POOL_SIZE] {
        let mut out = [NO_EVENT; CFG_IRQREQ_POOL_SIZE];
        let mut cur = list.head();
        let mut i = 0;
        while let Some(idx) = cur {
            out[i] = list.node(idx).number;
            cur = list.node(idx).next;
            i += 1;
        }
        out
    }

    #[test]
    fn test_pool_exhaustion_and_recycle() {
        let mut list = RequestList::new();

        for n in 1..=CFG_IRQREQ_POOL_SIZE as EventNumber {
            assert!(list.push_back(n, 0).is_some());
        }
        assert_eq!(list.len(), CFG_IRQREQ_POOL_SIZE);
        assert!(list.push_back(99, 0).is_none());

        let (prev, idx) = list.find(|r| r.number == 2).unwrap();
        list.remove(prev, idx);
        assert_eq!(list.len(), CFG_IRQREQ_POOL_SIZE - 1);
        assert!(list.push_back(99, 0).is_some());
        assert!(!list.contains_number(2));
        assert!(list.contains_number(99));
    }

    #[test]
    fn test_fifo_order_after_removals() {
        let mut list = RequestList::new();

        list.push_back(1, 0);
        list.push_back(2, 0);
        list.push_back(3, 0);

        // Remove tail, then head
        let (prev, idx) = list.find(|r| r.number == 3).unwrap();
        list.remove(prev, idx);
        let (prev, idx) = list.find(|r| r.number == 1).unwrap();
        list.remove(prev, idx);

        list.push_back(4, 0);
        assert_eq!(numbers(&list)[..2], [2, 4]);
    }

    #[test]
    fn test_signal_overwrites() {
        let mut list = RequestList::new();

        let idx = list.push_back(1, 11).unwrap();
        assert!(!list.node(idx).is_signaled());
        list.node_mut(idx).signal(5);
        list.node_mut(idx).signal(6);
        assert!(list.node(idx).is_signaled());
        assert_eq!(list.node(idx).value, 6);
    }

    #[test]
    fn test_init_resets() {
        let mut list = RequestList::new();

        list.push_back(1, 0);
        list.push_back(2, 0);
        list.init();
        assert_eq!(list.len(), 0);
        assert!(list.head().is_none());
        for n in 0..CFG_IRQREQ_POOL_SIZE as EventNumber {
            assert!(list.push_back(n + 1, 0).is_some());
        }
    }
}
