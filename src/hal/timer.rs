//! Timer event source and scheduler
//!
//! Each scheduled timer owns a descriptor in a typed [`DescTable`]. When the
//! hardware ticker fires, bit `desc` of the timer status word is raised; the
//! event queue samples that word as an unbound source, and the VM reads the
//! bits to learn which timers expired.

use portable_atomic::{AtomicU32, Ordering};

use crate::config::CFG_DESC_MAX;
use crate::core::cs_cell::CsCell;
use crate::desc::DescTable;
use crate::error::{HalError, HalResult};
use crate::types::{Descriptor, EventValue};

// One status bit per timer descriptor
const _: () = assert!(CFG_DESC_MAX <= 32);

/// Timer interrupt status word
pub struct TimerEvents {
    status: AtomicU32,
}

impl TimerEvents {
    pub const fn new() -> Self {
        TimerEvents {
            status: AtomicU32::new(0),
        }
    }

    /// Raise status bits from interrupt context
    #[inline]
    pub fn set(&self, bits: u32) {
        self.status.fetch_or(bits, Ordering::AcqRel);
    }

    /// Drop status bits without reporting them
    #[inline]
    pub fn clear(&self, bits: u32) {
        self.status.fetch_and(!bits, Ordering::AcqRel);
    }

    /// Pending status bits; `clear` resets the whole word
    pub fn get(&self, clear: bool) -> Option<EventValue> {
        let bits = if clear {
            self.status.swap(0, Ordering::AcqRel)
        } else {
            self.status.load(Ordering::Acquire)
        };
        if bits == 0 {
            None
        } else {
            Some(bits as EventValue)
        }
    }
}

impl Default for TimerEvents {
    fn default() -> Self {
        Self::new()
    }
}

/// Hardware microsecond ticker driving the timers
pub trait Ticker {
    /// Current ticker time
    fn now_us(&self) -> u64;

    /// Arm an expiry for `desc` at `timestamp_us`
    fn insert(&self, desc: Descriptor, timestamp_us: u64);

    /// Disarm any pending expiry for `desc`
    fn remove(&self, desc: Descriptor);
}

/// A scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerRequest {
    pub delay_us: u64,
    pub deadline_us: u64,
    pub repeat: bool,
}

/// Descriptor-keyed timer scheduler
///
/// The table is touched from the ticker interrupt, so it sits behind a
/// critical section cell.
pub struct TimerScheduler<'a, T: Ticker> {
    ticker: T,
    events: &'a TimerEvents,
    table: CsCell<DescTable<TimerRequest>>,
}

impl<'a, T: Ticker> TimerScheduler<'a, T> {
    pub const fn new(ticker: T, events: &'a TimerEvents) -> Self {
        TimerScheduler {
            ticker,
            events,
            table: CsCell::new(DescTable::new()),
        }
    }

    /// Start a timer firing after `delay_ms`, periodically if `repeat`
    ///
    /// # Returns
    /// * `Ok(desc)` - Timer armed; its status bit is `1 << desc`
    /// * `Err(HalError::TimerDelayInvalid)` - Zero delay
    /// * `Err(HalError::TimerTableFull)` - No free descriptor
    pub fn schedule(&self, delay_ms: u32, repeat: bool) -> HalResult<Descriptor> {
        if delay_ms == 0 {
            return Err(HalError::TimerDelayInvalid);
        }

        let delay_us = u64::from(delay_ms) * 1000;
        self.table.lock(|table| {
            let deadline_us = self.ticker.now_us().saturating_add(delay_us);
            let desc = table
                .allocate(TimerRequest { delay_us, deadline_us, repeat })
                .map_err(|_| HalError::TimerTableFull)?;

            self.ticker.insert(desc, deadline_us);
            crate::debug!("timer {=usize} armed, {=u32} ms", desc, delay_ms);
            Ok(desc)
        })
    }

    /// Ticker interrupt handler for `desc`
    ///
    /// Raises the timer's status bit and re-arms periodic timers. Returns
    /// `false` for a descriptor that was cancelled in the meantime.
    pub fn handle_expiry(&self, desc: Descriptor) -> bool {
        self.table.lock(|table| match table.get_mut(desc) {
            Some(req) => {
                self.events.set(1 << desc);
                if req.repeat {
                    req.deadline_us = req.deadline_us.saturating_add(req.delay_us);
                    self.ticker.insert(desc, req.deadline_us);
                }
                true
            }
            None => false,
        })
    }

    /// Stop a timer and release its descriptor
    ///
    /// A status bit already raised for it is dropped as well.
    pub fn cancel(&self, desc: Descriptor) -> HalResult<()> {
        self.table.lock(|table| {
            table.try_deallocate(desc)?;
            self.ticker.remove(desc);
            self.events.clear(1 << desc);
            Ok(())
        })
    }

    /// Number of armed timers
    pub fn active(&self) -> usize {
        self.table.lock(|table| table.len())
    }

    /// The armed timer behind `desc`
    pub fn request(&self, desc: Descriptor) -> Option<TimerRequest> {
        self.table.lock(|table| table.lookup(desc))
    }
}
