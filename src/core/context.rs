//! Native context
//!
//! Everything a hardware-integration layer shares between its drivers and the
//! VM scheduler, bundled in one object instead of process-wide statics. It is
//! `const`-constructible, so a target may still place it in a `static`.

use crate::core::cs_cell::CsCell;
use crate::desc::{NativeHandle, OpaqueDescTable};
use crate::error::HalResult;
use crate::event::{EventQueue, UnboundEvents};
use crate::types::Descriptor;

/// Event queue plus the driver descriptor table of one VM instance
pub struct NativeContext<U: UnboundEvents> {
    events: EventQueue<U>,
    descriptors: CsCell<OpaqueDescTable>,
}

impl<U: UnboundEvents> NativeContext<U> {
    pub const fn new(unbound: U) -> Self {
        NativeContext {
            events: EventQueue::new(unbound),
            descriptors: CsCell::new(OpaqueDescTable::new()),
        }
    }

    /// The event queue polled by the scheduler
    #[inline]
    pub fn events(&self) -> &EventQueue<U> {
        &self.events
    }

    /// Hand out a descriptor for a driver-owned resource
    ///
    /// On `Err(HalError::DescFull)` the driver still owns the resource and
    /// must release it before reporting the failure.
    pub fn allocate_desc(&self, handle: NativeHandle) -> HalResult<Descriptor> {
        self.descriptors.lock(|table| table.allocate(handle))
    }

    /// Resource behind a descriptor, `None` if free or out of range
    pub fn get_object_from_desc(&self, desc: Descriptor) -> Option<NativeHandle> {
        self.descriptors.lock(|table| table.lookup(desc))
    }

    /// Release a descriptor, returning the resource for the driver to free
    pub fn deallocate_desc(&self, desc: Descriptor) -> Option<NativeHandle> {
        self.descriptors.lock(|table| table.deallocate(desc))
    }

    /// Number of live descriptors
    pub fn descriptors_in_use(&self) -> usize {
        self.descriptors.lock(|table| table.len())
    }

    /// Drop every request and descriptor, as on VM restart
    ///
    /// Resources still referenced by descriptors are not freed here.
    pub fn reset(&self) {
        self.events.reset();
        self.descriptors.lock(|table| table.clear());
    }
}
