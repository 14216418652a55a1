//! Descriptor table
//!
//! Fixed-capacity slot allocator that hands out small integer descriptors for
//! native resources, so the VM only ever sees integers and never pointers.
//!
//! Occupancy lives in a [`BitSet`]; a free cursor caches the lowest free slot
//! so allocation is a single bitmap scan that starts just after the slot it
//! hands out. Freeing a lower slot pulls the cursor back down, keeping the
//! live descriptors densely packed at the bottom of the table.

mod handle;

pub use handle::NativeHandle;

use crate::config::{CFG_DESC_MAX, CFG_DESC_WORDS};
use crate::core::bitset::BitSet;
use crate::error::{HalError, HalResult};
use crate::types::Descriptor;

/// Descriptor table over opaque native handles
pub type OpaqueDescTable = DescTable<NativeHandle>;

/// Descriptor table holding payloads of type `T`
///
/// A slot is occupied iff its bitmap bit is set iff its payload is present.
pub struct DescTable<T> {
    bits: BitSet<CFG_DESC_WORDS>,
    slots: [Option<T>; CFG_DESC_MAX],
    /// Lowest free slot; `None` when the table is full
    unused: Option<Descriptor>,
}

impl<T> DescTable<T> {
    /// Create an empty table
    pub const fn new() -> Self {
        DescTable {
            bits: BitSet::new(CFG_DESC_MAX),
            slots: [const { None }; CFG_DESC_MAX],
            unused: Some(0),
        }
    }

    /// Maximum number of live descriptors
    #[inline]
    pub fn capacity(&self) -> usize {
        CFG_DESC_MAX
    }

    /// Number of live descriptors
    #[inline]
    pub fn len(&self) -> usize {
        self.bits.count_ones()
    }

    /// Check if no descriptor is live
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if the table is full
    #[inline]
    pub fn is_full(&self) -> bool {
        self.unused.is_none()
    }

    /// Check if `desc` refers to an occupied slot
    #[inline]
    pub fn is_allocated(&self, desc: Descriptor) -> bool {
        self.bits.get(desc)
    }

    /// Store `value` in the lowest free slot and return its descriptor
    ///
    /// # Returns
    /// * `Ok(desc)` - Slot claimed
    /// * `Err(HalError::DescFull)` - No free slot; `value` is dropped and no
    ///   existing mapping is touched
    pub fn allocate(&mut self, value: T) -> HalResult<Descriptor> {
        let idx = match self.unused {
            Some(idx) => idx,
            None => {
                crate::warn!("descriptor table full ({=usize} slots)", CFG_DESC_MAX);
                return Err(HalError::DescFull);
            }
        };

        self.bits.set(idx);
        self.slots[idx] = Some(value);
        self.unused = self.bits.next_clear_bit(idx + 1);

        crate::trace!("desc {=usize} allocated", idx);
        Ok(idx)
    }

    /// Payload of an occupied slot
    ///
    /// Returns `None` for free or out-of-range descriptors.
    #[inline]
    pub fn get(&self, desc: Descriptor) -> Option<&T> {
        if self.bits.get(desc) {
            self.slots[desc].as_ref()
        } else {
            None
        }
    }

    /// Mutable payload of an occupied slot
    #[inline]
    pub fn get_mut(&mut self, desc: Descriptor) -> Option<&mut T> {
        if self.bits.get(desc) {
            self.slots[desc].as_mut()
        } else {
            None
        }
    }

    /// Payload of an occupied slot, distinguishing the failure
    ///
    /// # Returns
    /// * `Err(HalError::DescInvalid)` - Descriptor outside the table
    /// * `Err(HalError::DescFree)` - Slot not occupied
    pub fn try_get(&self, desc: Descriptor) -> HalResult<&T> {
        if desc >= CFG_DESC_MAX {
            return Err(HalError::DescInvalid);
        }
        self.get(desc).ok_or(HalError::DescFree)
    }

    /// Release a slot and hand its payload back
    ///
    /// Freeing a free or out-of-range descriptor is a no-op returning `None`.
    pub fn deallocate(&mut self, desc: Descriptor) -> Option<T> {
        if !self.bits.get(desc) {
            return None;
        }

        self.bits.clear(desc);
        let value = self.slots[desc].take();

        match self.unused {
            Some(unused) if unused <= desc => {}
            _ => self.unused = Some(desc),
        }

        crate::trace!("desc {=usize} released", desc);
        value
    }

    /// Release a slot, distinguishing the failure
    pub fn try_deallocate(&mut self, desc: Descriptor) -> HalResult<T> {
        if desc >= CFG_DESC_MAX {
            return Err(HalError::DescInvalid);
        }
        self.deallocate(desc).ok_or(HalError::DescFree)
    }

    /// Live descriptors and their payloads, lowest first
    pub fn iter(&self) -> impl Iterator<Item = (Descriptor, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.as_ref().map(|v| (idx, v)))
    }

    /// Release every slot
    pub fn clear(&mut self) {
        self.bits.clear_all();
        for slot in self.slots.iter_mut() {
            *slot = None;
        }
        self.unused = Some(0);
    }
}

impl<T: Copy> DescTable<T> {
    /// Copy of the payload of an occupied slot
    #[inline]
    pub fn lookup(&self, desc: Descriptor) -> Option<T> {
        self.get(desc).copied()
    }
}

impl<T> Default for DescTable<T> {
    fn default() -> Self {
        Self::new()
    }
}
