//! Slot identifier type.

use std::fmt;

/// Identifies a slot in a cache's entry storage.
///
/// Slots live in a `Vec`, so the id is a plain index: `slots[slot_id.0]`.
/// CLOCK uses it for the hand position, LRU for arena links.
///
/// # Example
/// ```
/// use kvscache::SlotId;
///
/// let slot = SlotId::new(3);
/// assert_eq!(slot.next(4), SlotId::new(0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SlotId(pub usize);

impl SlotId {
    /// Create a new SlotId.
    #[inline]
    pub fn new(id: usize) -> Self {
        SlotId(id)
    }

    /// The following slot in a ring of `len` slots.
    #[inline]
    pub fn next(self, len: usize) -> Self {
        SlotId((self.0 + 1) % len)
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Slot({})", self.0)
    }
}
