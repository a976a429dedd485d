use crate::fs::consts::{OPEN_FIELD_MASK, OPEN_ID_SHIFT, OPEN_SLOT_SHIFT};
use std::fmt;

/// One open instance of a file.
///
/// Inside the engine this is kept as two fields; it only becomes a packed
/// `u32` (id in bits 0..16, slot in bits 16..32) at the caller boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OpenHandle {
    pub id: u16,
    pub slot: u16,
}

impl OpenHandle {
    pub fn new(id: u16, slot: u16) -> Self {
        Self { id, slot }
    }

    pub fn pack(self) -> u32 {
        (u32::from(self.id) << OPEN_ID_SHIFT) | (u32::from(self.slot) << OPEN_SLOT_SHIFT)
    }

    pub fn unpack(raw: u32) -> Self {
        Self {
            id: ((raw >> OPEN_ID_SHIFT) & OPEN_FIELD_MASK) as u16,
            slot: ((raw >> OPEN_SLOT_SHIFT) & OPEN_FIELD_MASK) as u16,
        }
    }
}

impl From<OpenHandle> for u32 {
    fn from(handle: OpenHandle) -> Self {
        handle.pack()
    }
}

impl From<u32> for OpenHandle {
    fn from(raw: u32) -> Self {
        Self::unpack(raw)
    }
}

impl fmt::Display for OpenHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (id={}, slot={})", self.pack(), self.id, self.slot)
    }
}
