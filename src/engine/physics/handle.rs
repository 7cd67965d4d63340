// Stable handles to bodies registered in a space

use std::fmt;

/// Identifies a body inside the `Space` that issued it
///
/// Handles are handed out in increasing order and never reused, so a handle
/// to a removed body stays invalid even after new bodies are added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub(crate) u64);

impl BodyHandle {
    /// Create a handle from a raw u64
    pub fn from_u64(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw u64 value
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for BodyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "body#{}", self.0)
    }
}

/// Hands out fresh handles
#[derive(Debug, Default)]
pub(crate) struct HandleAllocator {
    next: u64,
}

impl HandleAllocator {
    pub(crate) fn allocate(&mut self) -> BodyHandle {
        let handle = BodyHandle(self.next);
        self.next += 1;
        handle
    }
}
