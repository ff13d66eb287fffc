//! Entity identifiers and allocation.
//!
//! An [`EntityId`] is a monotonically assigned, never-recycled 64-bit handle.
//! Unlike a typical game ECS, entities in this world are never destroyed —
//! they are marked deceased via a component — so there is no generation
//! counter and no stale-handle class of bug to detect.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// EntityId
// ---------------------------------------------------------------------------

/// An opaque, monotonically increasing entity identifier.
///
/// Ids start at 0 and are handed out in strictly increasing order for the
/// lifetime of a [`World`](crate::world::World). They are never reused.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(u64);

impl EntityId {
    /// Construct an `EntityId` directly from its raw value.
    ///
    /// Only meaningful for tests and for reconstructing ids read back from a
    /// serialized world; callers should otherwise obtain ids exclusively from
    /// [`EntityAllocator::allocate`].
    #[inline]
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw `u64` value of this id.
    #[inline]
    pub fn to_raw(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// EntityAllocator
// ---------------------------------------------------------------------------

/// Hands out strictly increasing [`EntityId`]s. Never recycles an index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityAllocator {
    next: u64,
}

impl EntityAllocator {
    /// Create a fresh allocator with no entities yet created.
    pub fn new() -> Self {
        Self { next: 0 }
    }

    /// Allocate the next [`EntityId`] in sequence.
    pub fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }

    /// The number of entities ever allocated (the high-water mark).
    pub fn allocated_count(&self) -> u64 {
        self.next
    }

    /// Reconstruct an allocator at a given high-water mark, e.g. after a load.
    pub fn restore(high_water_mark: u64) -> Self {
        Self {
            next: high_water_mark,
        }
    }
}

impl Default for EntityAllocator {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocates_strictly_increasing_ids() {
        let mut alloc = EntityAllocator::new();
        let ids: Vec<EntityId> = (0..100).map(|_| alloc.allocate()).collect();
        for pair in ids.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn never_recycles() {
        let mut alloc = EntityAllocator::new();
        let e0 = alloc.allocate();
        let e1 = alloc.allocate();
        assert_ne!(e0, e1);
        assert_eq!(alloc.allocated_count(), 2);
    }

    #[test]
    fn restore_continues_from_high_water_mark() {
        let mut alloc = EntityAllocator::restore(42);
        let e = alloc.allocate();
        assert_eq!(e.to_raw(), 42);
    }

    #[test]
    fn raw_roundtrip() {
        let id = EntityId::from_raw(7);
        assert_eq!(EntityId::from_raw(id.to_raw()), id);
    }
}
