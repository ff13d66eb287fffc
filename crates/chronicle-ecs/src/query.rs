//! Multi-kind intersection queries over a [`World`](crate::world::World).

use std::collections::HashSet;

use crate::component::ComponentKind;
use crate::entity::EntityId;
use crate::world::World;

/// Entities possessing all of `kinds`.
///
/// Begins from the smallest listed store and intersects against the others.
/// Result order is unspecified but stable within a single call. If any kind
/// has no registered store, the result is empty (querying an unregistered
/// kind is not an error).
pub fn query(world: &World, kinds: &[ComponentKind]) -> Vec<EntityId> {
    if kinds.is_empty() {
        return Vec::new();
    }

    let mut stores = Vec::with_capacity(kinds.len());
    for kind in kinds {
        match world.store(*kind) {
            Some(store) => stores.push(store),
            None => return Vec::new(),
        }
    }

    // Begin from the smallest store.
    stores.sort_by_key(|s| s.len());
    let (smallest, rest) = stores.split_first().expect("kinds is non-empty");

    smallest
        .entities()
        .filter(|entity| rest.iter().all(|s| s.contains(*entity)))
        .collect()
}

/// Entities possessing all of `kinds`, as a [`HashSet`] for fast membership
/// tests by callers that need to combine several queries.
pub fn query_set(world: &World, kinds: &[ComponentKind]) -> HashSet<EntityId> {
    query(world, kinds).into_iter().collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
