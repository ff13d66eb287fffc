//! The [`World`]: owns entity ids and every component store.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::component::{Component, ComponentKind};
use crate::entity::{EntityAllocator, EntityId};
use crate::error::EcsError;
use crate::query;
use crate::store::ComponentStore;

/// The top-level ECS container.
///
/// Owns the entity allocator and every registered component store.
/// External collaborators borrow read access; only the currently executing
/// system (or the engine, during setup) mutates it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct World {
    allocator: EntityAllocator,
    stores: HashMap<ComponentKind, ComponentStore>,
}

impl World {
    /// Construct an empty world.
    pub fn new() -> Self {
        Self {
            allocator: EntityAllocator::new(),
            stores: HashMap::new(),
        }
    }

    /// Create a new entity with no components. Ids are assigned in strictly
    /// increasing order and never recycled.
    pub fn create_entity(&mut self) -> EntityId {
        self.allocator.allocate()
    }

    /// Total number of entities ever created (the id high-water mark).
    pub fn entity_count(&self) -> u64 {
        self.allocator.allocated_count()
    }

    /// Ensure a store exists for `kind`. Idempotent.
    pub fn register_component_kind(&mut self, kind: ComponentKind) {
        self.stores.entry(kind).or_insert_with(ComponentStore::new);
    }

    /// Whether a store is registered for `kind`.
    pub fn has_store(&self, kind: ComponentKind) -> bool {
        self.stores.contains_key(&kind)
    }

    /// Borrow the store for `kind`, if registered.
    pub(crate) fn store(&self, kind: ComponentKind) -> Option<&ComponentStore> {
        self.stores.get(&kind)
    }

    /// Insert or replace `component` on `entity` in the store of its kind.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::MissingStore`] if that kind's store has not been
    /// registered via [`register_component_kind`](Self::register_component_kind).
    pub fn attach(&mut self, entity: EntityId, component: Component) -> Result<(), EcsError> {
        let kind = component.kind();
        let store = self
            .stores
            .get_mut(&kind)
            .ok_or(EcsError::MissingStore(kind))?;
        store.insert(entity, component);
        Ok(())
    }

    /// Remove the component of `kind` from `entity`, if present.
    ///
    /// Returns whether anything was removed. Detaching a kind with no
    /// registered store, or from an entity that never had it, is not an
    /// error — it simply returns `false`.
    pub fn detach(&mut self, entity: EntityId, kind: ComponentKind) -> bool {
        match self.stores.get_mut(&kind) {
            Some(store) => store.remove(entity),
            None => false,
        }
    }

    /// Borrow the component of `kind` on `entity`, if any.
    pub fn get(&self, entity: EntityId, kind: ComponentKind) -> Option<&Component> {
        self.stores.get(&kind).and_then(|s| s.get(entity))
    }

    /// Whether `entity` carries a component of `kind`.
    pub fn has(&self, entity: EntityId, kind: ComponentKind) -> bool {
        self.stores
            .get(&kind)
            .map(|s| s.contains(entity))
            .unwrap_or(false)
    }

    /// Entities possessing every kind in `kinds`.
    ///
    /// Begins from the smallest listed store and intersects against the
    /// rest; order is unspecified but stable within a single call.
    pub fn query(&self, kinds: &[ComponentKind]) -> Vec<EntityId> {
        query::query(self, kinds)
    }

    /// `(entity, component)` pairs for every entity carrying `kind`.
    pub fn query_with(&self, kind: ComponentKind) -> Vec<(EntityId, &Component)> {
        match self.stores.get(&kind) {
            Some(store) => store.iter().collect(),
            None => Vec::new(),
        }
    }

    /// Whether `entity` carries the [`Deceased`](crate::component::Deceased)
    /// marker component.
    pub fn is_deceased(&self, entity: EntityId) -> bool {
        self.has(entity, ComponentKind::Deceased)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{Deceased, Health, Position};

    fn setup() -> World {
        let mut world = World::new();
        world.register_component_kind(ComponentKind::Position);
        world.register_component_kind(ComponentKind::Health);
        world
    }

    #[test]
    fn create_entity_assigns_monotonic_ids() {
        let mut world = World::new();
        let a = world.create_entity();
        let b = world.create_entity();
        assert!(a < b);
        assert_eq!(world.entity_count(), 2);
    }

    #[test]
    fn attach_requires_registered_store() {
        let mut world = World::new();
        let e = world.create_entity();
        let result = world.attach(e, Component::Health(Health { value: 1.0 }));
        assert_eq!(result, Err(EcsError::MissingStore(ComponentKind::Health)));
    }

    #[test]
    fn attach_get_has_roundtrip() {
        let mut world = setup();
        let e = world.create_entity();
        world
            .attach(e, Component::Position(Position { x: 1.0, y: 2.0 }))
            .unwrap();
        assert!(world.has(e, ComponentKind::Position));
        assert_eq!(
            world.get(e, ComponentKind::Position),
            Some(&Component::Position(Position { x: 1.0, y: 2.0 }))
        );
        assert!(!world.has(e, ComponentKind::Health));
    }

    #[test]
    fn attach_replaces_existing_component() {
        let mut world = setup();
        let e = world.create_entity();
        world
            .attach(e, Component::Health(Health { value: 100.0 }))
            .unwrap();
        world
            .attach(e, Component::Health(Health { value: 50.0 }))
            .unwrap();
        assert_eq!(
            world.get(e, ComponentKind::Health),
            Some(&Component::Health(Health { value: 50.0 }))
        );
    }

    #[test]
    fn detach_reports_whether_anything_removed() {
        let mut world = setup();
        let e = world.create_entity();
        assert!(!world.detach(e, ComponentKind::Health));
        world
            .attach(e, Component::Health(Health { value: 1.0 }))
            .unwrap();
        assert!(world.detach(e, ComponentKind::Health));
        assert!(!world.has(e, ComponentKind::Health));
    }

    #[test]
    fn detach_unregistered_kind_is_not_an_error() {
        let mut world = World::new();
        let e = world.create_entity();
        assert!(!world.detach(e, ComponentKind::Health));
    }

    #[test]
    fn get_unregistered_kind_returns_none() {
        let world = World::new();
        let e = EntityId::from_raw(0);
        assert_eq!(world.get(e, ComponentKind::Health), None);
    }

    #[test]
    fn deceased_marker_does_not_remove_entity() {
        let mut world = World::new();
        world.register_component_kind(ComponentKind::Deceased);
        let e = world.create_entity();
        world
            .attach(
                e,
                Component::Deceased(Deceased {
                    tick: 10,
                    cause: "old age".to_owned(),
                }),
            )
            .unwrap();
        assert!(world.is_deceased(e));
        // Entity is still addressable -- never destroyed.
        assert!(world.has(e, ComponentKind::Deceased));
    }

    #[test]
    fn world_roundtrips_through_json() {
        let mut world = setup();
        let e = world.create_entity();
        world
            .attach(e, Component::Position(Position { x: 3.0, y: 4.0 }))
            .unwrap();

        let json = serde_json::to_string(&world).unwrap();
        let restored: World = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.entity_count(), world.entity_count());
        assert_eq!(
            restored.get(e, ComponentKind::Position),
            world.get(e, ComponentKind::Position)
        );
    }
}
