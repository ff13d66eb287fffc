//! The read/write interface domain systems see the world through.
//!
//! Forwards to [`chronicle_ecs::World`] but additionally records every
//! attach/detach into the tick's [`ChangeJournal`], which is how the engine
//! assembles entity-update summaries without diffing.

use chronicle_ecs::{Component, ComponentKind, EcsError, EntityId, World};

use crate::journal::ChangeJournal;

/// A system's view of the world for the duration of one `execute` call.
pub struct WorldAccess<'a> {
    world: &'a mut World,
    journal: &'a mut ChangeJournal,
}

impl<'a> WorldAccess<'a> {
    pub(crate) fn new(world: &'a mut World, journal: &'a mut ChangeJournal) -> Self {
        Self { world, journal }
    }

    pub fn create_entity(&mut self) -> EntityId {
        self.world.create_entity()
    }

    pub fn register_component_kind(&mut self, kind: ComponentKind) {
        self.world.register_component_kind(kind);
    }

    pub fn has_store(&self, kind: ComponentKind) -> bool {
        self.world.has_store(kind)
    }

    /// Attach `component`, recording the change in this tick's journal.
    pub fn attach(&mut self, entity: EntityId, component: Component) -> Result<(), EcsError> {
        let kind = component.kind();
        self.world.attach(entity, component)?;
        self.journal.record(entity, kind);
        Ok(())
    }

    /// Detach the component of `kind`, recording the change if anything was
    /// removed.
    pub fn detach(&mut self, entity: EntityId, kind: ComponentKind) -> bool {
        let removed = self.world.detach(entity, kind);
        if removed {
            self.journal.record(entity, kind);
        }
        removed
    }

    pub fn get(&self, entity: EntityId, kind: ComponentKind) -> Option<&Component> {
        self.world.get(entity, kind)
    }

    pub fn has(&self, entity: EntityId, kind: ComponentKind) -> bool {
        self.world.has(entity, kind)
    }

    pub fn query(&self, kinds: &[ComponentKind]) -> Vec<EntityId> {
        self.world.query(kinds)
    }

    pub fn query_with(&self, kind: ComponentKind) -> Vec<(EntityId, &Component)> {
        self.world.query_with(kind)
    }

    pub fn is_deceased(&self, entity: EntityId) -> bool {
        self.world.is_deceased(entity)
    }

    /// Read-only escape hatch for callers that need the underlying world
    /// directly (e.g. to pass to a read-only collaborator).
    pub fn world(&self) -> &World {
        self.world
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chronicle_ecs::{Deceased, Health};

    #[test]
    fn attach_and_detach_are_recorded_in_the_journal() {
        let mut world = World::new();
        world.register_component_kind(ComponentKind::Health);
        world.register_component_kind(ComponentKind::Deceased);
        let mut journal = ChangeJournal::new();

        let entity = {
            let mut access = WorldAccess::new(&mut world, &mut journal);
            let e = access.create_entity();
            access
                .attach(e, Component::Health(Health { value: 10.0 }))
                .unwrap();
            access
                .attach(
                    e,
                    Component::Deceased(Deceased {
                        tick: 1,
                        cause: "test".to_owned(),
                    }),
                )
                .unwrap();
            e
        };

        let summaries = journal.drain();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].entity, entity);
        assert_eq!(
            summaries[0].changed_kinds,
            vec![ComponentKind::Health, ComponentKind::Deceased]
        );
    }

    #[test]
    fn detach_of_absent_component_is_not_recorded() {
        let mut world = World::new();
        world.register_component_kind(ComponentKind::Health);
        let mut journal = ChangeJournal::new();
        let mut access = WorldAccess::new(&mut world, &mut journal);
        let e = access.create_entity();

        assert!(!access.detach(e, ComponentKind::Health));
        assert!(journal.drain().is_empty());
    }
}
