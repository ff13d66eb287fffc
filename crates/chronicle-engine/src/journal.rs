//! Per-tick mutation tracking, used to assemble the tick-delta
//! entity-update summaries the engine hands to the host in Phase 13
//! without diffing whole-world snapshots.

use std::collections::BTreeMap;

use chronicle_ecs::{ComponentKind, EntityId};
use serde::{Deserialize, Serialize};

/// One entity's set of component kinds touched during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityUpdateSummary {
    pub entity: EntityId,
    pub changed_kinds: Vec<ComponentKind>,
}

/// Records `(entity, kind)` pairs as [`World::attach`](chronicle_ecs::World::attach)
/// and [`World::detach`](chronicle_ecs::World::detach) run during a tick, via
/// [`crate::world_access::WorldAccess`]. Cheaper and exact compared to
/// diffing per-tick-start snapshots of every affected store.
#[derive(Debug, Clone, Default)]
pub struct ChangeJournal {
    touched: BTreeMap<EntityId, Vec<ComponentKind>>,
}

impl ChangeJournal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `kind` changed on `entity` this tick.
    pub fn record(&mut self, entity: EntityId, kind: ComponentKind) {
        let kinds = self.touched.entry(entity).or_default();
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }

    /// Drain the journal into ordered [`EntityUpdateSummary`]s, leaving it
    /// empty for the next tick.
    pub fn drain(&mut self) -> Vec<EntityUpdateSummary> {
        std::mem::take(&mut self.touched)
            .into_iter()
            .map(|(entity, changed_kinds)| EntityUpdateSummary {
                entity,
                changed_kinds,
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.touched.is_empty()
    }
}
