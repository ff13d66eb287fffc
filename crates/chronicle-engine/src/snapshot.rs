//! External interfaces: the tick-delta notification and the world-snapshot
//! request, assembled from engine-internal state for host collaborators
//! (rendering UIs, exporters, narrative template engines).

use chronicle_ecs::{Component, ComponentKind, EntityId, World};
use chronicle_events::Event;
use serde::{Deserialize, Serialize};

use crate::clock::CalendarDate;
use crate::error::Diagnostic;
use crate::journal::EntityUpdateSummary;

/// Assembled every tick in Phase 13 and handed to the host's notification
/// callback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickDelta {
    pub tick: u64,
    pub calendar: CalendarDate,
    pub events: Vec<Event>,
    pub entity_updates: Vec<EntityUpdateSummary>,
    pub removed_entities: Vec<EntityId>,
    /// Contained failures (system or cascade) captured this tick, in the
    /// order they occurred, so the host can surface diagnostics describing
    /// each captured failure.
    #[serde(skip, default)]
    pub diagnostics: Vec<Diagnostic>,
}

/// A compact per-entity view: which component kinds it currently carries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntitySummary {
    pub entity: EntityId,
    pub kinds: Vec<ComponentKind>,
}

/// A faction's summary, derived by querying every entity carrying a
/// `Government` component (the catalog's stand-in for "entities that are
/// factions").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactionSummary {
    pub entity: EntityId,
    pub form: String,
    pub stability: f32,
}

/// A point-in-time projection the host may request at any time between
/// ticks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSnapshotView {
    /// Opaque tile data from the environment populator -- the core never
    /// interprets it, only carries it through.
    pub tiles: serde_json::Value,
    pub entities: Vec<EntitySummary>,
    pub factions: Vec<FactionSummary>,
    pub events: Vec<Event>,
    pub map_width: u32,
    pub map_height: u32,
}

impl WorldSnapshotView {
    /// Assemble a snapshot from the current world and event log. `tiles`,
    /// `map_width`, and `map_height` are opaque to the core and supplied by
    /// the caller (the world-gen/environment collaborator owns them).
    pub fn assemble(
        world: &World,
        events: &[Event],
        tiles: serde_json::Value,
        map_width: u32,
        map_height: u32,
    ) -> Self {
        let entities = world_entity_summaries(world);
        let factions = world
            .query_with(ComponentKind::Government)
            .into_iter()
            .map(|(entity, component)| {
                let Component::Government(gov) = component else {
                    unreachable!("query_with(Government) only yields Government components");
                };
                FactionSummary {
                    entity,
                    form: gov.form.clone(),
                    stability: gov.stability,
                }
            })
            .collect();

        Self {
            tiles,
            entities,
            factions,
            events: events.to_vec(),
            map_width,
            map_height,
        }
    }
}

fn world_entity_summaries(world: &World) -> Vec<EntitySummary> {
    let mut by_entity: std::collections::BTreeMap<EntityId, Vec<ComponentKind>> =
        std::collections::BTreeMap::new();
    for kind in ComponentKind::ALL {
        for (entity, _) in world.query_with(*kind) {
            by_entity.entry(entity).or_default().push(*kind);
        }
    }
    by_entity
        .into_iter()
        .map(|(entity, kinds)| EntitySummary { entity, kinds })
        .collect()
}
