//! Level-of-detail classification: maps every positioned entity to one of
//! three update-fidelity tiers based on proximity to registered focus
//! points, and exposes the significance-override predicate that
//! short-circuits tier filtering for narratively important events.

use std::collections::HashMap;

use chronicle_ecs::{ComponentKind, EntityId, World};
use chronicle_events::Event;
use serde::{Deserialize, Serialize};

/// An entity's update-fidelity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LodTier {
    Full,
    Reduced,
    Abstract,
}

/// Distance thresholds (chebyshev, in tiles) governing tier assignment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LodConfig {
    pub full_radius: f64,
    pub reduced_radius: f64,
    pub significance_override_threshold: u8,
}

impl Default for LodConfig {
    fn default() -> Self {
        Self {
            full_radius: 50.0,
            reduced_radius: 200.0,
            significance_override_threshold: 85,
        }
    }
}

/// Classifies entities into [`LodTier`]s based on distance from the nearest
/// focus point, recomputed once per tick in Phase 1.
#[derive(Debug, Clone, Default)]
pub struct LodManager {
    config: LodConfig,
    focus_points: Vec<(f64, f64)>,
    tiers: HashMap<EntityId, LodTier>,
}

impl LodManager {
    pub fn new(config: LodConfig) -> Self {
        Self {
            config,
            focus_points: Vec::new(),
            tiers: HashMap::new(),
        }
    }

    /// Replace the set of focus coordinates entities are classified against.
    pub fn set_focus_points(&mut self, points: Vec<(f64, f64)>) {
        self.focus_points = points;
    }

    /// The tier last computed for `entity`.
    ///
    /// Entities with no position component (or not yet classified, e.g.
    /// before the first [`update`](Self::update)) default to `Full` — the
    /// conservative choice, since a system skipping an entity it can't
    /// place is a silent behavior change, while over-updating one is not.
    pub fn tier_for(&self, entity: EntityId) -> LodTier {
        self.tiers.get(&entity).copied().unwrap_or(LodTier::Full)
    }

    /// Recompute tiers for every entity carrying a `Position` component.
    /// Called by the engine in Phase 1, before systems run.
    pub fn update(&mut self, world: &World) {
        self.tiers.clear();
        if self.focus_points.is_empty() {
            // No focus points registered: nothing to be far from.
            return;
        }
        for (entity, component) in world.query_with(ComponentKind::Position) {
            let pos = component
                .as_position()
                .expect("Position store holds only Position components");
            let distance = self
                .focus_points
                .iter()
                .map(|&(fx, fy)| chebyshev(pos.x, pos.y, fx, fy))
                .fold(f64::INFINITY, f64::min);

            let tier = if distance <= self.config.full_radius {
                LodTier::Full
            } else if distance <= self.config.reduced_radius {
                LodTier::Reduced
            } else {
                LodTier::Abstract
            };
            self.tiers.insert(entity, tier);
        }
    }

    /// The significance-override predicate: events at or above the
    /// configured threshold bypass LoD filtering regardless of participant
    /// tier. Systems consulting [`tier_for`](Self::tier_for) must also
    /// consult this before skipping work for an event.
    pub fn overrides(&self, event: &Event) -> bool {
        event.significance >= self.config.significance_override_threshold
    }
}

fn chebyshev(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    (x1 - x2).abs().max((y1 - y2).abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chronicle_ecs::{Component, Position};

    fn world_with_positions(coords: &[(f64, f64)]) -> (World, Vec<EntityId>) {
        let mut world = World::new();
        world.register_component_kind(ComponentKind::Position);
        let mut ids = Vec::new();
        for &(x, y) in coords {
            let e = world.create_entity();
            world.attach(e, Component::Position(Position { x, y })).unwrap();
            ids.push(e);
        }
        (world, ids)
    }

    #[test]
    fn entities_without_positions_or_before_update_default_to_full() {
        let manager = LodManager::new(LodConfig::default());
        assert_eq!(manager.tier_for(EntityId::from_raw(0)), LodTier::Full);
    }

    #[test]
    fn tiers_follow_chebyshev_distance_thresholds() {
        let (world, ids) = world_with_positions(&[(0.0, 0.0), (60.0, 0.0), (0.0, 300.0)]);
        let mut manager = LodManager::new(LodConfig::default());
        manager.set_focus_points(vec![(0.0, 0.0)]);
        manager.update(&world);

        assert_eq!(manager.tier_for(ids[0]), LodTier::Full);
        assert_eq!(manager.tier_for(ids[1]), LodTier::Reduced);
        assert_eq!(manager.tier_for(ids[2]), LodTier::Abstract);
    }

    #[test]
    fn nearest_focus_point_wins() {
        let (world, ids) = world_with_positions(&[(100.0, 100.0)]);
        let mut manager = LodManager::new(LodConfig::default());
        manager.set_focus_points(vec![(0.0, 0.0), (100.0, 90.0)]);
        manager.update(&world);

        // Distance to (0,0) is 100, to (100,90) is 10 -- well within Full.
        assert_eq!(manager.tier_for(ids[0]), LodTier::Full);
    }

    #[test]
    fn significance_override_threshold_is_exact() {
        let manager = LodManager::new(LodConfig::default());
        let mut event = sample_event(84);
        assert!(!manager.overrides(&event));
        event.significance = 85;
        assert!(manager.overrides(&event));
    }

    fn sample_event(significance: u8) -> Event {
        Event {
            id: chronicle_events::EventId::from_raw(0),
            category: chronicle_events::EventCategory::Personal,
            subtype: "probe".to_owned(),
            tick: 0,
            participants: vec![],
            causes: vec![],
            consequence_potentials: vec![],
            data: Default::default(),
            significance,
        }
    }
}
