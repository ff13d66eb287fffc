//! The Simulation Engine: orchestrates one tick as the fixed 13-phase
//! pipeline over the [`SystemRegistry`], wiring the clock, LoD manager,
//! event bus, and cascade engine together.

use std::cell::RefCell;
use std::rc::Rc;

use rand_pcg::Pcg32;
use tracing::warn;

use chronicle_ecs::{ComponentKind, World};
use chronicle_events::{CascadeConfig, CascadeEngine, Event, EventBus, RuleRegistry};

use crate::clock::Clock;
use crate::error::{Diagnostic, EngineError};
use crate::journal::ChangeJournal;
use crate::lod::{LodConfig, LodManager};
use crate::phase::{Phase, PipelineBucket};
use crate::registry::SystemRegistry;
use crate::snapshot::TickDelta;
use crate::system::System;
use crate::world_access::WorldAccess;

/// Tunables the host supplies once, at construction.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// The world seed. Every per-system and per-cascade-source RNG stream
    /// is forked deterministically from this value.
    pub seed: u64,
    pub cascade: CascadeConfig,
    pub lod: LodConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            cascade: CascadeConfig::default(),
            lod: LodConfig::default(),
        }
    }
}

/// Invoked in Phase 13 with the tick's delta.
pub type NotificationCallback = Box<dyn FnMut(&TickDelta)>;

/// Invoked in Phase 11 (external narrative collaborator) with the tick and
/// the events emitted during it.
pub type NarrativeHook = Box<dyn FnMut(u64, &[Event])>;

/// Drives one [`World`] through the tick pipeline.
///
/// Owns the clock, event bus (paired with its log), cascade engine, LoD
/// manager, and system registry. A host constructs one `Engine` per
/// simulation run.
pub struct Engine {
    world: World,
    clock: Clock,
    bus: EventBus,
    cascade: Rc<RefCell<CascadeEngine>>,
    lod: LodManager,
    registry: SystemRegistry,
    journal: ChangeJournal,
    root_seed: [u8; 32],
    notification: Option<NotificationCallback>,
    narrative_hook: Option<NarrativeHook>,
    diagnostics_this_tick: Vec<Diagnostic>,
}

impl Engine {
    /// Construct an engine around `world`, driving `registry`'s systems and
    /// deriving consequence events through `rule_registry`.
    pub fn new(
        world: World,
        registry: SystemRegistry,
        rule_registry: RuleRegistry,
        config: EngineConfig,
    ) -> Self {
        let root_seed = *blake3::hash(&config.seed.to_le_bytes()).as_bytes();
        let cascade = Rc::new(RefCell::new(CascadeEngine::new(
            config.cascade,
            rule_registry,
            config.seed,
        )));

        let mut bus = EventBus::new();
        CascadeEngine::install(Rc::clone(&cascade), &mut bus);

        Self {
            world,
            clock: Clock::new(),
            bus,
            cascade,
            lod: LodManager::new(config.lod),
            registry,
            journal: ChangeJournal::new(),
            root_seed,
            notification: None,
            narrative_hook: None,
            diagnostics_this_tick: Vec::new(),
        }
    }

    /// Register the host's Phase 13 notification callback.
    pub fn set_notification_callback(&mut self, callback: NotificationCallback) {
        self.notification = Some(callback);
    }

    /// Register the external narrative collaborator's Phase 11 hook.
    pub fn set_narrative_hook(&mut self, hook: NarrativeHook) {
        self.narrative_hook = Some(hook);
    }

    /// Replace the LoD manager's focus points.
    pub fn set_focus_points(&mut self, points: Vec<(f64, f64)>) {
        self.lod.set_focus_points(points);
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// The number of ticks executed in this process.
    pub fn tick_count(&self) -> u64 {
        self.clock.current_tick()
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn lod(&self) -> &LodManager {
        &self.lod
    }

    pub fn registry(&self) -> &SystemRegistry {
        &self.registry
    }

    /// Register a domain system. Delegates to the underlying
    /// [`SystemRegistry`], which stable-sorts by declared execution order.
    pub fn register_system(&mut self, system: Box<dyn System>) {
        self.registry.register(system);
    }

    /// Advance `n` ticks. Each tick runs the notification callback (if one
    /// is registered) via Phase 13; the host observes progress through it
    /// rather than through this method's return value.
    pub fn run(&mut self, n: u64) -> Result<(), EngineError> {
        for _ in 0..n {
            self.tick()?;
        }
        Ok(())
    }

    /// Execute exactly one tick: the fixed 13-phase pipeline.
    pub fn tick(&mut self) -> Result<TickDelta, EngineError> {
        // Phase 1: Time.
        self.clock.advance();
        self.lod.update(&self.world);
        let tick = self.clock.current_tick();

        let events_before = self.bus.log().count();

        // Phases 2-9: one pipeline slot each, in declared pipeline order.
        for &bucket in PipelineBucket::ALL {
            self.run_phase(bucket, tick);
        }

        // Phase 10: EventResolution. Bus dispatch (and the cascade engine
        // it drives) is synchronous and depth-first, so every event
        // emitted by a Phase 2-9 system -- and every event it derived --
        // has already been fully delivered and logged by this point.
        // There is nothing left to flush.

        let tick_events: Vec<Event> = self.bus.log().all()[events_before..].to_vec();

        // Assemble the entity-update summaries and removed-entity list
        // before Phase 12 drains the journal for the next tick.
        let entity_updates = self.journal.drain();
        let removed_entities = entity_updates
            .iter()
            .filter(|summary| {
                summary.changed_kinds.contains(&ComponentKind::Deceased)
                    && self.world.is_deceased(summary.entity)
            })
            .map(|summary| summary.entity)
            .collect();

        // Phase 11: Narrative.
        if let Some(hook) = self.narrative_hook.as_mut() {
            hook(tick, &tick_events);
        }

        // Phase 12: Cleanup. The event log's secondary indexes are kept
        // consistent incrementally on every append (see chronicle-events),
        // so there is no batch compaction step here; the journal (the only
        // other transient per-tick state) was already drained above.
        let diagnostics = std::mem::take(&mut self.diagnostics_this_tick);

        let delta = TickDelta {
            tick,
            calendar: self.clock.current_time(),
            events: tick_events,
            entity_updates,
            removed_entities,
            diagnostics,
        };

        // Phase 13: Notification.
        if let Some(callback) = self.notification.as_mut() {
            callback(&delta);
        }

        Ok(delta)
    }

    /// Run every system assigned to `phase` whose frequency tier fires on
    /// `tick`, in declared execution order. A system that fails is
    /// contained: logged, its remaining work for the tick skipped, and the
    /// engine proceeds to the next system.
    fn run_phase(&mut self, bucket: PipelineBucket, tick: u64) {
        let Self {
            registry,
            world,
            journal,
            bus,
            clock,
            root_seed,
            diagnostics_this_tick,
            ..
        } = self;

        for entry in registry.entries_for_bucket_mut(bucket) {
            if !entry.system.frequency().fires(tick) {
                continue;
            }

            let mut access = WorldAccess::new(world, journal);

            if !entry.initialized {
                entry.system.initialize(&mut access, &*clock, bus);
                entry.initialized = true;
            }

            let mut rng = derive_system_rng(root_seed, entry.system.name(), tick);
            if let Err(error) = entry.system.execute(&mut access, &*clock, bus, &mut rng) {
                let name = entry.system.name().to_owned();
                warn!(system = %name, tick, %error, "system execution failed; contained");
                diagnostics_this_tick.push(Diagnostic {
                    tick,
                    source: name,
                    message: error.to_string(),
                });
            }
        }
    }
}

/// A per-system, per-tick RNG stream, forked deterministically from the
/// world seed so system A's draws can never starve or influence system B's.
fn derive_system_rng(root_seed: &[u8; 32], system_name: &str, tick: u64) -> Pcg32 {
    let mut input = Vec::with_capacity(root_seed.len() + system_name.len() + 8);
    input.extend_from_slice(root_seed);
    input.extend_from_slice(system_name.as_bytes());
    input.extend_from_slice(&tick.to_le_bytes());
    let digest = blake3::hash(&input);
    let bytes = digest.as_bytes();
    let state = u64::from_le_bytes(bytes[0..8].try_into().unwrap());
    let stream = u64::from_le_bytes(bytes[8..16].try_into().unwrap());
    Pcg32::new(state, stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::Frequency;
    use chronicle_ecs::{Component, ComponentKind, Position};
    use chronicle_events::{EventCategory, EventDraft};
    use std::cell::RefCell as StdRefCell;
    use std::rc::Rc as StdRc;

    fn engine_with(registry: SystemRegistry, seed: u64) -> Engine {
        Engine::new(
            World::new(),
            registry,
            RuleRegistry::new(),
            EngineConfig {
                seed,
                ..Default::default()
            },
        )
    }

    #[test]
    fn empty_world_run_zero_ticks_produces_nothing() {
        let mut engine = engine_with(SystemRegistry::new(), 42);
        engine.run(0).unwrap();
        assert_eq!(engine.tick_count(), 0);
        assert_eq!(engine.bus().log().count(), 0);
    }

    #[test]
    fn run_365_ticks_advances_clock_with_no_systems() {
        let mut engine = engine_with(SystemRegistry::new(), 42);
        engine.run(365).unwrap();
        assert_eq!(engine.tick_count(), 365);
        assert_eq!(engine.bus().log().count(), 0);
        let calendar = engine.clock().current_time();
        assert_eq!(calendar.year, 2);
        assert_eq!(calendar.month, 1);
        assert_eq!(calendar.day, 6);
    }

    struct ProbeSystem;
    impl System for ProbeSystem {
        fn name(&self) -> &str {
            "probe"
        }
        fn phase(&self) -> Phase {
            Phase::CharacterAI
        }
        fn frequency(&self) -> Frequency {
            Frequency::Daily
        }
        fn execute(
            &mut self,
            _world: &mut WorldAccess,
            clock: &Clock,
            bus: &mut EventBus,
            _rng: &mut Pcg32,
        ) -> Result<(), anyhow::Error> {
            if clock.current_tick() == 10 {
                bus.emit(
                    EventDraft::new(EventCategory::Personal, "test.probe").with_significance(50),
                    clock.current_tick(),
                )?;
            }
            Ok(())
        }
    }

    #[test]
    fn single_emit_scenario_is_recorded_with_correct_timestamp() {
        let mut registry = SystemRegistry::new();
        registry.register(Box::new(ProbeSystem));
        let mut engine = engine_with(registry, 1);

        engine.run(20).unwrap();

        assert_eq!(engine.bus().log().count(), 1);
        let recorded = &engine.bus().log().by_category(EventCategory::Personal)[0];
        assert_eq!(recorded.tick, 10);
    }

    struct FailingSystem;
    impl System for FailingSystem {
        fn name(&self) -> &str {
            "failing"
        }
        fn phase(&self) -> Phase {
            Phase::Economy
        }
        fn frequency(&self) -> Frequency {
            Frequency::Daily
        }
        fn execute(
            &mut self,
            _world: &mut WorldAccess,
            _clock: &Clock,
            _bus: &mut EventBus,
            _rng: &mut Pcg32,
        ) -> Result<(), anyhow::Error> {
            anyhow::bail!("simulated failure")
        }
    }

    struct CountingSystem {
        count: StdRc<StdRefCell<u32>>,
    }
    impl System for CountingSystem {
        fn name(&self) -> &str {
            "counter"
        }
        fn phase(&self) -> Phase {
            Phase::Military
        }
        fn frequency(&self) -> Frequency {
            Frequency::Daily
        }
        fn execute(
            &mut self,
            _world: &mut WorldAccess,
            _clock: &Clock,
            _bus: &mut EventBus,
            _rng: &mut Pcg32,
        ) -> Result<(), anyhow::Error> {
            *self.count.borrow_mut() += 1;
            Ok(())
        }
    }

    #[test]
    fn a_failing_system_is_contained_and_the_next_system_still_runs() {
        let mut registry = SystemRegistry::new();
        registry.register(Box::new(FailingSystem));
        let count = StdRc::new(StdRefCell::new(0u32));
        registry.register(Box::new(CountingSystem {
            count: StdRc::clone(&count),
        }));

        let mut engine = engine_with(registry, 3);
        let delta = engine.tick().unwrap();

        assert_eq!(*count.borrow(), 1);
        assert_eq!(delta.diagnostics.len(), 1);
        assert_eq!(delta.diagnostics[0].source, "failing");
    }

    #[test]
    fn notification_callback_fires_every_tick() {
        let ticks_seen = StdRc::new(StdRefCell::new(Vec::new()));
        let ticks_for_cb = StdRc::clone(&ticks_seen);

        let mut engine = engine_with(SystemRegistry::new(), 9);
        engine.set_notification_callback(Box::new(move |delta| {
            ticks_for_cb.borrow_mut().push(delta.tick);
        }));

        engine.run(3).unwrap();
        assert_eq!(*ticks_seen.borrow(), vec![1, 2, 3]);
    }

    #[test]
    fn deceased_marker_surfaces_as_a_removed_entity() {
        struct ReaperSystem;
        impl System for ReaperSystem {
            fn name(&self) -> &str {
                "reaper"
            }
            fn phase(&self) -> Phase {
                Phase::Social
            }
            fn frequency(&self) -> Frequency {
                Frequency::Daily
            }
            fn execute(
                &mut self,
                world: &mut WorldAccess,
                clock: &Clock,
                _bus: &mut EventBus,
                _rng: &mut Pcg32,
            ) -> Result<(), anyhow::Error> {
                if clock.current_tick() == 1 {
                    world.register_component_kind(ComponentKind::Deceased);
                    let e = world.create_entity();
                    world.attach(
                        e,
                        Component::Deceased(chronicle_ecs::Deceased {
                            tick: 1,
                            cause: "test".to_owned(),
                        }),
                    )?;
                }
                Ok(())
            }
        }

        let mut registry = SystemRegistry::new();
        registry.register(Box::new(ReaperSystem));
        let mut engine = engine_with(registry, 5);

        let delta = engine.tick().unwrap();
        assert_eq!(delta.removed_entities.len(), 1);
    }

    #[test]
    fn lod_tiers_are_computed_before_systems_run_each_tick() {
        let mut engine = engine_with(SystemRegistry::new(), 1);
        engine.world_mut().register_component_kind(ComponentKind::Position);
        let e = engine.world_mut().create_entity();
        engine
            .world_mut()
            .attach(e, Component::Position(Position { x: 1000.0, y: 1000.0 }))
            .unwrap();
        engine.set_focus_points(vec![(0.0, 0.0)]);

        engine.tick().unwrap();
        assert_eq!(engine.lod().tier_for(e), crate::lod::LodTier::Abstract);
    }

    #[test]
    fn same_seed_and_registration_produce_identical_event_logs() {
        fn run_once(seed: u64) -> Vec<chronicle_events::EventId> {
            let mut registry = SystemRegistry::new();
            registry.register(Box::new(ProbeSystem));
            let mut engine = engine_with(registry, seed);
            engine.run(20).unwrap();
            engine.bus().log().all().iter().map(|e| e.id).collect()
        }

        assert_eq!(run_once(123), run_once(123));
    }
}
