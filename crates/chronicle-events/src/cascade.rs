//! The cascade engine: turns an emitted event into zero or more derived
//! consequence events, with depth-bounded, dampened probabilistic branching.
//!
//! Wiring this to an [`EventBus`] is the caller's job (see
//! `chronicle-engine::engine`): call [`CascadeEngine::install`] so every
//! emitted event, original or derived, is offered to it exactly once.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use rand::Rng;
use rand_pcg::Pcg32;
use tracing::warn;

use crate::bus::EventBus;
use crate::event::{Event, EventDraft, EventId, RuleHandle};

/// A registered consequence rule: given the source event, decide whether to
/// emit a derived event. `Ok(None)` means "no consequence this time" and is
/// not an error; `Err` means the rule handle failed and is contained by the
/// cascade engine (logged, treated as no consequence).
pub type RuleFn = dyn Fn(&Event) -> Result<Option<EventDraft>, String>;

/// Maps [`RuleHandle`] names to their rule implementations.
#[derive(Default)]
pub struct RuleRegistry {
    rules: HashMap<RuleHandle, Box<RuleFn>>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, handle: RuleHandle, rule: Box<RuleFn>) {
        self.rules.insert(handle, rule);
    }

    fn get(&self, handle: &RuleHandle) -> Option<&RuleFn> {
        self.rules.get(handle).map(|b| b.as_ref())
    }
}

/// Tunables for cascade branching.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CascadeConfig {
    pub max_depth: u32,
    pub dampening: f32,
    pub cross_domain_multiplier: f32,
}

impl Default for CascadeConfig {
    fn default() -> Self {
        Self {
            max_depth: 10,
            dampening: 0.3,
            cross_domain_multiplier: 0.5,
        }
    }
}

/// Derives consequence events from each event offered to it.
///
/// Cascade depth is not stored on [`Event`] -- it would leak an
/// implementation detail of branching into the permanent historical record.
/// Instead the engine tracks "the depth the next derived event was created
/// at" in `pending_depth`, set immediately before handing a derived draft to
/// [`EventBus::emit`] and consumed as the very first step of processing that
/// event -- safe because dispatch is synchronous and depth-first, so no
/// other derivation can occur in between.
pub struct CascadeEngine {
    config: CascadeConfig,
    registry: RuleRegistry,
    root_seed: [u8; 32],
    pending_depth: Option<u32>,
}

impl CascadeEngine {
    pub fn new(config: CascadeConfig, registry: RuleRegistry, world_seed: u64) -> Self {
        let root_seed = *blake3::hash(&world_seed.to_le_bytes()).as_bytes();
        Self {
            config,
            registry,
            root_seed,
            pending_depth: None,
        }
    }

    /// Subscribe `engine` to every event on `bus` so it processes originals
    /// and its own derived events alike.
    ///
    /// Cascade-derived events re-enter this same subscriber synchronously
    /// (via the recursive `bus.emit` inside [`process`](Self::process)), so
    /// simply doing `engine.borrow_mut().process(event, bus)` would hold the
    /// `RefCell` borrow across that recursive call and panic with a double
    /// mutable borrow. Instead this swaps the engine out of the cell for the
    /// duration of `process` -- the same take-out/call/put-back dance
    /// [`EventBus::invoke`] uses for its own subscriber list -- so the cell
    /// is never borrowed while a nested `emit` is in flight.
    pub fn install(engine: Rc<RefCell<CascadeEngine>>, bus: &mut EventBus) {
        bus.subscribe_any(Box::new(move |event, bus| {
            let mut taken = engine.replace(CascadeEngine::placeholder());
            taken.process(event, bus);
            engine.replace(taken);
        }));
    }

    /// An inert stand-in swapped into the cell while the real engine is
    /// temporarily taken out by [`install`](Self::install)'s subscriber.
    fn placeholder() -> Self {
        Self {
            config: CascadeConfig::default(),
            registry: RuleRegistry::new(),
            root_seed: [0u8; 32],
            pending_depth: None,
        }
    }

    /// Offer `source` to every declared consequence potential, emitting any
    /// derived events back through `bus`.
    pub fn process(&mut self, source: &Event, bus: &mut EventBus) {
        let depth = self.pending_depth.take().unwrap_or(0);
        if depth >= self.config.max_depth {
            return;
        }

        for potential in source.consequence_potentials.clone() {
            let mut rng = self.seeded_rng(source.id, depth);

            let mut probability =
                potential.base_probability * (1.0 - self.config.dampening).powi(depth as i32);
            if potential.cross_domain || potential.consequence_category != source.category {
                probability *= self.config.cross_domain_multiplier;
            }
            let probability = probability.clamp(0.0, 1.0) as f64;

            if !rng.gen_bool(probability) {
                continue;
            }

            let Some(rule) = self.registry.get(&potential.rule) else {
                continue;
            };

            let draft = match rule(source) {
                Ok(Some(draft)) => draft,
                Ok(None) => continue,
                Err(reason) => {
                    warn!(
                        source = %source.id,
                        rule = %potential.rule,
                        reason = %reason,
                        "cascade rule failed; treating as no consequence"
                    );
                    continue;
                }
            };

            let mut causes = vec![source.id];
            causes.extend(draft.causes);

            let derived = EventDraft {
                category: Some(potential.consequence_category),
                causes,
                ..draft
            };

            self.pending_depth = Some(depth + 1);
            if bus.emit(derived, source.tick).is_err() {
                // UnknownCause can't happen here -- `source.id` is always
                // already in the log by the time its subscribers run.
                self.pending_depth = None;
            }
        }
    }

    /// A per-source-event, per-depth RNG stream, forked deterministically
    /// from the world seed so replays with the same seed and initial state
    /// reproduce the same derived events.
    fn seeded_rng(&self, source: EventId, depth: u32) -> Pcg32 {
        let mut input = Vec::with_capacity(self.root_seed.len() + 12);
        input.extend_from_slice(&self.root_seed);
        input.extend_from_slice(&source.to_raw().to_le_bytes());
        input.extend_from_slice(&depth.to_le_bytes());
        let digest = blake3::hash(&input);
        let bytes = digest.as_bytes();
        let state = u64::from_le_bytes(bytes[0..8].try_into().unwrap());
        let stream = u64::from_le_bytes(bytes[8..16].try_into().unwrap());
        Pcg32::new(state, stream)
    }
}
