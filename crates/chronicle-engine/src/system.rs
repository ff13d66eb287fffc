//! The domain-system contract: the interface every domain system implements
//! so the engine can drive it through the tick pipeline.

use rand_pcg::Pcg32;

use chronicle_events::EventBus;

use crate::clock::Clock;
use crate::frequency::Frequency;
use crate::phase::Phase;
use crate::world_access::WorldAccess;

/// A domain system's failure during `execute`. Carried as an arbitrary
/// error cause so domain crates can report whatever context they have;
/// the engine contains it (logs, skips the rest of that system's work for
/// the tick, continues to the next system) rather than propagating it.
pub type SystemError = anyhow::Error;

/// One domain system in the registry.
///
/// Implementors must not assume execution order beyond their declared
/// [`Phase`], and must be idempotent for a given tick: running the same
/// system twice against the same pre-state (with the same RNG stream)
/// must produce the same post-state and the same emitted events.
pub trait System {
    /// A stable name, used for diagnostics and RNG stream derivation.
    fn name(&self) -> &str;

    /// The pipeline phase this system's work belongs to.
    fn phase(&self) -> Phase;

    /// How often this system is offered a chance to run.
    fn frequency(&self) -> Frequency;

    /// Called once, the first time this system is due to run. Systems
    /// commonly use this to subscribe to bus categories, though subscribing
    /// lazily on first `execute` instead is equally valid -- the engine
    /// makes the bus available at both points.
    #[allow(unused_variables)]
    fn initialize(&mut self, world: &mut WorldAccess, clock: &Clock, bus: &mut EventBus) {}

    /// Run this system's work for the current tick.
    fn execute(
        &mut self,
        world: &mut WorldAccess,
        clock: &Clock,
        bus: &mut EventBus,
        rng: &mut Pcg32,
    ) -> Result<(), SystemError>;
}
