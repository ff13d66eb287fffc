//! The eight system-bearing pipeline slots of the 13-phase tick, and the
//! fourteen-member execution-order rank a system actually declares.
//!
//! spec.md §4.8 enumerates fourteen possible execution-order ranks
//! (Environment, Economy, Politics, Social, CharacterAI, Magic, Religion,
//! Military, Population, SettlementLifecycle, Exploration, Culture,
//! Ecology, OralTradition) but §4.7's pipeline table only reserves eight
//! system-bearing slots (phases 2-9). §9 flags the rank-to-phase mapping
//! as undocumented in the source. This module resolves it: a system
//! declares one of the fourteen [`Phase`] ranks, and [`Phase::bucket`]
//! maps it onto the [`PipelineBucket`] slot it actually runs in. Ranks
//! sharing a bucket run in declaration order, exactly like two systems
//! sharing a rank already do.
//!
//! The six extra ranks are grouped with their nearest pipeline slot by
//! subject matter rather than given slots of their own, since the
//! pipeline table is fixed at eight slots: Ecology joins Environment
//! (both describe the natural-world substrate); SettlementLifecycle
//! joins Politics (settlement founding/growth/decline is a faction-level
//! concern); Population and Culture join Social (demographic and
//! cultural-diffusion state live at the same social layer); Exploration
//! joins CharacterAI (exploration is driven by individual decisions);
//! OralTradition joins Religion (oral tradition propagates belief the
//! same way religious institutions do).

use serde::{Deserialize, Serialize};

/// A system's declared execution-order rank (spec.md §4.8).
///
/// Variants are declared in final pipeline order, grouped by the
/// [`PipelineBucket`] they map to, so deriving `Ord` gives the correct
/// run order directly: the registry's stable sort by `Phase` groups
/// same-bucket ranks together in bucket order, then in declaration order
/// within a bucket, matching `Phase::ALL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Phase {
    Environment,
    Ecology,
    Economy,
    Politics,
    SettlementLifecycle,
    Social,
    Population,
    Culture,
    CharacterAI,
    Exploration,
    Magic,
    Religion,
    OralTradition,
    Military,
}

impl Phase {
    /// All fourteen ranks, in final pipeline order.
    pub const ALL: &'static [Phase] = &[
        Phase::Environment,
        Phase::Ecology,
        Phase::Economy,
        Phase::Politics,
        Phase::SettlementLifecycle,
        Phase::Social,
        Phase::Population,
        Phase::Culture,
        Phase::CharacterAI,
        Phase::Exploration,
        Phase::Magic,
        Phase::Religion,
        Phase::OralTradition,
        Phase::Military,
    ];

    /// The pipeline slot (phases 2-9) this rank's systems actually run in.
    pub fn bucket(self) -> PipelineBucket {
        match self {
            Phase::Environment | Phase::Ecology => PipelineBucket::Environment,
            Phase::Economy => PipelineBucket::Economy,
            Phase::Politics | Phase::SettlementLifecycle => PipelineBucket::Politics,
            Phase::Social | Phase::Population | Phase::Culture => PipelineBucket::Social,
            Phase::CharacterAI | Phase::Exploration => PipelineBucket::CharacterAI,
            Phase::Magic => PipelineBucket::Magic,
            Phase::Religion | Phase::OralTradition => PipelineBucket::Religion,
            Phase::Military => PipelineBucket::Military,
        }
    }
}

/// The eight system-bearing slots of the 13-phase pipeline (phases 2-9).
/// The engine iterates `PipelineBucket::ALL` once per tick; the other five
/// phases (Time, EventResolution, Narrative, Cleanup, Notification) are
/// engine-owned and have no bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PipelineBucket {
    Environment,
    Economy,
    Politics,
    Social,
    CharacterAI,
    Magic,
    Religion,
    Military,
}

impl PipelineBucket {
    pub const ALL: &'static [PipelineBucket] = &[
        PipelineBucket::Environment,
        PipelineBucket::Economy,
        PipelineBucket::Politics,
        PipelineBucket::Social,
        PipelineBucket::CharacterAI,
        PipelineBucket::Magic,
        PipelineBucket::Religion,
        PipelineBucket::Military,
    ];
}
