//! Frequency tiers governing how often a system fires.

use serde::{Deserialize, Serialize};

/// How often a [`System`](crate::system::System) is offered a chance to run.
///
/// A tier of period `p` fires on tick `t` when `t % p == 0 && t > 0` —
/// never at tick 0 (see `DESIGN.md`). A Seasonal system, period 90, fires
/// 4 times over a 360-tick run: at 90, 180, 270, 360 — not at tick 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Seasonal,
    Annual,
    Decadal,
}

impl Frequency {
    /// All tiers, from most to least frequent.
    pub const ALL: &'static [Frequency] = &[
        Frequency::Daily,
        Frequency::Weekly,
        Frequency::Monthly,
        Frequency::Seasonal,
        Frequency::Annual,
        Frequency::Decadal,
    ];

    /// The periodicity, in ticks, of this tier.
    pub fn period(self) -> u64 {
        match self {
            Frequency::Daily => 1,
            Frequency::Weekly => 7,
            Frequency::Monthly => 30,
            Frequency::Seasonal => 90,
            Frequency::Annual => 360,
            Frequency::Decadal => 3600,
        }
    }

    /// Whether this tier fires on `tick`.
    pub fn fires(self, tick: u64) -> bool {
        tick > 0 && tick % self.period() == 0
    }
}
