//! The simulation [`Clock`]: a monotonic tick counter and its derivation to
//! calendar time (12 months of 30 days, 360 days per year).

use serde::{Deserialize, Serialize};

/// Calendar time derived from a tick count.
///
/// `year = 1 + tick / 360`, `month = 1 + (tick % 360) / 30`,
/// `day = 1 + tick % 30` — years, months, and days are all 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDate {
    pub year: u64,
    pub month: u8,
    pub day: u8,
}

/// Advances a single non-negative tick counter. Never rewinds, never skips.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Clock {
    tick: u64,
}

impl Clock {
    /// A fresh clock at tick 0.
    pub fn new() -> Self {
        Self { tick: 0 }
    }

    /// Reconstruct a clock at a given tick, e.g. after loading a save.
    pub fn restore(tick: u64) -> Self {
        Self { tick }
    }

    /// The current tick.
    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    /// The current tick as structured calendar time.
    pub fn current_time(&self) -> CalendarDate {
        CalendarDate {
            year: 1 + self.tick / 360,
            month: (1 + (self.tick % 360) / 30) as u8,
            day: (1 + self.tick % 30) as u8,
        }
    }

    /// Advance the tick counter by exactly one. Never skips.
    pub fn advance(&mut self) {
        self.tick += 1;
    }

    /// Whole years elapsed since tick 0.
    pub fn elapsed_years(&self) -> u64 {
        self.tick / 360
    }

    /// Whether this clock's tick is strictly before `other`'s.
    pub fn is_before(&self, other: &Clock) -> bool {
        self.tick < other.tick
    }

    /// Whether this clock's tick is at or after `tick`.
    pub fn has_reached(&self, tick: u64) -> bool {
        self.tick >= tick
    }
}
