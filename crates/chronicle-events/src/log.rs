//! The append-only Event Log with secondary indexes by category, participant,
//! and significance band.

use std::collections::{BTreeMap, HashMap};

use chronicle_ecs::EntityId;
use serde::{Deserialize, Serialize};

use crate::error::EventsError;
use crate::event::{Event, EventCategory, EventId};

const SIGNIFICANCE_BAND_WIDTH: u8 = 10;

fn band_of(significance: u8) -> u8 {
    significance / SIGNIFICANCE_BAND_WIDTH
}

/// Append-only, indexed store of every event ever recorded in a run.
///
/// Events are never mutated or removed once appended; the secondary
/// indexes below store positions into `events`, never copies, so they
/// cannot drift from the primary sequence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<Event>,
    by_category: HashMap<EventCategory, Vec<usize>>,
    by_participant: HashMap<EntityId, Vec<usize>>,
    by_significance_band: BTreeMap<u8, Vec<usize>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `event`, recording it in every secondary index.
    ///
    /// # Errors
    ///
    /// Returns [`EventsError::UnknownCause`] if any cause id does not
    /// already refer to an event present in the log.
    pub fn append(&mut self, event: Event) -> Result<EventId, EventsError> {
        for cause in &event.causes {
            if self.get(*cause).is_none() {
                return Err(EventsError::UnknownCause(*cause));
            }
        }

        let position = self.events.len();
        let id = event.id;

        self.by_category
            .entry(event.category)
            .or_default()
            .push(position);
        for participant in &event.participants {
            self.by_participant
                .entry(*participant)
                .or_default()
                .push(position);
        }
        self.by_significance_band
            .entry(band_of(event.significance))
            .or_default()
            .push(position);

        self.events.push(event);
        Ok(id)
    }

    /// Borrow the event with `id`, if present.
    pub fn get(&self, id: EventId) -> Option<&Event> {
        // Ids are assigned in strict append order starting at 0, so the raw
        // value doubles as a direct index -- no separate id->position map.
        self.events.get(id.to_raw() as usize)
    }

    /// All events of `category`, in insertion order.
    pub fn by_category(&self, category: EventCategory) -> Vec<&Event> {
        self.by_category
            .get(&category)
            .map(|positions| positions.iter().map(|&i| &self.events[i]).collect())
            .unwrap_or_default()
    }

    /// All events whose participants include `entity`, in insertion order.
    pub fn by_entity(&self, entity: EntityId) -> Vec<&Event> {
        self.by_participant
            .get(&entity)
            .map(|positions| positions.iter().map(|&i| &self.events[i]).collect())
            .unwrap_or_default()
    }

    /// All events with significance >= `threshold`, in insertion order.
    pub fn by_significance_above(&self, threshold: u8) -> Vec<&Event> {
        let mut positions: Vec<usize> = self
            .by_significance_band
            .range(band_of(threshold)..)
            .flat_map(|(_, positions)| positions.iter().copied())
            .filter(|&i| self.events[i].significance >= threshold)
            .collect();
        positions.sort_unstable();
        positions.into_iter().map(|i| &self.events[i]).collect()
    }

    pub fn count(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The full sequence, in insertion order.
    pub fn all(&self) -> &[Event] {
        &self.events
    }
}
