//! Events: the immutable unit of history, and the consequence potentials
//! that let the cascade engine derive further events from them.

use std::collections::HashMap;
use std::fmt;

use chronicle_ecs::EntityId;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// EventId
// ---------------------------------------------------------------------------

/// A monotonically increasing, never-recycled event identifier.
///
/// Cause ids are always lower than the id of the event that names them as a
/// cause, which is what keeps the cascade DAG acyclic by construction.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EventId(u64);

impl EventId {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn to_raw(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventId({})", self.0)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out strictly increasing [`EventId`]s.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventIdAllocator {
    next: u64,
}

impl EventIdAllocator {
    pub fn new() -> Self {
        Self { next: 0 }
    }

    pub fn allocate(&mut self) -> EventId {
        let id = EventId(self.next);
        self.next += 1;
        id
    }
}

// ---------------------------------------------------------------------------
// EventCategory
// ---------------------------------------------------------------------------

/// The closed set of event categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventCategory {
    Political,
    Military,
    Economic,
    Social,
    Religious,
    Cultural,
    Personal,
    Environmental,
    Disaster,
    Magical,
    Exploratory,
}

impl EventCategory {
    pub const ALL: &'static [EventCategory] = &[
        EventCategory::Political,
        EventCategory::Military,
        EventCategory::Economic,
        EventCategory::Social,
        EventCategory::Religious,
        EventCategory::Cultural,
        EventCategory::Personal,
        EventCategory::Environmental,
        EventCategory::Disaster,
        EventCategory::Magical,
        EventCategory::Exploratory,
    ];
}

// ---------------------------------------------------------------------------
// DataValue: the scalar payload carried in an event's free-form data map
// ---------------------------------------------------------------------------

/// A scalar value in an event's free-form data map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataValue {
    Text(String),
    Number(f64),
    Integer(i64),
    Flag(bool),
}

impl From<&str> for DataValue {
    fn from(s: &str) -> Self {
        DataValue::Text(s.to_owned())
    }
}

impl From<String> for DataValue {
    fn from(s: String) -> Self {
        DataValue::Text(s)
    }
}

impl From<f64> for DataValue {
    fn from(n: f64) -> Self {
        DataValue::Number(n)
    }
}

impl From<i64> for DataValue {
    fn from(n: i64) -> Self {
        DataValue::Integer(n)
    }
}

impl From<bool> for DataValue {
    fn from(b: bool) -> Self {
        DataValue::Flag(b)
    }
}

pub type EventData = HashMap<String, DataValue>;

// ---------------------------------------------------------------------------
// RuleHandle & ConsequencePotential
// ---------------------------------------------------------------------------

/// A named reference to a consequence rule registered with the cascade
/// engine. Kept as a plain name rather than a function pointer so that
/// [`Event`] stays a pure, serializable data record — the rule lookup
/// happens in [`crate::cascade::RuleRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleHandle(pub String);

impl RuleHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl fmt::Display for RuleHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A consequence a source event may, probabilistically, derive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsequencePotential {
    pub rule: RuleHandle,
    pub base_probability: f32,
    pub consequence_category: EventCategory,
    pub cross_domain: bool,
}

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// An immutable historical record. Created by a system's emit or by the
/// cascade engine; never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub category: EventCategory,
    pub subtype: String,
    pub tick: u64,
    pub participants: Vec<EntityId>,
    pub causes: Vec<EventId>,
    pub consequence_potentials: Vec<ConsequencePotential>,
    pub data: EventData,
    pub significance: u8,
}

impl Event {
    /// Clamp an arbitrary score into the valid [0, 100] significance range.
    pub fn clamp_significance(score: u8) -> u8 {
        score.min(100)
    }

    /// Whether this event bypasses LoD filtering regardless of participant
    /// tier (the significance-override predicate, threshold 85).
    pub fn overrides_lod(&self) -> bool {
        self.significance >= 85
    }
}

/// An unstamped event payload, as produced by a system or a cascade rule
/// handle. The bus/cascade engine assigns the final id, tick, and cause
/// linkage when it is actually emitted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventDraft {
    pub category: Option<EventCategory>,
    pub subtype: String,
    pub participants: Vec<EntityId>,
    pub causes: Vec<EventId>,
    pub consequence_potentials: Vec<ConsequencePotential>,
    pub data: EventData,
    pub significance: u8,
}

impl EventDraft {
    pub fn new(category: EventCategory, subtype: impl Into<String>) -> Self {
        Self {
            category: Some(category),
            subtype: subtype.into(),
            ..Default::default()
        }
    }

    pub fn with_participants(mut self, participants: Vec<EntityId>) -> Self {
        self.participants = participants;
        self
    }

    pub fn with_significance(mut self, significance: u8) -> Self {
        self.significance = Event::clamp_significance(significance);
        self
    }

    pub fn with_consequence_potentials(mut self, potentials: Vec<ConsequencePotential>) -> Self {
        self.consequence_potentials = potentials;
        self
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<DataValue>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }
}
