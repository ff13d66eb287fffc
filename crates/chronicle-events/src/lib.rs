//! The event and cascade subsystem: an immutable append-only log, a
//! category-dispatched pub/sub bus, and a cascade engine that derives
//! consequence events from prior events with depth-bounded, dampened
//! probabilistic branching.

mod bus;
mod cascade;
mod error;
mod event;
mod log;

pub use bus::{EventBus, Subscriber, SubscriptionHandle};
pub use cascade::{CascadeConfig, CascadeEngine, RuleFn, RuleRegistry};
pub use error::EventsError;
pub use event::{
    ConsequencePotential, DataValue, Event, EventCategory, EventData, EventDraft, EventId,
    EventIdAllocator, RuleHandle,
};
pub use log::EventLog;

pub mod prelude {
    pub use crate::{
        CascadeConfig, CascadeEngine, ConsequencePotential, DataValue, Event, EventBus,
        EventCategory, EventDraft, EventId, EventLog, EventsError, RuleHandle, RuleRegistry,
        Subscriber, SubscriptionHandle,
    };
}
