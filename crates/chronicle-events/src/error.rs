//! Error types for the event log, bus, and cascade engine.

use thiserror::Error;

use crate::event::EventId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EventsError {
    /// A consequence rule handle raised instead of returning a draft or
    /// `None`. Contained: logged, treated as "no consequence emitted," the
    /// cascade continues with the remaining potentials.
    #[error("cascade rule {rule:?} failed while deriving from event {source}")]
    CascadeRuleFailure { source: EventId, rule: String },

    /// A cause id referenced by an appended event is not yet present in the
    /// log — violates the append-order invariant.
    #[error("event references unknown cause id {0:?}")]
    UnknownCause(EventId),
}
