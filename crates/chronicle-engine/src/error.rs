//! Error types for the engine, LoD manager, and save/load plumbing.

use thiserror::Error;

/// Errors the engine layer distinguishes.
///
/// `SystemExecutionFailure` and `CascadeRuleFailure` (the latter owned by
/// `chronicle-events`) are *contained*: logged through the diagnostic
/// channel, and the tick proceeds. `InvariantViolation` and
/// `SerializationFailure` are fatal and propagate to the host.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A domain system raised during `execute`. Logged; that system's
    /// remaining work for the tick is skipped; the engine proceeds to the
    /// next system.
    #[error("system {system:?} failed during execute")]
    SystemExecutionFailure {
        system: String,
        #[source]
        source: anyhow::Error,
    },

    /// A component or event failed to serialize or deserialize at a
    /// save/load boundary.
    #[error("serialization failed: {0}")]
    SerializationFailure(String),

    /// The host-provided storage backend reported a failure.
    #[error("storage backend error: {0}")]
    Storage(String),

    /// An internal consistency check failed (e.g. event log indexes out of
    /// sync with the primary sequence). Fatal: ends the current tick.
    #[error("internal invariant violated: {0}")]
    InvariantViolation(String),
}

/// One contained failure, surfaced to the host via the tick delta rather
/// than aborting the tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub tick: u64,
    pub source: String,
    pub message: String,
}
