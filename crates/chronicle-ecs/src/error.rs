//! Error types for ECS operations.

use thiserror::Error;

use crate::component::ComponentKind;

/// Errors produced by [`World`](crate::world::World) operations.
///
/// `UnknownEntity` is deliberately absent: per the data model, reading
/// components of an entity that does not exist (or never had that kind
/// attached) is tolerated and returns `None`, never an error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EcsError {
    /// Attempted to attach a component whose kind has no registered store.
    #[error("no component store registered for kind {0:?}")]
    MissingStore(ComponentKind),
}
