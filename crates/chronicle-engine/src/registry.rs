//! The System Registry: holds every domain system, stably sorted by
//! declared execution order.

use crate::phase::{Phase, PipelineBucket};
use crate::system::System;

/// A registered system plus the bookkeeping the engine needs to drive it:
/// whether `initialize` has run yet.
pub(crate) struct RegistryEntry {
    pub(crate) system: Box<dyn System>,
    pub(crate) initialized: bool,
}

/// Owns every domain system for a [`World`](chronicle_ecs::World)'s
/// lifetime. The [`Engine`](crate::engine::Engine) borrows them in turn,
/// one phase at a time.
#[derive(Default)]
pub struct SystemRegistry {
    entries: Vec<RegistryEntry>,
}

impl SystemRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `system`, then stable-sort the registry by declared execution
    /// order (`Phase`). Systems sharing a phase keep their relative
    /// registration order -- `Vec::sort_by_key` is a stable sort, so a
    /// system appended last among same-phase peers runs last among them.
    pub fn register(&mut self, system: Box<dyn System>) {
        self.entries.push(RegistryEntry {
            system,
            initialized: false,
        });
        self.entries.sort_by_key(|entry| entry.system.phase());
    }

    /// The number of registered systems.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names of every registered system, in execution order.
    pub fn system_names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.system.name()).collect()
    }

    pub(crate) fn entries_for_bucket_mut(
        &mut self,
        bucket: PipelineBucket,
    ) -> impl Iterator<Item = &mut RegistryEntry> {
        self.entries
            .iter_mut()
            .filter(move |entry| entry.system.phase().bucket() == bucket)
    }
}
