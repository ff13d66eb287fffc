//! Save/load assembly. A save is a self-contained record: world state,
//! clock tick, event log, and metadata. The on-disk byte layout is opaque
//! at the core level; `bincode` is the bijective encoding satisfying
//! "serialize ∘ deserialize = identity".

use chronicle_ecs::WorldSnapshot;
use chronicle_events::Event;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::storage::StorageBackend;

/// Metadata describing a save, independent of the world state it captures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveMetadata {
    pub name: String,
    pub description: String,
    pub world_age_ticks: u64,
    pub seed: u64,
    pub created_at_tick: u64,
}

/// The complete, self-contained record a save file holds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveRecord {
    pub world: WorldSnapshot,
    pub clock_tick: u64,
    pub event_log: Vec<Event>,
    pub metadata: SaveMetadata,
}

/// A conventional auto-save name: `quicksave-<tick>`. Host policy, not core
/// policy -- provided here only so nothing downstream needs to re-invent it.
pub fn autosave_name(tick: u64) -> String {
    format!("quicksave-{tick}")
}

/// Encode a [`SaveRecord`] to its opaque byte layout.
pub fn encode(record: &SaveRecord) -> Result<Vec<u8>, EngineError> {
    bincode::serde::encode_to_vec(record, bincode::config::standard())
        .map_err(|e| EngineError::SerializationFailure(e.to_string()))
}

/// Decode a [`SaveRecord`] from bytes previously produced by [`encode`].
pub fn decode(bytes: &[u8]) -> Result<SaveRecord, EngineError> {
    bincode::serde::decode_from_slice(bytes, bincode::config::standard())
        .map(|(record, _len)| record)
        .map_err(|e| EngineError::SerializationFailure(e.to_string()))
}

/// Encode and write `record` to `path` via the host's storage backend.
pub fn save_to(
    backend: &mut dyn StorageBackend,
    path: &str,
    record: &SaveRecord,
) -> Result<(), EngineError> {
    let bytes = encode(record)?;
    backend.write_file(path, &bytes)
}

/// Read and decode a [`SaveRecord`] from `path` via the host's storage
/// backend.
pub fn load_from(backend: &dyn StorageBackend, path: &str) -> Result<SaveRecord, EngineError> {
    let bytes = backend.read_file(path)?;
    decode(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStorage;
    use chronicle_ecs::World;

    fn sample_record() -> SaveRecord {
        SaveRecord {
            world: WorldSnapshot::capture(&World::new()),
            clock_tick: 42,
            event_log: vec![],
            metadata: SaveMetadata {
                name: "test save".to_owned(),
                description: "a save made during a test".to_owned(),
                world_age_ticks: 42,
                seed: 7,
                created_at_tick: 42,
            },
        }
    }

    #[test]
    fn encode_then_decode_is_identity() {
        let record = sample_record();
        let bytes = encode(&record).unwrap();
        let decoded = decode(&bytes).unwrap();

        assert_eq!(decoded.clock_tick, record.clock_tick);
        assert_eq!(decoded.metadata, record.metadata);
    }

    #[test]
    fn save_then_load_roundtrips_through_a_storage_backend() {
        let mut storage = InMemoryStorage::new();
        let record = sample_record();

        save_to(&mut storage, "saves/quicksave-42.bin", &record).unwrap();
        let loaded = load_from(&storage, "saves/quicksave-42.bin").unwrap();

        assert_eq!(loaded.clock_tick, record.clock_tick);
        assert_eq!(loaded.metadata, record.metadata);
    }

    #[test]
    fn autosave_name_follows_convention() {
        assert_eq!(autosave_name(42), "quicksave-42");
    }

    #[test]
    fn decode_of_garbage_bytes_is_a_contained_serialization_failure() {
        let result = decode(&[0xff, 0x00, 0x01]);
        assert!(matches!(result, Err(EngineError::SerializationFailure(_))));
    }
}
