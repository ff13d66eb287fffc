//! Whole-world serialization for save/load.

use serde::{Deserialize, Serialize};

use crate::world::World;

/// A complete, point-in-time capture of a [`World`], suitable for writing to
/// a save file via any [`StorageBackend`](crate::World) the host provides.
///
/// `World` itself derives `Serialize`/`Deserialize`; this wrapper exists so
/// callers have a single stable type to hand to a host storage backend
/// without reaching into ECS internals.
#[derive(Debug, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub world: World,
}

impl WorldSnapshot {
    pub fn capture(world: &World) -> Self
    where
        World: Clone,
    {
        WorldSnapshot {
            world: world.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
