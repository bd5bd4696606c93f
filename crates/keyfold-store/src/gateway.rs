//! The persistence seam: abstract get/set of named blobs.
//!
//! The store never assumes a backing medium. Each top-level collection
//! is written as a full JSON snapshot under its own key after every
//! mutation (write-through). Snapshot records are typed and validated
//! on load; unknown fields are tolerated so older cores can read
//! snapshots written by newer ones.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use keyfold_types::{KeyfoldError, Network, NetworkId, Profile, ProfileId, Result};
use serde::{Deserialize, Serialize};

/// Key of the profiles snapshot.
pub const STORAGE_PROFILES: &str = "profiles";

/// Key of the networks snapshot.
pub const STORAGE_NETWORKS: &str = "networks";

// ---------------------------------------------------------------------------
// PersistenceGateway
// ---------------------------------------------------------------------------

/// Abstract asynchronous blob storage consumed by the store.
///
/// Implementations are provided by the embedding application (device
/// storage, files, a test double). Failures surface as
/// [`KeyfoldError::PersistenceError`]; the store never retries.
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// Reads the blob stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Stores `blob` under `key`, replacing any previous value.
    async fn set(&self, key: &str, blob: Vec<u8>) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Snapshot records
// ---------------------------------------------------------------------------

/// Persisted form of the profiles collection.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ProfilesSnapshot {
    /// All profiles keyed by their generated identifier.
    #[serde(default)]
    pub profiles: HashMap<ProfileId, Profile>,
}

/// Persisted form of the networks collection.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NetworksSnapshot {
    /// All networks keyed by their generated identifier.
    #[serde(default)]
    pub networks: HashMap<NetworkId, Network>,
}

/// Serializes a snapshot record for the gateway.
pub(crate) fn encode_snapshot<T: Serialize>(snapshot: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(snapshot).map_err(|e| KeyfoldError::PersistenceError {
        reason: format!("failed to encode snapshot: {e}"),
    })
}

/// Deserializes a snapshot record read from the gateway.
pub(crate) fn decode_snapshot<T: for<'de> Deserialize<'de>>(blob: &[u8]) -> Result<T> {
    serde_json::from_slice(blob).map_err(|e| KeyfoldError::PersistenceError {
        reason: format!("failed to decode snapshot: {e}"),
    })
}

// ---------------------------------------------------------------------------
// MemoryGateway
// ---------------------------------------------------------------------------

/// In-process gateway backed by a `HashMap`.
///
/// Used by the test suites and by embedders that keep everything in
/// memory (previews, dry runs).
#[derive(Default)]
pub struct MemoryGateway {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryGateway {
    /// Creates an empty gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a gateway pre-seeded with `blobs`.
    pub fn with_blobs(blobs: HashMap<String, Vec<u8>>) -> Self {
        Self {
            blobs: Mutex::new(blobs),
        }
    }
}

#[async_trait]
impl PersistenceGateway for MemoryGateway {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let blobs = self.blobs.lock().map_err(|_| KeyfoldError::PersistenceError {
            reason: "memory gateway lock poisoned".into(),
        })?;
        Ok(blobs.get(key).cloned())
    }

    async fn set(&self, key: &str, blob: Vec<u8>) -> Result<()> {
        let mut blobs = self.blobs.lock().map_err(|_| KeyfoldError::PersistenceError {
            reason: "memory gateway lock poisoned".into(),
        })?;
        blobs.insert(key.to_string(), blob);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
