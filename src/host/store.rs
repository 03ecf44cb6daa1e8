//! Durable storage for committed ledger state
//!
//! The host commits a full [`LedgerSnapshot`] after every successful invocation.
//! A failed commit aborts the invocation, so storage only ever holds states the
//! ledger actually accepted.

use async_trait::async_trait;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;

use crate::ledger::LedgerSnapshot;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("state store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("state could not be encoded or decoded: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[async_trait]
pub trait StateStore: Send + Sync {
    /// Last committed snapshot, or `None` for a ledger that was never committed.
    async fn load(&self) -> StoreResult<Option<LedgerSnapshot>>;

    /// Durably record `snapshot` as the current state.
    async fn commit(&self, snapshot: &LedgerSnapshot) -> StoreResult<()>;
}

/// Keeps committed state in memory only. State is lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    committed: RwLock<Option<LedgerSnapshot>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StateStore for MemoryStore {
    async fn load(&self) -> StoreResult<Option<LedgerSnapshot>> {
        Ok(self.committed.read().await.clone())
    }

    async fn commit(&self, snapshot: &LedgerSnapshot) -> StoreResult<()> {
        *self.committed.write().await = Some(snapshot.clone());
        Ok(())
    }
}

/// Stores committed state as a JSON document.
///
/// Each commit writes a sibling staging file and renames it over the target, so a
/// crash mid-write leaves the previous commit intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn staging_path(&self) -> PathBuf {
        let mut staging = OsString::from(self.path.as_os_str());
        staging.push(".tmp");
        PathBuf::from(staging)
    }
}

#[async_trait]
impl StateStore for FileStore {
    async fn load(&self) -> StoreResult<Option<LedgerSnapshot>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => {
                debug!("Loaded ledger state from {}", self.path.display());
                Ok(Some(serde_json::from_slice(&bytes)?))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn commit(&self, snapshot: &LedgerSnapshot) -> StoreResult<()> {
        let bytes = serde_json::to_vec_pretty(snapshot)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let staging = self.staging_path();
        tokio::fs::write(&staging, bytes).await?;
        tokio::fs::rename(&staging, &self.path).await?;

        debug!("Committed ledger state to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{Ledger, Principal};

    fn sample_snapshot() -> LedgerSnapshot {
        let deployer = Principal::new("ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM").unwrap();
        let mut ledger = Ledger::new(deployer.clone());
        ledger.initialize(&deployer, 1_000_000).unwrap();
        ledger.snapshot()
    }

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.load().await.unwrap(), None);

        let snapshot = sample_snapshot();
        store.commit(&snapshot).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(snapshot));
    }

    #[tokio::test]
    async fn test_file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("ledger.json"));

        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_store_commit_replaces_state() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("state").join("ledger.json"));

        let first = sample_snapshot();
        store.commit(&first).await.unwrap();

        let mut second = first.clone();
        second.token_uri = Some("ipfs://orange".to_string());
        store.commit(&second).await.unwrap();

        assert_eq!(store.load().await.unwrap(), Some(second));
        assert!(!store.staging_path().exists());
    }

    #[tokio::test]
    async fn test_file_store_rejects_corrupt_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        std::fs::write(&path, b"{not json").unwrap();

        let result = FileStore::new(path).load().await;
        assert!(matches!(result, Err(StoreError::Serialization(_))));
    }
}
