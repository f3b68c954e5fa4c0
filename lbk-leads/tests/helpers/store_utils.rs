//! Store and session test utilities

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use lbk_common::{Error, KeyValueStore, MemoryStore, SqliteStore};
use lbk_leads::services::{DuplicatePolicy, ImportOrchestrator};
use lbk_leads::session::SessionManager;
use lbk_leads::storage::CorpusStore;
use tempfile::TempDir;

/// Create an on-disk SQLite store in a temporary folder
///
/// Returns (TempDir, SqliteStore) - TempDir must be kept alive for duration of test
pub async fn create_test_store() -> Result<(TempDir, SqliteStore)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test_leadbook.db");
    let pool = lbk_common::db::init_database(&db_path).await?;
    Ok((temp_dir, SqliteStore::new(pool)))
}

/// Session over the given store
pub fn session_over(store: Arc<dyn KeyValueStore>, policy: DuplicatePolicy) -> SessionManager {
    SessionManager::new(CorpusStore::new(store), ImportOrchestrator::new(policy))
}

/// Session over a fresh in-memory store (store handle returned for inspection)
pub fn memory_session(policy: DuplicatePolicy) -> (Arc<MemoryStore>, SessionManager) {
    let store = Arc::new(MemoryStore::new());
    let session = session_over(store.clone(), policy);
    (store, session)
}

/// Store whose writes can be switched to fail, simulating a full disk
#[derive(Default)]
pub struct FailingStore {
    inner: MemoryStore,
    fail_writes: AtomicBool,
}

impl FailingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, key: &str) -> lbk_common::Result<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> lbk_common::Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "quota exceeded",
            )));
        }
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> lbk_common::Result<()> {
        self.inner.remove(key).await
    }
}
