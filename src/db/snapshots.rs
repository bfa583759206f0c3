//! Snapshot backends: a key-value layer the stores write whole-state JSON
//! documents through.

#[cfg(test)]
use std::collections::HashMap;
#[cfg(test)]
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;

/// Key-value persistence for whole-store snapshots, one document per store.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Load the snapshot for a store key, if one has been written.
    async fn load(&self, store: &str) -> Result<Option<String>, AppError>;

    /// Overwrite the snapshot for a store key.
    async fn save(&self, store: &str, state: &str) -> Result<(), AppError>;
}

/// Production backend: one row per store in the `snapshots` table.
pub struct SqliteSnapshots {
    pool: SqlitePool,
}

impl SqliteSnapshots {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SnapshotStore for SqliteSnapshots {
    async fn load(&self, store: &str) -> Result<Option<String>, AppError> {
        let row = sqlx::query("SELECT state FROM snapshots WHERE store = ?")
            .bind(store)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.get("state")))
    }

    async fn save(&self, store: &str, state: &str) -> Result<(), AppError> {
        let now = Utc::now().to_rfc3339();
        sqlx::query(
            "INSERT INTO snapshots (store, state, saved_at) VALUES (?, ?, ?)
             ON CONFLICT(store) DO UPDATE SET state = excluded.state, saved_at = excluded.saved_at",
        )
        .bind(store)
        .bind(state)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// In-memory backend for tests. Records the sequence of keys written so
/// tests can assert exactly which branches persisted.
#[cfg(test)]
#[derive(Default)]
pub struct MemorySnapshots {
    inner: Mutex<MemoryInner>,
}

#[cfg(test)]
#[derive(Default)]
struct MemoryInner {
    states: HashMap<String, String>,
    writes: Vec<String>,
}

#[cfg(test)]
impl MemorySnapshots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot currently held for a store key.
    pub fn get(&self, store: &str) -> Option<String> {
        self.inner.lock().unwrap().states.get(store).cloned()
    }

    /// Total number of writes across all keys.
    pub fn write_count(&self) -> usize {
        self.inner.lock().unwrap().writes.len()
    }

    /// Keys in write order.
    pub fn writes(&self) -> Vec<String> {
        self.inner.lock().unwrap().writes.clone()
    }
}

#[cfg(test)]
#[async_trait]
impl SnapshotStore for MemorySnapshots {
    async fn load(&self, store: &str) -> Result<Option<String>, AppError> {
        Ok(self.inner.lock().unwrap().states.get(store).cloned())
    }

    async fn save(&self, store: &str, state: &str) -> Result<(), AppError> {
        let mut inner = self.inner.lock().unwrap();
        inner.states.insert(store.to_string(), state.to_string());
        inner.writes.push(store.to_string());
        Ok(())
    }
}
