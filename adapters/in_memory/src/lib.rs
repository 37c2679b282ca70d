//! In-memory implementation of RecordStore
//!
//! Storage lives for the lifetime of the process. Each of the three stores sits
//! behind its own lock, taken for a single operation at a time.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, info};
use zayra_core::prelude::*;

/// Records keyed by id, listed in first-insert order
#[derive(Debug)]
struct KeyedStore<T> {
    /// Records indexed by id
    records: HashMap<String, T>,
    /// Index: insertion order of ids
    order: Vec<String>,
}

impl<T: Clone> KeyedStore<T> {
    fn new() -> Self {
        Self {
            records: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Returns true when an existing record was overwritten
    fn upsert(&mut self, id: &str, record: T) -> bool {
        let replaced = self.records.insert(id.to_string(), record).is_some();
        if !replaced {
            self.order.push(id.to_string());
        }
        replaced
    }

    fn get(&self, id: &str) -> Option<&T> {
        self.records.get(id)
    }

    fn iter(&self) -> impl Iterator<Item = &T> {
        self.order.iter().filter_map(|id| self.records.get(id))
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}

/// In-memory RecordStore implementation
#[derive(Debug)]
pub struct InMemoryStore {
    users: RwLock<KeyedStore<User>>,
    events: RwLock<KeyedStore<Event>>,
    ingest_logs: RwLock<Vec<IngestLogEntry>>,
}

impl InMemoryStore {
    /// Create a new, empty in-memory store
    pub fn new() -> Self {
        info!("Creating in-memory record store");
        Self {
            users: RwLock::new(KeyedStore::new()),
            events: RwLock::new(KeyedStore::new()),
            ingest_logs: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn put_user(&self, user: User) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.upsert(&user.id, user.clone()) {
            debug!("Overwrote user {}", user.id);
        } else {
            debug!("Stored user {}", user.id);
        }
        Ok(user)
    }

    async fn get_user(&self, id: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.get(id).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().cloned().collect())
    }

    async fn append_ingest(&self, entry: IngestLogEntry) -> Result<(), StoreError> {
        debug!(
            "Logging ingest of {} samples at {} Hz for user {}",
            entry.samples_count, entry.sampling_rate, entry.user_id
        );
        self.ingest_logs.write().await.push(entry);
        Ok(())
    }

    async fn list_ingest_logs(&self) -> Result<Vec<IngestLogEntry>, StoreError> {
        Ok(self.ingest_logs.read().await.clone())
    }

    async fn put_event(&self, event: Event) -> Result<Event, StoreError> {
        let mut events = self.events.write().await;
        if events.upsert(&event.id, event.clone()) {
            debug!("Overwrote event {}", event.id);
        } else {
            debug!("Stored event {} for user {}", event.id, event.user_id);
        }
        Ok(event)
    }

    async fn list_events(&self) -> Result<Vec<Event>, StoreError> {
        let events = self.events.read().await;
        Ok(events.iter().cloned().collect())
    }

    async fn events_for_user(&self, user_id: &str) -> Result<Vec<Event>, StoreError> {
        let events = self.events.read().await;
        Ok(events
            .iter()
            .filter(|event| event.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn stats(&self) -> Result<StoreStats, StoreError> {
        // One lock at a time; the counts are not a consistent snapshot.
        let users = self.users.read().await.len();
        let events = self.events.read().await.len();
        let ingest_logs = self.ingest_logs.read().await.len();
        Ok(StoreStats {
            users,
            events,
            ingest_logs,
        })
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        let stats = self.stats().await?;
        debug!(
            "In-memory store health check: {} users, {} events, {} ingest logs",
            stats.users, stats.events, stats.ingest_logs
        );
        Ok(())
    }
}
