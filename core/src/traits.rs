//! Storage trait the presentation layer is written against

use crate::errors::StoreError;
use crate::types::{Event, IngestLogEntry, StoreStats, User};
use async_trait::async_trait;

/// Backend holding users, events and the ECG ingest log.
///
/// Keyed puts are last-write-wins. Listings come back in insertion order; an
/// overwritten record keeps the position of its first insert.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert or overwrite a user, returning the stored record
    async fn put_user(&self, user: User) -> Result<User, StoreError>;

    /// Get a user by id
    async fn get_user(&self, id: &str) -> Result<Option<User>, StoreError>;

    /// All users in insertion order
    async fn list_users(&self) -> Result<Vec<User>, StoreError>;

    /// Append an entry to the ingest log
    async fn append_ingest(&self, entry: IngestLogEntry) -> Result<(), StoreError>;

    /// The full ingest log, oldest first
    async fn list_ingest_logs(&self) -> Result<Vec<IngestLogEntry>, StoreError>;

    /// Insert or overwrite an event, returning the stored record
    async fn put_event(&self, event: Event) -> Result<Event, StoreError>;

    /// All events in insertion order
    async fn list_events(&self) -> Result<Vec<Event>, StoreError>;

    /// Events whose `user_id` matches exactly
    async fn events_for_user(&self, user_id: &str) -> Result<Vec<Event>, StoreError> {
        let events = self.list_events().await?;
        Ok(events.into_iter().filter(|e| e.user_id == user_id).collect())
    }

    /// Current record counts
    async fn stats(&self) -> Result<StoreStats, StoreError>;

    /// Test that the backend is reachable
    async fn health_check(&self) -> Result<(), StoreError>;
}
