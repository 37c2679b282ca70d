//! Core record types for Zayra

use chrono::{NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Sampling rate assumed when an ingest request does not specify one (Hz)
pub const DEFAULT_SAMPLING_RATE: i64 = 250;

/// Severity assigned to events recorded without one
pub const DEFAULT_SEVERITY: &str = "normal";

/// Current UTC time as a naive ISO-8601 string, e.g. `2024-03-01T08:15:30.123456`.
pub fn utc_timestamp() -> String {
    isoformat(Utc::now().naive_utc())
}

/// ISO-8601 with microseconds; the fraction is left out when it is zero.
pub fn isoformat(datetime: NaiveDateTime) -> String {
    if datetime.nanosecond() / 1_000 == 0 {
        datetime.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        datetime.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

fn default_sampling_rate() -> i64 {
    DEFAULT_SAMPLING_RATE
}

fn default_severity() -> String {
    DEFAULT_SEVERITY.to_string()
}

/// Accepts a timestamp string or `null`; `null` resolves to the current time.
/// A missing field is handled by `#[serde(default = "utc_timestamp")]`.
fn timestamp_or_now<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(utc_timestamp))
}

/// A registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Caller-chosen identifier, unique within the user store
    pub id: String,
    pub name: String,
    pub email: String,
    /// Serialized as `null` when absent
    #[serde(default)]
    pub age: Option<i64>,
}

impl User {
    /// Create a new user without an age
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            age: None,
        }
    }

    /// Set the age for this user
    pub fn with_age(mut self, age: i64) -> Self {
        self.age = Some(age);
        self
    }
}

/// One batch of ECG samples submitted by a wearable device.
///
/// Only [`EcgBatch::into_log_entry`] metadata survives ingestion; the samples
/// themselves are dropped.
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
pub struct EcgBatch {
    pub user_id: String,
    pub samples: Vec<f64>,
    #[serde(default = "default_sampling_rate")]
    pub sampling_rate: i64,
    #[serde(default = "utc_timestamp", deserialize_with = "timestamp_or_now")]
    pub timestamp: String,
}

impl EcgBatch {
    /// Reduce the batch to its ingest-log metadata, discarding the samples
    pub fn into_log_entry(self) -> IngestLogEntry {
        IngestLogEntry {
            samples_count: self.samples.len(),
            user_id: self.user_id,
            sampling_rate: self.sampling_rate,
            timestamp: self.timestamp,
        }
    }
}

/// Metadata kept for every ingested ECG batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IngestLogEntry {
    pub user_id: String,
    pub samples_count: usize,
    pub sampling_rate: i64,
    pub timestamp: String,
}

/// A discrete cardiac event recorded for a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Event {
    /// Caller-chosen identifier, unique within the event store
    pub id: String,
    /// Not checked against the user store
    pub user_id: String,
    /// e.g. "arrhythmia", "tachycardia"
    pub event_type: String,
    #[serde(default = "default_severity")]
    pub severity: String,
    pub description: String,
    #[serde(default = "utc_timestamp", deserialize_with = "timestamp_or_now")]
    pub timestamp: String,
}

impl Event {
    /// Create a new event with default severity, stamped with the current time
    pub fn new(
        id: impl Into<String>,
        user_id: impl Into<String>,
        event_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            event_type: event_type.into(),
            severity: default_severity(),
            description: description.into(),
            timestamp: utc_timestamp(),
        }
    }

    /// Set the severity for this event
    pub fn with_severity(mut self, severity: impl Into<String>) -> Self {
        self.severity = severity.into();
        self
    }

    /// Set an explicit timestamp for this event
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }
}

/// Record counts across the three stores
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StoreStats {
    pub users: usize,
    pub events: usize,
    pub ingest_logs: usize,
}
