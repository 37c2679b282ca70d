//! # Zayra Core
//!
//! Record types, the storage trait and error types shared by every crate of
//! the Zayra ECG API.

pub mod errors;
pub mod traits;
pub mod types;

// Re-export commonly used types and traits
pub use errors::{CoreError, PresentationError, StoreError};
pub use traits::RecordStore;
pub use types::{EcgBatch, Event, IngestLogEntry, StoreStats, User};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::errors::*;
    pub use crate::traits::*;
    pub use crate::types::*;
    pub use async_trait::async_trait;
}
