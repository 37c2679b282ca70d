//! HTTP request handlers for the Zayra API

pub mod events;
pub mod health;
pub mod ingest;
pub mod users;
