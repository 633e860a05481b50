//! Analock - tracker backend with a TTL resource cache
//!
//! Diary entries and activity registrations served over HTTP, plus cached
//! Internet Archive book search and metadata lookups. Reads are cached per
//! resource and key, user listings are invalidated per user on writes, and
//! entries are expired by a background sweeper.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;
pub mod tasks;

pub use api::AppState;
pub use cache::ResourceCache;
pub use config::Config;
pub use tasks::{ExpirySweeper, SweeperHandle};
