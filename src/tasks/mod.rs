//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Expiry sweep: removes cache entries older than the configured TTL

mod sweeper;

pub use sweeper::{ExpirySweeper, SweeperHandle};
