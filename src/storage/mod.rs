//! Storage Module
//!
//! Persistence for diary entries and activity registrations. The services
//! read it through the resource cache and write it directly.

mod memory;

pub use memory::MemoryStorage;
