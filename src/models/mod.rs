//! Domain entities and request/response models for the tracker API
//!
//! This module defines the stored entities and the DTOs used for
//! serializing/deserializing HTTP request and response bodies.

pub mod archive;
pub mod domain;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use archive::{
    ArchiveBook, ArchiveFile, ArchiveMetadata, BookMetadataResponse, BookSearchPage,
    BookSearchQuery, BookSearchResponse,
};
pub use domain::{
    ActivityRegistration, BookActivityRegistration, DiaryEntry, GameActivityRegistration,
};
pub use requests::{
    AddBookActivityRegistrationBody, AddGameActivityRegistrationBody, DateRangeQuery,
    SaveDiaryEntryBody, UpdateDiaryEntryBody, UserQuery,
};
pub use responses::{HealthResponse, StatsResponse};
