//! Services Module
//!
//! Application services for diary entries, activity registrations and
//! Internet Archive lookups. Reads go through the shared [`ResourceCache`];
//! writes go to storage and then invalidate the affected user's cached views.

mod activity;
mod diary;
mod internet_archive;

pub use activity::ActivityRegistrationService;
pub use diary::DiaryEntryService;
pub use internet_archive::{InternetArchiveClient, InternetArchiveService};

use crate::cache::{user_date_range_key, user_key, ResourceCache};
use crate::error::ApiError;
use crate::models::{
    BookActivityRegistration, BookMetadataResponse, BookSearchResponse, DiaryEntry,
    GameActivityRegistration,
};

// == Cached Payload ==
/// Value stored in the application cache, one variant per cached resource.
#[derive(Debug, Clone, PartialEq)]
pub enum CachedPayload {
    DiaryEntries(Vec<DiaryEntry>),
    BookRegistrations(Vec<BookActivityRegistration>),
    GameRegistrations(Vec<GameActivityRegistration>),
    BookSearch(BookSearchResponse),
    BookMetadata(BookMetadataResponse),
}

impl CachedPayload {
    fn kind(&self) -> &'static str {
        match self {
            CachedPayload::DiaryEntries(_) => "diary entries",
            CachedPayload::BookRegistrations(_) => "book registrations",
            CachedPayload::GameRegistrations(_) => "game registrations",
            CachedPayload::BookSearch(_) => "a book search",
            CachedPayload::BookMetadata(_) => "book metadata",
        }
    }

    /// Error for a payload found under a resource that stores another shape.
    fn mismatch(&self, resource: &str) -> ApiError {
        ApiError::Internal(format!(
            "cached {} payload holds {}",
            resource,
            self.kind()
        ))
    }
}

/// The cache shared by every service.
pub type AppCache = ResourceCache<CachedPayload>;

/// Cache key of a user listing, with or without a date interval.
fn listing_key(user_id: u64, interval: Option<(i64, i64)>) -> String {
    match interval {
        Some((start, end)) => user_date_range_key(user_id, start, end),
        None => user_key(user_id),
    }
}
