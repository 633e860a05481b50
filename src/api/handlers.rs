//! API Handlers
//!
//! HTTP request handlers for the diary and activity registration endpoints,
//! plus health and cache statistics.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::config::{Config, DEFAULT_INTERNET_ARCHIVE_URL};
use crate::error::{ApiError, Result};
use crate::models::{
    AddBookActivityRegistrationBody, AddGameActivityRegistrationBody, BookActivityRegistration,
    BookMetadataResponse, BookSearchQuery, BookSearchResponse, DateRangeQuery, DiaryEntry,
    GameActivityRegistration, HealthResponse, SaveDiaryEntryBody, StatsResponse,
    UpdateDiaryEntryBody, UserQuery,
};
use crate::services::{
    ActivityRegistrationService, AppCache, DiaryEntryService, InternetArchiveClient,
    InternetArchiveService,
};
use crate::storage::MemoryStorage;

/// Application state shared across all handlers.
///
/// Every service holds a clone of `cache`, so the handle kept here observes
/// the same entries and statistics.
#[derive(Debug, Clone)]
pub struct AppState {
    pub cache: AppCache,
    pub diary: DiaryEntryService,
    pub activity: ActivityRegistrationService,
    pub archive: InternetArchiveService,
}

impl AppState {
    /// Wires the storage services to `storage` and the archive service to
    /// `archive`, all sharing `cache`.
    pub fn new(
        storage: Arc<MemoryStorage>,
        cache: AppCache,
        archive: InternetArchiveClient,
    ) -> Self {
        Self {
            diary: DiaryEntryService::new(Arc::clone(&storage), cache.clone()),
            activity: ActivityRegistrationService::new(storage, cache.clone()),
            archive: InternetArchiveService::new(archive, cache.clone()),
            cache,
        }
    }

    /// Creates state over empty storage and a cache with the configured TTL.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(MemoryStorage::new()),
            AppCache::new(config.cache_expiration),
            InternetArchiveClient::new(config.internet_archive_url.as_str()),
        )
    }

    /// Creates state with the given TTL against the public Internet Archive.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self::new(
            Arc::new(MemoryStorage::new()),
            AppCache::new(ttl),
            InternetArchiveClient::new(DEFAULT_INTERNET_ARCHIVE_URL),
        )
    }
}

fn validated(message: Option<String>) -> Result<()> {
    match message {
        Some(message) => Err(ApiError::InvalidRequest(message)),
        None => Ok(()),
    }
}

fn interval(query: &DateRangeQuery) -> Result<Option<(i64, i64)>> {
    query.interval().map_err(ApiError::InvalidRequest)
}

// == Diary Entries ==
/// Handler for GET /diaryEntries/user/:id
pub async fn user_diary_entries_handler(
    State(state): State<AppState>,
    Path(user_id): Path<u64>,
    Query(range): Query<DateRangeQuery>,
) -> Result<Json<Vec<DiaryEntry>>> {
    let entries = state.diary.user_entries(user_id, interval(&range)?).await?;
    Ok(Json(entries))
}

/// Handler for GET /diaryEntries/:id
pub async fn get_diary_entry_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<DiaryEntry>> {
    Ok(Json(state.diary.entry(id).await?))
}

/// Handler for POST /diaryEntries?user_id=
pub async fn save_diary_entry_handler(
    State(state): State<AppState>,
    Query(user): Query<UserQuery>,
    Json(body): Json<SaveDiaryEntryBody>,
) -> Result<(StatusCode, Json<DiaryEntry>)> {
    validated(body.validate())?;
    let entry = state.diary.save_entry(body, user.user_id).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// Handler for PUT /diaryEntries/:id
pub async fn update_diary_entry_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(body): Json<UpdateDiaryEntryBody>,
) -> Result<Json<DiaryEntry>> {
    validated(body.validate())?;
    Ok(Json(state.diary.update_entry(id, body).await?))
}

/// Handler for DELETE /diaryEntries/:id
///
/// Responds with the removed entry.
pub async fn delete_diary_entry_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<DiaryEntry>> {
    Ok(Json(state.diary.delete_entry(id).await?))
}

// == Activity Registrations ==
/// Handler for GET /activityRegistrations/books/user/:id
pub async fn user_book_registrations_handler(
    State(state): State<AppState>,
    Path(user_id): Path<u64>,
    Query(range): Query<DateRangeQuery>,
) -> Result<Json<Vec<BookActivityRegistration>>> {
    let books = state
        .activity
        .user_book_registrations(user_id, interval(&range)?)
        .await?;
    Ok(Json(books))
}

/// Handler for POST /activityRegistrations/books?user_id=
pub async fn add_book_registration_handler(
    State(state): State<AppState>,
    Query(user): Query<UserQuery>,
    Json(body): Json<AddBookActivityRegistrationBody>,
) -> Result<(StatusCode, Json<BookActivityRegistration>)> {
    validated(body.validate())?;
    let book = state
        .activity
        .add_book_registration(body, user.user_id)
        .await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// Handler for GET /activityRegistrations/games/user/:id
pub async fn user_game_registrations_handler(
    State(state): State<AppState>,
    Path(user_id): Path<u64>,
    Query(range): Query<DateRangeQuery>,
) -> Result<Json<Vec<GameActivityRegistration>>> {
    let games = state
        .activity
        .user_game_registrations(user_id, interval(&range)?)
        .await?;
    Ok(Json(games))
}

/// Handler for POST /activityRegistrations/games?user_id=
pub async fn add_game_registration_handler(
    State(state): State<AppState>,
    Query(user): Query<UserQuery>,
    Json(body): Json<AddGameActivityRegistrationBody>,
) -> Result<(StatusCode, Json<GameActivityRegistration>)> {
    validated(body.validate())?;
    let game = state
        .activity
        .add_game_registration(body, user.user_id)
        .await?;
    Ok((StatusCode::CREATED, Json(game)))
}

// == Internet Archive ==
/// Handler for GET /internetArchive/books/search
pub async fn search_books_handler(
    State(state): State<AppState>,
    Query(query): Query<BookSearchQuery>,
) -> Result<Json<BookSearchResponse>> {
    validated(query.validate())?;
    Ok(Json(state.archive.search_books(&query).await?))
}

/// Handler for GET /internetArchive/books/:bookId/metadata
pub async fn book_metadata_handler(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
) -> Result<Json<BookMetadataResponse>> {
    Ok(Json(state.archive.book_metadata(&book_id).await?))
}

// == Service Endpoints ==
/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.cache.stats().await))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
