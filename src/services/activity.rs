//! Activity registration service
//!
//! Book and game registrations. Listings are cached per user; a new
//! registration invalidates the owner's cached listings of that kind.

use std::sync::Arc;

use tracing::warn;

use super::{listing_key, AppCache, CachedPayload};
use crate::cache::keys::{BOOK_REGISTRATIONS_RESOURCE, GAME_REGISTRATIONS_RESOURCE};
use crate::error::Result;
use crate::models::{
    AddBookActivityRegistrationBody, AddGameActivityRegistrationBody, BookActivityRegistration,
    GameActivityRegistration,
};
use crate::storage::MemoryStorage;

#[derive(Debug, Clone)]
pub struct ActivityRegistrationService {
    storage: Arc<MemoryStorage>,
    cache: AppCache,
}

impl ActivityRegistrationService {
    pub fn new(storage: Arc<MemoryStorage>, cache: AppCache) -> Self {
        Self { storage, cache }
    }

    // == Books ==
    pub async fn user_book_registrations(
        &self,
        user_id: u64,
        interval: Option<(i64, i64)>,
    ) -> Result<Vec<BookActivityRegistration>> {
        let storage = &self.storage;
        let payload = self
            .cache
            .fetch_or_compute(
                move || async move {
                    storage
                        .user_book_registrations(user_id, interval)
                        .await
                        .map(CachedPayload::BookRegistrations)
                },
                BOOK_REGISTRATIONS_RESOURCE,
                &listing_key(user_id, interval),
            )
            .await?;

        match payload {
            CachedPayload::BookRegistrations(books) => Ok(books),
            other => Err(other.mismatch(BOOK_REGISTRATIONS_RESOURCE)),
        }
    }

    pub async fn add_book_registration(
        &self,
        body: AddBookActivityRegistrationBody,
        user_id: u64,
    ) -> Result<BookActivityRegistration> {
        let book = self
            .storage
            .create_book_registration(body.internet_archive_id, body.registration_date, user_id)
            .await?;
        self.invalidate(BOOK_REGISTRATIONS_RESOURCE, user_id).await;
        Ok(book)
    }

    // == Games ==
    pub async fn user_game_registrations(
        &self,
        user_id: u64,
        interval: Option<(i64, i64)>,
    ) -> Result<Vec<GameActivityRegistration>> {
        let storage = &self.storage;
        let payload = self
            .cache
            .fetch_or_compute(
                move || async move {
                    storage
                        .user_game_registrations(user_id, interval)
                        .await
                        .map(CachedPayload::GameRegistrations)
                },
                GAME_REGISTRATIONS_RESOURCE,
                &listing_key(user_id, interval),
            )
            .await?;

        match payload {
            CachedPayload::GameRegistrations(games) => Ok(games),
            other => Err(other.mismatch(GAME_REGISTRATIONS_RESOURCE)),
        }
    }

    pub async fn add_game_registration(
        &self,
        body: AddGameActivityRegistrationBody,
        user_id: u64,
    ) -> Result<GameActivityRegistration> {
        let game = self
            .storage
            .create_game_registration(body.game_name, body.registration_date, user_id)
            .await?;
        self.invalidate(GAME_REGISTRATIONS_RESOURCE, user_id).await;
        Ok(game)
    }

    /// The registration is already stored, so a failed invalidation is only
    /// logged; stale listings age out with the TTL.
    async fn invalidate(&self, resource: &str, user_id: u64) {
        if let Err(e) = self.cache.evict_user_resource(resource, user_id).await {
            warn!(
                "Failed to invalidate {} listings for user {}: {}",
                resource, user_id, e
            );
        }
    }
}
