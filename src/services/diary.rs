//! Diary entry service

use std::sync::Arc;

use tracing::debug;

use super::{listing_key, AppCache, CachedPayload};
use crate::cache::keys::DIARY_ENTRIES_RESOURCE;
use crate::error::Result;
use crate::models::{DiaryEntry, SaveDiaryEntryBody, UpdateDiaryEntryBody};
use crate::storage::MemoryStorage;

#[derive(Debug, Clone)]
pub struct DiaryEntryService {
    storage: Arc<MemoryStorage>,
    cache: AppCache,
}

impl DiaryEntryService {
    pub fn new(storage: Arc<MemoryStorage>, cache: AppCache) -> Self {
        Self { storage, cache }
    }

    /// Returns one entry, read straight from storage.
    pub async fn entry(&self, id: u64) -> Result<DiaryEntry> {
        self.storage.diary_entry(id).await
    }

    // == User Entries ==
    /// Lists a user's entries, optionally within an inclusive date interval.
    ///
    /// Each listing is cached under its own key: `user-<id>` for the full list
    /// and `user-<id>-start<s>-end<e>` for an interval.
    pub async fn user_entries(
        &self,
        user_id: u64,
        interval: Option<(i64, i64)>,
    ) -> Result<Vec<DiaryEntry>> {
        let storage = &self.storage;
        let payload = self
            .cache
            .fetch_or_compute(
                move || async move {
                    storage
                        .user_diary_entries(user_id, interval)
                        .await
                        .map(CachedPayload::DiaryEntries)
                },
                DIARY_ENTRIES_RESOURCE,
                &listing_key(user_id, interval),
            )
            .await?;

        match payload {
            CachedPayload::DiaryEntries(entries) => Ok(entries),
            other => Err(other.mismatch(DIARY_ENTRIES_RESOURCE)),
        }
    }

    // == Writes ==
    pub async fn save_entry(&self, body: SaveDiaryEntryBody, user_id: u64) -> Result<DiaryEntry> {
        let entry = self
            .storage
            .create_diary_entry(body.title, body.content, body.publish_date, user_id)
            .await?;
        self.invalidate(user_id).await?;
        Ok(entry)
    }

    pub async fn update_entry(&self, id: u64, body: UpdateDiaryEntryBody) -> Result<DiaryEntry> {
        let entry = self
            .storage
            .update_diary_entry(id, body.title, body.content, body.publish_date)
            .await?;
        self.invalidate(entry.registration.user_refer).await?;
        Ok(entry)
    }

    pub async fn delete_entry(&self, id: u64) -> Result<DiaryEntry> {
        let entry = self.storage.delete_diary_entry(id).await?;
        self.invalidate(entry.registration.user_refer).await?;
        Ok(entry)
    }

    /// Drops the user's cached list and every cached interval of it.
    async fn invalidate(&self, user_id: u64) -> Result<()> {
        let removed = self
            .cache
            .evict_user_resource(DIARY_ENTRIES_RESOURCE, user_id)
            .await?;
        debug!(
            "Invalidated {} cached diary listings for user {}",
            removed, user_id
        );
        Ok(())
    }
}
