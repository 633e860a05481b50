//! In-memory storage
//!
//! Tables of diary entries and book/game registrations behind one tokio
//! `RwLock`. Listings are ordered by id.

use std::collections::BTreeMap;

use tokio::sync::RwLock;

use crate::error::{ApiError, Result};
use crate::models::{
    ActivityRegistration, BookActivityRegistration, DiaryEntry, GameActivityRegistration,
};

#[derive(Debug, Default)]
struct Tables {
    next_registration_id: u64,
    next_diary_entry_id: u64,
    next_book_id: u64,
    next_game_id: u64,
    diary_entries: BTreeMap<u64, DiaryEntry>,
    book_registrations: BTreeMap<u64, BookActivityRegistration>,
    game_registrations: BTreeMap<u64, GameActivityRegistration>,
}

impl Tables {
    fn new_registration(&mut self, registration_date: i64, user_id: u64) -> ActivityRegistration {
        self.next_registration_id += 1;
        ActivityRegistration {
            id: self.next_registration_id,
            registration_date,
            user_refer: user_id,
        }
    }
}

/// Returns whether `registration` belongs to `user_id` and, when an interval is
/// given, falls inside it (bounds inclusive).
fn in_scope(
    registration: &ActivityRegistration,
    user_id: u64,
    interval: Option<(i64, i64)>,
) -> bool {
    registration.user_refer == user_id
        && interval.map_or(true, |(start, end)| {
            (start..=end).contains(&registration.registration_date)
        })
}

// == Memory Storage ==
#[derive(Debug, Default)]
pub struct MemoryStorage {
    tables: RwLock<Tables>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    // == Diary Entries ==
    /// Returns the diary entry with the given id.
    pub async fn diary_entry(&self, id: u64) -> Result<DiaryEntry> {
        self.tables
            .read()
            .await
            .diary_entries
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("diary entry {}", id)))
    }

    /// Lists a user's diary entries, optionally restricted to a date interval.
    pub async fn user_diary_entries(
        &self,
        user_id: u64,
        interval: Option<(i64, i64)>,
    ) -> Result<Vec<DiaryEntry>> {
        let tables = self.tables.read().await;
        Ok(tables
            .diary_entries
            .values()
            .filter(|entry| in_scope(&entry.registration, user_id, interval))
            .cloned()
            .collect())
    }

    pub async fn create_diary_entry(
        &self,
        title: String,
        content: String,
        publish_date: i64,
        user_id: u64,
    ) -> Result<DiaryEntry> {
        let mut tables = self.tables.write().await;
        let registration = tables.new_registration(publish_date, user_id);
        tables.next_diary_entry_id += 1;

        let entry = DiaryEntry {
            id: tables.next_diary_entry_id,
            title,
            content,
            registration,
        };
        tables.diary_entries.insert(entry.id, entry.clone());
        Ok(entry)
    }

    /// Replaces the title, content and date of an entry; the owner is kept.
    pub async fn update_diary_entry(
        &self,
        id: u64,
        title: String,
        content: String,
        publish_date: i64,
    ) -> Result<DiaryEntry> {
        let mut tables = self.tables.write().await;
        let entry = tables
            .diary_entries
            .get_mut(&id)
            .ok_or_else(|| ApiError::NotFound(format!("diary entry {}", id)))?;

        entry.title = title;
        entry.content = content;
        entry.registration.registration_date = publish_date;
        Ok(entry.clone())
    }

    /// Removes an entry and returns it.
    pub async fn delete_diary_entry(&self, id: u64) -> Result<DiaryEntry> {
        self.tables
            .write()
            .await
            .diary_entries
            .remove(&id)
            .ok_or_else(|| ApiError::NotFound(format!("diary entry {}", id)))
    }

    // == Book Registrations ==
    pub async fn user_book_registrations(
        &self,
        user_id: u64,
        interval: Option<(i64, i64)>,
    ) -> Result<Vec<BookActivityRegistration>> {
        let tables = self.tables.read().await;
        Ok(tables
            .book_registrations
            .values()
            .filter(|book| in_scope(&book.registration, user_id, interval))
            .cloned()
            .collect())
    }

    pub async fn create_book_registration(
        &self,
        internet_archive_identifier: String,
        registration_date: i64,
        user_id: u64,
    ) -> Result<BookActivityRegistration> {
        let mut tables = self.tables.write().await;
        let registration = tables.new_registration(registration_date, user_id);
        tables.next_book_id += 1;

        let book = BookActivityRegistration {
            id: tables.next_book_id,
            internet_archive_identifier,
            registration,
        };
        tables.book_registrations.insert(book.id, book.clone());
        Ok(book)
    }

    // == Game Registrations ==
    pub async fn user_game_registrations(
        &self,
        user_id: u64,
        interval: Option<(i64, i64)>,
    ) -> Result<Vec<GameActivityRegistration>> {
        let tables = self.tables.read().await;
        Ok(tables
            .game_registrations
            .values()
            .filter(|game| in_scope(&game.registration, user_id, interval))
            .cloned()
            .collect())
    }

    pub async fn create_game_registration(
        &self,
        game_name: String,
        registration_date: i64,
        user_id: u64,
    ) -> Result<GameActivityRegistration> {
        let mut tables = self.tables.write().await;
        let registration = tables.new_registration(registration_date, user_id);
        tables.next_game_id += 1;

        let game = GameActivityRegistration {
            id: tables.next_game_id,
            game_name,
            registration,
        };
        tables.game_registrations.insert(game.id, game.clone());
        Ok(game)
    }
}
