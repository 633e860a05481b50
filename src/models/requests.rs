//! Request DTOs for the tracker API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

/// Request body for creating a diary entry (POST /diaryEntries)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveDiaryEntryBody {
    pub title: String,
    pub content: String,
    /// Unix timestamp the entry is published for
    pub publish_date: i64,
}

impl SaveDiaryEntryBody {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        validate_diary_fields(&self.title, &self.content, self.publish_date)
    }
}

/// Request body for updating a diary entry (PUT /diaryEntries/:id)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDiaryEntryBody {
    pub title: String,
    pub content: String,
    pub publish_date: i64,
}

impl UpdateDiaryEntryBody {
    /// Validates the request data
    pub fn validate(&self) -> Option<String> {
        validate_diary_fields(&self.title, &self.content, self.publish_date)
    }
}

fn validate_diary_fields(title: &str, content: &str, publish_date: i64) -> Option<String> {
    if title.trim().is_empty() {
        return Some("title is required".to_string());
    }
    if content.trim().is_empty() {
        return Some("content is required".to_string());
    }
    if publish_date == 0 {
        return Some("publishDate is required".to_string());
    }
    None
}

/// Request body for registering a read book (POST /activityRegistrations/books)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddBookActivityRegistrationBody {
    pub internet_archive_id: String,
    pub registration_date: i64,
}

impl AddBookActivityRegistrationBody {
    /// Validates the request data
    pub fn validate(&self) -> Option<String> {
        if self.internet_archive_id.trim().is_empty() {
            return Some("internetArchiveId is required".to_string());
        }
        if self.registration_date == 0 {
            return Some("registrationDate is required".to_string());
        }
        None
    }
}

/// Request body for registering a played game (POST /activityRegistrations/games)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddGameActivityRegistrationBody {
    pub game_name: String,
    pub registration_date: i64,
}

impl AddGameActivityRegistrationBody {
    /// Validates the request data
    pub fn validate(&self) -> Option<String> {
        if self.game_name.trim().is_empty() {
            return Some("gameName is required".to_string());
        }
        if self.registration_date == 0 {
            return Some("registrationDate is required".to_string());
        }
        None
    }
}

/// Optional `start_date`/`end_date` query filter on user listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DateRangeQuery {
    #[serde(default)]
    pub start_date: Option<i64>,
    #[serde(default)]
    pub end_date: Option<i64>,
}

impl DateRangeQuery {
    /// Returns the inclusive `(start, end)` interval when both bounds are given.
    ///
    /// A single bound is rejected rather than silently ignored.
    pub fn interval(&self) -> Result<Option<(i64, i64)>, String> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) if start > end => Err(format!(
                "start_date {} is after end_date {}",
                start, end
            )),
            (Some(start), Some(end)) => Ok(Some((start, end))),
            (None, None) => Ok(None),
            (None, Some(_)) => Err("the query parameter start_date is not provided".to_string()),
            (Some(_), None) => Err("the query parameter end_date is not provided".to_string()),
        }
    }
}

/// Identifies the acting user on write endpoints (`?user_id=`).
#[derive(Debug, Clone, Deserialize)]
pub struct UserQuery {
    pub user_id: u64,
}
