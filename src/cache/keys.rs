//! Cache Keys Module
//!
//! Composite key construction and the user-scope matcher used by scoped
//! invalidation.

use regex::Regex;

use crate::error::CacheError;

/// Separator between the resource and key components of a full key.
pub const KEY_SEPARATOR: char = '-';

/// Cached lists of a user's diary entries.
pub const DIARY_ENTRIES_RESOURCE: &str = "diaryEntries";
/// Cached lists of a user's book activity registrations.
pub const BOOK_REGISTRATIONS_RESOURCE: &str = "bookActivityRegistrations";
/// Cached lists of a user's game activity registrations.
pub const GAME_REGISTRATIONS_RESOURCE: &str = "gameActivityRegistrations";

/// Cached Internet Archive book search results.
pub const BOOK_SEARCH_RESOURCE: &str = "internetArchiveBookSearch";
/// Cached Internet Archive book metadata.
pub const BOOK_METADATA_RESOURCE: &str = "internetArchiveBookMetadata";

/// Builds the full key `resource-key`.
pub fn compose_key(resource: &str, key: &str) -> String {
    format!("{}{}{}", resource, KEY_SEPARATOR, key)
}

/// Builds the canonical user-scope key, `user-<id>`.
pub fn user_key(user_id: u64) -> String {
    format!("user-{}", user_id)
}

/// Builds the key of a user's date-range query, `user-<id>-start<s>-end<e>`.
pub fn user_date_range_key(user_id: u64, start_date: i64, end_date: i64) -> String {
    format!("{}-start{}-end{}", user_key(user_id), start_date, end_date)
}

/// Builds the key of a book search,
/// `collection<c>-language<l>-subject<s>-rows<r>`.
pub fn book_search_key(collection: &str, language: &str, subject: &str, rows: u32) -> String {
    format!(
        "collection{}-language{}-subject{}-rows{}",
        collection, language, subject, rows
    )
}

/// Builds the key of one book's metadata, `book-<identifier>`.
pub fn book_key(identifier: &str) -> String {
    format!("book-{}", identifier)
}

// == User Scope ==
/// Matches every full key of one resource that belongs to one user.
///
/// A key belongs to the scope when its key component is exactly `user-<id>` or
/// starts with `user-<id>-`, so `user-1` never matches `user-12`.
#[derive(Debug, Clone)]
pub struct UserScope {
    pattern: Regex,
}

impl UserScope {
    /// Builds the scope for `resource` and `user_id`.
    ///
    /// Fails when `resource` is empty or contains the key separator, since the
    /// scope boundary would then be ambiguous.
    pub fn new(resource: &str, user_id: u64) -> Result<Self, CacheError> {
        if resource.is_empty() {
            return Err(CacheError::InvalidPattern(
                "resource name cannot be empty".to_string(),
            ));
        }
        if resource.contains(KEY_SEPARATOR) {
            return Err(CacheError::InvalidPattern(format!(
                "resource name '{}' contains the key separator '{}'",
                resource, KEY_SEPARATOR
            )));
        }

        let prefix = compose_key(resource, &user_key(user_id));
        let pattern = Regex::new(&format!(
            "^{}(?:{}|$)",
            regex::escape(&prefix),
            regex::escape(&KEY_SEPARATOR.to_string())
        ))
        .map_err(|e| CacheError::InvalidPattern(e.to_string()))?;

        Ok(Self { pattern })
    }

    /// Returns whether `full_key` belongs to this scope.
    pub fn matches(&self, full_key: &str) -> bool {
        self.pattern.is_match(full_key)
    }

    /// Returns the underlying pattern, for logging.
    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }
}
