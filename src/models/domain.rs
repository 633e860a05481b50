//! Domain entities
//!
//! Every diary entry and activity registration owns an
//! [`ActivityRegistration`] recording when it happened and for which user.

use serde::{Deserialize, Serialize};

/// When an activity happened and who it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRegistration {
    pub id: u64,
    /// Unix timestamp of the activity
    pub registration_date: i64,
    /// Owning user
    pub user_refer: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiaryEntry {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub registration: ActivityRegistration,
}

/// A book read by the user, identified by its Internet Archive identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookActivityRegistration {
    pub id: u64,
    pub internet_archive_identifier: String,
    pub registration: ActivityRegistration,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameActivityRegistration {
    pub id: u64,
    pub game_name: String,
    pub registration: ActivityRegistration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diary_entry_serializes_camel_case() {
        let entry = DiaryEntry {
            id: 1,
            title: "Monday".to_string(),
            content: "Read for an hour".to_string(),
            registration: ActivityRegistration {
                id: 4,
                registration_date: 1_700_000_000,
                user_refer: 9,
            },
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["registration"]["registrationDate"], 1_700_000_000);
        assert_eq!(json["registration"]["userRefer"], 9);
    }

    #[test]
    fn test_book_registration_field_names() {
        let json = serde_json::to_string(&BookActivityRegistration {
            id: 2,
            internet_archive_identifier: "alice-in-wonderland".to_string(),
            registration: ActivityRegistration {
                id: 3,
                registration_date: 10,
                user_refer: 1,
            },
        })
        .unwrap();

        assert!(json.contains("\"internetArchiveIdentifier\":\"alice-in-wonderland\""));
    }
}
