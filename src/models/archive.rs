//! Internet Archive models
//!
//! Response shapes of the Internet Archive advanced search and metadata APIs,
//! and the query accepted by the book search endpoint. Fields the archive
//! returns as either a string or a list are kept as raw JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Query string of GET /internetArchive/books/search
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookSearchQuery {
    #[serde(default)]
    pub collection: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub subject: String,
    /// Maximum number of books returned
    #[serde(default)]
    pub rows: u32,
}

impl BookSearchQuery {
    /// Validates the query
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        let missing = [
            ("collection", self.collection.trim().is_empty()),
            ("language", self.language.trim().is_empty()),
            ("subject", self.subject.trim().is_empty()),
            ("rows", self.rows == 0),
        ]
        .into_iter()
        .find(|(_, missing)| *missing);

        missing.map(|(name, _)| format!("the query parameter {} is required", name))
    }
}

// == Search ==
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookSearchResponse {
    pub response: BookSearchPage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookSearchPage {
    pub num_found: u64,
    pub start: u64,
    #[serde(default)]
    pub docs: Vec<ArchiveBook>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveBook {
    pub identifier: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub creator: Option<Value>,
}

// == Metadata ==
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookMetadataResponse {
    #[serde(default)]
    pub files: Vec<ArchiveFile>,
    pub metadata: ArchiveMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveFile {
    pub name: String,
    #[serde(default)]
    pub format: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveMetadata {
    pub identifier: String,
    #[serde(default)]
    pub mediatype: Option<String>,
    #[serde(default)]
    pub title: Option<Value>,
    #[serde(default)]
    pub creator: Option<Value>,
    #[serde(default)]
    pub description: Option<Value>,
    #[serde(default)]
    pub subject: Option<Value>,
    #[serde(default)]
    pub collection: Option<Value>,
    #[serde(default)]
    pub language: Option<Value>,
    #[serde(default)]
    pub publicdate: Option<String>,
    #[serde(default)]
    pub addeddate: Option<String>,
    #[serde(default, rename = "identifier-access")]
    pub identifier_access: Option<String>,
}
