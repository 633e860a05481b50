//! Internet Archive service
//!
//! HTTP client for the Internet Archive search and metadata APIs, and the
//! service that puts the resource cache in front of it. Client errors reach
//! the caller unchanged and are never cached.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{error, info, warn};

use super::{AppCache, CachedPayload};
use crate::cache::keys::{book_key, book_search_key, BOOK_METADATA_RESOURCE, BOOK_SEARCH_RESOURCE};
use crate::error::{ArchiveError, Result};
use crate::models::{BookMetadataResponse, BookSearchQuery, BookSearchResponse};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_MAX_RETRIES: u32 = 2;
const DEFAULT_INITIAL_BACKOFF: Duration = Duration::from_secs(1);

// == Client ==
/// Client for the Internet Archive APIs.
///
/// Transport failures and 5xx answers are retried with a doubling backoff;
/// other statuses fail at once.
#[derive(Debug, Clone)]
pub struct InternetArchiveClient {
    http: reqwest::Client,
    base_url: String,
    max_retries: u32,
    initial_backoff: Duration,
}

impl InternetArchiveClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            max_retries: DEFAULT_MAX_RETRIES,
            initial_backoff: DEFAULT_INITIAL_BACKOFF,
        }
    }

    /// Replaces the retry policy: up to `max_retries` extra attempts, the
    /// first one after `initial_backoff`.
    pub fn with_retries(mut self, max_retries: u32, initial_backoff: Duration) -> Self {
        self.max_retries = max_retries;
        self.initial_backoff = initial_backoff;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Searches texts by collection, language and subject, most downloaded
    /// first.
    pub async fn search_books(
        &self,
        query: &BookSearchQuery,
    ) -> std::result::Result<BookSearchResponse, ArchiveError> {
        let url = format!("{}/advancedsearch.php", self.base_url);
        let q = format!(
            "collection:{} AND language:{} AND subject:{} AND mediatype:texts",
            query.collection, query.language, query.subject
        );
        let rows = query.rows.to_string();
        let params = [
            ("q", q.as_str()),
            ("fl[]", "identifier"),
            ("fl[]", "title"),
            ("fl[]", "creator"),
            ("sort[]", "downloads desc"),
            ("sort[]", "avg_rating desc"),
            ("rows", rows.as_str()),
            ("page", "1"),
            ("output", "json"),
        ];

        self.get_json(&url, &params).await
    }

    /// Fetches the metadata and file list of one item.
    pub async fn book_metadata(
        &self,
        identifier: &str,
    ) -> std::result::Result<BookMetadataResponse, ArchiveError> {
        let url = format!("{}/metadata/{}", self.base_url, identifier);
        self.get_json(&url, &[]).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> std::result::Result<T, ArchiveError> {
        let mut backoff = self.initial_backoff;
        let mut attempt = 0;

        loop {
            match self.try_get_json(url, params).await {
                Err(e) if attempt < self.max_retries && is_retryable(&e) => {
                    attempt += 1;
                    warn!(
                        "Internet Archive request to {} failed ({}), retry {}/{} in {:?}",
                        url, e, attempt, self.max_retries, backoff
                    );
                    tokio::time::sleep(backoff).await;
                    backoff *= 2;
                }
                result => return result,
            }
        }
    }

    async fn try_get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> std::result::Result<T, ArchiveError> {
        info!("HTTP request: GET {}", url);
        let response = self
            .http
            .get(url)
            .query(params)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ArchiveError::Status(status.as_u16()));
        }
        Ok(response.json::<T>().await?)
    }
}

fn is_retryable(error: &ArchiveError) -> bool {
    match error {
        ArchiveError::Http(e) => !e.is_decode(),
        ArchiveError::Status(status) => *status >= 500,
    }
}

// == Service ==
#[derive(Debug, Clone)]
pub struct InternetArchiveService {
    client: InternetArchiveClient,
    cache: AppCache,
}

impl InternetArchiveService {
    pub fn new(client: InternetArchiveClient, cache: AppCache) -> Self {
        Self { client, cache }
    }

    /// Searches books, cached per collection, language, subject and row count.
    pub async fn search_books(&self, query: &BookSearchQuery) -> Result<BookSearchResponse> {
        let client = &self.client;
        let key = book_search_key(&query.collection, &query.language, &query.subject, query.rows);
        let payload = self
            .cache
            .fetch_or_compute(
                move || async move {
                    client
                        .search_books(query)
                        .await
                        .map(CachedPayload::BookSearch)
                },
                BOOK_SEARCH_RESOURCE,
                &key,
            )
            .await
            .inspect_err(|e| error!("Search book request failed: {}", e))?;

        match payload {
            CachedPayload::BookSearch(search) => Ok(search),
            other => Err(other.mismatch(BOOK_SEARCH_RESOURCE)),
        }
    }

    /// Returns one book's metadata, cached under `book-<identifier>`.
    pub async fn book_metadata(&self, identifier: &str) -> Result<BookMetadataResponse> {
        let client = &self.client;
        let payload = self
            .cache
            .fetch_or_compute(
                move || async move {
                    client
                        .book_metadata(identifier)
                        .await
                        .map(CachedPayload::BookMetadata)
                },
                BOOK_METADATA_RESOURCE,
                &book_key(identifier),
            )
            .await
            .inspect_err(|e| error!("Metadata book request failed: {}", e))?;

        match payload {
            CachedPayload::BookMetadata(metadata) => Ok(metadata),
            other => Err(other.mismatch(BOOK_METADATA_RESOURCE)),
        }
    }
}
