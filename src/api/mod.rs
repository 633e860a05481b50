//! API Module
//!
//! HTTP handlers and routing for the tracker REST API.
//!
//! # Endpoints
//! - `GET /api/v1/diaryEntries/user/:id` - A user's diary entries, optionally by date range
//! - `GET|PUT|DELETE /api/v1/diaryEntries/:id` - Read, replace or remove one entry
//! - `POST /api/v1/diaryEntries?user_id=` - Create an entry
//! - `GET /api/v1/activityRegistrations/{books,games}/user/:id` - A user's registrations
//! - `POST /api/v1/activityRegistrations/{books,games}?user_id=` - Register an activity
//! - `GET /api/v1/internetArchive/books/search?collection=&language=&subject=&rows=` - Book search
//! - `GET /api/v1/internetArchive/books/:book_id/metadata` - One book's metadata and files
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::{create_router, API_PREFIX};
