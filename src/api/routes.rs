//! API Routes
//!
//! Configures the Axum router for the tracker API.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    add_book_registration_handler, add_game_registration_handler, book_metadata_handler,
    delete_diary_entry_handler, get_diary_entry_handler, health_handler,
    save_diary_entry_handler, search_books_handler, stats_handler, update_diary_entry_handler,
    user_book_registrations_handler, user_diary_entries_handler,
    user_game_registrations_handler, AppState,
};

/// Prefix under which every versioned resource route is mounted.
pub const API_PREFIX: &str = "/api/v1";

/// Resource routes, relative to [`API_PREFIX`].
fn resource_routes() -> Router<AppState> {
    Router::new()
        .route("/diaryEntries", post(save_diary_entry_handler))
        .route("/diaryEntries/user/:id", get(user_diary_entries_handler))
        .route(
            "/diaryEntries/:id",
            get(get_diary_entry_handler)
                .put(update_diary_entry_handler)
                .delete(delete_diary_entry_handler),
        )
        .route(
            "/activityRegistrations/books",
            post(add_book_registration_handler),
        )
        .route(
            "/activityRegistrations/books/user/:id",
            get(user_book_registrations_handler),
        )
        .route(
            "/activityRegistrations/games",
            post(add_game_registration_handler),
        )
        .route(
            "/activityRegistrations/games/user/:id",
            get(user_game_registrations_handler),
        )
        .route("/internetArchive/books/search", get(search_books_handler))
        .route(
            "/internetArchive/books/:book_id/metadata",
            get(book_metadata_handler),
        )
}

/// Creates the main router with all endpoints configured.
///
/// `/health` and `/stats` sit at the root; everything else is nested under
/// `/api/v1`. CORS is permissive and every request is traced.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest(API_PREFIX, resource_routes())
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
