//! HTTP adapter for the items service.
//!
//! # Responsibility
//! - Expose item CRUD over axum under the `/v1` prefix.
//! - Translate core results and errors into JSON envelopes.
//!
//! # Invariants
//! - Handlers receive the database handle through `AppState` only.
//! - `/ping` answers without touching the database.

pub mod error;
pub mod handlers;
pub mod state;

use axum::routing::get;
use axum::Router;

pub use error::{ApiError, ITEM_NOT_FOUND};
pub use state::AppState;

pub const ITEMS_PATH: &str = "/v1/items";
pub const ITEM_PATH: &str = "/v1/items/:id";
pub const PING_PATH: &str = "/ping";

/// Builds the full application router over the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            ITEMS_PATH,
            get(handlers::items::list_items).post(handlers::items::create_item),
        )
        .route(
            ITEM_PATH,
            get(handlers::items::get_item)
                .patch(handlers::items::update_item)
                .delete(handlers::items::delete_item),
        )
        .route(PING_PATH, get(handlers::health::ping))
        .with_state(state)
}
