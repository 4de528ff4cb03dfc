//! Core domain logic for the items service.
//! HTTP adapters depend on this crate; it has no knowledge of HTTP.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{Config, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status, LogSink};
pub use model::item::{Item, ItemId, ItemValidationError};
pub use model::payload::{decode_json, ItemPatch, NewItem, ValidationError};
pub use repo::item_repo::{ItemRepository, RepoError, RepoResult, SqliteItemRepository};
pub use service::item_service::ItemService;

/// Liveness probe answer, independent of database state.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
