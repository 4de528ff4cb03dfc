//! Repository layer for item persistence.
//!
//! # Responsibility
//! - Define the data access contract used by the service layer.
//! - Keep SQL details out of service and HTTP code.
//!
//! # Invariants
//! - Write paths call `Item::validate()` before any SQL mutation.
//! - Missing rows surface as `RepoError::NotFound`, never as empty success.

pub mod item_repo;
