//! Domain model for the item resource.
//!
//! # Responsibility
//! - Define the canonical `Item` record used by repository and handlers.
//! - Define typed request payloads and their explicit decode step.
//!
//! # Invariants
//! - Every item is identified by a server-assigned `ItemId`.
//! - `created_at <= updated_at` for every valid item.

pub mod item;
pub mod payload;
