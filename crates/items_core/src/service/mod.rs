//! Use-case services over the repository layer.
//!
//! # Responsibility
//! - Assign server-owned fields (identity, timestamps) on writes.
//! - Keep HTTP handlers decoupled from storage details.

pub mod item_service;
