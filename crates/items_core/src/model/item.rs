//! Item domain model.
//!
//! # Responsibility
//! - Define the single persisted record exposed by the HTTP API.
//! - Provide lifecycle helpers for creation and update timestamps.
//!
//! # Invariants
//! - `id` is stable and never reused for another item.
//! - `created_at` never changes after creation.
//! - `updated_at` is never earlier than `created_at`.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of an item.
pub type ItemId = Uuid;

/// The sole persisted resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub description: String,
    /// Opaque status code. Handlers never interpret it.
    pub status: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Creates a new item with a generated ID and both timestamps set to now.
    pub fn new(title: impl Into<String>, description: impl Into<String>, status: i32) -> Self {
        Self::with_id(Uuid::new_v4(), title, description, status, now())
    }

    /// Creates an item with caller-provided identity and creation time.
    ///
    /// `updated_at` starts equal to `created_at`.
    pub fn with_id(
        id: ItemId,
        title: impl Into<String>,
        description: impl Into<String>,
        status: i32,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            status,
            created_at,
            updated_at: created_at,
        }
    }

    /// Refreshes `updated_at` after a mutation.
    ///
    /// The new value is strictly later than the previous one, even when
    /// `now` did not advance past it.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        let floor = self.updated_at + Duration::microseconds(1);
        self.updated_at = if now > floor { now } else { floor };
    }

    /// Validates invariants that must hold before persistence.
    pub fn validate(&self) -> Result<(), ItemValidationError> {
        if self.updated_at < self.created_at {
            return Err(ItemValidationError::TimestampOrder);
        }
        Ok(())
    }
}

/// Current wall-clock time truncated to the persisted precision.
pub fn now() -> DateTime<Utc> {
    let current = Utc::now();
    DateTime::from_timestamp_micros(current.timestamp_micros()).unwrap_or(current)
}

/// Item invariant violations detected before persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemValidationError {
    TimestampOrder,
}

impl Display for ItemValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TimestampOrder => write!(f, "updated_at must not be earlier than created_at"),
        }
    }
}

impl Error for ItemValidationError {}
