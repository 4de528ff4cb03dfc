//! Request handlers, one per route.
//!
//! Handlers stay thin: decode input, run one service call, map the outcome.

pub mod health;
pub mod items;

use serde::Serialize;

/// Success envelope: `{"data": ...}`.
#[derive(Debug, Serialize)]
pub struct DataBody<T> {
    pub data: T,
}

impl<T> DataBody<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}
