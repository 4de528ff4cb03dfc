//! Liveness endpoint.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PingBody {
    pub message: &'static str,
}

/// `GET /ping`. Never touches the database.
pub async fn ping() -> Json<PingBody> {
    Json(PingBody {
        message: items_core::ping(),
    })
}
