//! Item CRUD handlers.
//!
//! # Contract
//! - Request bodies are decoded explicitly after routing, so update can
//!   answer 404 before looking at its body.
//! - Create reports persistence failures as 400; every other handler
//!   reports them as 500.
//! - An `:id` that is not a UUID cannot name a stored item and yields 404.

use super::DataBody;
use crate::error::ApiError;
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::Json;
use items_core::{decode_json, Item, ItemId, ItemPatch, NewItem};
use log::{info, warn};
use std::time::Instant;
use uuid::Uuid;

/// `POST /v1/items`
pub async fn create_item(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<DataBody<ItemId>>, ApiError> {
    let started_at = Instant::now();
    let result = match decode_json::<NewItem>(&body) {
        Ok(payload) => {
            state
                .with_item_service(move |service| {
                    service
                        .create_item(payload)
                        .map_err(ApiError::create_failure)
                })
                .await
        }
        Err(err) => Err(ApiError::from(err)),
    };

    log_outcome("item_create", started_at, &result, |item| Some(item.id));
    result.map(|item| Json(DataBody::new(item.id)))
}

/// `GET /v1/items`
pub async fn list_items(
    State(state): State<AppState>,
) -> Result<Json<DataBody<Vec<Item>>>, ApiError> {
    let started_at = Instant::now();
    let result = state
        .with_item_service(|service| Ok(service.list_items()?))
        .await;

    log_outcome("item_list", started_at, &result, |_| None);
    result.map(|items| Json(DataBody::new(items)))
}

/// `GET /v1/items/:id`
pub async fn get_item(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<DataBody<Item>>, ApiError> {
    let started_at = Instant::now();
    let result = match parse_item_id(&raw_id) {
        Ok(id) => {
            state
                .with_item_service(move |service| Ok(service.get_item(id)?))
                .await
        }
        Err(err) => Err(err),
    };

    log_outcome("item_get", started_at, &result, |item| Some(item.id));
    result.map(|item| Json(DataBody::new(item)))
}

/// `PATCH /v1/items/:id`
///
/// Only `title` and `description` are read from the body; both overwrite
/// the stored values.
pub async fn update_item(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> Result<Json<DataBody<Item>>, ApiError> {
    let started_at = Instant::now();
    let result = match parse_item_id(&raw_id) {
        Ok(id) => {
            state
                .with_item_service(move |service| {
                    let current = service.get_item(id)?;
                    let patch: ItemPatch = decode_json(&body)?;
                    Ok(service.apply_patch(current, patch)?)
                })
                .await
        }
        Err(err) => Err(err),
    };

    log_outcome("item_update", started_at, &result, |item| Some(item.id));
    result.map(|item| Json(DataBody::new(item)))
}

/// `DELETE /v1/items/:id`
pub async fn delete_item(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<DataBody<ItemId>>, ApiError> {
    let started_at = Instant::now();
    let result = match parse_item_id(&raw_id) {
        Ok(id) => {
            state
                .with_item_service(move |service| {
                    service.delete_item(id)?;
                    Ok(id)
                })
                .await
        }
        Err(err) => Err(err),
    };

    log_outcome("item_delete", started_at, &result, |id| Some(*id));
    result.map(|id| Json(DataBody::new(id)))
}

fn parse_item_id(raw: &str) -> Result<ItemId, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound)
}

fn log_outcome<T>(
    event: &str,
    started_at: Instant,
    result: &Result<T, ApiError>,
    item_id: impl FnOnce(&T) -> Option<ItemId>,
) {
    let duration_ms = started_at.elapsed().as_millis();
    match result {
        Ok(value) => match item_id(value) {
            Some(id) => info!(
                "event={event} module=api status=ok item_id={id} duration_ms={duration_ms}"
            ),
            None => info!("event={event} module=api status=ok duration_ms={duration_ms}"),
        },
        Err(err) => warn!(
            "event={event} module=api status=error http_status={} error_code={} duration_ms={duration_ms}",
            err.status().as_u16(),
            err.code()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::parse_item_id;
    use crate::error::ApiError;

    #[test]
    fn malformed_ids_are_not_found() {
        assert_eq!(parse_item_id("abc"), Err(ApiError::NotFound));
        assert!(parse_item_id("00000000-0000-0000-0000-000000000000").is_ok());
    }
}
