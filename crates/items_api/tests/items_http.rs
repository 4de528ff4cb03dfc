use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::{DateTime, Utc};
use items_api::{router, AppState};
use items_core::db::open_db_in_memory;
use items_core::{Item, ItemRepository, SqliteItemRepository};
use serde_json::{json, Value};
use tower::ServiceExt;

const NIL_ID: &str = "00000000-0000-0000-0000-000000000000";

fn app() -> Router {
    router(AppState::new(open_db_in_memory().unwrap()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(text) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(text.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create(app: &Router, body: Value) -> String {
    let (status, value) = send(app, Method::POST, "/v1/items", Some(&body.to_string())).await;
    assert_eq!(status, StatusCode::OK, "unexpected body: {value}");
    value["data"].as_str().unwrap().to_string()
}

async fn list_len(app: &Router) -> usize {
    let (status, value) = send(app, Method::GET, "/v1/items", None).await;
    assert_eq!(status, StatusCode::OK);
    value["data"].as_array().unwrap().len()
}

fn timestamp(value: &Value, field: &str) -> DateTime<Utc> {
    value[field].as_str().unwrap().parse().unwrap()
}

#[tokio::test]
async fn ping_returns_pong() {
    let (status, value) = send(&app(), Method::GET, "/ping", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value, json!({"message": "pong"}));
}

#[tokio::test]
async fn ping_ignores_broken_database() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch("DROP TABLE items;").unwrap();
    let app = router(AppState::new(conn));

    let (status, value) = send(&app, Method::GET, "/ping", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value, json!({"message": "pong"}));

    let (status, value) = send(&app, Method::GET, "/v1/items", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(value["error"].as_str().unwrap().contains("items"));

    let body = json!({"title": "A", "description": "d"}).to_string();
    let (status, value) = send(&app, Method::POST, "/v1/items", Some(&body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(value["error"].is_string());
}

#[tokio::test]
async fn create_then_get_returns_item() {
    let app = app();
    let id = create(&app, json!({"title": "A", "description": "d", "status": 0})).await;
    assert!(uuid::Uuid::parse_str(&id).is_ok());

    let (status, value) = send(&app, Method::GET, &format!("/v1/items/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let item = &value["data"];
    assert_eq!(item["id"], id);
    assert_eq!(item["title"], "A");
    assert_eq!(item["description"], "d");
    assert_eq!(item["status"], 0);
    assert_eq!(timestamp(item, "created_at"), timestamp(item, "updated_at"));
}

#[tokio::test]
async fn create_ignores_client_supplied_id_and_timestamps() {
    let app = app();
    let id = create(
        &app,
        json!({
            "id": NIL_ID,
            "title": "B",
            "status": 4,
            "created_at": "2000-01-01T00:00:00Z"
        }),
    )
    .await;
    assert_ne!(id, NIL_ID);

    let (_, value) = send(&app, Method::GET, &format!("/v1/items/{id}"), None).await;
    assert_eq!(value["data"]["description"], "");
    assert_eq!(value["data"]["status"], 4);
    assert!(timestamp(&value["data"], "created_at").timestamp() > 946_684_800);
}

#[tokio::test]
async fn create_generates_distinct_ids() {
    let app = app();
    let body = json!({"title": "same", "description": "same"});
    let first = create(&app, body.clone()).await;
    let second = create(&app, body).await;
    assert_ne!(first, second);
}

#[tokio::test]
async fn create_with_malformed_body_is_bad_request_and_stores_nothing() {
    let app = app();
    for body in ["{not json", "", r#"{"description":"no title"}"#, r#"{"title":5}"#] {
        let (status, value) = send(&app, Method::POST, "/v1/items", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body:?}");
        assert!(value["error"].is_string());
    }
    assert_eq!(list_len(&app).await, 0);
}

#[tokio::test]
async fn long_titles_are_accepted_on_create_and_update() {
    let app = app();
    let long_title = "x".repeat(256);
    let id = create(&app, json!({"title": &long_title, "description": "d"})).await;

    let (status, value) = send(&app, Method::GET, &format!("/v1/items/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["data"]["title"], long_title);

    let longer = "y".repeat(1000);
    let body = json!({"title": &longer, "description": ""}).to_string();
    let (status, value) =
        send(&app, Method::PATCH, &format!("/v1/items/{id}"), Some(&body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["data"]["title"], longer);
}

#[tokio::test]
async fn list_returns_each_item_once() {
    let app = app();
    assert_eq!(list_len(&app).await, 0);

    let mut ids = Vec::new();
    for n in 0..3 {
        ids.push(create(&app, json!({"title": format!("item {n}")})).await);
    }

    let (_, value) = send(&app, Method::GET, "/v1/items", None).await;
    let mut listed: Vec<String> = value["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap().to_string())
        .collect();
    listed.sort();
    ids.sort();
    assert_eq!(listed, ids);
}

#[tokio::test]
async fn get_unknown_or_malformed_id_is_not_found() {
    let app = app();
    for uri in [format!("/v1/items/{NIL_ID}"), "/v1/items/not-a-uuid".to_string()] {
        let (status, value) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(value, json!({"error": "Item not found"}));
    }
}

#[tokio::test]
async fn update_overwrites_text_and_refreshes_updated_at() {
    let app = app();
    let id = create(&app, json!({"title": "old", "description": "old", "status": 2})).await;

    let body = json!({"title": "new", "description": "", "status": 9}).to_string();
    let (status, value) =
        send(&app, Method::PATCH, &format!("/v1/items/{id}"), Some(&body)).await;
    assert_eq!(status, StatusCode::OK);
    let item = &value["data"];
    assert_eq!(item["title"], "new");
    assert_eq!(item["description"], "");
    assert_eq!(item["status"], 2);
    assert!(timestamp(item, "updated_at") > timestamp(item, "created_at"));

    let (_, stored) = send(&app, Method::GET, &format!("/v1/items/{id}"), None).await;
    assert_eq!(&stored["data"], item);
}

#[tokio::test]
async fn update_with_missing_fields_clears_them() {
    let app = app();
    let id = create(&app, json!({"title": "keep?", "description": "gone"})).await;

    let (status, value) =
        send(&app, Method::PATCH, &format!("/v1/items/{id}"), Some("{}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["data"]["title"], "");
    assert_eq!(value["data"]["description"], "");
}

#[tokio::test]
async fn update_unknown_id_is_not_found_before_reading_body() {
    let app = app();
    for body in [r#"{"title":"x","description":"y"}"#, "{not json"] {
        let (status, value) =
            send(&app, Method::PATCH, &format!("/v1/items/{NIL_ID}"), Some(body)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(value, json!({"error": "Item not found"}));
    }
}

#[tokio::test]
async fn update_with_malformed_body_is_bad_request_and_keeps_item() {
    let app = app();
    let id = create(&app, json!({"title": "stable", "description": "d"})).await;
    let (_, before) = send(&app, Method::GET, &format!("/v1/items/{id}"), None).await;

    let (status, value) =
        send(&app, Method::PATCH, &format!("/v1/items/{id}"), Some("{bad")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(value["error"].is_string());

    let (_, after) = send(&app, Method::GET, &format!("/v1/items/{id}"), None).await;
    assert_eq!(before, after);
}

#[tokio::test]
async fn delete_removes_item_and_reports_not_found_afterwards() {
    let app = app();
    let keep = create(&app, json!({"title": "keep"})).await;
    let gone = create(&app, json!({"title": "gone"})).await;

    let (status, value) = send(&app, Method::DELETE, &format!("/v1/items/{gone}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value, json!({"data": gone}));

    let (status, value) = send(&app, Method::DELETE, &format!("/v1/items/{gone}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(value, json!({"error": "Item not found"}));

    let (status, _) = send(&app, Method::GET, &format!("/v1/items/{gone}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, value) = send(&app, Method::GET, "/v1/items", None).await;
    let listed = value["data"].as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], keep);
}

#[tokio::test]
async fn null_description_is_stored_as_empty() {
    let app = app();
    let id = create(&app, json!({"title": "A", "description": null})).await;

    let (status, value) = send(&app, Method::GET, &format!("/v1/items/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["data"]["description"], "");

    let (status, value) = send(
        &app,
        Method::PATCH,
        &format!("/v1/items/{id}"),
        Some(r#"{"title":"B","description":null}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["data"]["title"], "B");
    assert_eq!(value["data"]["description"], "");
}

#[tokio::test]
async fn update_persistence_failure_is_internal_error() {
    let conn = open_db_in_memory().unwrap();
    let seeded = Item::new("locked", "d", 0);
    SqliteItemRepository::new(&conn).create_item(&seeded).unwrap();
    conn.execute_batch(
        "CREATE TRIGGER items_reject_update BEFORE UPDATE ON items
         BEGIN
             SELECT RAISE(ABORT, 'boom');
         END;",
    )
    .unwrap();
    let app = router(AppState::new(conn));
    let uri = format!("/v1/items/{}", seeded.id);

    let body = json!({"title": "new", "description": "new"}).to_string();
    let (status, value) = send(&app, Method::PATCH, &uri, Some(&body)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(value, json!({"error": "boom"}));

    let (status, stored) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stored["data"]["title"], "locked");
}

#[tokio::test]
async fn get_and_delete_report_storage_failures_as_internal_errors() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch("DROP TABLE items;").unwrap();
    let app = router(AppState::new(conn));

    for method in [Method::GET, Method::DELETE] {
        let (status, value) = send(&app, method, &format!("/v1/items/{NIL_ID}"), None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(value["error"].as_str().unwrap().contains("items"));
    }
}
