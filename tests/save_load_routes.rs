//! End-to-end tests of `POST /save` and `GET /load` through the axum router.

mod common;

use axum::{
    Router,
    body::{Body, Bytes},
    http::{Request, StatusCode, header},
};
use common::TestDatabase;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use shattered_realms_back::{routes, state::AppState};
use tower::ServiceExt;

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Bytes) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body)
}

async fn save(app: &Router, payload: Value) -> (StatusCode, Bytes) {
    let request = Request::post("/save")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    send(app, request).await
}

async fn load(app: &Router) -> (StatusCode, Value) {
    let request = Request::get("/load").body(Body::empty()).unwrap();
    let (status, body) = send(app, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}

fn field(body: &Value, name: &str) -> Value {
    let text = body[name]
        .as_str()
        .unwrap_or_else(|| panic!("`{name}` should be JSON text, got {body}"));
    serde_json::from_str(text).unwrap()
}

fn starter_state() -> Value {
    json!({
        "playerPosition": {"x": 1, "y": 2},
        "inventory": ["sword"],
        "questProgress": {"step": 1},
        "factionStandings": {"town": 0},
    })
}

#[tokio::test]
async fn load_before_any_save_returns_empty_object() {
    let db = TestDatabase::new();
    let app = routes::router(db.app_state().await);

    let (status, body) = load(&app).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn save_then_load_returns_fields_as_json_text() {
    let db = TestDatabase::new();
    let app = routes::router(db.app_state().await);

    let (status, body) = save(&app, starter_state()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        serde_json::from_slice::<Value>(&body).unwrap(),
        json!({"status": "success"})
    );

    let (status, body) = load(&app).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["playerPosition"], json!(r#"{"x":1,"y":2}"#));
    assert_eq!(field(&body, "playerPosition"), json!({"x": 1, "y": 2}));
    assert_eq!(field(&body, "inventory"), json!(["sword"]));
    assert_eq!(field(&body, "questProgress"), json!({"step": 1}));
    assert_eq!(field(&body, "factionStandings"), json!({"town": 0}));
    assert_eq!(field(&body, "echoCrystals"), json!([]));
}

#[tokio::test]
async fn latest_save_wins() {
    let db = TestDatabase::new();
    let app = routes::router(db.app_state().await);

    save(&app, starter_state()).await;
    let mut second = starter_state();
    second["playerPosition"] = json!({"x": 5, "y": 5});
    second["echoCrystals"] = json!(["violet"]);
    save(&app, second).await;

    let (_, body) = load(&app).await;
    assert_eq!(field(&body, "playerPosition"), json!({"x": 5, "y": 5}));
    assert_eq!(field(&body, "echoCrystals"), json!(["violet"]));
}

#[tokio::test]
async fn missing_required_field_is_rejected_without_writing() {
    let db = TestDatabase::new();
    let app = routes::router(db.app_state().await);
    let repository = db.repository().await;

    for missing in ["playerPosition", "inventory", "questProgress", "factionStandings"] {
        let mut payload = starter_state();
        payload.as_object_mut().unwrap().remove(missing);

        let (status, body) = save(&app, payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "missing {missing}");
        let error: Value = serde_json::from_slice(&body).unwrap();
        let message = error["message"].as_str().unwrap();
        assert!(message.contains(&format!("`{missing}`")), "message: {message}");
    }

    assert_eq!(repository.count_records().await.unwrap(), 0);
    let (_, body) = load(&app).await;
    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn empty_payload_lists_every_missing_field_by_wire_name() {
    let db = TestDatabase::new();
    let app = routes::router(db.app_state().await);

    for payload in [json!({}), json!({"echoCrystals": ["violet"]})] {
        let (status, body) = save(&app, payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let error: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            error["message"],
            json!(
                "bad request: missing required field `factionStandings`; \
                 missing required field `inventory`; \
                 missing required field `playerPosition`; \
                 missing required field `questProgress`"
            )
        );
    }
}

#[tokio::test]
async fn non_object_payload_is_rejected_without_writing() {
    let db = TestDatabase::new();
    let app = routes::router(db.app_state().await);

    let (status, body) = save(&app, json!([])).await;

    assert!(status.is_client_error(), "status: {status}");
    let text = String::from_utf8_lossy(&body);
    assert!(!text.contains("player_position"), "body: {text}");
    let repository = db.repository().await;
    assert_eq!(repository.count_records().await.unwrap(), 0);
}

#[tokio::test]
async fn explicit_null_and_empty_values_are_accepted() {
    let db = TestDatabase::new();
    let app = routes::router(db.app_state().await);

    let (status, _) = save(
        &app,
        json!({
            "playerPosition": null,
            "inventory": [],
            "questProgress": {},
            "factionStandings": {},
            "echoCrystals": [],
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = load(&app).await;
    assert_eq!(body["playerPosition"], json!("null"));
    assert_eq!(field(&body, "inventory"), json!([]));
}

#[tokio::test]
async fn non_json_body_is_a_client_error() {
    let db = TestDatabase::new();
    let app = routes::router(db.app_state().await);

    let request = Request::post("/save")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, _) = send(&app, request).await;

    assert!(status.is_client_error(), "status: {status}");
    let repository = db.repository().await;
    assert_eq!(repository.count_records().await.unwrap(), 0);
}

#[tokio::test]
async fn degraded_mode_refuses_save_and_load() {
    let app = routes::router(AppState::new());

    let (status, _) = save(&app, starter_state()).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let request = Request::get("/load").body(Body::empty()).unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

async fn healthcheck(app: &Router) -> Value {
    let request = Request::get("/healthcheck").body(Body::empty()).unwrap();
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn healthcheck_reports_degraded_without_storage() {
    let app = routes::router(AppState::new());

    assert_eq!(healthcheck(&app).await, json!({"status": "degraded"}));
}

#[tokio::test]
async fn healthcheck_counts_stored_snapshots() {
    let db = TestDatabase::new();
    let app = routes::router(db.app_state().await);

    assert_eq!(healthcheck(&app).await, json!({"status": "ok", "records": 0}));

    save(&app, starter_state()).await;
    save(&app, starter_state()).await;
    let mut incomplete = starter_state();
    incomplete.as_object_mut().unwrap().remove("inventory");
    save(&app, incomplete).await;

    assert_eq!(healthcheck(&app).await, json!({"status": "ok", "records": 2}));
}

#[tokio::test]
async fn healthcheck_follows_degraded_flag_with_store_installed() {
    let db = TestDatabase::new();
    let state = db.app_state().await;
    let app = routes::router(state.clone());

    state.update_degraded(true).await;
    assert_eq!(healthcheck(&app).await, json!({"status": "degraded"}));

    state.update_degraded(false).await;
    assert_eq!(healthcheck(&app).await, json!({"status": "ok", "records": 0}));
}

#[tokio::test]
async fn openapi_document_lists_save_and_load() {
    let app = routes::router(AppState::new());

    let request = Request::get(routes::docs::OPENAPI_JSON_PATH)
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    let doc: Value = serde_json::from_slice(&body).unwrap();
    assert!(doc["paths"]["/save"]["post"].is_object());
    assert!(doc["paths"]["/load"]["get"].is_object());
}
