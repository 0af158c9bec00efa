use std::collections::BTreeMap;
use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::Utc;
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, Value as DbValue};
use serde_json::Value;
use uuid::Uuid;

use jaothui_farms::domain::types::LookupStrategy;
use jaothui_farms::router::build_router;
use jaothui_farms::state::AppState;
use jaothui_farms_schema::{animals, farm_members, farms};
use jaothui_testing::auth::MockAuth;

fn server_with(db: DatabaseConnection, lookup_strategy: LookupStrategy) -> TestServer {
    let state = AppState {
        db: Arc::new(db),
        lookup_strategy,
    };
    TestServer::new(build_router(state)).unwrap()
}

fn server(db: DatabaseConnection) -> TestServer {
    server_with(db, LookupStrategy::Sequential)
}

fn empty_db() -> DatabaseConnection {
    MockDatabase::new(DatabaseBackend::Postgres).into_connection()
}

fn farm_model(owner_id: &str) -> farms::Model {
    let now = Utc::now();
    farms::Model {
        id: Uuid::now_v7(),
        name: "ฟาร์มของสมชาย".into(),
        owner_id: owner_id.into(),
        province: "สุพรรณบุรี".into(),
        description: None,
        created_at: now,
        updated_at: now,
    }
}

#[tokio::test]
async fn should_answer_liveness_check() {
    let server = server(empty_db());
    server.get("/healthz").await.assert_status_ok();
}

#[tokio::test]
async fn should_reject_request_without_identity_header() {
    let server = server(empty_db());
    let response = server.get("/farms/@me").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["kind"], "UNAUTHORIZED");
}

#[tokio::test]
async fn should_reject_empty_user_id_as_invalid_user() {
    let server = server(empty_db());
    let (name, value) = MockAuth::new("").header();
    let response = server.get("/farms/@me").add_header(name, value).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "INVALID_USER");
}

#[tokio::test]
async fn should_return_owned_farm_for_owner() {
    let farm = farm_model("u1");
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![farm.clone()]])
        .into_connection();
    let server = server(db);

    let (name, value) = MockAuth::new("u1").header();
    let response = server.get("/farms/@me").add_header(name, value).await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    assert_eq!(body["farm"]["id"], farm.id.to_string());
    assert_eq!(body["farm"]["owner_id"], "u1");
    assert_eq!(body["role"], "OWNER");
    assert_eq!(body["access_level"], "full");
}

#[tokio::test]
async fn should_forbid_user_without_farm() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<farms::Model>::new()])
        .append_query_results([Vec::<farm_members::Model>::new()])
        .into_connection();
    let server = server(db);

    let (name, value) = MockAuth::new("u3").header();
    let response = server.get("/farms/@me").add_header(name, value).await;
    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(response.json::<Value>()["kind"], "NO_ACCESS");
}

#[tokio::test]
async fn should_reject_malformed_farm_id() {
    let server = server(empty_db());
    let (name, value) = MockAuth::new("u1").header();
    let response = server.get("/farms/not-a-uuid").add_header(name, value).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "INVALID_INPUT");
}

#[tokio::test]
async fn should_return_not_found_envelope_for_unknown_route() {
    let server = server(empty_db());
    let response = server.get("/no-such-route").await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["kind"], "NOT_FOUND");
}

// ── Rejections ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_unknown_status_filter_as_invalid_input() {
    let server = server(empty_db());
    let (name, value) = MockAuth::new("u1").header();
    let response = server
        .get("/animals?status=BOGUS")
        .add_header(name, value)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["kind"], "INVALID_INPUT");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn should_reject_non_numeric_page_size_as_invalid_input() {
    let server = server(empty_db());
    let (name, value) = MockAuth::new("u1").header();
    let response = server
        .get("/activities?per-page=many")
        .add_header(name, value)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "INVALID_INPUT");
}

#[tokio::test]
async fn should_reject_body_without_json_content_type() {
    let server = server(empty_db());
    let (name, value) = MockAuth::new("u1").header();
    let response = server
        .post("/animals")
        .add_header(name, value)
        .text("not json")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "INVALID_INPUT");
}

#[tokio::test]
async fn should_reject_body_missing_required_fields() {
    let server = server(empty_db());
    let (name, value) = MockAuth::new("u1").header();
    let response = server
        .post("/animals")
        .add_header(name, value)
        .json(&serde_json::json!({ "name": "ทองคำ" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "INVALID_INPUT");
}

#[tokio::test]
async fn should_accept_well_formed_animal_filters() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![farm_model("u1")]])
        .append_query_results([Vec::<animals::Model>::new()])
        .into_connection();
    let server = server(db);
    let (name, value) = MockAuth::new("u1").header();
    let response = server
        .get("/animals?status=SOLD&per-page=5")
        .add_header(name, value)
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), serde_json::json!([]));
}

// ── Single-query (UNION ALL) lookup ──────────────────────────────────────────

fn accessible_farm_row(owner_id: &str, role: &str) -> BTreeMap<&'static str, DbValue> {
    let now = Utc::now();
    BTreeMap::from([
        ("id", Uuid::now_v7().into()),
        ("name", "ฟาร์มของสมชาย".into()),
        ("owner_id", owner_id.into()),
        ("province", "สุพรรณบุรี".into()),
        ("description", DbValue::from(None::<String>)),
        ("created_at", now.into()),
        ("updated_at", now.into()),
        ("role", role.into()),
    ])
}

fn union_server(rows: Vec<BTreeMap<&'static str, DbValue>>) -> TestServer {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([rows])
        .into_connection();
    server_with(db, LookupStrategy::Union)
}

#[tokio::test]
async fn should_grant_limited_access_to_member_found_by_union() {
    let server = union_server(vec![accessible_farm_row("u1", "MEMBER")]);
    let (name, value) = MockAuth::new("u2").header();
    let response = server.get("/farms/@me").add_header(name, value).await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    assert_eq!(body["farm"]["owner_id"], "u1");
    assert_eq!(body["role"], "MEMBER");
    assert_eq!(body["access_level"], "limited");
}

#[tokio::test]
async fn should_grant_full_access_to_owner_found_by_union() {
    let server = union_server(vec![accessible_farm_row("u1", "OWNER")]);
    let (name, value) = MockAuth::new("u1").header();
    let response = server.get("/farms/@me").add_header(name, value).await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    assert_eq!(body["role"], "OWNER");
    assert_eq!(body["access_level"], "full");
    assert!(body["farm"]["description"].is_null());
}

#[tokio::test]
async fn should_forbid_user_with_no_union_rows() {
    let server = union_server(Vec::new());
    let (name, value) = MockAuth::new("u3").header();
    let response = server.get("/farms/@me").add_header(name, value).await;
    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(response.json::<Value>()["kind"], "NO_ACCESS");
}

#[tokio::test]
async fn should_report_unknown_role_column_as_database_error() {
    let server = union_server(vec![accessible_farm_row("u1", "GUEST")]);
    let (name, value) = MockAuth::new("u2").header();
    let response = server.get("/farms/@me").add_header(name, value).await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>()["kind"], "DATABASE_ERROR");
}
