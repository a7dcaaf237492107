//! Resource service CRUD tests over real sockets
//!
//! Each test boots the service on an ephemeral port and drives it with a
//! plain HTTP client, so serialization, routing and status codes are all
//! exercised end to end.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use campus_core::models::{Course, University};
use campus_service::{CourseService, UniversityService};
use campus_store::MemoryStore;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

/// Serve an app on an ephemeral port and return its address
async fn spawn_app(app: axum::Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    addr
}

async fn spawn_university_service() -> SocketAddr {
    let repo = Arc::new(MemoryStore::<University>::new());
    let service = Arc::new(UniversityService::new(repo));
    spawn_app(campus_api::university_router(service)).await
}

async fn spawn_courses_service() -> SocketAddr {
    let repo = Arc::new(MemoryStore::<Course>::new());
    let service = Arc::new(CourseService::new(repo));
    spawn_app(campus_api::courses_router(service)).await
}

fn client() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .expect("build client")
}

#[tokio::test]
async fn university_lifecycle_over_http() {
    let addr = spawn_university_service().await;
    let client = client();
    let base = format!("http://{}/api/university", addr);

    // Create
    let created: Value = client
        .post(&base)
        .json(&json!({
            "name": "Tech University",
            "location": "Springfield",
            "establishedYear": 1952
        }))
        .send()
        .await
        .expect("post")
        .json()
        .await
        .expect("json");
    let id = created["id"].as_i64().expect("assigned id");
    assert_eq!(created["name"], "Tech University");

    // Read back
    let fetched: Value = client
        .get(format!("{}/{}", base, id))
        .send()
        .await
        .expect("get")
        .json()
        .await
        .expect("json");
    assert_eq!(fetched, created);

    // Update
    let response = client
        .put(format!("{}/{}", base, id))
        .json(&json!({"name": "Tech University", "location": "Shelbyville"}))
        .send()
        .await
        .expect("put");
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Value = response.json().await.expect("json");
    assert_eq!(updated["location"], "Shelbyville");
    assert_eq!(updated["id"].as_i64(), Some(id));

    // Delete
    let response = client
        .delete(format!("{}/{}", base, id))
        .send()
        .await
        .expect("delete");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Gone
    let response = client
        .get(format!("{}/{}", base, id))
        .send()
        .await
        .expect("get");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.bytes().await.expect("body").is_empty());
}

#[tokio::test]
async fn update_never_creates_a_row() {
    let addr = spawn_university_service().await;
    let client = client();
    let base = format!("http://{}/api/university", addr);

    let response = client
        .put(format!("{}/41", base))
        .json(&json!({"name": "Ghost University"}))
        .send()
        .await
        .expect("put");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let all: Value = client
        .get(&base)
        .send()
        .await
        .expect("get")
        .json()
        .await
        .expect("json");
    assert_eq!(all.as_array().map(|a| a.len()), Some(0));
}

#[tokio::test]
async fn malformed_id_is_a_client_error() {
    let addr = spawn_university_service().await;
    let client = client();

    let response = client
        .get(format!("http://{}/api/university/abc", addr))
        .send()
        .await
        .expect("get");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("json");
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn course_filter_endpoints() {
    let addr = spawn_courses_service().await;
    let client = client();
    let base = format!("http://{}/api/courses", addr);

    for (code, dept, university_id, active) in [
        ("CS101", "Computer Science", 1, true),
        ("CS402", "Computer Science", 1, false),
        ("BIO110", "Biology", 2, true),
    ] {
        let response = client
            .post(&base)
            .json(&json!({
                "courseCode": code,
                "title": code,
                "department": dept,
                "universityId": university_id,
                "isActive": active
            }))
            .send()
            .await
            .expect("post");
        assert_eq!(response.status(), StatusCode::OK);
    }

    let by_university: Value = client
        .get(format!("{}/university/1", base))
        .send()
        .await
        .expect("get")
        .json()
        .await
        .expect("json");
    assert_eq!(by_university.as_array().map(|a| a.len()), Some(2));

    let by_department: Value = client
        .get(format!("{}/department/Biology", base))
        .send()
        .await
        .expect("get")
        .json()
        .await
        .expect("json");
    assert_eq!(by_department.as_array().map(|a| a.len()), Some(1));
    assert_eq!(by_department[0]["courseCode"], "BIO110");

    let active: Value = client
        .get(format!("{}/active", base))
        .send()
        .await
        .expect("get")
        .json()
        .await
        .expect("json");
    assert_eq!(active.as_array().map(|a| a.len()), Some(2));

    // No match is an empty list, not an error
    let empty: Value = client
        .get(format!("{}/department/History", base))
        .send()
        .await
        .expect("get")
        .json()
        .await
        .expect("json");
    assert_eq!(empty.as_array().map(|a| a.len()), Some(0));
}

#[tokio::test]
async fn deleted_ids_are_never_reassigned() {
    let addr = spawn_universities_with_two_rows().await;
    let client = client();
    let base = format!("http://{}/api/university", addr);

    let response = client
        .delete(format!("{}/2", base))
        .send()
        .await
        .expect("delete");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let created: Value = client
        .post(&base)
        .json(&json!({"name": "Third University"}))
        .send()
        .await
        .expect("post")
        .json()
        .await
        .expect("json");
    assert_eq!(created["id"].as_i64(), Some(3));
}

async fn spawn_universities_with_two_rows() -> SocketAddr {
    let addr = spawn_university_service().await;
    let client = client();
    let base = format!("http://{}/api/university", addr);
    for name in ["First University", "Second University"] {
        client
            .post(&base)
            .json(&json!({ "name": name }))
            .send()
            .await
            .expect("post");
    }
    addr
}

#[tokio::test]
async fn health_endpoint_responds() {
    let addr = spawn_university_service().await;
    let body = client()
        .get(format!("http://{}/health", addr))
        .send()
        .await
        .expect("get")
        .text()
        .await
        .expect("text");
    assert_eq!(body, "OK");
}
