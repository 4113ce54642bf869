//! End-to-end tests: router -> provisioner -> platform HTTP client -> mock platform.

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use httpmock::prelude::*;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use student_provisioner::api::create_router;
use student_provisioner::config::Config;
use student_provisioner::AppState;

fn app_for(server: &MockServer) -> axum::Router {
    let config = Config::default().with_overrides(
        Some(server.base_url()),
        Some("service-key".to_string()),
    );
    config.validate().unwrap();
    create_router(Arc::new(AppState::from_config(config).unwrap()))
}

fn request(body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/create-student")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn provisions_identity_and_profile() {
    let server = MockServer::start();
    let create_user = server.mock(|when, then| {
        when.method(POST)
            .path("/auth/v1/admin/users")
            .header("apikey", "service-key")
            .header("authorization", "Bearer service-key");
        then.status(200).json_body(json!({"id": "U1", "email": "a@x.com"}));
    });
    let insert_profile = server.mock(|when, then| {
        when.method(POST)
            .path("/rest/v1/profiles")
            .header("apikey", "service-key")
            .header("prefer", "return=minimal")
            .json_body(json!({
                "id": "U1",
                "full_name": "Анна Ким",
                "email": "a@x.com",
                "username": "Anna_Kim",
                "role": "student",
                "student_group": "IS-21",
                "student_speciality": "Software",
                "iin": "050314600123",
                "category": "budget",
                "phone": "+77001234567",
                "date_of_birth": "2005-03-14",
                "verified_for_food": false,
                "balance": 0.0
            }));
        then.status(201);
    });

    let response = app_for(&server)
        .oneshot(request(json!({
            "fullName": "Анна Ким",
            "email": "a@x.com",
            "group": "IS-21",
            "speciality": "Software",
            "iin": "050314600123",
            "category": "budget",
            "phone": "+77001234567",
            "dateOfBirth": "2005-03-14"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["userId"], "U1");
    assert_eq!(body["username"], "Anna_Kim");
    assert_eq!(body["password"].as_str().unwrap().len(), 6);

    create_user.assert_async().await;
    insert_profile.assert_async().await;
}

#[tokio::test]
async fn duplicate_email_is_reported_verbatim() {
    let server = MockServer::start();
    let _mock = server.mock(|when, then| {
        when.method(POST).path("/auth/v1/admin/users");
        then.status(422).json_body(json!({
            "code": 422,
            "error_code": "email_exists",
            "msg": "email already registered"
        }));
    });

    let response = app_for(&server)
        .oneshot(request(json!({"fullName": "Анна Ким", "email": "a@x.com"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(response).await, json!({"error": "email already registered"}));
}

#[tokio::test]
async fn profile_constraint_violation_is_reported_verbatim() {
    let server = MockServer::start();
    let create_user = server.mock(|when, then| {
        when.method(POST).path("/auth/v1/admin/users");
        then.status(200).json_body(json!({"id": "U1"}));
    });
    let _mock = server.mock(|when, then| {
        when.method(POST).path("/rest/v1/profiles");
        then.status(409).json_body(json!({
            "code": "23505",
            "message": "duplicate key value violates unique constraint \"profiles_iin_key\""
        }));
    });

    let response = app_for(&server)
        .oneshot(request(json!({"fullName": "Анна Ким", "email": "a@x.com", "iin": "1"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_json(response).await,
        json!({"error": "duplicate key value violates unique constraint \"profiles_iin_key\""})
    );
    // The identity was created and is not rolled back.
    create_user.assert_async().await;
}
