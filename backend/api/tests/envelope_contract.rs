//! Wire-contract tests for the response envelope and error boundary.
//! These run without a database: they exercise serialization only.

use actix_web::body::to_bytes;
use actix_web::error::ResponseError;
use actix_web::http::StatusCode;

use vidtube_api::error::AppError;
use vidtube_api::response::{empty, ApiResponse};

#[test]
fn success_envelope_shape() {
    let body =
        serde_json::to_value(ApiResponse::ok(empty(), "Channel stats fetched successfully"))
            .unwrap();

    assert_eq!(body["statusCode"], 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Channel stats fetched successfully");
    assert!(body["data"].is_object());
}

#[test]
fn created_envelope_shape() {
    let body = serde_json::to_value(ApiResponse::created(
        serde_json::json!({ "id": "x" }),
        "Tweet created successfully",
    ))
    .unwrap();

    assert_eq!(body["statusCode"], 201);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["id"], "x");
}

#[actix_rt::test]
async fn failure_envelope_shape() {
    let err = AppError::NotFound("Video not found".into());
    assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

    let response = err.error_response();
    let bytes = to_bytes(response.into_body()).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["statusCode"], 404);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Video not found");
    assert!(body["errors"].as_array().unwrap().is_empty());
    assert!(body.get("data").is_none());
}

#[actix_rt::test]
async fn validation_failure_keeps_exact_message() {
    let err = AppError::Validation("Comment content is required".into());

    let response = err.error_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = to_bytes(response.into_body()).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["message"], "Comment content is required");
}

#[actix_rt::test]
async fn forbidden_failure_for_ownership() {
    let err = AppError::Forbidden("You are not authorized to update this tweet".into());

    let response = err.error_response();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let bytes = to_bytes(response.into_body()).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["statusCode"], 403);
    assert_eq!(body["success"], false);
}
