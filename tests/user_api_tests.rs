//! End-to-end tests for the HTTP surface, driving the router in-process

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use mock_users_api::config::QueryValidation;
use mock_users_api::{create_router, AppState, UserStore};

fn seeded_state() -> AppState {
    AppState::new(UserStore::seeded(), QueryValidation::Log)
}

fn app(state: &AppState) -> Router {
    create_router(state.clone(), None)
}

async fn send(state: &AppState, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app(state)
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}

#[tokio::test]
async fn test_root_greets_with_created() {
    let state = seeded_state();
    let (status, body) = send(&state, Method::GET, "/", None).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "msg": "Hello" }));
}

#[tokio::test]
async fn test_health_reports_user_count() {
    let state = seeded_state();
    let (status, body) = send(&state, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["users"], 6);
}

#[tokio::test]
async fn test_list_users_returns_everyone() {
    let state = seeded_state();
    let (status, body) = send(&state, Method::GET, "/api/users", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 6);
    assert_eq!(
        body[0],
        json!({ "id": 1, "username": "anson", "displayName": "Anson" })
    );
}

#[tokio::test]
async fn test_list_users_filters_by_username_substring() {
    let state = seeded_state();
    let (status, body) = send(
        &state,
        Method::GET,
        "/api/users?filter=username&value=ja",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["username"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["jack", "jason"]);
}

#[tokio::test]
async fn test_list_users_needs_both_filter_and_value() {
    let state = seeded_state();

    let (_, body) = send(&state, Method::GET, "/api/users?value=ja", None).await;
    assert_eq!(body.as_array().unwrap().len(), 6);

    let (_, body) = send(&state, Method::GET, "/api/users?filter=username", None).await;
    assert_eq!(body.as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_invalid_filter_is_logged_by_default() {
    let state = seeded_state();
    let (status, body) = send(&state, Method::GET, "/api/users?filter=ab&value=an", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_invalid_filter_is_rejected_when_enforced() {
    let state = AppState::new(UserStore::seeded(), QueryValidation::Enforce);
    let (status, body) = send(&state, Method::GET, "/api/users?filter=ab&value=an", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["path"], "filter");
    assert_eq!(body["errors"][0]["location"], "query");

    let (status, _) = send(&state, Method::GET, "/api/users?filter=username&value=an", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_repeated_query_key_uses_error_envelope() {
    let state = seeded_state();
    let (status, body) = send(
        &state,
        Method::GET,
        "/api/users?filter=abc&filter=def",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_get_user_by_id() {
    let state = seeded_state();
    let (status, body) = send(&state, Method::GET, "/api/users/3", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "id": 3, "username": "adam", "displayName": "Adam" })
    );
}

#[tokio::test]
async fn test_non_numeric_id_is_bad_request() {
    let state = seeded_state();

    for method in [Method::GET, Method::PUT, Method::PATCH, Method::DELETE] {
        let body = (method == Method::PUT || method == Method::PATCH)
            .then(|| json!({ "username": "whoever", "displayName": "Who" }));
        let (status, body) = send(&state, method.clone(), "/api/users/abc", body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{} /api/users/abc", method);
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
    }

    // Regardless of collection state
    let empty = AppState::new(UserStore::default(), QueryValidation::Log);
    let (status, _) = send(&empty, Method::GET, "/api/users/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let state = seeded_state();

    for method in [Method::GET, Method::DELETE] {
        let (status, body) = send(&state, method, "/api/users/99", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    let (status, _) = send(
        &state,
        Method::PUT,
        "/api/users/99",
        Some(json!({ "username": "ghost", "displayName": "Ghost" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_numeric_id_outside_assignable_range_is_not_found() {
    let state = seeded_state();

    for uri in [
        "/api/users/-1",
        "/api/users/4294967296",
        "/api/users/99999999999999999999",
    ] {
        let (status, body) = send(&state, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "GET {}", uri);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    let (status, _) = send(&state, Method::DELETE, "/api/users/-3", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, users) = send(&state, Method::GET, "/api/users", None).await;
    assert_eq!(users.as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_id_parsing_strictness() {
    let state = seeded_state();

    let (status, body) = send(&state, Method::GET, "/api/users/+3", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 3);

    let (status, _) = send(&state, Method::GET, "/api/users/003", None).await;
    assert_eq!(status, StatusCode::OK);

    for uri in ["/api/users/3abc", "/api/users/3.0", "/api/users/-"] {
        let (status, _) = send(&state, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "GET {}", uri);
    }
}

#[tokio::test]
async fn test_create_user_appends_with_next_id() {
    let state = seeded_state();
    let (status, body) = send(
        &state,
        Method::POST,
        "/api/users",
        Some(json!({ "username": "newuser", "displayName": "New" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let users = body.as_array().unwrap();
    assert_eq!(users.len(), 7);
    assert_eq!(
        users[6],
        json!({ "id": 7, "username": "newuser", "displayName": "New" })
    );
}

#[tokio::test]
async fn test_create_user_keeps_only_schema_fields() {
    let state = seeded_state();
    let (status, body) = send(
        &state,
        Method::POST,
        "/api/users",
        Some(json!({ "username": "newuser", "displayName": "New", "admin": true })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body[6].get("admin").is_none());
}

#[tokio::test]
async fn test_create_user_rejects_short_username() {
    let state = seeded_state();
    let (status, body) = send(
        &state,
        Method::POST,
        "/api/users",
        Some(json!({ "username": "abc", "displayName": "Abc" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    let errors = body["errors"].as_array().unwrap();
    assert!(errors.iter().any(|e| e["path"] == "username"));

    let (_, users) = send(&state, Method::GET, "/api/users", None).await;
    assert_eq!(users.as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_create_user_rejects_malformed_json() {
    let state = seeded_state();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();

    let response = app(&state).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_after_deleting_last_user_uses_true_maximum() {
    let state = seeded_state();

    send(&state, Method::DELETE, "/api/users/6", None).await;
    let (_, body) = send(
        &state,
        Method::POST,
        "/api/users",
        Some(json!({ "username": "newuser", "displayName": "New" })),
    )
    .await;

    let ids: Vec<u64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
}

#[tokio::test]
async fn test_put_then_get_round_trips() {
    let state = seeded_state();
    let (status, body) = send(
        &state,
        Method::PUT,
        "/api/users/2",
        Some(json!({ "username": "jackson", "displayName": "Jackson" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);

    let (status, body) = send(&state, Method::GET, "/api/users/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "id": 2, "username": "jackson", "displayName": "Jackson" })
    );
}

#[tokio::test]
async fn test_put_short_username_round_trips() {
    let state = seeded_state();
    let (status, _) = send(
        &state,
        Method::PUT,
        "/api/users/2",
        Some(json!({ "username": "bob", "displayName": "Bob" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&state, Method::GET, "/api/users/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "id": 2, "username": "bob", "displayName": "Bob" })
    );
}

#[tokio::test]
async fn test_put_requires_full_user() {
    let state = seeded_state();
    let (status, body) = send(
        &state,
        Method::PUT,
        "/api/users/2",
        Some(json!({ "displayName": "Jackson" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .all(|e| e["path"] == "username"));
}

#[tokio::test]
async fn test_patch_merges_fields() {
    let state = seeded_state();
    let (status, _) = send(
        &state,
        Method::PATCH,
        "/api/users/4",
        Some(json!({ "displayName": "Tina T." })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&state, Method::GET, "/api/users/4", None).await;
    assert_eq!(
        body,
        json!({ "id": 4, "username": "tina", "displayName": "Tina T." })
    );
}

#[tokio::test]
async fn test_patch_validates_present_fields() {
    let state = seeded_state();
    let (status, body) = send(
        &state,
        Method::PATCH,
        "/api/users/4",
        Some(json!({ "username": 42 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["path"], "username");
}

#[tokio::test]
async fn test_patch_accepts_short_username() {
    let state = seeded_state();
    let (status, _) = send(
        &state,
        Method::PATCH,
        "/api/users/4",
        Some(json!({ "username": "ti" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&state, Method::GET, "/api/users/4", None).await;
    assert_eq!(body["username"], "ti");
}

#[tokio::test]
async fn test_delete_removes_exactly_one() {
    let state = seeded_state();
    let (status, _) = send(&state, Method::DELETE, "/api/users/3", None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&state, Method::GET, "/api/users", None).await;
    let ids: Vec<u64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 4, 5, 6]);

    let (status, _) = send(&state, Method::GET, "/api/users/3", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_products() {
    let state = seeded_state();
    let (status, body) = send(&state, Method::GET, "/api/products", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["id"], 1);
    assert_eq!(body[0]["product"], "Chicken Shwarma");
    assert_eq!(body[0]["price"].as_f64(), Some(90.0));
}

#[tokio::test]
async fn test_security_headers_applied() {
    let state = seeded_state();
    let request = Request::builder()
        .uri("/api/products")
        .body(Body::empty())
        .unwrap();

    let response = app(&state).oneshot(request).await.unwrap();
    let headers = response.headers();

    assert_eq!(headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    assert_eq!(headers[header::CACHE_CONTROL], "no-store");
}
