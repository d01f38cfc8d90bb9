use crate::error::ApiError;
use crate::routes::AppState;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use domain::{CreateUserRequest, UpdateUserRequest, User};
use serde::de::DeserializeOwned;
use tracing::info;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/username/:username", get(get_user_by_username))
        .route("/users/id/:id", get(get_user_by_id))
        .route("/users/:uuid", put(update_user).delete(delete_user))
}

/// Bodies are decoded as JSON whatever `Content-Type` says. Anything that
/// does not decode is a 400.
fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::BadRequest(e.to_string()))
}

async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    let users = state.user_app.user_service.get_all_users().await?;
    Ok(Json(users))
}

async fn get_user_by_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<User>, ApiError> {
    let user = state
        .user_app
        .user_service
        .get_user_by_username(&username)
        .await?;
    Ok(Json(user))
}

async fn get_user_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let id: i64 = id
        .parse()
        .map_err(|_| ApiError::BadRequest("invalid id".to_string()))?;

    let user = state.user_app.user_service.get_user_by_id(id).await?;
    Ok(Json(user))
}

async fn create_user(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let request: CreateUserRequest = decode(&body)?;

    let user = state.user_app.user_service.create_user(&request).await?;
    info!(id = user.id, uuid = %user.uuid, "user created");
    Ok((StatusCode::CREATED, Json(user)))
}

async fn update_user(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
    body: Bytes,
) -> Result<Json<User>, ApiError> {
    let request: UpdateUserRequest = decode(&body)?;

    let user = state
        .user_app
        .user_service
        .update_user(&uuid, &request)
        .await?;
    Ok(Json(user))
}

async fn delete_user(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.user_app.user_service.delete_user(&uuid).await?;

    info!(uuid = %uuid, "user deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use crate::routes::{router, AppState};
    use application::UserApp;
    use axum::{
        body::{to_bytes, Body},
        http::{Method, Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        router(AppState::new(UserApp::in_memory()))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    async fn create_alice(app: &Router) -> Value {
        let (status, user) = send(
            app,
            Method::POST,
            "/users",
            Some(json!({
                "username": "alice",
                "email": "alice@example.com",
                "full_name": "Alice Liddell"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        user
    }

    #[tokio::test]
    async fn list_is_empty_array_when_no_users() {
        let app = app();

        let (status, body) = send(&app, Method::GET, "/users", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn create_returns_created_user() {
        let app = app();

        let user = create_alice(&app).await;

        assert_eq!(user["id"], 1);
        assert_eq!(user["username"], "alice");
        assert_eq!(user["email"], "alice@example.com");
        assert_eq!(user["full_name"], "Alice Liddell");
        assert!(!user["uuid"].as_str().unwrap().is_empty());

        let (status, listed) = send(&app, Method::GET, "/users", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed, json!([user]));
    }

    #[tokio::test]
    async fn create_validation_errors_are_bad_requests() {
        let app = app();

        let (status, body) = send(
            &app,
            Method::POST,
            "/users",
            Some(json!({ "username": "bob", "email": "invalid-email" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid email format");

        let (status, body) = send(
            &app,
            Method::POST,
            "/users",
            Some(json!({ "username": "", "email": "bob@example.com" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "username: required field is empty");
    }

    #[tokio::test]
    async fn malformed_or_incomplete_bodies_are_bad_requests() {
        let app = app();

        let (status, body) = send(
            &app,
            Method::POST,
            "/users",
            Some(json!({ "username": "bob" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());

        let request = Request::builder()
            .method(Method::POST)
            .uri("/users")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let request = Request::builder()
            .method(Method::PUT)
            .uri("/users/some-uuid")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn json_bodies_bind_without_content_type() {
        let app = app();

        let request = Request::builder()
            .method(Method::POST)
            .uri("/users")
            .body(Body::from(r#"{"username":"bob","email":"bob@example.com"}"#))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let user: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(user["username"], "bob");

        let request = Request::builder()
            .method(Method::PUT)
            .uri(format!("/users/{}", user["uuid"].as_str().unwrap()))
            .header("content-type", "text/plain")
            .body(Body::from(r#"{"full_name":"Bob Builder"}"#))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let updated: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(updated["full_name"], "Bob Builder");
        assert_eq!(updated["email"], "bob@example.com");
    }

    #[tokio::test]
    async fn get_by_username_and_id() {
        let app = app();
        let user = create_alice(&app).await;

        let (status, body) = send(&app, Method::GET, "/users/username/alice", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, user);

        let (status, body) = send(&app, Method::GET, "/users/id/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, user);
    }

    #[tokio::test]
    async fn unknown_users_are_not_found() {
        let app = app();

        let (status, body) = send(&app, Method::GET, "/users/username/ghost", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "user not found" }));

        let (status, _) = send(&app, Method::GET, "/users/id/42", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(
            &app,
            Method::DELETE,
            "/users/123e4567-e89b-12d3-a456-426614174000",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn non_numeric_id_is_bad_request() {
        let app = app();

        let (status, body) = send(&app, Method::GET, "/users/id/abc", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "invalid id" }));
    }

    #[tokio::test]
    async fn update_merges_supplied_fields() {
        let app = app();
        let user = create_alice(&app).await;
        let uri = format!("/users/{}", user["uuid"].as_str().unwrap());

        let (status, body) = send(
            &app,
            Method::PUT,
            &uri,
            Some(json!({ "email": "alice@wonderland.example" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["email"], "alice@wonderland.example");
        assert_eq!(body["username"], "alice");
        assert_eq!(body["full_name"], "Alice Liddell");
        assert_eq!(body["uuid"], user["uuid"]);
    }

    #[tokio::test]
    async fn update_error_statuses() {
        let app = app();
        let user = create_alice(&app).await;
        let uri = format!("/users/{}", user["uuid"].as_str().unwrap());

        let (status, _) = send(&app, Method::PUT, &uri, Some(json!({ "email": "nope" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            Method::PUT,
            "/users/unknown-uuid",
            Some(json!({ "username": "x" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app, Method::PUT, "/users/%20", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "required field is empty");
    }

    #[tokio::test]
    async fn delete_returns_no_content_then_not_found() {
        let app = app();
        let user = create_alice(&app).await;
        let uri = format!("/users/{}", user["uuid"].as_str().unwrap());

        let (status, body) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        let (status, _) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app, Method::GET, "/users", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn health_check_reports_healthy() {
        let app = app();

        let (status, body) = send(&app, Method::GET, "/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }
}
