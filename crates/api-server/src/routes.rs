use crate::users;
use application::UserApp;
use axum::{response::IntoResponse, routing::get, Json, Router};
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub user_app: Arc<UserApp>,
}

impl AppState {
    pub fn new(user_app: UserApp) -> Self {
        Self {
            user_app: Arc::new(user_app),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(users::router())
        .route("/health", get(health_check))
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}
