use axum::{Router, routing::post};
use serde::{Deserialize, Serialize};
use validator::Validate;

use jsonbind::{
    common::ApiResponse,
    params::{Json, Valid},
};

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct EchoRequest {
    #[validate(length(min = 1, max = 64))]
    pub name: String,
    #[serde(default)]
    #[validate(range(min = 0, max = 150))]
    pub age: i64,
    #[serde(default)]
    #[validate(email)]
    pub email: Option<String>,
}

pub fn create_router() -> Router {
    Router::new().nest(
        "/api",
        Router::new()
            .route("/echo", post(echo))
            .route("/echo/raw", post(echo_raw)),
    )
}

async fn echo(Valid(Json(payload)): Valid<Json<EchoRequest>>) -> ApiResponse<EchoRequest> {
    tracing::info!(name = %payload.name, "echoing validated payload");
    ApiResponse::ok("bound", Some(payload))
}

async fn echo_raw(Json(payload): Json<serde_json::Value>) -> ApiResponse<serde_json::Value> {
    ApiResponse::ok("bound", Some(payload))
}
