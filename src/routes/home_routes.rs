use axum::{Json, Router, routing::get};

use crate::models::AppState;

#[derive(serde::Serialize)]
pub struct HomeResponse {
    pub data: HomeData,
}

#[derive(serde::Serialize)]
pub struct HomeData {
    pub service: String,
    pub status: String,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/home", get(home))
}

// Unauthenticated liveness endpoint; everything under /api/v1 needs the token.
pub async fn home() -> Json<HomeResponse> {
    Json(HomeResponse {
        data: HomeData {
            service: "mederp-server".to_string(),
            status: "ok".to_string(),
        },
    })
}
