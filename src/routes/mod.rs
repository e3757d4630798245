use crate::models::AppState;
use axum::Router;

pub mod appointment_routes;
pub mod clinic_routes;
pub mod doctor_routes;
pub mod home_routes;
pub mod patient_routes;
pub mod report_routes;

pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", clinic_routes::router())
        .nest("/api/v1", doctor_routes::router())
        .nest("/api/v1", patient_routes::router())
        .nest("/api/v1", appointment_routes::router())
        .nest("/api/v1", report_routes::router())
        .merge(home_routes::router())
        .with_state(state)
}
