// src/routes/doctor_routes.rs

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::ApiError,
    middleware::auth_context::AuthContext,
    models::{AppState, OkData, OkResponse},
    routes::clinic_routes::deserialize_double_option,
};

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct DoctorRow {
    pub id: Uuid,
    pub clinic_id: Uuid,
    pub name: String,
    pub contact: Option<String>,
    pub specialty: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/doctors", get(list_doctors).post(create_doctor))
        .route(
            "/doctors/{doctor_id}",
            get(get_doctor).patch(update_doctor).delete(delete_doctor),
        )
}

#[derive(Debug, Deserialize)]
pub struct ListDoctorsQuery {
    pub clinic_id: Option<Uuid>,
}

pub async fn list_doctors(
    State(state): State<AppState>,
    _auth: AuthContext,
    Query(q): Query<ListDoctorsQuery>,
) -> Result<Json<Vec<DoctorRow>>, ApiError> {
    let rows: Vec<DoctorRow> = sqlx::query_as::<_, DoctorRow>(
        r#"
        SELECT id, clinic_id, name, contact, specialty, created_at, updated_at
        FROM doctors
        WHERE ($1::uuid IS NULL OR clinic_id = $1)
        ORDER BY name ASC
        "#,
    )
    .bind(q.clinic_id)
    .fetch_all(&state.db)
    .await
    .map_err(|e| ApiError::Internal(format!("db error: {e}")))?;

    Ok(Json(rows))
}

pub async fn get_doctor(
    State(state): State<AppState>,
    _auth: AuthContext,
    Path(doctor_id): Path<Uuid>,
) -> Result<Json<DoctorRow>, ApiError> {
    let row: DoctorRow = sqlx::query_as::<_, DoctorRow>(
        r#"
        SELECT id, clinic_id, name, contact, specialty, created_at, updated_at
        FROM doctors
        WHERE id = $1
        "#,
    )
    .bind(doctor_id)
    .fetch_optional(&state.db)
    .await
    .map_err(|e| ApiError::Internal(format!("db error: {e}")))?
    .ok_or_else(|| ApiError::NotFound("NOT_FOUND", "doctor not found".to_string()))?;

    Ok(Json(row))
}

#[derive(Debug, Deserialize)]
pub struct CreateDoctorRequest {
    pub clinic_id: Uuid,
    pub name: String,
    pub contact: Option<String>,
    pub specialty: Option<String>,
}

pub async fn create_doctor(
    State(state): State<AppState>,
    _auth: AuthContext,
    Json(req): Json<CreateDoctorRequest>,
) -> Result<Json<DoctorRow>, ApiError> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(ApiError::BadRequest(
            "VALIDATION_ERROR",
            "name is required".to_string(),
        ));
    }

    let row: DoctorRow = sqlx::query_as::<_, DoctorRow>(
        r#"
        INSERT INTO doctors (clinic_id, name, contact, specialty)
        VALUES ($1,$2,$3,$4)
        RETURNING id, clinic_id, name, contact, specialty, created_at, updated_at
        "#,
    )
    .bind(req.clinic_id)
    .bind(name)
    .bind(req.contact.as_deref())
    .bind(req.specialty.as_deref())
    .fetch_one(&state.db)
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db)
            if matches!(db.kind(), sqlx::error::ErrorKind::ForeignKeyViolation) =>
        {
            ApiError::BadRequest("UNKNOWN_CLINIC", "clinic_id does not exist".to_string())
        }
        _ => ApiError::BadRequest("DOCTOR_CREATE_FAILED", format!("{e}")),
    })?;

    Ok(Json(row))
}

#[derive(Debug, Deserialize)]
pub struct UpdateDoctorRequest {
    pub clinic_id: Option<Uuid>,
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    pub contact: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    pub specialty: Option<Option<String>>,
}

pub async fn update_doctor(
    State(state): State<AppState>,
    _auth: AuthContext,
    Path(doctor_id): Path<Uuid>,
    Json(req): Json<UpdateDoctorRequest>,
) -> Result<Json<DoctorRow>, ApiError> {
    let existing: DoctorRow = sqlx::query_as::<_, DoctorRow>(
        r#"
        SELECT id, clinic_id, name, contact, specialty, created_at, updated_at
        FROM doctors
        WHERE id = $1
        "#,
    )
    .bind(doctor_id)
    .fetch_optional(&state.db)
    .await
    .map_err(|e| ApiError::Internal(format!("db error: {e}")))?
    .ok_or_else(|| ApiError::NotFound("NOT_FOUND", "doctor not found".to_string()))?;

    let clinic_id = req.clinic_id.unwrap_or(existing.clinic_id);
    let name = match req.name.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => existing.name.clone(),
    };
    let contact = match req.contact {
        None => existing.contact.clone(),
        Some(inner) => inner.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
    };
    let specialty = match req.specialty {
        None => existing.specialty.clone(),
        Some(inner) => inner.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
    };

    let updated: DoctorRow = sqlx::query_as::<_, DoctorRow>(
        r#"
        UPDATE doctors
        SET clinic_id = $1,
            name = $2,
            contact = $3,
            specialty = $4,
            updated_at = now()
        WHERE id = $5
        RETURNING id, clinic_id, name, contact, specialty, created_at, updated_at
        "#,
    )
    .bind(clinic_id)
    .bind(name)
    .bind(contact)
    .bind(specialty)
    .bind(doctor_id)
    .fetch_one(&state.db)
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db)
            if matches!(db.kind(), sqlx::error::ErrorKind::ForeignKeyViolation) =>
        {
            ApiError::BadRequest("UNKNOWN_CLINIC", "clinic_id does not exist".to_string())
        }
        _ => ApiError::Internal(format!("db error: {e}")),
    })?;

    Ok(Json(updated))
}

pub async fn delete_doctor(
    State(state): State<AppState>,
    _auth: AuthContext,
    Path(doctor_id): Path<Uuid>,
) -> Result<Json<OkResponse>, ApiError> {
    let result = sqlx::query(r#"DELETE FROM doctors WHERE id = $1"#)
        .bind(doctor_id)
        .execute(&state.db)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db)
                if matches!(db.kind(), sqlx::error::ErrorKind::ForeignKeyViolation) =>
            {
                ApiError::Conflict(
                    "DOCTOR_IN_USE",
                    "doctor is still referenced by appointments".to_string(),
                )
            }
            _ => ApiError::Internal(format!("db error: {e}")),
        })?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("NOT_FOUND", "doctor not found".to_string()));
    }

    Ok(Json(OkResponse {
        data: OkData { ok: true },
    }))
}
