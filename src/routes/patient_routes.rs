// src/routes/patient_routes.rs

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
pub struct PatientRow {
    pub id: Uuid,
    pub name: String,
    pub contact: Option<String>,
    pub date_of_birth: Option<chrono::NaiveDate>,
    pub medical_id: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/patients", get(search_patients).post(create_patient))
        .route(
            "/patients/{patient_id}",
            get(get_patient).patch(update_patient).delete(delete_patient),
        )
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub query: Option<String>,
}

pub async fn search_patients(
    State(state): State<AppState>,
    _auth: AuthContext,
    Query(q): Query<SearchQuery>,
) -> Result<Json<Vec<PatientRow>>, ApiError> {
    let query = q.query.unwrap_or_default().trim().to_string();
    if query.is_empty() {
        // default: most recent
        let rows: Vec<PatientRow> = sqlx::query_as::<_, PatientRow>(
            r#"
            SELECT id, name, contact, date_of_birth, medical_id, created_at, updated_at
            FROM patients
            ORDER BY created_at DESC
            LIMIT 50
            "#,
        )
        .fetch_all(&state.db)
        .await
        .map_err(|e| ApiError::Internal(format!("db error: {e}")))?;
        return Ok(Json(rows));
    }

    let like = format!("%{}%", query);

    let rows: Vec<PatientRow> = sqlx::query_as::<_, PatientRow>(
        r#"
        SELECT id, name, contact, date_of_birth, medical_id, created_at, updated_at
        FROM patients
        WHERE name ILIKE $1
           OR contact ILIKE $1
           OR medical_id ILIKE $1
        ORDER BY created_at DESC
        LIMIT 50
        "#,
    )
    .bind(like)
    .fetch_all(&state.db)
    .await
    .map_err(|e| ApiError::Internal(format!("db error: {e}")))?;

    Ok(Json(rows))
}

pub async fn get_patient(
    State(state): State<AppState>,
    _auth: AuthContext,
    Path(patient_id): Path<Uuid>,
) -> Result<Json<PatientRow>, ApiError> {
    let row: PatientRow = sqlx::query_as::<_, PatientRow>(
        r#"
        SELECT id, name, contact, date_of_birth, medical_id, created_at, updated_at
        FROM patients
        WHERE id = $1
        "#,
    )
    .bind(patient_id)
    .fetch_optional(&state.db)
    .await
    .map_err(|e| ApiError::Internal(format!("db error: {e}")))?
    .ok_or_else(|| ApiError::NotFound("NOT_FOUND", "patient not found".to_string()))?;

    Ok(Json(row))
}

#[derive(Debug, Deserialize)]
pub struct CreatePatientRequest {
    pub name: String,
    pub contact: Option<String>,
    pub date_of_birth: Option<chrono::NaiveDate>,
    pub medical_id: Option<String>,
}

pub async fn create_patient(
    State(state): State<AppState>,
    _auth: AuthContext,
    Json(req): Json<CreatePatientRequest>,
) -> Result<Json<PatientRow>, ApiError> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(ApiError::BadRequest(
            "VALIDATION_ERROR",
            "name is required".to_string(),
        ));
    }

    let row: PatientRow = sqlx::query_as::<_, PatientRow>(
        r#"
        INSERT INTO patients (name, contact, date_of_birth, medical_id)
        VALUES ($1,$2,$3,$4)
        RETURNING id, name, contact, date_of_birth, medical_id, created_at, updated_at
        "#,
    )
    .bind(name)
    .bind(req.contact.as_deref())
    .bind(req.date_of_birth)
    .bind(req.medical_id.as_deref())
    .fetch_one(&state.db)
    .await
    .map_err(|e| ApiError::BadRequest("PATIENT_CREATE_FAILED", format!("{e}")))?;

    Ok(Json(row))
}

#[derive(Debug, Deserialize)]
pub struct UpdatePatientRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    pub contact: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    pub date_of_birth: Option<Option<chrono::NaiveDate>>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    pub medical_id: Option<Option<String>>,
}

pub async fn update_patient(
    State(state): State<AppState>,
    _auth: AuthContext,
    Path(patient_id): Path<Uuid>,
    Json(req): Json<UpdatePatientRequest>,
) -> Result<Json<PatientRow>, ApiError> {
    // Load existing, merge, write back
    let existing: PatientRow = sqlx::query_as::<_, PatientRow>(
        r#"
        SELECT id, name, contact, date_of_birth, medical_id, created_at, updated_at
        FROM patients
        WHERE id = $1
        "#,
    )
    .bind(patient_id)
    .fetch_optional(&state.db)
    .await
    .map_err(|e| ApiError::Internal(format!("db error: {e}")))?
    .ok_or_else(|| ApiError::NotFound("NOT_FOUND", "patient not found".to_string()))?;

    let name = match req.name.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => existing.name.clone(),
    };
    let contact = match req.contact {
        None => existing.contact.clone(),
        Some(inner) => inner.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
    };
    let date_of_birth = match req.date_of_birth {
        None => existing.date_of_birth,
        Some(inner) => inner,
    };
    let medical_id = match req.medical_id {
        None => existing.medical_id.clone(),
        Some(inner) => inner.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
    };

    let updated: PatientRow = sqlx::query_as::<_, PatientRow>(
        r#"
        UPDATE patients
        SET name = $1,
            contact = $2,
            date_of_birth = $3,
            medical_id = $4,
            updated_at = now()
        WHERE id = $5
        RETURNING id, name, contact, date_of_birth, medical_id, created_at, updated_at
        "#,
    )
    .bind(name)
    .bind(contact)
    .bind(date_of_birth)
    .bind(medical_id)
    .bind(patient_id)
    .fetch_one(&state.db)
    .await
    .map_err(|e| ApiError::Internal(format!("db error: {e}")))?;

    Ok(Json(updated))
}

pub async fn delete_patient(
    State(state): State<AppState>,
    _auth: AuthContext,
    Path(patient_id): Path<Uuid>,
) -> Result<Json<OkResponse>, ApiError> {
    let result = sqlx::query(r#"DELETE FROM patients WHERE id = $1"#)
        .bind(patient_id)
        .execute(&state.db)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db)
                if matches!(db.kind(), sqlx::error::ErrorKind::ForeignKeyViolation) =>
            {
                ApiError::Conflict(
                    "PATIENT_IN_USE",
                    "patient is still referenced by appointments".to_string(),
                )
            }
            _ => ApiError::Internal(format!("db error: {e}")),
        })?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("NOT_FOUND", "patient not found".to_string()));
    }

    Ok(Json(OkResponse {
        data: OkData { ok: true },
    }))
}
