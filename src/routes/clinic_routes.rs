// src/routes/clinic_routes.rs

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::ApiError,
    middleware::auth_context::AuthContext,
    models::{AppState, OkData, OkResponse},
};

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct ClinicRow {
    pub id: Uuid,
    pub name: String,
    pub address: Option<String>,
    pub contact: Option<String>,
    pub timezone: String,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/clinics", get(list_clinics).post(create_clinic))
        .route(
            "/clinics/{clinic_id}",
            get(get_clinic).patch(update_clinic).delete(delete_clinic),
        )
}

pub async fn list_clinics(
    State(state): State<AppState>,
    _auth: AuthContext,
) -> Result<Json<Vec<ClinicRow>>, ApiError> {
    let rows: Vec<ClinicRow> = sqlx::query_as::<_, ClinicRow>(
        r#"
        SELECT id, name, address, contact, timezone, is_active, created_at, updated_at
        FROM clinics
        ORDER BY name ASC
        "#,
    )
    .fetch_all(&state.db)
    .await
    .map_err(|e| ApiError::Internal(format!("db error: {e}")))?;

    Ok(Json(rows))
}

pub async fn get_clinic(
    State(state): State<AppState>,
    _auth: AuthContext,
    Path(clinic_id): Path<Uuid>,
) -> Result<Json<ClinicRow>, ApiError> {
    let row: ClinicRow = sqlx::query_as::<_, ClinicRow>(
        r#"
        SELECT id, name, address, contact, timezone, is_active, created_at, updated_at
        FROM clinics
        WHERE id = $1
        "#,
    )
    .bind(clinic_id)
    .fetch_optional(&state.db)
    .await
    .map_err(|e| ApiError::Internal(format!("db error: {e}")))?
    .ok_or_else(|| ApiError::NotFound("NOT_FOUND", "clinic not found".to_string()))?;

    Ok(Json(row))
}

#[derive(Debug, Deserialize)]
pub struct CreateClinicRequest {
    pub name: String,
    pub address: Option<String>,
    pub contact: Option<String>,
    pub timezone: Option<String>, // defaults to UTC
    pub is_active: Option<bool>,  // defaults to true
}

pub async fn create_clinic(
    State(state): State<AppState>,
    _auth: AuthContext,
    Json(req): Json<CreateClinicRequest>,
) -> Result<Json<ClinicRow>, ApiError> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(ApiError::BadRequest(
            "VALIDATION_ERROR",
            "name is required".to_string(),
        ));
    }

    let timezone = req
        .timezone
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("UTC");

    let row: ClinicRow = sqlx::query_as::<_, ClinicRow>(
        r#"
        INSERT INTO clinics (name, address, contact, timezone, is_active)
        VALUES ($1,$2,$3,$4,$5)
        RETURNING id, name, address, contact, timezone, is_active, created_at, updated_at
        "#,
    )
    .bind(name)
    .bind(req.address.as_deref())
    .bind(req.contact.as_deref())
    .bind(timezone)
    .bind(req.is_active.unwrap_or(true))
    .fetch_one(&state.db)
    .await
    .map_err(|e| ApiError::BadRequest("CLINIC_CREATE_FAILED", format!("{e}")))?;

    Ok(Json(row))
}

use serde::de::Deserializer;

pub(crate) fn deserialize_double_option<'de, D, T>(
    deserializer: D,
) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::Deserialize<'de>,
{
    // Called only when the field is present (even as `null`).
    // - null  => Some(None)        => clear the column
    // - value => Some(Some(value)) => set it
    let inner = Option::<T>::deserialize(deserializer)?;
    Ok(Some(inner))
}

#[derive(Debug, Deserialize)]
pub struct UpdateClinicRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    pub address: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    pub contact: Option<Option<String>>,
    pub timezone: Option<String>,
    pub is_active: Option<bool>,
}

pub async fn update_clinic(
    State(state): State<AppState>,
    _auth: AuthContext,
    Path(clinic_id): Path<Uuid>,
    Json(req): Json<UpdateClinicRequest>,
) -> Result<Json<ClinicRow>, ApiError> {
    // Load existing, merge, write back (clear-to-null needs the merge step)
    let existing: ClinicRow = sqlx::query_as::<_, ClinicRow>(
        r#"
        SELECT id, name, address, contact, timezone, is_active, created_at, updated_at
        FROM clinics
        WHERE id = $1
        "#,
    )
    .bind(clinic_id)
    .fetch_optional(&state.db)
    .await
    .map_err(|e| ApiError::Internal(format!("db error: {e}")))?
    .ok_or_else(|| ApiError::NotFound("NOT_FOUND", "clinic not found".to_string()))?;

    let name = match req.name.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => existing.name.clone(),
    };
    let address = match req.address {
        None => existing.address.clone(),
        Some(inner) => inner.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
    };
    let contact = match req.contact {
        None => existing.contact.clone(),
        Some(inner) => inner.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
    };
    let timezone = match req.timezone.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => existing.timezone.clone(),
    };
    let is_active = req.is_active.unwrap_or(existing.is_active);

    let updated: ClinicRow = sqlx::query_as::<_, ClinicRow>(
        r#"
        UPDATE clinics
        SET name = $1,
            address = $2,
            contact = $3,
            timezone = $4,
            is_active = $5,
            updated_at = now()
        WHERE id = $6
        RETURNING id, name, address, contact, timezone, is_active, created_at, updated_at
        "#,
    )
    .bind(name)
    .bind(address)
    .bind(contact)
    .bind(timezone)
    .bind(is_active)
    .bind(clinic_id)
    .fetch_one(&state.db)
    .await
    .map_err(|e| ApiError::Internal(format!("db error: {e}")))?;

    Ok(Json(updated))
}

pub async fn delete_clinic(
    State(state): State<AppState>,
    _auth: AuthContext,
    Path(clinic_id): Path<Uuid>,
) -> Result<Json<OkResponse>, ApiError> {
    let result = sqlx::query(r#"DELETE FROM clinics WHERE id = $1"#)
        .bind(clinic_id)
        .execute(&state.db)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db)
                if matches!(db.kind(), sqlx::error::ErrorKind::ForeignKeyViolation) =>
            {
                ApiError::Conflict(
                    "CLINIC_IN_USE",
                    "clinic is still referenced by doctors or appointments".to_string(),
                )
            }
            _ => ApiError::Internal(format!("db error: {e}")),
        })?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("NOT_FOUND", "clinic not found".to_string()));
    }

    Ok(Json(OkResponse {
        data: OkData { ok: true },
    }))
}
