// src/routes/appointment_routes.rs

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::ApiError,
    middleware::auth_context::AuthContext,
    models::{AppState, AppointmentStatus, OkData, OkResponse},
    routes::clinic_routes::deserialize_double_option,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/appointments", get(list_appointments).post(create_appointment))
        .route(
            "/appointments/{appointment_id}",
            get(get_appointment)
                .patch(update_appointment)
                .delete(delete_appointment),
        )
}

/* ============================================================
   Row models
   ============================================================ */

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct AppointmentRow {
    pub id: Uuid,
    pub clinic_id: Uuid,
    pub doctor_id: Uuid,
    pub patient_id: Uuid,
    pub start_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub status: String,
    pub disease_name: Option<String>,
    pub virality_rate: Option<f64>,
    pub patient_age_at_visit: Option<i32>,
    pub avg_monthly_city_temp: Option<f64>,
    pub country: Option<String>,
    pub continent: Option<String>,
    pub type_or_reason: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// List row with the joined display names the appointment table screen shows.
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct AppointmentListRow {
    pub id: Uuid,
    pub clinic_id: Uuid,
    pub doctor_id: Uuid,
    pub patient_id: Uuid,
    pub start_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub status: String,
    pub disease_name: Option<String>,
    pub country: Option<String>,
    pub continent: Option<String>,
    pub notes: Option<String>,
    pub clinic_name: String,
    pub doctor_name: String,
    pub patient_name: String,
}

/* ============================================================
   Validation helpers
   ============================================================ */

fn validate_status(raw: &str) -> Result<(), ApiError> {
    raw.parse::<AppointmentStatus>().map(|_| ()).map_err(|_| {
        ApiError::BadRequest(
            "VALIDATION_ERROR",
            "status must be one of scheduled, completed, cancelled, no_show".to_string(),
        )
    })
}

fn validate_duration(minutes: i32) -> Result<(), ApiError> {
    if minutes <= 0 {
        return Err(ApiError::BadRequest(
            "VALIDATION_ERROR",
            "duration_minutes must be > 0".to_string(),
        ));
    }
    Ok(())
}

fn unknown_reference(e: sqlx::Error) -> ApiError {
    match &e {
        sqlx::Error::Database(db)
            if matches!(db.kind(), sqlx::error::ErrorKind::ForeignKeyViolation) =>
        {
            ApiError::BadRequest(
                "UNKNOWN_REFERENCE",
                "clinic_id, doctor_id or patient_id does not exist".to_string(),
            )
        }
        _ => ApiError::BadRequest("APPOINTMENT_WRITE_FAILED", format!("{e}")),
    }
}

/* ============================================================
   GET /appointments
   ============================================================ */

#[derive(Debug, Deserialize)]
pub struct ListAppointmentsQuery {
    pub clinic_id: Option<Uuid>,
    pub doctor_id: Option<Uuid>,
    // YYYY-MM-DD, inclusive day bounds in UTC
    pub from: Option<String>,
    pub to: Option<String>,
}

pub(crate) fn parse_day_param(raw: &Option<String>, field: &str) -> Result<Option<NaiveDate>, ApiError> {
    match raw.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d").map(Some).map_err(|_| {
            ApiError::BadRequest("VALIDATION_ERROR", format!("{field} must be YYYY-MM-DD"))
        }),
        None => Ok(None),
    }
}

pub async fn list_appointments(
    State(state): State<AppState>,
    _auth: AuthContext,
    Query(q): Query<ListAppointmentsQuery>,
) -> Result<Json<Vec<AppointmentListRow>>, ApiError> {
    let from = parse_day_param(&q.from, "from")?;
    let to = parse_day_param(&q.to, "to")?;

    let from_ts = from.map(|d| {
        DateTime::<Utc>::from_naive_utc_and_offset(d.and_hms_opt(0, 0, 0).unwrap(), Utc)
    });
    let to_ts = to.map(|d| {
        DateTime::<Utc>::from_naive_utc_and_offset(d.and_hms_milli_opt(23, 59, 59, 999).unwrap(), Utc)
    });

    let rows: Vec<AppointmentListRow> = sqlx::query_as::<_, AppointmentListRow>(
        r#"
        SELECT
          a.id,
          a.clinic_id,
          a.doctor_id,
          a.patient_id,
          a.start_at,
          a.duration_minutes,
          a.status,
          a.disease_name,
          a.country,
          a.continent,
          a.notes,

          c.name AS clinic_name,
          d.name AS doctor_name,
          p.name AS patient_name

        FROM appointments a
        JOIN clinics c ON c.id = a.clinic_id
        JOIN doctors d ON d.id = a.doctor_id
        JOIN patients p ON p.id = a.patient_id

        WHERE ($1::uuid IS NULL OR a.clinic_id = $1)
          AND ($2::uuid IS NULL OR a.doctor_id = $2)
          AND ($3::timestamptz IS NULL OR a.start_at >= $3)
          AND ($4::timestamptz IS NULL OR a.start_at <= $4)

        ORDER BY a.start_at DESC
        LIMIT 500
        "#,
    )
    .bind(q.clinic_id)
    .bind(q.doctor_id)
    .bind(from_ts)
    .bind(to_ts)
    .fetch_all(&state.db)
    .await
    .map_err(|e| ApiError::Internal(format!("db error: {e}")))?;

    Ok(Json(rows))
}

/* ============================================================
   GET /appointments/{id}
   ============================================================ */

pub async fn get_appointment(
    State(state): State<AppState>,
    _auth: AuthContext,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<AppointmentRow>, ApiError> {
    let row: AppointmentRow = sqlx::query_as::<_, AppointmentRow>(
        r#"
        SELECT id, clinic_id, doctor_id, patient_id, start_at, duration_minutes, status,
               disease_name, virality_rate, patient_age_at_visit, avg_monthly_city_temp,
               country, continent, type_or_reason, notes, created_at, updated_at
        FROM appointments
        WHERE id = $1
        "#,
    )
    .bind(appointment_id)
    .fetch_optional(&state.db)
    .await
    .map_err(|e| ApiError::Internal(format!("db error: {e}")))?
    .ok_or_else(|| ApiError::NotFound("NOT_FOUND", "appointment not found".to_string()))?;

    Ok(Json(row))
}

/* ============================================================
   POST /appointments (create)
   ============================================================ */

#[derive(Debug, Deserialize)]
pub struct CreateAppointmentRequest {
    pub clinic_id: Uuid,
    pub doctor_id: Uuid,
    pub patient_id: Uuid,
    pub start_at: DateTime<Utc>,
    pub duration_minutes: Option<i32>, // default 30
    pub status: Option<String>,        // default "scheduled"
    pub disease_name: Option<String>,
    pub virality_rate: Option<f64>,
    pub patient_age_at_visit: Option<i32>,
    pub avg_monthly_city_temp: Option<f64>,
    pub country: Option<String>,
    pub continent: Option<String>,
    pub type_or_reason: Option<String>,
    pub notes: Option<String>,
}

pub async fn create_appointment(
    State(state): State<AppState>,
    _auth: AuthContext,
    Json(req): Json<CreateAppointmentRequest>,
) -> Result<Json<AppointmentRow>, ApiError> {
    let duration_minutes = req.duration_minutes.unwrap_or(30);
    validate_duration(duration_minutes)?;

    let status = req.status.unwrap_or_else(|| "scheduled".to_string());
    validate_status(&status)?;

    let row: AppointmentRow = sqlx::query_as::<_, AppointmentRow>(
        r#"
        INSERT INTO appointments (
          clinic_id,
          doctor_id,
          patient_id,
          start_at,
          duration_minutes,
          status,
          disease_name,
          virality_rate,
          patient_age_at_visit,
          avg_monthly_city_temp,
          country,
          continent,
          type_or_reason,
          notes
        )
        VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13,$14)
        RETURNING id, clinic_id, doctor_id, patient_id, start_at, duration_minutes, status,
                  disease_name, virality_rate, patient_age_at_visit, avg_monthly_city_temp,
                  country, continent, type_or_reason, notes, created_at, updated_at
        "#,
    )
    .bind(req.clinic_id)
    .bind(req.doctor_id)
    .bind(req.patient_id)
    .bind(req.start_at)
    .bind(duration_minutes)
    .bind(&status)
    .bind(req.disease_name.as_deref())
    .bind(req.virality_rate)
    .bind(req.patient_age_at_visit)
    .bind(req.avg_monthly_city_temp)
    .bind(req.country.as_deref())
    .bind(req.continent.as_deref())
    .bind(req.type_or_reason.as_deref())
    .bind(req.notes.as_deref())
    .fetch_one(&state.db)
    .await
    .map_err(unknown_reference)?;

    Ok(Json(row))
}

/* ============================================================
   PATCH /appointments/{id}
   ============================================================ */

#[derive(Debug, Deserialize)]
pub struct UpdateAppointmentRequest {
    pub clinic_id: Option<Uuid>,
    pub doctor_id: Option<Uuid>,
    pub patient_id: Option<Uuid>,
    pub start_at: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i32>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    pub disease_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    pub virality_rate: Option<Option<f64>>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    pub patient_age_at_visit: Option<Option<i32>>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    pub avg_monthly_city_temp: Option<Option<f64>>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    pub country: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    pub continent: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    pub type_or_reason: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    pub notes: Option<Option<String>>,
}

pub async fn update_appointment(
    State(state): State<AppState>,
    _auth: AuthContext,
    Path(appointment_id): Path<Uuid>,
    Json(req): Json<UpdateAppointmentRequest>,
) -> Result<Json<AppointmentRow>, ApiError> {
    // Load existing, merge, write back (nullable fields use the double-option)
    let existing: AppointmentRow = sqlx::query_as::<_, AppointmentRow>(
        r#"
        SELECT id, clinic_id, doctor_id, patient_id, start_at, duration_minutes, status,
               disease_name, virality_rate, patient_age_at_visit, avg_monthly_city_temp,
               country, continent, type_or_reason, notes, created_at, updated_at
        FROM appointments
        WHERE id = $1
        "#,
    )
    .bind(appointment_id)
    .fetch_optional(&state.db)
    .await
    .map_err(|e| ApiError::Internal(format!("db error: {e}")))?
    .ok_or_else(|| ApiError::NotFound("NOT_FOUND", "appointment not found".to_string()))?;

    let duration_minutes = req.duration_minutes.unwrap_or(existing.duration_minutes);
    validate_duration(duration_minutes)?;

    let status = req.status.unwrap_or_else(|| existing.status.clone());
    validate_status(&status)?;

    let clinic_id = req.clinic_id.unwrap_or(existing.clinic_id);
    let doctor_id = req.doctor_id.unwrap_or(existing.doctor_id);
    let patient_id = req.patient_id.unwrap_or(existing.patient_id);
    let start_at = req.start_at.unwrap_or(existing.start_at);

    let disease_name = req.disease_name.unwrap_or(existing.disease_name);
    let virality_rate = req.virality_rate.unwrap_or(existing.virality_rate);
    let patient_age_at_visit = req.patient_age_at_visit.unwrap_or(existing.patient_age_at_visit);
    let avg_monthly_city_temp = req.avg_monthly_city_temp.unwrap_or(existing.avg_monthly_city_temp);
    let country = req.country.unwrap_or(existing.country);
    let continent = req.continent.unwrap_or(existing.continent);
    let type_or_reason = req.type_or_reason.unwrap_or(existing.type_or_reason);
    let notes = req.notes.unwrap_or(existing.notes);

    let updated: AppointmentRow = sqlx::query_as::<_, AppointmentRow>(
        r#"
        UPDATE appointments
        SET clinic_id = $1,
            doctor_id = $2,
            patient_id = $3,
            start_at = $4,
            duration_minutes = $5,
            status = $6,
            disease_name = $7,
            virality_rate = $8,
            patient_age_at_visit = $9,
            avg_monthly_city_temp = $10,
            country = $11,
            continent = $12,
            type_or_reason = $13,
            notes = $14,
            updated_at = now()
        WHERE id = $15
        RETURNING id, clinic_id, doctor_id, patient_id, start_at, duration_minutes, status,
                  disease_name, virality_rate, patient_age_at_visit, avg_monthly_city_temp,
                  country, continent, type_or_reason, notes, created_at, updated_at
        "#,
    )
    .bind(clinic_id)
    .bind(doctor_id)
    .bind(patient_id)
    .bind(start_at)
    .bind(duration_minutes)
    .bind(&status)
    .bind(disease_name)
    .bind(virality_rate)
    .bind(patient_age_at_visit)
    .bind(avg_monthly_city_temp)
    .bind(country)
    .bind(continent)
    .bind(type_or_reason)
    .bind(notes)
    .bind(appointment_id)
    .fetch_one(&state.db)
    .await
    .map_err(unknown_reference)?;

    Ok(Json(updated))
}

/* ============================================================
   DELETE /appointments/{id}
   ============================================================ */

pub async fn delete_appointment(
    State(state): State<AppState>,
    _auth: AuthContext,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<OkResponse>, ApiError> {
    let result = sqlx::query(r#"DELETE FROM appointments WHERE id = $1"#)
        .bind(appointment_id)
        .execute(&state.db)
        .await
        .map_err(|e| ApiError::Internal(format!("db error: {e}")))?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("NOT_FOUND", "appointment not found".to_string()));
    }

    Ok(Json(OkResponse {
        data: OkData { ok: true },
    }))
}
