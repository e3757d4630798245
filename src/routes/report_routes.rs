// src/routes/report_routes.rs

use axum::{
    Json, Router,
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    routing::get,
};
use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::ApiError,
    middleware::auth_context::AuthContext,
    models::AppState,
    reports::{self, CategoryCount, DayGroup, MonthBucket, ReportRow},
    routes::appointment_routes::parse_day_param,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/reports/summary", get(get_report_summary))
        .route("/reports/monthly", get(get_report_monthly))
        .route("/reports/daily", get(get_report_daily))
        .route("/reports/export", get(export_report_csv))
}

/* ============================================================
   Shared query handling
   ============================================================ */

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub clinic_id: Option<Uuid>,
    // YYYY-MM-DD, inclusive day bounds (UTC)
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

/// Fetch the report projection, clinic-filtered in SQL; date filtering and all
/// aggregation happen in crate::reports on the returned rows.
async fn fetch_report_rows(
    state: &AppState,
    clinic_id: Option<Uuid>,
) -> Result<Vec<ReportRow>, ApiError> {
    sqlx::query_as::<_, ReportRow>(
        r#"
        SELECT id, clinic_id, start_at, status, disease_name, country, continent,
               virality_rate, patient_age_at_visit, avg_monthly_city_temp
        FROM appointments
        WHERE ($1::uuid IS NULL OR clinic_id = $1)
        ORDER BY start_at ASC
        "#,
    )
    .bind(clinic_id)
    .fetch_all(&state.db)
    .await
    .map_err(|e| ApiError::Internal(format!("db error: {e}")))
}

async fn fetch_filtered(
    state: &AppState,
    q: &ReportQuery,
) -> Result<(Vec<ReportRow>, Option<NaiveDate>, Option<NaiveDate>), ApiError> {
    let from = parse_day_param(&q.date_from, "date_from")?;
    let to = parse_day_param(&q.date_to, "date_to")?;
    let rows = fetch_report_rows(state, q.clinic_id).await?;
    Ok((reports::filter_by_date(rows, from, to), from, to))
}

/* ============================================================
   GET /reports/summary
   ============================================================ */

#[derive(Debug, Serialize)]
pub struct ReportSummaryResponse {
    pub data: ReportSummaryData,
}

#[derive(Debug, Serialize)]
pub struct ReportSummaryData {
    pub total_in_range: usize,
    pub by_status: Vec<CategoryCount>,
    pub by_disease: Vec<CategoryCount>,
    pub by_country: Vec<CategoryCount>,
    pub by_continent: Vec<CategoryCount>,
}

pub async fn get_report_summary(
    State(state): State<AppState>,
    _auth: AuthContext,
    Query(q): Query<ReportQuery>,
) -> Result<Json<ReportSummaryResponse>, ApiError> {
    let (rows, _, _) = fetch_filtered(&state, &q).await?;

    Ok(Json(ReportSummaryResponse {
        data: ReportSummaryData {
            total_in_range: rows.len(),
            by_status: reports::by_status(&rows),
            by_disease: reports::by_disease(&rows),
            by_country: reports::by_country(&rows),
            by_continent: reports::by_continent(&rows),
        },
    }))
}

/* ============================================================
   GET /reports/monthly
   ============================================================ */

#[derive(Debug, Deserialize)]
pub struct MonthlyQuery {
    pub group_by: String,
    pub clinic_id: Option<Uuid>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MonthlyReportResponse {
    pub data: Vec<MonthBucket>,
}

pub async fn get_report_monthly(
    State(state): State<AppState>,
    _auth: AuthContext,
    Query(q): Query<MonthlyQuery>,
) -> Result<Json<MonthlyReportResponse>, ApiError> {
    let report_query = ReportQuery {
        clinic_id: q.clinic_id,
        date_from: q.date_from,
        date_to: q.date_to,
    };
    let (rows, _, _) = fetch_filtered(&state, &report_query).await?;

    let buckets = match q.group_by.as_str() {
        "disease" => reports::monthly_by_disease(&rows),
        "continent" => reports::monthly_by_continent(&rows),
        "country" => reports::monthly_by_country(&rows),
        _ => {
            return Err(ApiError::BadRequest(
                "VALIDATION_ERROR",
                "group_by must be one of disease, continent, country".to_string(),
            ));
        }
    };

    Ok(Json(MonthlyReportResponse { data: buckets }))
}

/* ============================================================
   GET /reports/daily
   ============================================================ */

#[derive(Debug, Serialize)]
pub struct DailyReportResponse {
    pub data: Vec<DayGroup>,
}

pub async fn get_report_daily(
    State(state): State<AppState>,
    _auth: AuthContext,
    Query(q): Query<ReportQuery>,
) -> Result<Json<DailyReportResponse>, ApiError> {
    let (rows, _, _) = fetch_filtered(&state, &q).await?;

    Ok(Json(DailyReportResponse {
        data: reports::daily_groups(&rows),
    }))
}

/* ============================================================
   GET /reports/export  (CSV download)
   ============================================================ */

pub async fn export_report_csv(
    State(state): State<AppState>,
    _auth: AuthContext,
    Query(q): Query<ReportQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let (rows, from, to) = fetch_filtered(&state, &q).await?;

    let csv = reports::export_csv(&rows);
    let filename = reports::export_filename(from, to);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        csv,
    ))
}

/* ============================================================
   GET /dashboard
   ============================================================ */

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub data: DashboardData,
}

#[derive(Debug, Serialize)]
pub struct DashboardData {
    pub total_appointments: i64,
    pub appointments_this_month: i64,
    pub total_patients: i64,
    pub status_counts: Vec<CategoryCount>,
    pub disease_counts: Vec<CategoryCount>,
}

pub async fn get_dashboard(
    State(state): State<AppState>,
    _auth: AuthContext,
) -> Result<Json<DashboardResponse>, ApiError> {
    let total_appointments: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM appointments"#)
        .fetch_one(&state.db)
        .await
        .map_err(|e| ApiError::Internal(format!("db error: {e}")))?;

    let total_patients: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM patients"#)
        .fetch_one(&state.db)
        .await
        .map_err(|e| ApiError::Internal(format!("db error: {e}")))?;

    // Current UTC month window: [first of month, first of next month)
    let today = Utc::now().date_naive();
    let month_start = NaiveDate::from_ymd_opt(today.year(), today.month(), 1).unwrap();
    let next_month_start = if today.month() == 12 {
        NaiveDate::from_ymd_opt(today.year() + 1, 1, 1).unwrap()
    } else {
        NaiveDate::from_ymd_opt(today.year(), today.month() + 1, 1).unwrap()
    };

    let appointments_this_month: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM appointments
        WHERE start_at >= $1
          AND start_at <  $2
        "#,
    )
    .bind(chrono::DateTime::<Utc>::from_naive_utc_and_offset(
        month_start.and_hms_opt(0, 0, 0).unwrap(),
        Utc,
    ))
    .bind(chrono::DateTime::<Utc>::from_naive_utc_and_offset(
        next_month_start.and_hms_opt(0, 0, 0).unwrap(),
        Utc,
    ))
    .fetch_one(&state.db)
    .await
    .map_err(|e| ApiError::Internal(format!("db error: {e}")))?;

    // The dashboard skips NULL status/disease instead of collapsing to Unknown;
    // only the report screens use the sentinel.
    let statuses: Vec<String> =
        sqlx::query_scalar(r#"SELECT status FROM appointments WHERE status IS NOT NULL"#)
            .fetch_all(&state.db)
            .await
            .map_err(|e| ApiError::Internal(format!("db error: {e}")))?;

    let diseases: Vec<String> =
        sqlx::query_scalar(r#"SELECT disease_name FROM appointments WHERE disease_name IS NOT NULL"#)
            .fetch_all(&state.db)
            .await
            .map_err(|e| ApiError::Internal(format!("db error: {e}")))?;

    Ok(Json(DashboardResponse {
        data: DashboardData {
            total_appointments,
            appointments_this_month,
            total_patients,
            status_counts: reports::count_strings(statuses),
            disease_counts: reports::count_strings(diseases),
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_payload_shape_matches_the_chart_contract() {
        let data = ReportSummaryData {
            total_in_range: 2,
            by_status: vec![CategoryCount {
                name: "scheduled".into(),
                value: 2,
            }],
            by_disease: vec![CategoryCount {
                name: "COVID".into(),
                value: 2,
            }],
            by_country: vec![],
            by_continent: vec![],
        };
        let v = serde_json::to_value(ReportSummaryResponse { data }).unwrap();
        assert_eq!(v["data"]["total_in_range"], 2);
        assert_eq!(v["data"]["by_status"][0]["name"], "scheduled");
        assert_eq!(v["data"]["by_status"][0]["value"], 2);
    }

    #[test]
    fn monthly_payload_keeps_key_and_label_separate() {
        let bucket = MonthBucket {
            key: "2025-03".into(),
            label: "Mar 2025".into(),
            counts: vec![],
        };
        let v = serde_json::to_value(MonthlyReportResponse { data: vec![bucket] }).unwrap();
        assert_eq!(v["data"][0]["key"], "2025-03");
        assert_eq!(v["data"][0]["label"], "Mar 2025");
    }
}
