// src/reports.rs
//
// Pure aggregation over already-fetched appointment rows: date-range filtering,
// categorical histograms, month buckets and CSV export. No I/O here — routes
// fetch the rows, these functions only derive summaries from them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::AppointmentStatus;

/// Sentinel category for null/missing grouping fields.
/// Using one fixed label keeps category totals equal to the row count.
pub const UNKNOWN: &str = "Unknown";

/// Catch-all category for countries outside the top ranks.
pub const OTHER: &str = "Other";

/// Countries kept as individual chart categories; everything else folds into OTHER.
pub const COUNTRY_TOP_N: usize = 5;

/* ============================================================
   Input / output shapes
   ============================================================ */

/// Projection of an appointments row that reporting consumes.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct ReportRow {
    pub id: Uuid,
    pub clinic_id: Uuid,
    pub start_at: DateTime<Utc>,
    pub status: String,
    pub disease_name: Option<String>,
    pub country: Option<String>,
    pub continent: Option<String>,
    pub virality_rate: Option<f64>,
    pub patient_age_at_visit: Option<i32>,
    pub avg_monthly_city_temp: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCount {
    pub name: String,
    pub value: i64,
}

/// One calendar month of data. `key` ("2025-03") is the chronological sort
/// key; `label` ("Mar 2025") is display-only and never affects ordering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthBucket {
    pub key: String,
    pub label: String,
    pub counts: Vec<CategoryCount>,
}

/// One calendar day of appointments, rows ordered by start time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayGroup {
    pub date: String,
    pub appointments: Vec<ReportRow>,
}

/* ============================================================
   Date filtering
   ============================================================ */

/// Keep rows whose start_at falls inside the inclusive [from, to] day range,
/// interpreted in UTC: `from` at 00:00:00.000, `to` at 23:59:59.999.
/// No bounds → pass-through. from > to → empty, never an error.
pub fn filter_by_date(
    rows: Vec<ReportRow>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Vec<ReportRow> {
    let from_ts = from.map(|d| {
        DateTime::<Utc>::from_naive_utc_and_offset(d.and_hms_opt(0, 0, 0).unwrap(), Utc)
    });
    let to_ts = to.map(|d| {
        DateTime::<Utc>::from_naive_utc_and_offset(d.and_hms_milli_opt(23, 59, 59, 999).unwrap(), Utc)
    });

    rows.into_iter()
        .filter(|r| from_ts.map_or(true, |f| r.start_at >= f))
        .filter(|r| to_ts.map_or(true, |t| r.start_at <= t))
        .collect()
}

/* ============================================================
   Categorical histograms
   ============================================================ */

fn bump(out: &mut Vec<CategoryCount>, name: &str) {
    match out.iter_mut().find(|c| c.name == name) {
        Some(c) => c.value += 1,
        None => out.push(CategoryCount {
            name: name.to_string(),
            value: 1,
        }),
    }
}

/// Count rows by a single nullable field, collapsing null to UNKNOWN.
/// Entries come back in first-seen order.
pub fn histogram<F>(rows: &[ReportRow], field: F) -> Vec<CategoryCount>
where
    F: for<'a> Fn(&'a ReportRow) -> Option<&'a str>,
{
    let mut out = Vec::new();
    for row in rows {
        bump(&mut out, field(row).unwrap_or(UNKNOWN));
    }
    out
}

/// Count plain string values in first-seen order (dashboard counters).
pub fn count_strings<I>(values: I) -> Vec<CategoryCount>
where
    I: IntoIterator<Item = String>,
{
    let mut out = Vec::new();
    for v in values {
        bump(&mut out, &v);
    }
    out
}

pub fn by_disease(rows: &[ReportRow]) -> Vec<CategoryCount> {
    histogram(rows, |r| r.disease_name.as_deref())
}

pub fn by_country(rows: &[ReportRow]) -> Vec<CategoryCount> {
    histogram(rows, |r| r.country.as_deref())
}

pub fn by_continent(rows: &[ReportRow]) -> Vec<CategoryCount> {
    histogram(rows, |r| r.continent.as_deref())
}

/// Status histogram in the fixed enumeration order for statuses present;
/// unrecognized status strings keep their first-seen order at the end.
/// Absent statuses are omitted, not zero-filled.
pub fn by_status(rows: &[ReportRow]) -> Vec<CategoryCount> {
    let mut out = histogram(rows, |r| Some(r.status.as_str()));
    let rank = |name: &str| {
        AppointmentStatus::ALL
            .iter()
            .position(|s| s.as_str() == name)
            .unwrap_or(AppointmentStatus::ALL.len())
    };
    out.sort_by_key(|c| rank(&c.name));
    out
}

/* ============================================================
   Month bucketing
   ============================================================ */

/// Chronological month key of a start timestamp (UTC calendar): "2025-03".
/// Zero-padded so lexicographic order equals chronological order.
pub fn month_key(start_at: &DateTime<Utc>) -> String {
    start_at.format("%Y-%m").to_string()
}

/// Human label for a month key: "2025-03" → "Mar 2025".
/// A malformed key passes through unchanged.
pub fn month_label(key: &str) -> String {
    match NaiveDate::parse_from_str(&format!("{key}-01"), "%Y-%m-%d") {
        Ok(d) => d.format("%b %Y").to_string(),
        Err(_) => key.to_string(),
    }
}

/// Bucket rows by calendar month with a fixed category set. Every bucket
/// carries every category, zero-filled, so missing data renders as 0 rather
/// than a hole. Months with no rows are absent entirely.
fn monthly_buckets<F>(rows: &[ReportRow], categories: Vec<String>, category_of: F) -> Vec<MonthBucket>
where
    F: Fn(&ReportRow) -> String,
{
    let mut keys: Vec<String> = Vec::new();
    for row in rows {
        let key = month_key(&row.start_at);
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
    keys.sort();

    let mut buckets: Vec<MonthBucket> = keys
        .into_iter()
        .map(|key| MonthBucket {
            label: month_label(&key),
            counts: categories
                .iter()
                .map(|name| CategoryCount {
                    name: name.clone(),
                    value: 0,
                })
                .collect(),
            key,
        })
        .collect();

    for row in rows {
        let key = month_key(&row.start_at);
        let name = category_of(row);
        if let Some(bucket) = buckets.iter_mut().find(|b| b.key == key) {
            if let Some(count) = bucket.counts.iter_mut().find(|c| c.name == name) {
                count.value += 1;
            }
        }
    }

    buckets
}

/// Month buckets by disease, categories sorted alphabetically for stable
/// cross-render chart ordering.
pub fn monthly_by_disease(rows: &[ReportRow]) -> Vec<MonthBucket> {
    let mut categories: Vec<String> = by_disease(rows).into_iter().map(|c| c.name).collect();
    categories.sort();
    monthly_buckets(rows, categories, |r| {
        r.disease_name.as_deref().unwrap_or(UNKNOWN).to_string()
    })
}

/// Month buckets by continent, categories sorted alphabetically.
pub fn monthly_by_continent(rows: &[ReportRow]) -> Vec<MonthBucket> {
    let mut categories: Vec<String> = by_continent(rows).into_iter().map(|c| c.name).collect();
    categories.sort();
    monthly_buckets(rows, categories, |r| {
        r.continent.as_deref().unwrap_or(UNKNOWN).to_string()
    })
}

/* ============================================================
   Top-N collapsing (country only)
   ============================================================ */

/// Top `n` countries by total count across the whole set, ranked descending.
/// Ties keep first-encountered order (the underlying sort is stable).
pub fn top_countries(rows: &[ReportRow], n: usize) -> Vec<String> {
    let mut totals = by_country(rows);
    totals.sort_by(|a, b| b.value.cmp(&a.value));
    totals.truncate(n);
    totals.into_iter().map(|c| c.name).collect()
}

/// Month buckets by country with top-5 + OTHER collapsing: the top five
/// countries overall keep their own key in every bucket (zero-filled), and
/// everything else — UNKNOWN included — folds into OTHER. At most six
/// categories regardless of how many countries the data contains.
pub fn monthly_by_country(rows: &[ReportRow]) -> Vec<MonthBucket> {
    let top = top_countries(rows, COUNTRY_TOP_N);
    let folded = by_country(rows).len() > top.len();

    let mut categories = top.clone();
    if folded {
        categories.push(OTHER.to_string());
    }

    monthly_buckets(rows, categories, move |r| {
        let name = r.country.as_deref().unwrap_or(UNKNOWN);
        if top.iter().any(|t| t == name) {
            name.to_string()
        } else {
            OTHER.to_string()
        }
    })
}

/* ============================================================
   Daily grouping
   ============================================================ */

/// Group rows by UTC calendar day, days ascending, rows within a day ordered
/// by start time. Serves the per-clinic daily report listing.
pub fn daily_groups(rows: &[ReportRow]) -> Vec<DayGroup> {
    let mut keys: Vec<String> = Vec::new();
    for row in rows {
        let key = row.start_at.format("%Y-%m-%d").to_string();
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
    keys.sort();

    keys.into_iter()
        .map(|date| {
            let mut appointments: Vec<ReportRow> = rows
                .iter()
                .filter(|r| r.start_at.format("%Y-%m-%d").to_string() == date)
                .cloned()
                .collect();
            appointments.sort_by_key(|r| r.start_at);
            DayGroup { date, appointments }
        })
        .collect()
}

/* ============================================================
   CSV export
   ============================================================ */

/// Serialize the filtered (not bucketed) rows as CSV.
///
/// Null fields become empty cells here — not UNKNOWN; the export contract
/// differs from on-screen aggregation on purpose. Values are joined with
/// commas verbatim; fields containing delimiters are outside the contract.
pub fn export_csv(rows: &[ReportRow]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(
        "start_at,disease_name,virality_rate,patient_age_at_visit,avg_monthly_city_temp,country,continent,status"
            .to_string(),
    );
    for r in rows {
        lines.push(
            [
                r.start_at.to_rfc3339(),
                r.disease_name.clone().unwrap_or_default(),
                r.virality_rate.map(|v| v.to_string()).unwrap_or_default(),
                r.patient_age_at_visit.map(|v| v.to_string()).unwrap_or_default(),
                r.avg_monthly_city_temp.map(|v| v.to_string()).unwrap_or_default(),
                r.country.clone().unwrap_or_default(),
                r.continent.clone().unwrap_or_default(),
                r.status.clone(),
            ]
            .join(","),
        );
    }
    lines.join("\n")
}

/// Download filename encoding the active bounds, "all" where a bound is unset.
pub fn export_filename(from: Option<NaiveDate>, to: Option<NaiveDate>) -> String {
    let part = |d: Option<NaiveDate>| {
        d.map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "all".to_string())
    };
    format!("mederp-report-{}-{}.csv", part(from), part(to))
}

/* ============================================================
   Tests
   ============================================================ */

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn row(start: &str, status: &str) -> ReportRow {
        ReportRow {
            id: Uuid::new_v5(&Uuid::NAMESPACE_OID, start.as_bytes()),
            clinic_id: Uuid::NAMESPACE_OID,
            start_at: ts(start),
            status: status.to_string(),
            disease_name: None,
            country: None,
            continent: None,
            virality_rate: None,
            patient_age_at_visit: None,
            avg_monthly_city_temp: None,
        }
    }

    fn geo_row(start: &str, disease: Option<&str>, country: Option<&str>, continent: Option<&str>) -> ReportRow {
        ReportRow {
            disease_name: disease.map(str::to_string),
            country: country.map(str::to_string),
            continent: continent.map(str::to_string),
            ..row(start, "completed")
        }
    }

    fn count_of(counts: &[CategoryCount], name: &str) -> i64 {
        counts.iter().find(|c| c.name == name).map(|c| c.value).unwrap_or(-1)
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    /* ---------- date filter ---------- */

    #[test]
    fn no_bounds_pass_through_unmodified() {
        let rows = vec![
            row("2025-03-01T10:00:00Z", "scheduled"),
            row("2025-01-01T10:00:00Z", "completed"),
        ];
        let out = filter_by_date(rows.clone(), None, None);
        assert_eq!(out, rows);
    }

    #[test]
    fn bounds_are_inclusive_to_the_millisecond() {
        let at_midnight = row("2025-02-01T00:00:00Z", "scheduled");
        let end_of_day = row("2025-02-28T23:59:59.999Z", "scheduled");
        let ms_before = row("2025-01-31T23:59:59.999Z", "scheduled");
        let ms_after = row("2025-03-01T00:00:00Z", "scheduled");

        let rows = vec![at_midnight.clone(), end_of_day.clone(), ms_before, ms_after];
        let out = filter_by_date(rows, Some(date("2025-02-01")), Some(date("2025-02-28")));
        assert_eq!(out, vec![at_midnight, end_of_day]);
    }

    #[test]
    fn only_from_bound() {
        let rows = vec![
            row("2025-01-15T09:00:00Z", "scheduled"),
            row("2025-02-15T09:00:00Z", "scheduled"),
        ];
        let out = filter_by_date(rows, Some(date("2025-02-01")), None);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].start_at, ts("2025-02-15T09:00:00Z"));
    }

    #[test]
    fn inverted_range_is_empty_not_an_error() {
        let rows = vec![row("2025-02-15T09:00:00Z", "scheduled")];
        let out = filter_by_date(rows, Some(date("2025-03-01")), Some(date("2025-01-01")));
        assert!(out.is_empty());
    }

    /* ---------- histograms ---------- */

    #[test]
    fn status_histogram_counts_and_fixed_order() {
        // shuffled input; output must follow the declared enumeration order
        let rows = vec![
            row("2025-01-01T08:00:00Z", "no_show"),
            row("2025-01-02T08:00:00Z", "completed"),
            row("2025-01-03T08:00:00Z", "scheduled"),
            row("2025-01-04T08:00:00Z", "completed"),
        ];
        let out = by_status(&rows);
        let names: Vec<&str> = out.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["scheduled", "completed", "no_show"]);
        assert_eq!(count_of(&out, "scheduled"), 1);
        assert_eq!(count_of(&out, "completed"), 2);
        assert_eq!(count_of(&out, "no_show"), 1);
    }

    #[test]
    fn null_disease_collapses_to_unknown() {
        let rows = vec![
            geo_row("2025-01-01T08:00:00Z", None, None, None),
            geo_row("2025-01-02T08:00:00Z", None, None, None),
            geo_row("2025-01-03T08:00:00Z", Some("COVID"), None, None),
        ];
        let out = by_disease(&rows);
        assert_eq!(count_of(&out, UNKNOWN), 2);
        assert_eq!(count_of(&out, "COVID"), 1);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn histogram_conservation() {
        let rows = vec![
            geo_row("2025-01-01T08:00:00Z", Some("Flu"), Some("Japan"), Some("Asia")),
            geo_row("2025-01-02T08:00:00Z", None, None, None),
            geo_row("2025-02-03T08:00:00Z", Some("Flu"), Some("Kenya"), Some("Africa")),
            geo_row("2025-03-04T08:00:00Z", Some("COVID"), None, Some("Asia")),
            geo_row("2025-03-05T08:00:00Z", None, Some("Japan"), None),
        ];
        for histo in [by_status(&rows), by_disease(&rows), by_country(&rows), by_continent(&rows)] {
            let total: i64 = histo.iter().map(|c| c.value).sum();
            assert_eq!(total, rows.len() as i64);
        }
    }

    /* ---------- month bucketing ---------- */

    #[test]
    fn month_key_and_label_derivation() {
        let t = ts("2025-03-15T23:30:00Z");
        assert_eq!(month_key(&t), "2025-03");
        assert_eq!(month_label("2025-03"), "Mar 2025");
        assert_eq!(month_label("not-a-key"), "not-a-key");
    }

    #[test]
    fn months_are_chronological_and_absent_months_are_skipped() {
        let rows = vec![
            geo_row("2025-03-01T08:00:00Z", Some("COVID"), None, None),
            geo_row("2025-01-05T08:00:00Z", Some("COVID"), None, None),
            geo_row("2025-01-20T08:00:00Z", Some("COVID"), None, None),
        ];
        let buckets = monthly_by_disease(&rows);
        let labels: Vec<&str> = buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Jan 2025", "Mar 2025"]);
        assert_eq!(count_of(&buckets[0].counts, "COVID"), 2);
        assert_eq!(count_of(&buckets[1].counts, "COVID"), 1);
    }

    #[test]
    fn every_bucket_is_zero_filled_over_the_full_category_set() {
        let rows = vec![
            geo_row("2025-01-05T08:00:00Z", Some("Ebola"), None, None),
            geo_row("2025-02-05T08:00:00Z", Some("COVID"), None, None),
            geo_row("2025-02-06T08:00:00Z", None, None, None),
        ];
        let buckets = monthly_by_disease(&rows);
        assert_eq!(buckets.len(), 2);
        for bucket in &buckets {
            // alphabetical categories, identical in every bucket
            let names: Vec<&str> = bucket.counts.iter().map(|c| c.name.as_str()).collect();
            assert_eq!(names, vec!["COVID", "Ebola", UNKNOWN]);
        }
        assert_eq!(count_of(&buckets[0].counts, "COVID"), 0);
        assert_eq!(count_of(&buckets[0].counts, "Ebola"), 1);
        assert_eq!(count_of(&buckets[1].counts, "COVID"), 1);
        assert_eq!(count_of(&buckets[1].counts, UNKNOWN), 1);
    }

    /* ---------- top-N collapsing ---------- */

    /// Countries A..=E get totals 50,40,30,20,10 spread over Jan+Feb;
    /// F (5, Jan only) and G (3, Feb only) must fold into OTHER.
    fn top_n_fixture() -> Vec<ReportRow> {
        let mut rows = Vec::new();
        let plan: &[(&str, i64)] = &[("A", 50), ("B", 40), ("C", 30), ("D", 20), ("E", 10)];
        for &(country, total) in plan {
            for i in 0..total {
                let month = if i % 2 == 0 { "01" } else { "02" };
                let start = format!("2025-{month}-{:02}T08:00:00Z", (i % 27) + 1);
                rows.push(geo_row(&start, None, Some(country), None));
            }
        }
        for i in 0..5 {
            rows.push(geo_row(&format!("2025-01-{:02}T12:00:00Z", i + 1), None, Some("F"), None));
        }
        for i in 0..3 {
            rows.push(geo_row(&format!("2025-02-{:02}T12:00:00Z", i + 1), None, Some("G"), None));
        }
        rows
    }

    #[test]
    fn top_five_selection_by_total_count() {
        let rows = top_n_fixture();
        assert_eq!(top_countries(&rows, COUNTRY_TOP_N), vec!["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn top_country_ties_break_by_first_encounter() {
        let rows = vec![
            geo_row("2025-01-01T08:00:00Z", None, Some("X"), None),
            geo_row("2025-01-02T08:00:00Z", None, Some("Y"), None),
        ];
        assert_eq!(top_countries(&rows, 1), vec!["X"]);
    }

    #[test]
    fn country_buckets_have_at_most_six_identical_categories() {
        let rows = top_n_fixture();
        let buckets = monthly_by_country(&rows);
        assert_eq!(buckets.len(), 2);
        let expected = vec!["A", "B", "C", "D", "E", OTHER];
        for bucket in &buckets {
            let names: Vec<&str> = bucket.counts.iter().map(|c| c.name.as_str()).collect();
            assert_eq!(names, expected);
        }
    }

    #[test]
    fn folded_countries_distribute_into_other_per_month() {
        let rows = top_n_fixture();
        let buckets = monthly_by_country(&rows);
        // F's 5 rows land in Jan, G's 3 in Feb
        assert_eq!(count_of(&buckets[0].counts, OTHER), 5);
        assert_eq!(count_of(&buckets[1].counts, OTHER), 3);
        let total_other: i64 = buckets.iter().map(|b| count_of(&b.counts, OTHER)).sum();
        assert_eq!(total_other, 8);
    }

    #[test]
    fn no_other_category_when_nothing_folds() {
        let rows = vec![
            geo_row("2025-01-01T08:00:00Z", None, Some("Japan"), None),
            geo_row("2025-01-02T08:00:00Z", None, Some("Kenya"), None),
        ];
        let buckets = monthly_by_country(&rows);
        assert!(buckets[0].counts.iter().all(|c| c.name != OTHER));
    }

    #[test]
    fn unknown_country_folds_into_other_when_outranked() {
        let mut rows = Vec::new();
        for country in ["A", "B", "C", "D", "E"] {
            for i in 0..3 {
                rows.push(geo_row(&format!("2025-01-{:02}T08:00:00Z", i + 1), None, Some(country), None));
            }
        }
        rows.push(geo_row("2025-01-09T08:00:00Z", None, None, None));
        let buckets = monthly_by_country(&rows);
        assert_eq!(count_of(&buckets[0].counts, OTHER), 1);
        assert!(buckets[0].counts.iter().all(|c| c.name != UNKNOWN));
    }

    /* ---------- idempotence ---------- */

    #[test]
    fn aggregation_is_idempotent() {
        let rows = top_n_fixture();
        assert_eq!(by_status(&rows), by_status(&rows));
        assert_eq!(by_disease(&rows), by_disease(&rows));
        assert_eq!(monthly_by_country(&rows), monthly_by_country(&rows));
        assert_eq!(monthly_by_disease(&rows), monthly_by_disease(&rows));
        assert_eq!(daily_groups(&rows), daily_groups(&rows));
        assert_eq!(export_csv(&rows), export_csv(&rows));
    }

    /* ---------- daily grouping ---------- */

    #[test]
    fn daily_groups_sort_days_and_times() {
        let rows = vec![
            row("2025-01-02T15:00:00Z", "scheduled"),
            row("2025-01-01T09:00:00Z", "scheduled"),
            row("2025-01-02T08:00:00Z", "scheduled"),
        ];
        let days = daily_groups(&rows);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, "2025-01-01");
        assert_eq!(days[1].date, "2025-01-02");
        assert_eq!(days[1].appointments[0].start_at, ts("2025-01-02T08:00:00Z"));
        assert_eq!(days[1].appointments[1].start_at, ts("2025-01-02T15:00:00Z"));
    }

    /* ---------- CSV export ---------- */

    #[test]
    fn csv_nulls_become_empty_cells_not_unknown() {
        let rows = vec![geo_row("2025-01-05T09:00:00Z", None, None, None)];
        let csv = export_csv(&rows);
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "start_at,disease_name,virality_rate,patient_age_at_visit,avg_monthly_city_temp,country,continent,status"
        );
        let cells: Vec<&str> = lines.next().unwrap().split(',').collect();
        assert_eq!(cells.len(), 8);
        assert_eq!(cells[0], "2025-01-05T09:00:00+00:00");
        for cell in &cells[1..7] {
            assert_eq!(*cell, "");
        }
        assert_eq!(cells[7], "completed");
    }

    #[test]
    fn csv_carries_numeric_fields_through() {
        let mut r = geo_row("2025-01-05T09:00:00Z", Some("COVID"), Some("Japan"), Some("Asia"));
        r.virality_rate = Some(1.5);
        r.patient_age_at_visit = Some(42);
        r.avg_monthly_city_temp = Some(-3.5);
        let csv = export_csv(&[r]);
        let cells: Vec<&str> = csv.lines().nth(1).unwrap().split(',').collect();
        assert_eq!(cells[1], "COVID");
        assert_eq!(cells[2], "1.5");
        assert_eq!(cells[3], "42");
        assert_eq!(cells[4], "-3.5");
        assert_eq!(cells[5], "Japan");
        assert_eq!(cells[6], "Asia");
    }

    #[test]
    fn export_filename_encodes_bounds_or_all() {
        assert_eq!(export_filename(None, None), "mederp-report-all-all.csv");
        assert_eq!(
            export_filename(Some(date("2025-01-01")), None),
            "mederp-report-2025-01-01-all.csv"
        );
        assert_eq!(
            export_filename(Some(date("2025-01-01")), Some(date("2025-03-31"))),
            "mederp-report-2025-01-01-2025-03-31.csv"
        );
    }
}
