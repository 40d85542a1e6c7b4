use std::sync::Arc;

use axum::{extract::Query, response::IntoResponse, Extension, Json};
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};

use crate::{
    db::{AppointmentExt, ReportExt},
    dtos::appointmentdtos::FilterAppointmentDto,
    dtos::reportdtos::{
        DashboardResponseDto, RangeReportResponseDto, ReportRangeQueryDto,
        SummaryReportResponseDto, UtilizationReportResponseDto,
    },
    error::HttpError,
    AppState,
};

const DEFAULT_RANGE_DAYS: i64 = 30;

/// Nominal monthly capacity used by the occupancy figure: 30 days of 12
/// working hours, the same reference the operators report against.
const REFERENCE_MINUTES: f64 = 30.0 * 12.0 * 60.0;

/// Missing bounds default to the last 30 days ending today.
fn resolve_range(
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<(NaiveDate, NaiveDate), HttpError> {
    let to = to.unwrap_or(today);
    let from = from.unwrap_or(to - Duration::days(DEFAULT_RANGE_DAYS));

    if from > to {
        return Err(HttpError::bad_request(
            "Intervalo de datas inválido: a data inicial é posterior à final".to_string(),
        ));
    }

    Ok((from, to))
}

/// Half-open instant bounds covering both days in full.
fn range_bounds(from: NaiveDate, to: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    (
        from.and_time(NaiveTime::MIN).and_utc(),
        (to + Duration::days(1)).and_time(NaiveTime::MIN).and_utc(),
    )
}

fn occupancy_rate(total_minutes: i64) -> f64 {
    let rate = total_minutes as f64 / REFERENCE_MINUTES * 100.0;
    (rate * 100.0).round() / 100.0
}

pub async fn dashboard(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let stats = app_state
        .db_client
        .get_dashboard_stats()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(DashboardResponseDto {
        status: "success".to_string(),
        stats,
    }))
}

pub async fn summary(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let today = Utc::now().date_naive();
    let month_start = today
        .with_day(1)
        .unwrap_or(today)
        .and_time(NaiveTime::MIN)
        .and_utc();

    let stats = app_state
        .db_client
        .get_dashboard_stats()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let appointments_this_month = app_state
        .db_client
        .count_appointments_created_since(month_start)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let total_minutes = app_state
        .db_client
        .get_total_scheduled_minutes()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let by_status = app_state
        .db_client
        .get_status_counts()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let by_terminal = app_state
        .db_client
        .get_terminal_counts()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(SummaryReportResponseDto {
        status: "success".to_string(),
        total_appointments: stats.total_appointments,
        appointments_this_month,
        occupancy_rate: occupancy_rate(total_minutes),
        by_status,
        by_terminal,
    }))
}

pub async fn appointments_report(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query): Query<ReportRangeQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    let (from, to) = resolve_range(query.from, query.to, Utc::now().date_naive())?;
    let (range_start, range_end) = range_bounds(from, to);

    let appointments = app_state
        .db_client
        .get_appointments_between(range_start, range_end)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let now = Utc::now();
    let appointments: Vec<FilterAppointmentDto> = appointments
        .into_iter()
        .map(|details| FilterAppointmentDto::filter(details, now))
        .collect();

    Ok(Json(RangeReportResponseDto {
        status: "success".to_string(),
        from,
        to,
        results: appointments.len() as i64,
        appointments,
    }))
}

pub async fn dock_utilization(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let docks = app_state
        .db_client
        .get_dock_utilization()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(UtilizationReportResponseDto {
        status: "success".to_string(),
        docks,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn missing_bounds_default_to_the_last_thirty_days() {
        let today = day(2025, 10, 4);
        let (from, to) = resolve_range(None, None, today).unwrap();
        assert_eq!(to, today);
        assert_eq!(from, day(2025, 9, 4));
    }

    #[test]
    fn explicit_bounds_are_kept() {
        let (from, to) = resolve_range(
            Some(day(2025, 10, 1)),
            Some(day(2025, 10, 15)),
            day(2025, 12, 1),
        )
        .unwrap();
        assert_eq!((from, to), (day(2025, 10, 1), day(2025, 10, 15)));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let result = resolve_range(Some(day(2025, 10, 15)), Some(day(2025, 10, 1)), day(2025, 12, 1));
        assert!(result.is_err());
    }

    #[test]
    fn bounds_cover_both_end_days_in_full() {
        let (start, end) = range_bounds(day(2025, 10, 1), day(2025, 10, 2));
        assert_eq!(start.to_rfc3339(), "2025-10-01T00:00:00+00:00");
        assert_eq!(end.to_rfc3339(), "2025-10-03T00:00:00+00:00");
    }

    #[test]
    fn occupancy_is_a_rounded_percentage_of_the_reference() {
        assert_eq!(occupancy_rate(0), 0.0);
        // 2160 of the 21600 reference minutes.
        assert_eq!(occupancy_rate(2160), 10.0);
        assert_eq!(occupancy_rate(7), 0.03);
    }
}
