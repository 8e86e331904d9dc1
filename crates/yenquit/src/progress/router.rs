use axum::extract::rejection::JsonRejection;
use axum::{routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use super::calendar::{month_calendar, MonthCalendar};
use super::domain::{entries_from_records, DailyLogRecord};
use super::streak::{summarize, StreakSummary};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub(crate) struct LogsRequest {
    pub(crate) logs: Vec<DailyLogRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CalendarRequest {
    pub(crate) logs: Vec<DailyLogRecord>,
    pub(crate) year: i32,
    pub(crate) month: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct LongestStreakResponse {
    pub(crate) longest_streak: u32,
}

/// Stateless endpoints computing dashboard progress from a batch of daily logs.
pub fn progress_router() -> Router {
    Router::new()
        .route("/api/v1/progress/streak", post(streak_handler))
        .route("/api/v1/progress/summary", post(summary_handler))
        .route("/api/v1/progress/calendar", post(calendar_handler))
}

pub(crate) async fn streak_handler(
    payload: Result<Json<LogsRequest>, JsonRejection>,
) -> Result<Json<LongestStreakResponse>, AppError> {
    let Json(request) = payload?;
    let entries = entries_from_records(request.logs)?;
    let longest_streak = summarize(&entries).longest_streak;
    Ok(Json(LongestStreakResponse { longest_streak }))
}

pub(crate) async fn summary_handler(
    payload: Result<Json<LogsRequest>, JsonRejection>,
) -> Result<Json<StreakSummary>, AppError> {
    let Json(request) = payload?;
    let entries = entries_from_records(request.logs)?;
    Ok(Json(summarize(&entries)))
}

pub(crate) async fn calendar_handler(
    payload: Result<Json<CalendarRequest>, JsonRejection>,
) -> Result<Json<MonthCalendar>, AppError> {
    let Json(request) = payload?;
    let entries = entries_from_records(request.logs)?;
    let calendar = month_calendar(&entries, request.year, request.month)?;
    Ok(Json(calendar))
}
