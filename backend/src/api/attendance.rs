use axum::extract::State;
use axum::http::StatusCode;

use super::extract::{Json, Path, Query};
use crate::error::AppError;
use crate::models::{AttendanceRecord, DayQuery, PresenceUpdate, ReportPresenceRequest, ResetReport};
use crate::services::{ReconcileOutcome, Reconciled};
use crate::state::AppState;

fn reconciled_response(reconciled: Reconciled) -> (StatusCode, Json<AttendanceRecord>) {
    let status = match reconciled.outcome {
        ReconcileOutcome::Created => StatusCode::CREATED,
        ReconcileOutcome::Updated => StatusCode::OK,
    };
    (status, Json(reconciled.record))
}

pub async fn report_presence(
    State(state): State<AppState>,
    Json(req): Json<ReportPresenceRequest>,
) -> Result<(StatusCode, Json<AttendanceRecord>), AppError> {
    let reconciled = state.attendance.report_presence(req.teacher_id, req.present).await?;
    Ok(reconciled_response(reconciled))
}

pub async fn update_teacher_presence(
    State(state): State<AppState>,
    Path(teacher_id): Path<i64>,
    Json(req): Json<PresenceUpdate>,
) -> Result<(StatusCode, Json<AttendanceRecord>), AppError> {
    let reconciled = state.attendance.report_presence(teacher_id, req.present).await?;
    Ok(reconciled_response(reconciled))
}

pub async fn list_attendance(
    State(state): State<AppState>,
    Query(query): Query<DayQuery>,
) -> Result<Json<Vec<AttendanceRecord>>, AppError> {
    let records = state.attendance.records_for_day(query.day).await?;
    Ok(Json(records))
}

pub async fn teacher_attendance(
    State(state): State<AppState>,
    Path(teacher_id): Path<i64>,
) -> Result<Json<Vec<AttendanceRecord>>, AppError> {
    let records = state.attendance.history(teacher_id).await?;
    Ok(Json(records))
}

pub async fn run_reset(State(state): State<AppState>) -> Result<Json<ResetReport>, AppError> {
    let report = state.reset_job.sweep().await?;
    Ok(Json(report))
}
