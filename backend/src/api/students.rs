use std::collections::HashMap;

use axum::extract::State;
use axum::http::StatusCode;

use super::extract::{Json, Path};
use crate::db::repository;
use crate::error::AppError;
use crate::identity::student_email;
use crate::models::{
    AssignCampusRequest, Campus, ImportStats, NewStudentRequest, Student, StudentImportRow,
    StudentWithCampus, UpdateStudentRequest,
};
use crate::services::import_students;
use crate::state::AppState;

async fn ensure_campus(state: &AppState, campus_id: i64) -> Result<(), AppError> {
    if repository::find_campus_by_id(&state.db, campus_id).await?.is_none() {
        return Err(AppError::BadRequest(format!("Campus {} does not exist", campus_id)));
    }
    Ok(())
}

pub async fn list_students(
    State(state): State<AppState>,
) -> Result<Json<Vec<StudentWithCampus>>, AppError> {
    let campuses: HashMap<i64, Campus> = repository::fetch_campuses(&state.db)
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();

    let students = repository::fetch_students(&state.db)
        .await?
        .into_iter()
        .map(|student| StudentWithCampus {
            campus: student.campus_id.and_then(|id| campuses.get(&id).cloned()),
            student,
        })
        .collect();

    Ok(Json(students))
}

pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Student>, AppError> {
    let student = repository::find_student_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(student))
}

pub async fn create_student(
    State(state): State<AppState>,
    Json(req): Json<NewStudentRequest>,
) -> Result<(StatusCode, Json<Student>), AppError> {
    let campus_id = req
        .campus_id
        .as_ref()
        .and_then(|c| c.resolve())
        .ok_or_else(|| AppError::BadRequest("campusId is required".to_string()))?;
    ensure_campus(&state, campus_id).await?;

    let matricule = req.matricule.trim();
    if matricule.is_empty() {
        return Err(AppError::BadRequest("matricule is required".to_string()));
    }

    let email = student_email(matricule, &state.config.student_domain);
    let student = repository::insert_student(
        &state.db,
        matricule,
        req.first_name.trim(),
        req.last_name.trim(),
        &email,
        Some(campus_id),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(student)))
}

pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateStudentRequest>,
) -> Result<Json<Student>, AppError> {
    if let Some(campus_id) = req.campus_id {
        ensure_campus(&state, campus_id).await?;
    }

    let student = repository::update_student(&state.db, id, req)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(student))
}

pub async fn assign_campus(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<AssignCampusRequest>,
) -> Result<Json<Student>, AppError> {
    ensure_campus(&state, req.campus_id).await?;

    let student = repository::set_student_campus(&state.db, id, req.campus_id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(student))
}

pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if repository::delete_student(&state.db, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}

pub async fn import(
    State(state): State<AppState>,
    Json(rows): Json<Vec<StudentImportRow>>,
) -> Result<Json<ImportStats>, AppError> {
    let stats = import_students(&state.db, rows, &state.config.student_domain).await?;
    Ok(Json(stats))
}
