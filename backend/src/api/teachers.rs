use axum::extract::State;
use axum::http::StatusCode;
use serde_json::{Value, json};

use super::extract::{Json, Path};
use crate::db::repository;
use crate::error::AppError;
use crate::identity::teacher_email;
use crate::models::{NewTeacherRequest, Teacher, UpdateTeacherRequest};
use crate::state::AppState;

async fn ensure_campus(state: &AppState, campus_id: i64) -> Result<(), AppError> {
    if repository::find_campus_by_id(&state.db, campus_id).await?.is_none() {
        return Err(AppError::BadRequest(format!("Campus {} does not exist", campus_id)));
    }
    Ok(())
}

pub async fn list_teachers(State(state): State<AppState>) -> Result<Json<Vec<Teacher>>, AppError> {
    let teachers = repository::fetch_teachers(&state.db).await?;
    Ok(Json(teachers))
}

pub async fn get_teacher(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Teacher>, AppError> {
    let teacher = repository::find_teacher_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(teacher))
}

pub async fn get_teacher_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Teacher>, AppError> {
    let teacher = repository::find_teacher_by_email(&state.db, &email.trim().to_ascii_lowercase())
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(teacher))
}

pub async fn create_teacher(
    State(state): State<AppState>,
    Json(req): Json<NewTeacherRequest>,
) -> Result<(StatusCode, Json<Teacher>), AppError> {
    let (Some(first_name), Some(last_name), Some(campus_id)) = (
        req.first_name.as_deref().map(str::trim).filter(|s| !s.is_empty()),
        req.last_name.as_deref().map(str::trim).filter(|s| !s.is_empty()),
        req.campus_id,
    ) else {
        return Err(AppError::BadRequest("firstName, lastName and campusId are required".to_string()));
    };

    ensure_campus(&state, campus_id).await?;

    let email = teacher_email(first_name, last_name, &state.config.staff_domain);
    let teacher =
        repository::insert_teacher(&state.db, first_name, last_name, &email, Some(campus_id)).await?;
    Ok((StatusCode::CREATED, Json(teacher)))
}

pub async fn update_teacher(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateTeacherRequest>,
) -> Result<Json<Teacher>, AppError> {
    if let Some(campus_id) = req.campus_id {
        ensure_campus(&state, campus_id).await?;
    }

    let teacher = repository::update_teacher(&state.db, id, req)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(teacher))
}

pub async fn delete_teacher(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    if repository::delete_teacher(&state.db, id).await? {
        Ok(Json(json!({ "message": "Teacher deleted" })))
    } else {
        Err(AppError::NotFound)
    }
}
