use axum::extract::State;
use axum::http::StatusCode;

use super::extract::{Json, Path};
use crate::db::repository;
use crate::error::AppError;
use crate::models::{Campus, CampusRequest};
use crate::state::AppState;

fn validated_name(req: &CampusRequest) -> Result<&str, AppError> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Campus name is required".to_string()));
    }
    Ok(name)
}

pub async fn list_campuses(State(state): State<AppState>) -> Result<Json<Vec<Campus>>, AppError> {
    let campuses = repository::fetch_campuses(&state.db).await?;
    Ok(Json(campuses))
}

pub async fn get_campus(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Campus>, AppError> {
    let campus = repository::find_campus_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(campus))
}

pub async fn create_campus(
    State(state): State<AppState>,
    Json(req): Json<CampusRequest>,
) -> Result<(StatusCode, Json<Campus>), AppError> {
    let campus = repository::insert_campus(&state.db, validated_name(&req)?).await?;
    Ok((StatusCode::CREATED, Json(campus)))
}

pub async fn update_campus(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<CampusRequest>,
) -> Result<Json<Campus>, AppError> {
    let campus = repository::update_campus(&state.db, id, validated_name(&req)?)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(campus))
}

pub async fn delete_campus(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if repository::delete_campus(&state.db, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}
