use std::collections::HashMap;

use axum::extract::State;
use axum::http::StatusCode;
use serde_json::{Value, json};

use super::extract::{Json, Path};
use crate::db::repository;
use crate::error::AppError;
use crate::models::{Campus, NewNewsRequest, News, NewsWithCampus, UpdateNewsRequest};
use crate::state::AppState;

pub async fn list_news(State(state): State<AppState>) -> Result<Json<Vec<NewsWithCampus>>, AppError> {
    let campuses: HashMap<i64, Campus> = repository::fetch_campuses(&state.db)
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();

    let news = repository::fetch_news(&state.db)
        .await?
        .into_iter()
        .map(|news| NewsWithCampus {
            campus: campuses.get(&news.campus_id).cloned(),
            news,
        })
        .collect();

    Ok(Json(news))
}

pub async fn list_campus_news(
    State(state): State<AppState>,
    Path(campus_id): Path<i64>,
) -> Result<Json<Vec<News>>, AppError> {
    let news = repository::fetch_news_by_campus(&state.db, campus_id).await?;
    Ok(Json(news))
}

pub async fn create_news(
    State(state): State<AppState>,
    Json(req): Json<NewNewsRequest>,
) -> Result<(StatusCode, Json<News>), AppError> {
    let (Some(title), Some(description), Some(campus_id)) = (
        req.title.as_deref().map(str::trim).filter(|s| !s.is_empty()),
        req.description.as_deref().map(str::trim).filter(|s| !s.is_empty()),
        req.campus_id,
    ) else {
        return Err(AppError::BadRequest("title, description and campusId are required".to_string()));
    };

    if repository::find_campus_by_id(&state.db, campus_id).await?.is_none() {
        return Err(AppError::BadRequest(format!("Campus {} does not exist", campus_id)));
    }

    let news = repository::insert_news(
        &state.db,
        title,
        description,
        req.image_url.as_deref(),
        req.links.as_deref(),
        campus_id,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(news)))
}

pub async fn update_news(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateNewsRequest>,
) -> Result<Json<News>, AppError> {
    let news = repository::update_news(&state.db, id, req)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(news))
}

pub async fn delete_news(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    if repository::delete_news(&state.db, id).await? {
        Ok(Json(json!({ "message": "News deleted" })))
    } else {
        Err(AppError::NotFound)
    }
}

pub async fn delete_news_by_title(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> Result<Json<Value>, AppError> {
    let deleted = repository::delete_news_by_title(&state.db, &title).await?;
    if deleted == 0 {
        return Err(AppError::NotFound);
    }
    Ok(Json(json!({ "message": "News deleted", "deleted": deleted })))
}
