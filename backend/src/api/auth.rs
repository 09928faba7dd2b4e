use axum::extract::State;
use axum::response::Redirect;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{info, warn};

use super::extract::{Json, Query};
use crate::auth::{AuthUser, issue_state, issue_token, verify_state, verify_token};
use crate::db::repository;
use crate::error::AppError;
use crate::models::{CampusName, Principal, StudentProfile, UpdateProfileRequest};
use crate::services::account_service;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    token: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    token: String,
}

pub async fn google_login(State(state): State<AppState>) -> Result<Redirect, AppError> {
    let login_state = issue_state(&state.config.jwt_secret)?;
    let url = state.identity.authorization_url(&login_state)?;
    Ok(Redirect::to(&url))
}

pub async fn google_callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> Result<Redirect, AppError> {
    if let Some(error) = params.error {
        warn!("Google login refused: {}", error);
        return Err(AppError::Unauthorized(format!("Login refused: {}", error)));
    }

    let login_state = params
        .state
        .ok_or_else(|| AppError::Unauthorized("Missing login state".to_string()))?;
    verify_state(&login_state, &state.config.jwt_secret)?;

    let code = params
        .code
        .ok_or_else(|| AppError::BadRequest("Missing authorization code".to_string()))?;

    let profile = state.identity.exchange_code(&code).await?;
    let principal = account_service::resolve_login(&state.db, &profile, &state.config).await?;
    info!("{:?} {} authenticated", principal.role(), principal.email());

    let token = issue_token(
        principal.id(),
        principal.email(),
        principal.role(),
        &state.config.jwt_secret,
        state.config.token_ttl_secs,
    )?;

    Ok(Redirect::to(&format!(
        "{}/token?token={}",
        state.config.frontend_url.trim_end_matches('/'),
        token
    )))
}

pub async fn refresh_token(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let token = req
        .token
        .ok_or_else(|| AppError::Unauthorized("Token missing".to_string()))?;
    let claims = verify_token(&token, &state.config.jwt_secret)?;

    let token = issue_token(
        claims.sub,
        &claims.email,
        claims.role,
        &state.config.jwt_secret,
        state.config.token_ttl_secs,
    )?;
    Ok(Json(TokenResponse { token }))
}

pub async fn current_user(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<StudentProfile>, AppError> {
    let student = repository::find_student_by_email(&state.db, &claims.email)
        .await?
        .ok_or(AppError::NotFound)?;

    let campus = match student.campus_id {
        Some(id) => repository::find_campus_by_id(&state.db, id)
            .await?
            .map(|c| CampusName { name: c.name }),
        None => None,
    };

    Ok(Json(StudentProfile {
        id: student.id,
        email: student.email,
        first_name: student.first_name,
        last_name: student.last_name,
        campus,
    }))
}

pub async fn profile(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<Principal>, AppError> {
    let principal = account_service::load_principal(&state.db, &claims).await?;
    Ok(Json(principal))
}

pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<Principal>, AppError> {
    let (Some(first_name), Some(last_name)) = (
        req.first_name.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
        req.last_name.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
    ) else {
        return Err(AppError::BadRequest("firstName and lastName are required".to_string()));
    };

    let principal =
        account_service::rename_principal(&state.db, &claims, first_name, last_name).await?;
    Ok(Json(principal))
}

pub async fn logout() -> Json<Value> {
    Json(json!({ "message": "Logged out" }))
}
