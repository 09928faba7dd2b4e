use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::Role;

/// OAuth `state` tokens only need to survive one round trip to Google.
const STATE_TTL_SECS: u64 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Access,
    OauthState,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub email: String,
    pub role: Role,
    pub exp: u64,
    pub jti: String,
    pub kind: TokenKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StateClaims {
    exp: u64,
    jti: String,
    kind: TokenKind,
}

fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

pub fn issue_token(
    principal_id: i64,
    email: &str,
    role: Role,
    secret: &str,
    ttl_secs: u64,
) -> Result<String, AppError> {
    let claims = Claims {
        sub: principal_id,
        email: email.to_string(),
        role,
        exp: now() + ttl_secs,
        jti: Uuid::new_v4().to_string(),
        kind: TokenKind::Access,
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?)
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?
    .claims;

    if claims.kind != TokenKind::Access {
        return Err(AppError::Unauthorized("Not an access token".to_string()));
    }
    Ok(claims)
}

pub fn issue_state(secret: &str) -> Result<String, AppError> {
    let claims = StateClaims {
        exp: now() + STATE_TTL_SECS,
        jti: Uuid::new_v4().to_string(),
        kind: TokenKind::OauthState,
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?)
}

pub fn verify_state(state: &str, secret: &str) -> Result<(), AppError> {
    let claims = decode::<StateClaims>(
        state,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?
    .claims;

    if claims.kind != TokenKind::OauthState {
        return Err(AppError::Unauthorized("Invalid login state".to_string()));
    }
    Ok(())
}
