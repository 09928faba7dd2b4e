use std::env;
use std::str::FromStr;

use chrono::NaiveTime;
use tracing::info;

use crate::error::AppError;
use crate::services::reset_job::ResetScope;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub jwt_secret: String,
    pub token_ttl_secs: u64,
    pub google: GoogleConfig,
    pub frontend_url: String,
    pub student_domain: String,
    pub staff_domain: String,
    pub reset_at: NaiveTime,
    pub reset_scope: ResetScope,
}

#[derive(Clone, Debug)]
pub struct GoogleConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            database_url: var_or("DATABASE_URL", "sqlite://campus.db?mode=rwc"),
            bind_addr: var_or("BIND_ADDR", "127.0.0.1:5000"),
            jwt_secret: required("JWT_SECRET")?,
            token_ttl_secs: parse_or("TOKEN_TTL_SECS", 604_800)?,
            google: GoogleConfig {
                client_id: required("GOOGLE_CLIENT_ID")?,
                client_secret: required("GOOGLE_CLIENT_SECRET")?,
                redirect_url: var_or(
                    "GOOGLE_REDIRECT_URL",
                    "http://localhost:5000/auth/google/callback",
                ),
            },
            frontend_url: var_or("FRONTEND_URL", "http://localhost:5173"),
            student_domain: var_or("STUDENT_DOMAIN", "etu.he2b.be"),
            staff_domain: var_or("STAFF_DOMAIN", "he2b.be"),
            reset_at: parse_reset_at(&var_or("RESET_AT", "00:01"))?,
            reset_scope: var_or("RESET_SCOPE", "today").parse()?,
        })
    }
}

fn required(key: &str) -> Result<String, AppError> {
    env::var(key).map_err(|_| AppError::Config(format!("{key} is not set")))
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    })
}

fn parse_or<T: FromStr>(key: &str, default: T) -> Result<T, AppError> {
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| AppError::Config(format!("{key} has an invalid value: {raw}"))),
        Err(_) => Ok(default),
    }
}

pub fn parse_reset_at(raw: &str) -> Result<NaiveTime, AppError> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M")
        .map_err(|_| AppError::Config(format!("RESET_AT must be HH:MM, got {raw}")))
}
