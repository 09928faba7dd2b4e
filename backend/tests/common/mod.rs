#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::http::{Request, Response};
use campus_backend::config::{Config, GoogleConfig};
use campus_backend::db::{self, repository};
use campus_backend::identity::{IdentityProfile, StaticIdentityProvider};
use campus_backend::models::{Campus, Teacher};
use campus_backend::services::{Clock, ResetScope};
use campus_backend::state::AppState;
use chrono::{NaiveDate, NaiveTime};
use serde_json::Value;
use sqlx::SqlitePool;

pub const SECRET: &str = "test-secret";

/// In-memory database with the schema applied. One connection, so every
/// handle sees the same database.
pub async fn test_pool() -> SqlitePool {
    db::connect("sqlite::memory:", 1)
        .await
        .expect("Failed to create database")
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn test_config(reset_scope: ResetScope) -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
        jwt_secret: SECRET.to_string(),
        token_ttl_secs: 3600,
        google: GoogleConfig {
            client_id: "client".to_string(),
            client_secret: "secret".to_string(),
            redirect_url: "http://localhost/auth/google/callback".to_string(),
        },
        frontend_url: "http://localhost:5173".to_string(),
        student_domain: "etu.he2b.be".to_string(),
        staff_domain: "he2b.be".to_string(),
        reset_at: NaiveTime::from_hms_opt(0, 1, 0).expect("valid time"),
        reset_scope,
    }
}

pub fn test_state(pool: SqlitePool, clock: Arc<dyn Clock>, profile: Option<IdentityProfile>) -> AppState {
    AppState::new(
        pool,
        Arc::new(StaticIdentityProvider { profile }),
        clock,
        test_config(ResetScope::Today),
    )
}

pub async fn seed_campus(pool: &SqlitePool, name: &str) -> Campus {
    repository::insert_campus(pool, name)
        .await
        .expect("Failed to insert campus")
}

pub async fn seed_teacher(pool: &SqlitePool, first: &str, last: &str) -> Teacher {
    let email = format!("{}{}@he2b.be", first.to_lowercase(), last.to_lowercase());
    repository::insert_teacher(pool, first, last, &email, None)
        .await
        .expect("Failed to insert teacher")
}

/// Writes an attendance row directly, bypassing the reconciler.
pub async fn seed_attendance(pool: &SqlitePool, teacher_id: i64, on: NaiveDate, present: bool) {
    sqlx::query("INSERT INTO attendance (teacher_id, day, present) VALUES (?, ?, ?)")
        .bind(teacher_id)
        .bind(on)
        .bind(present)
        .execute(pool)
        .await
        .expect("Failed to insert attendance");
}

pub async fn count_attendance(pool: &SqlitePool, teacher_id: i64, on: NaiveDate) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM attendance WHERE teacher_id = ? AND day = ?")
        .bind(teacher_id)
        .bind(on)
        .fetch_one(pool)
        .await
        .expect("Failed to count attendance")
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("Failed to build request")
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("Failed to build request")
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}
