mod common;

use std::sync::Arc;

use async_trait::async_trait;
use campus_backend::db::{AttendanceStore, DayPredicate, SqliteAttendanceStore};
use campus_backend::error::AppError;
use campus_backend::models::AttendanceRecord;
use campus_backend::services::{FixedClock, ResetJob, ResetScope};
use chrono::NaiveDate;

use common::{day, seed_attendance, seed_teacher, test_pool};

async fn present_on(store: &SqliteAttendanceStore, teacher_id: i64, on: NaiveDate) -> bool {
    store
        .find(teacher_id, on)
        .await
        .unwrap()
        .expect("record should exist")
        .present
}

#[tokio::test]
async fn today_scope_only_resets_the_current_day() {
    let pool = test_pool().await;
    let t1 = seed_teacher(&pool, "Anne", "Martin").await;
    let t2 = seed_teacher(&pool, "Paul", "Leroy").await;
    seed_attendance(&pool, t1.id, day(2024, 1, 1), false).await;
    seed_attendance(&pool, t2.id, day(2024, 1, 2), false).await;

    let store = Arc::new(SqliteAttendanceStore::new(pool.clone()));
    let job = ResetJob::new(store.clone(), Arc::new(FixedClock::on(day(2024, 1, 2))), ResetScope::Today);

    let report = job.sweep().await.unwrap();

    assert_eq!(report.affected, 1);
    assert_eq!(report.day, day(2024, 1, 2));
    assert!(!present_on(&store, t1.id, day(2024, 1, 1)).await);
    assert!(present_on(&store, t2.id, day(2024, 1, 2)).await);
}

#[tokio::test]
async fn through_today_scope_resets_history_too() {
    let pool = test_pool().await;
    let t1 = seed_teacher(&pool, "Anne", "Martin").await;
    let t2 = seed_teacher(&pool, "Paul", "Leroy").await;
    seed_attendance(&pool, t1.id, day(2024, 1, 1), false).await;
    seed_attendance(&pool, t2.id, day(2024, 1, 2), false).await;
    seed_attendance(&pool, t2.id, day(2024, 1, 3), false).await;

    let store = Arc::new(SqliteAttendanceStore::new(pool.clone()));
    let job = ResetJob::new(
        store.clone(),
        Arc::new(FixedClock::on(day(2024, 1, 2))),
        ResetScope::ThroughToday,
    );

    assert_eq!(job.run().await, Some(2));
    assert!(present_on(&store, t1.id, day(2024, 1, 1)).await);
    assert!(present_on(&store, t2.id, day(2024, 1, 2)).await);
    assert!(!present_on(&store, t2.id, day(2024, 1, 3)).await);
}

#[tokio::test]
async fn sweep_with_nothing_to_do_reports_zero() {
    let pool = test_pool().await;
    let store = Arc::new(SqliteAttendanceStore::new(pool));
    let job = ResetJob::new(store, Arc::new(FixedClock::on(day(2024, 1, 2))), ResetScope::Today);

    assert_eq!(job.run().await, Some(0));
}

#[tokio::test]
async fn back_to_back_sweeps_leave_the_same_state() {
    let pool = test_pool().await;
    let teacher = seed_teacher(&pool, "Anne", "Martin").await;
    seed_attendance(&pool, teacher.id, day(2024, 1, 1), false).await;
    seed_attendance(&pool, teacher.id, day(2024, 1, 2), false).await;

    let store = Arc::new(SqliteAttendanceStore::new(pool.clone()));
    let job = ResetJob::new(store.clone(), Arc::new(FixedClock::on(day(2024, 1, 2))), ResetScope::Today);

    let first = job.sweep().await.unwrap();
    let second = job.sweep().await.unwrap();

    assert_eq!(first.affected, second.affected);
    assert!(!present_on(&store, teacher.id, day(2024, 1, 1)).await);
    assert!(present_on(&store, teacher.id, day(2024, 1, 2)).await);
}

struct UnavailableStore;

#[async_trait]
impl AttendanceStore for UnavailableStore {
    async fn teacher_exists(&self, _teacher_id: i64) -> Result<bool, AppError> {
        Err(AppError::StoreUnavailable(sqlx::Error::PoolTimedOut))
    }

    async fn find(&self, _teacher_id: i64, _day: NaiveDate) -> Result<Option<AttendanceRecord>, AppError> {
        Err(AppError::StoreUnavailable(sqlx::Error::PoolTimedOut))
    }

    async fn create(&self, _teacher_id: i64, _day: NaiveDate, _present: bool) -> Result<AttendanceRecord, AppError> {
        Err(AppError::StoreUnavailable(sqlx::Error::PoolTimedOut))
    }

    async fn update(&self, _id: i64, _present: bool) -> Result<AttendanceRecord, AppError> {
        Err(AppError::StoreUnavailable(sqlx::Error::PoolTimedOut))
    }

    async fn bulk_set_present(&self, _predicate: DayPredicate, _present: bool) -> Result<u64, AppError> {
        Err(AppError::StoreUnavailable(sqlx::Error::PoolTimedOut))
    }

    async fn list_for_day(&self, _day: NaiveDate) -> Result<Vec<AttendanceRecord>, AppError> {
        Err(AppError::StoreUnavailable(sqlx::Error::PoolTimedOut))
    }

    async fn list_for_teacher(&self, _teacher_id: i64) -> Result<Vec<AttendanceRecord>, AppError> {
        Err(AppError::StoreUnavailable(sqlx::Error::PoolTimedOut))
    }
}

#[tokio::test]
async fn store_failure_is_swallowed_by_run() {
    let job = ResetJob::new(
        Arc::new(UnavailableStore),
        Arc::new(FixedClock::on(day(2024, 1, 2))),
        ResetScope::Today,
    );

    assert!(matches!(job.sweep().await, Err(AppError::StoreUnavailable(_))));
    assert_eq!(job.run().await, None);
}
