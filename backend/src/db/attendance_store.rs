use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::AttendanceRecord;

/// Bulk selector for sweeps over the attendance table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPredicate {
    On(NaiveDate),
    OnOrBefore(NaiveDate),
}

/// Keyed storage for attendance records.
///
/// The store owns the `(teacher_id, day)` uniqueness guarantee: `create` must
/// fail with [`AppError::Conflict`] when the key is taken, and every write is a
/// single atomic statement.
#[async_trait]
pub trait AttendanceStore: Send + Sync {
    async fn teacher_exists(&self, teacher_id: i64) -> Result<bool, AppError>;
    async fn find(&self, teacher_id: i64, day: NaiveDate) -> Result<Option<AttendanceRecord>, AppError>;
    async fn create(&self, teacher_id: i64, day: NaiveDate, present: bool) -> Result<AttendanceRecord, AppError>;
    async fn update(&self, id: i64, present: bool) -> Result<AttendanceRecord, AppError>;
    async fn bulk_set_present(&self, predicate: DayPredicate, present: bool) -> Result<u64, AppError>;
    async fn list_for_day(&self, day: NaiveDate) -> Result<Vec<AttendanceRecord>, AppError>;
    async fn list_for_teacher(&self, teacher_id: i64) -> Result<Vec<AttendanceRecord>, AppError>;
}

#[derive(Clone)]
pub struct SqliteAttendanceStore {
    db: SqlitePool,
}

impl SqliteAttendanceStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AttendanceStore for SqliteAttendanceStore {
    async fn teacher_exists(&self, teacher_id: i64) -> Result<bool, AppError> {
        let found: Option<i64> = sqlx::query_scalar("SELECT id FROM teachers WHERE id = ?")
            .bind(teacher_id)
            .fetch_optional(&self.db)
            .await?;
        Ok(found.is_some())
    }

    async fn find(&self, teacher_id: i64, day: NaiveDate) -> Result<Option<AttendanceRecord>, AppError> {
        let record = sqlx::query_as::<_, AttendanceRecord>(
            "SELECT id, teacher_id, day, present FROM attendance WHERE teacher_id = ? AND day = ?",
        )
        .bind(teacher_id)
        .bind(day)
        .fetch_optional(&self.db)
        .await?;
        Ok(record)
    }

    async fn create(&self, teacher_id: i64, day: NaiveDate, present: bool) -> Result<AttendanceRecord, AppError> {
        let record = sqlx::query_as::<_, AttendanceRecord>(
            r#"
            INSERT INTO attendance (teacher_id, day, present)
            VALUES (?1, ?2, ?3)
            RETURNING id, teacher_id, day, present
            "#,
        )
        .bind(teacher_id)
        .bind(day)
        .bind(present)
        .fetch_one(&self.db)
        .await?;
        Ok(record)
    }

    async fn update(&self, id: i64, present: bool) -> Result<AttendanceRecord, AppError> {
        sqlx::query_as::<_, AttendanceRecord>(
            r#"
            UPDATE attendance
            SET present = ?1
            WHERE id = ?2
            RETURNING id, teacher_id, day, present
            "#,
        )
        .bind(present)
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::NotFound)
    }

    async fn bulk_set_present(&self, predicate: DayPredicate, present: bool) -> Result<u64, AppError> {
        let query = match predicate {
            DayPredicate::On(day) => {
                sqlx::query("UPDATE attendance SET present = ?1 WHERE day = ?2").bind(present).bind(day)
            }
            DayPredicate::OnOrBefore(day) => {
                sqlx::query("UPDATE attendance SET present = ?1 WHERE day <= ?2").bind(present).bind(day)
            }
        };

        let affected = query.execute(&self.db).await?.rows_affected();
        Ok(affected)
    }

    async fn list_for_day(&self, day: NaiveDate) -> Result<Vec<AttendanceRecord>, AppError> {
        let records = sqlx::query_as::<_, AttendanceRecord>(
            "SELECT id, teacher_id, day, present FROM attendance WHERE day = ? ORDER BY teacher_id",
        )
        .bind(day)
        .fetch_all(&self.db)
        .await?;
        Ok(records)
    }

    async fn list_for_teacher(&self, teacher_id: i64) -> Result<Vec<AttendanceRecord>, AppError> {
        let records = sqlx::query_as::<_, AttendanceRecord>(
            "SELECT id, teacher_id, day, present FROM attendance WHERE teacher_id = ? ORDER BY day DESC",
        )
        .bind(teacher_id)
        .fetch_all(&self.db)
        .await?;
        Ok(records)
    }
}
