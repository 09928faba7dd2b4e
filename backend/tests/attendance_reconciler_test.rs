mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use campus_backend::db::{AttendanceStore, DayPredicate, SqliteAttendanceStore};
use campus_backend::error::AppError;
use campus_backend::models::AttendanceRecord;
use campus_backend::services::{AttendanceService, FixedClock, ReconcileOutcome};
use chrono::NaiveDate;
use tokio::sync::Mutex;

use common::{count_attendance, day, seed_teacher, test_pool};

fn service_on(store: Arc<dyn AttendanceStore>, today: NaiveDate) -> AttendanceService {
    AttendanceService::new(store, Arc::new(FixedClock::on(today)))
}

#[tokio::test]
async fn first_report_of_the_day_creates_the_record() {
    let pool = test_pool().await;
    let teacher = seed_teacher(&pool, "Jean", "Dupont").await;
    let today = day(2024, 3, 4);
    let service = service_on(Arc::new(SqliteAttendanceStore::new(pool.clone())), today);

    let result = service.report_presence(teacher.id, false).await.unwrap();

    assert_eq!(result.outcome, ReconcileOutcome::Created);
    assert_eq!(result.record.teacher_id, teacher.id);
    assert_eq!(result.record.day, today);
    assert!(!result.record.present);
    assert_eq!(count_attendance(&pool, teacher.id, today).await, 1);
}

#[tokio::test]
async fn second_report_updates_in_place() {
    let pool = test_pool().await;
    let teacher = seed_teacher(&pool, "Jean", "Dupont").await;
    let today = day(2024, 3, 4);
    let service = service_on(Arc::new(SqliteAttendanceStore::new(pool.clone())), today);

    let created = service.report_presence(teacher.id, false).await.unwrap();
    let updated = service.report_presence(teacher.id, true).await.unwrap();

    assert_eq!(updated.outcome, ReconcileOutcome::Updated);
    assert_eq!(updated.record.id, created.record.id);
    assert!(updated.record.present);
    assert_eq!(count_attendance(&pool, teacher.id, today).await, 1);
}

#[tokio::test]
async fn repeated_identical_reports_are_idempotent() {
    let pool = test_pool().await;
    let teacher = seed_teacher(&pool, "Jean", "Dupont").await;
    let today = day(2024, 3, 4);
    let service = service_on(Arc::new(SqliteAttendanceStore::new(pool.clone())), today);

    service.report_presence(teacher.id, true).await.unwrap();
    let again = service.report_presence(teacher.id, true).await.unwrap();

    assert!(again.record.present);
    assert_eq!(count_attendance(&pool, teacher.id, today).await, 1);
}

#[tokio::test]
async fn last_write_wins_sequentially() {
    let pool = test_pool().await;
    let teacher = seed_teacher(&pool, "Jean", "Dupont").await;
    let today = day(2024, 3, 4);
    let store = Arc::new(SqliteAttendanceStore::new(pool.clone()));
    let service = service_on(store.clone(), today);

    for present in [true, false, true, false] {
        service.report_presence(teacher.id, present).await.unwrap();
    }

    let stored = store.find(teacher.id, today).await.unwrap().unwrap();
    assert!(!stored.present);
}

#[tokio::test]
async fn a_new_day_gets_a_new_record() {
    let pool = test_pool().await;
    let teacher = seed_teacher(&pool, "Jean", "Dupont").await;
    let store: Arc<dyn AttendanceStore> = Arc::new(SqliteAttendanceStore::new(pool.clone()));

    service_on(store.clone(), day(2024, 3, 4))
        .report_presence(teacher.id, false)
        .await
        .unwrap();
    let next = service_on(store.clone(), day(2024, 3, 5))
        .report_presence(teacher.id, false)
        .await
        .unwrap();

    assert_eq!(next.outcome, ReconcileOutcome::Created);
    assert_eq!(store.list_for_teacher(teacher.id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn unknown_teacher_is_not_found_and_writes_nothing() {
    let pool = test_pool().await;
    let today = day(2024, 3, 4);
    let store = Arc::new(SqliteAttendanceStore::new(pool.clone()));
    let service = service_on(store.clone(), today);

    let err = service.report_presence(999, true).await.unwrap_err();

    assert!(matches!(err, AppError::NotFound));
    assert!(store.list_for_day(today).await.unwrap().is_empty());
}

/// Serializes writes to the wrapped store and remembers the value of the
/// write it applied last.
struct WriteOrderStore {
    inner: SqliteAttendanceStore,
    last_written: Mutex<Option<bool>>,
}

#[async_trait]
impl AttendanceStore for WriteOrderStore {
    async fn teacher_exists(&self, teacher_id: i64) -> Result<bool, AppError> {
        self.inner.teacher_exists(teacher_id).await
    }

    async fn find(&self, teacher_id: i64, day: NaiveDate) -> Result<Option<AttendanceRecord>, AppError> {
        self.inner.find(teacher_id, day).await
    }

    async fn create(&self, teacher_id: i64, day: NaiveDate, present: bool) -> Result<AttendanceRecord, AppError> {
        let mut last = self.last_written.lock().await;
        let record = self.inner.create(teacher_id, day, present).await?;
        *last = Some(record.present);
        Ok(record)
    }

    async fn update(&self, id: i64, present: bool) -> Result<AttendanceRecord, AppError> {
        let mut last = self.last_written.lock().await;
        let record = self.inner.update(id, present).await?;
        *last = Some(record.present);
        Ok(record)
    }

    async fn bulk_set_present(&self, predicate: DayPredicate, present: bool) -> Result<u64, AppError> {
        self.inner.bulk_set_present(predicate, present).await
    }

    async fn list_for_day(&self, day: NaiveDate) -> Result<Vec<AttendanceRecord>, AppError> {
        self.inner.list_for_day(day).await
    }

    async fn list_for_teacher(&self, teacher_id: i64) -> Result<Vec<AttendanceRecord>, AppError> {
        self.inner.list_for_teacher(teacher_id).await
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_reports_converge_to_one_row() {
    let pool = test_pool().await;
    let teacher = seed_teacher(&pool, "Jean", "Dupont").await;
    let today = day(2024, 3, 4);
    let store = Arc::new(WriteOrderStore {
        inner: SqliteAttendanceStore::new(pool.clone()),
        last_written: Mutex::new(None),
    });
    let service = Arc::new(service_on(store.clone(), today));

    let mut handles = Vec::new();
    for i in 0..16 {
        let service = service.clone();
        let teacher_id = teacher.id;
        handles.push(tokio::spawn(async move {
            service.report_presence(teacher_id, i % 2 == 0).await
        }));
    }

    let mut created = 0;
    for handle in handles {
        let result = handle.await.expect("task panicked").expect("report failed");
        if result.outcome == ReconcileOutcome::Created {
            created += 1;
        }
    }

    assert_eq!(created, 1);
    assert_eq!(count_attendance(&pool, teacher.id, today).await, 1);

    let stored = store.find(teacher.id, today).await.unwrap().unwrap();
    let last_written = *store.last_written.lock().await;
    assert_eq!(Some(stored.present), last_written);
}

/// Store whose `find` misses a configurable number of times before seeing a
/// row, and whose `create` always reports a lost race.
struct RacingStore {
    misses_before_hit: usize,
    finds: AtomicUsize,
    creates: AtomicUsize,
    updates: AtomicUsize,
}

impl RacingStore {
    fn new(misses_before_hit: usize) -> Self {
        Self {
            misses_before_hit,
            finds: AtomicUsize::new(0),
            creates: AtomicUsize::new(0),
            updates: AtomicUsize::new(0),
        }
    }

    fn record(present: bool) -> AttendanceRecord {
        AttendanceRecord {
            id: 1,
            teacher_id: 7,
            day: day(2024, 3, 4),
            present,
        }
    }
}

#[async_trait]
impl AttendanceStore for RacingStore {
    async fn teacher_exists(&self, _teacher_id: i64) -> Result<bool, AppError> {
        Ok(true)
    }

    async fn find(&self, _teacher_id: i64, _day: NaiveDate) -> Result<Option<AttendanceRecord>, AppError> {
        let seen = self.finds.fetch_add(1, Ordering::SeqCst);
        if seen < self.misses_before_hit {
            Ok(None)
        } else {
            Ok(Some(Self::record(true)))
        }
    }

    async fn create(&self, _teacher_id: i64, _day: NaiveDate, _present: bool) -> Result<AttendanceRecord, AppError> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        Err(AppError::Conflict("UNIQUE constraint failed".to_string()))
    }

    async fn update(&self, _id: i64, present: bool) -> Result<AttendanceRecord, AppError> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        Ok(Self::record(present))
    }

    async fn bulk_set_present(&self, _predicate: DayPredicate, _present: bool) -> Result<u64, AppError> {
        Ok(0)
    }

    async fn list_for_day(&self, _day: NaiveDate) -> Result<Vec<AttendanceRecord>, AppError> {
        Ok(Vec::new())
    }

    async fn list_for_teacher(&self, _teacher_id: i64) -> Result<Vec<AttendanceRecord>, AppError> {
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn lost_create_race_is_retried_as_an_update() {
    let store = Arc::new(RacingStore::new(1));
    let service = service_on(store.clone(), day(2024, 3, 4));

    let result = service.report_presence(7, false).await.unwrap();

    assert_eq!(result.outcome, ReconcileOutcome::Updated);
    assert!(!result.record.present);
    assert_eq!(store.creates.load(Ordering::SeqCst), 1);
    assert_eq!(store.updates.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn second_conflict_is_a_server_error() {
    let store = Arc::new(RacingStore::new(usize::MAX));
    let service = service_on(store.clone(), day(2024, 3, 4));

    let err = service.report_presence(7, true).await.unwrap_err();

    assert!(matches!(err, AppError::InternalServerError));
    assert_eq!(store.creates.load(Ordering::SeqCst), 2);
    assert_eq!(store.updates.load(Ordering::SeqCst), 0);
}
