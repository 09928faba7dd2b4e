use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::db::AttendanceStore;
use crate::error::AppError;
use crate::models::AttendanceRecord;
use crate::services::clock::Clock;

/// A create that loses the unique-key race is retried once; after that the
/// conflict is treated as a server fault rather than looping.
const MAX_CREATE_ATTEMPTS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReconcileOutcome {
    Created,
    Updated,
}

#[derive(Debug, Clone)]
pub struct Reconciled {
    pub record: AttendanceRecord,
    pub outcome: ReconcileOutcome,
}

/// Turns presence reports into a create-or-update against today's record.
pub struct AttendanceService {
    store: Arc<dyn AttendanceStore>,
    clock: Arc<dyn Clock>,
}

impl AttendanceService {
    pub fn new(store: Arc<dyn AttendanceStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub async fn report_presence(&self, teacher_id: i64, present: bool) -> Result<Reconciled, AppError> {
        if !self.store.teacher_exists(teacher_id).await? {
            return Err(AppError::NotFound);
        }

        let today = self.clock.today();
        let mut attempt = 0;

        loop {
            attempt += 1;

            if let Some(existing) = self.store.find(teacher_id, today).await? {
                let record = self.store.update(existing.id, present).await?;
                debug!("attendance updated: teacher={} day={} present={}", teacher_id, today, present);
                return Ok(Reconciled {
                    record,
                    outcome: ReconcileOutcome::Updated,
                });
            }

            match self.store.create(teacher_id, today, present).await {
                Ok(record) => {
                    info!("attendance created: teacher={} day={} present={}", teacher_id, today, present);
                    return Ok(Reconciled {
                        record,
                        outcome: ReconcileOutcome::Created,
                    });
                }
                Err(AppError::Conflict(msg)) if attempt < MAX_CREATE_ATTEMPTS => {
                    debug!("concurrent create for teacher={} day={}, retrying: {}", teacher_id, today, msg);
                }
                Err(AppError::Conflict(msg)) => {
                    warn!("attendance for teacher={} day={} still conflicting after retry: {}", teacher_id, today, msg);
                    return Err(AppError::InternalServerError);
                }
                Err(e) => return Err(e),
            }
        }
    }

    pub async fn records_for_day(&self, day: Option<chrono::NaiveDate>) -> Result<Vec<AttendanceRecord>, AppError> {
        let day = day.unwrap_or_else(|| self.clock.today());
        self.store.list_for_day(day).await
    }

    pub async fn history(&self, teacher_id: i64) -> Result<Vec<AttendanceRecord>, AppError> {
        if !self.store.teacher_exists(teacher_id).await? {
            return Err(AppError::NotFound);
        }
        self.store.list_for_teacher(teacher_id).await
    }
}
